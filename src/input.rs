use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::presets::JobPreset;

/// Kind of job being quoted. Descriptive only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    #[default]
    BrandVideo,
    EventCoverage,
    Promotional,
    SocialContent,
    PhotoVideo,
    Other,
}

impl ProjectType {
    pub fn variants() -> &'static [(&'static str, &'static str)] {
        &[
            ("brand-video", "Brand Video"),
            ("event-coverage", "Event / Conference"),
            ("promotional", "Promotional Video"),
            ("social-content", "Social Content Package"),
            ("photo-video", "Photo + Video Bundle"),
            ("other", "Other"),
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::BrandVideo => "brand-video",
            ProjectType::EventCoverage => "event-coverage",
            ProjectType::Promotional => "promotional",
            ProjectType::SocialContent => "social-content",
            ProjectType::PhotoVideo => "photo-video",
            ProjectType::Other => "other",
        }
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brand-video" => Ok(ProjectType::BrandVideo),
            "event-coverage" => Ok(ProjectType::EventCoverage),
            "promotional" => Ok(ProjectType::Promotional),
            "social-content" => Ok(ProjectType::SocialContent),
            "photo-video" => Ok(ProjectType::PhotoVideo),
            "other" => Ok(ProjectType::Other),
            other => Err(format!("unknown project type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub project_type: ProjectType,
}

/// The five out-of-pocket cost buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostBucket {
    Crew,
    Travel,
    Equipment,
    Outsourcing,
    Other,
}

impl CostBucket {
    pub const ALL: [CostBucket; 5] = [
        CostBucket::Crew,
        CostBucket::Travel,
        CostBucket::Equipment,
        CostBucket::Outsourcing,
        CostBucket::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CostBucket::Crew => "Crew / Staff",
            CostBucket::Travel => "Travel",
            CostBucket::Equipment => "Equipment",
            CostBucket::Outsourcing => "Outsourcing",
            CostBucket::Other => "Other Direct",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DirectCosts {
    pub crew: f64,
    pub travel: f64,
    pub equipment: f64,
    pub outsourcing: f64,
    pub other: f64,
}

impl DirectCosts {
    pub fn new(crew: f64, travel: f64, equipment: f64, outsourcing: f64, other: f64) -> Self {
        Self {
            crew,
            travel,
            equipment,
            outsourcing,
            other,
        }
    }

    pub fn get(&self, bucket: CostBucket) -> f64 {
        match bucket {
            CostBucket::Crew => self.crew,
            CostBucket::Travel => self.travel,
            CostBucket::Equipment => self.equipment,
            CostBucket::Outsourcing => self.outsourcing,
            CostBucket::Other => self.other,
        }
    }

    pub fn with(mut self, bucket: CostBucket, value: f64) -> Self {
        match bucket {
            CostBucket::Crew => self.crew = value,
            CostBucket::Travel => self.travel = value,
            CostBucket::Equipment => self.equipment = value,
            CostBucket::Outsourcing => self.outsourcing = value,
            CostBucket::Other => self.other = value,
        }
        self
    }

    pub fn total(&self) -> f64 {
        self.crew + self.travel + self.equipment + self.outsourcing + self.other
    }
}

/// A numeric input field addressable by name from the CLI and HTTP front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Quote,
    Cost(CostBucket),
    TotalDays,
}

impl InputField {
    pub fn variants() -> &'static [(&'static str, &'static str)] {
        &[
            ("quote", "Quote / revenue (JPY)"),
            ("crew", "Crew / extra staff (JPY)"),
            ("travel", "Travel & accommodation (JPY)"),
            ("equipment", "Equipment rental (JPY)"),
            ("outsourcing", "Outsourcing / post-production (JPY)"),
            ("other", "Other direct costs (JPY)"),
            ("days", "Total project days"),
        ]
    }
}

impl FromStr for InputField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "quote" | "quoteAmount" => Ok(InputField::Quote),
            "crew" | "crewCost" => Ok(InputField::Cost(CostBucket::Crew)),
            "travel" | "travelCost" => Ok(InputField::Cost(CostBucket::Travel)),
            "equipment" | "equipmentCost" => Ok(InputField::Cost(CostBucket::Equipment)),
            "outsourcing" | "outsourcingCost" => Ok(InputField::Cost(CostBucket::Outsourcing)),
            "other" | "otherDirectCosts" => Ok(InputField::Cost(CostBucket::Other)),
            "days" | "totalDays" => Ok(InputField::TotalDays),
            other => Err(format!("unknown input field '{other}'")),
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputField::Quote => "quote",
            InputField::Cost(CostBucket::Crew) => "crew",
            InputField::Cost(CostBucket::Travel) => "travel",
            InputField::Cost(CostBucket::Equipment) => "equipment",
            InputField::Cost(CostBucket::Outsourcing) => "outsourcing",
            InputField::Cost(CostBucket::Other) => "other",
            InputField::TotalDays => "days",
        };
        f.write_str(name)
    }
}

/// Clamps a number into the calculator's domain: finite and non-negative, else 0.
pub fn coerce_value(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Coerces free-form user text to a non-negative amount. Anything unparsable becomes 0.
pub fn coerce_amount(text: &str) -> f64 {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | '¥' | '$'))
        .collect();
    cleaned.parse::<f64>().map(coerce_value).unwrap_or(0.0)
}

/// One complete set of calculator inputs. Updates consume the value and return a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorInput {
    pub quote_amount: f64,
    pub direct_costs: DirectCosts,
    pub total_days: f64,
    /// Days allocated per roster member id. Missing members count as zero.
    #[serde(default)]
    pub team_days: BTreeMap<String, f64>,
    #[serde(default = "default_include_overhead")]
    pub include_overhead: bool,
    #[serde(default)]
    pub project: ProjectDetails,
}

fn default_include_overhead() -> bool {
    true
}

impl Default for CalculatorInput {
    fn default() -> Self {
        let team_days = [
            ("andrew", 2.0),
            ("david", 3.0),
            ("robert", 2.0),
            ("paulina", 0.0),
            ("yuki", 0.0),
        ]
        .into_iter()
        .map(|(id, days)| (id.to_string(), days))
        .collect();

        Self {
            quote_amount: 2_000_000.0,
            direct_costs: DirectCosts::new(150_000.0, 100_000.0, 50_000.0, 80_000.0, 20_000.0),
            total_days: 5.0,
            team_days,
            include_overhead: true,
            project: ProjectDetails::default(),
        }
    }
}

impl CalculatorInput {
    pub fn with_quote(mut self, quote_amount: f64) -> Self {
        self.quote_amount = quote_amount;
        self
    }

    pub fn with_direct_cost(mut self, bucket: CostBucket, value: f64) -> Self {
        self.direct_costs = self.direct_costs.with(bucket, value);
        self
    }

    pub fn with_total_days(mut self, total_days: f64) -> Self {
        self.total_days = total_days;
        self
    }

    pub fn with_team_days(mut self, member_id: impl Into<String>, days: f64) -> Self {
        self.team_days.insert(member_id.into(), days);
        self
    }

    pub fn with_include_overhead(mut self, include_overhead: bool) -> Self {
        self.include_overhead = include_overhead;
        self
    }

    pub fn with_project(mut self, project: ProjectDetails) -> Self {
        self.project = project;
        self
    }

    pub fn with_field(self, field: InputField, value: f64) -> Self {
        match field {
            InputField::Quote => self.with_quote(value),
            InputField::Cost(bucket) => self.with_direct_cost(bucket, value),
            InputField::TotalDays => self.with_total_days(value),
        }
    }

    /// Replaces quote, cost buckets and total days. Team days, overhead and project details stay.
    pub fn apply_preset(mut self, preset: &JobPreset) -> Self {
        self.quote_amount = preset.revenue;
        self.direct_costs = preset.direct_costs();
        self.total_days = preset.days;
        self
    }

    /// Same input with every number passed through `coerce_value`.
    pub fn sanitized(mut self) -> Self {
        self.quote_amount = coerce_value(self.quote_amount);
        for bucket in CostBucket::ALL {
            let value = coerce_value(self.direct_costs.get(bucket));
            self.direct_costs = self.direct_costs.with(bucket, value);
        }
        self.total_days = coerce_value(self.total_days);
        for days in self.team_days.values_mut() {
            *days = coerce_value(*days);
        }
        self
    }

    pub fn team_days_for(&self, member_id: &str) -> f64 {
        self.team_days.get(member_id).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_amount_handles_garbage_and_separators() {
        assert_eq!(coerce_amount("abc"), 0.0);
        assert_eq!(coerce_amount(""), 0.0);
        assert_eq!(coerce_amount("-500"), 0.0);
        assert_eq!(coerce_amount("NaN"), 0.0);
        assert_eq!(coerce_amount("inf"), 0.0);
        assert_eq!(coerce_amount("¥1,250,000"), 1_250_000.0);
        assert_eq!(coerce_amount(" 2.5 "), 2.5);
    }

    #[test]
    fn sanitized_zeroes_negative_and_non_finite_numbers() {
        let input = CalculatorInput::default()
            .with_quote(-1.0)
            .with_direct_cost(CostBucket::Equipment, f64::NAN)
            .with_total_days(f64::INFINITY)
            .with_team_days("yuki", -3.0)
            .sanitized();
        assert_eq!(input.quote_amount, 0.0);
        assert_eq!(input.direct_costs.equipment, 0.0);
        assert_eq!(input.direct_costs.crew, 150_000.0);
        assert_eq!(input.total_days, 0.0);
        assert_eq!(input.team_days_for("yuki"), 0.0);
        assert_eq!(input.team_days_for("david"), 3.0);
    }

    #[test]
    fn field_names_accept_camel_case_aliases() {
        assert_eq!(
            "crewCost".parse::<InputField>(),
            Ok(InputField::Cost(CostBucket::Crew))
        );
        assert_eq!("days".parse::<InputField>(), Ok(InputField::TotalDays));
        assert!("salary".parse::<InputField>().is_err());
    }

    #[test]
    fn with_field_leaves_other_fields_alone() {
        let before = CalculatorInput::default();
        let after = before
            .clone()
            .with_field(InputField::Cost(CostBucket::Travel), 1.0);
        assert_eq!(after.direct_costs.travel, 1.0);
        assert_eq!(after.direct_costs.crew, before.direct_costs.crew);
        assert_eq!(after.quote_amount, before.quote_amount);
        assert_eq!(after.team_days, before.team_days);
    }

    #[test]
    fn input_json_uses_camel_case() {
        let json = serde_json::to_value(CalculatorInput::default()).unwrap();
        assert_eq!(json["quoteAmount"], 2_000_000.0);
        assert_eq!(json["directCosts"]["outsourcing"], 80_000.0);
        assert_eq!(json["teamDays"]["david"], 3.0);
        assert_eq!(json["project"]["projectType"], "brand-video");
    }
}
