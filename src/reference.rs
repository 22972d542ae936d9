use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Margin cut-offs used to colour the past-jobs table.
pub const STRONG_REFERENCE_MARGIN: f64 = 73.0;
pub const FAIR_REFERENCE_MARGIN: f64 = 53.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceJob {
    pub job: String,
    pub revenue: f64,
    pub costs: f64,
}

impl ReferenceJob {
    pub fn new(job: impl Into<String>, revenue: f64, costs: f64) -> Self {
        Self {
            job: job.into(),
            revenue,
            costs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceTier {
    Strong,
    Fair,
    Weak,
}

impl ReferenceTier {
    pub fn for_margin(margin: f64) -> Self {
        if margin >= STRONG_REFERENCE_MARGIN {
            ReferenceTier::Strong
        } else if margin >= FAIR_REFERENCE_MARGIN {
            ReferenceTier::Fair
        } else {
            ReferenceTier::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceTier::Strong => "strong",
            ReferenceTier::Fair => "fair",
            ReferenceTier::Weak => "weak",
        }
    }
}

/// One evaluated row of the reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRow {
    pub job: String,
    pub revenue: f64,
    pub costs: f64,
    pub profit: f64,
    pub margin: f64,
    pub tier: ReferenceTier,
}

/// Evaluated rows plus the mean margin across them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceSummary {
    pub jobs: Vec<ReferenceRow>,
    pub average_margin: f64,
}

/// 2025 past jobs, backed by a dataframe with derived `profit` and `margin` columns.
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    df: DataFrame,
}

impl ReferenceTable {
    pub fn default_schema() -> Schema {
        Schema::from_iter(vec![
            Field::new("job".into(), DataType::String),
            Field::new("revenue".into(), DataType::Float64),
            Field::new("costs".into(), DataType::Float64),
            Field::new("profit".into(), DataType::Float64),
            Field::new("margin".into(), DataType::Float64),
        ])
    }

    pub fn from_jobs(jobs: &[ReferenceJob]) -> PolarsResult<Self> {
        if jobs.is_empty() {
            return Ok(Self {
                df: DataFrame::empty_with_schema(&Self::default_schema()),
            });
        }

        let names: Vec<&str> = jobs.iter().map(|j| j.job.as_str()).collect();
        let revenues: Vec<f64> = jobs.iter().map(|j| j.revenue).collect();
        let costs: Vec<f64> = jobs.iter().map(|j| j.costs).collect();

        let base = DataFrame::new(vec![
            Series::new(PlSmallStr::from_static("job"), names.as_slice()).into_column(),
            Series::new(PlSmallStr::from_static("revenue"), revenues.as_slice()).into_column(),
            Series::new(PlSmallStr::from_static("costs"), costs.as_slice()).into_column(),
        ])?;

        let df = base
            .lazy()
            .with_column((col("revenue") - col("costs")).alias("profit"))
            .with_column(
                when(col("revenue").gt(lit(0.0)))
                    .then(col("profit") / col("revenue") * lit(100.0))
                    .otherwise(lit(f64::NAN))
                    .alias("margin"),
            )
            .collect()?;

        Ok(Self { df })
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn len(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    pub fn rows(&self) -> PolarsResult<Vec<ReferenceRow>> {
        let job = self.df.column("job")?.str()?;
        let revenue = self.df.column("revenue")?.f64()?;
        let costs = self.df.column("costs")?.f64()?;
        let profit = self.df.column("profit")?.f64()?;
        let margin = self.df.column("margin")?.f64()?;

        let mut rows = Vec::with_capacity(self.df.height());
        for idx in 0..self.df.height() {
            let margin_value = margin.get(idx).unwrap_or(f64::NAN);
            rows.push(ReferenceRow {
                job: job.get(idx).unwrap_or("").to_string(),
                revenue: revenue.get(idx).unwrap_or(0.0),
                costs: costs.get(idx).unwrap_or(0.0),
                profit: profit.get(idx).unwrap_or(0.0),
                margin: margin_value,
                tier: ReferenceTier::for_margin(margin_value),
            });
        }
        Ok(rows)
    }

    pub fn jobs(&self) -> PolarsResult<Vec<ReferenceJob>> {
        Ok(self
            .rows()?
            .into_iter()
            .map(|row| ReferenceJob::new(row.job, row.revenue, row.costs))
            .collect())
    }

    /// Mean margin across jobs with a positive revenue, or 0 when none.
    pub fn average_margin(&self) -> PolarsResult<f64> {
        let margin = self.df.column("margin")?.f64()?;
        let finite: Vec<f64> = margin.into_iter().flatten().filter(|m| m.is_finite()).collect();
        if finite.is_empty() {
            return Ok(0.0);
        }
        Ok(finite.iter().sum::<f64>() / finite.len() as f64)
    }

    pub fn summary(&self) -> PolarsResult<ReferenceSummary> {
        Ok(ReferenceSummary {
            jobs: self.rows()?,
            average_margin: self.average_margin()?,
        })
    }
}

pub fn default_reference_jobs() -> Vec<ReferenceJob> {
    vec![
        ReferenceJob::new("Tsubame (SeaSwallow) - Video/HP/Photos", 6_292_000.0, 1_499_500.0),
        ReferenceJob::new("HGI Kyoto - Brand Movie", 3_432_550.0, 900_000.0),
        ReferenceJob::new("Hilton Tokyo - MICE Video", 2_087_800.0, 400_000.0),
        ReferenceJob::new("Hilton Japan - Alan Watts", 1_485_979.0, 550_000.0),
        ReferenceJob::new("Hilton Worldwide - Alan Watts 2026", 1_094_030.0, 300_000.0),
        ReferenceJob::new("Hilton Fukuoka - F&B Conference", 954_800.0, 350_000.0),
        ReferenceJob::new("Seeds - Takayama Naoko Video", 825_000.0, 160_000.0),
        ReferenceJob::new("Elephant Stone - Canopy Filming", 665_235.0, 200_000.0),
        ReferenceJob::new("Hilton Odawara - Conference", 528_000.0, 250_000.0),
    ]
}

impl Default for ReferenceTable {
    fn default() -> Self {
        Self::from_jobs(&default_reference_jobs()).unwrap_or_else(|_| Self {
            df: DataFrame::empty_with_schema(&Self::default_schema()),
        })
    }
}
