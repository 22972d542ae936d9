use serde::{Deserialize, Serialize};

/// A salaried team member whose time is charged to a project at a fixed daily rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Stable key used by `CalculatorInput::team_days`.
    pub id: String,
    /// Display name shown in dashboards.
    pub name: String,
    /// Monthly salary in JPY.
    pub monthly_salary: f64,
    /// Opportunity cost of one day of this member's time, in JPY.
    pub daily_rate: f64,
}

impl TeamMember {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        monthly_salary: f64,
        daily_rate: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            monthly_salary,
            daily_rate,
        }
    }

    /// Builds a member whose daily rate is the monthly salary spread over `working_days_per_month`.
    pub fn salaried(
        id: impl Into<String>,
        name: impl Into<String>,
        monthly_salary: f64,
        working_days_per_month: f64,
    ) -> Self {
        let daily_rate = if working_days_per_month > 0.0 {
            monthly_salary / working_days_per_month
        } else {
            0.0
        };
        Self::new(id, name, monthly_salary, daily_rate)
    }
}

/// Ordered roster of members whose days can be allocated to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamRoster {
    members: Vec<TeamMember>,
}

impl TeamRoster {
    pub fn new(members: Vec<TeamMember>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    pub fn get(&self, id: &str) -> Option<&TeamMember> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Default for TeamRoster {
    fn default() -> Self {
        let days = crate::benchmarks::DEFAULT_WORKING_DAYS_PER_MONTH;
        Self::new(vec![
            TeamMember::salaried("andrew", "Andrew", 450_000.0, days),
            TeamMember::salaried("david", "David", 450_000.0, days),
            TeamMember::salaried("robert", "Robert", 340_000.0, days),
            TeamMember::salaried("paulina", "Paulina", 300_000.0, days),
            TeamMember::salaried("yuki", "Yuki", 220_000.0, days),
        ])
    }
}
