use serde::{Deserialize, Serialize};
use std::fmt;

/// JPY per USD used for display conversion. Never feeds the profit model.
pub const DEFAULT_JPY_PER_USD: f64 = 150.0;

pub const DEFAULT_WORKING_DAYS_PER_MONTH: f64 = 20.0;

/// Margin benchmarks and fixed-cost figures drawn from the 2025 job history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benchmarks {
    /// Average gross margin across past jobs, in percent.
    pub avg_margin: f64,
    pub good_margin: f64,
    pub great_margin: f64,
    /// Lowest margin observed on a past job. Anything below rates `bad`.
    pub low_margin: f64,
    pub avg_job_revenue: f64,
    /// Total fixed monthly overhead in JPY.
    pub monthly_overhead: f64,
    pub working_days_per_month: f64,
}

impl Default for Benchmarks {
    fn default() -> Self {
        Self {
            avg_margin: 70.0,
            good_margin: 73.0,
            great_margin: 80.0,
            low_margin: 53.0,
            avg_job_revenue: 1_800_000.0,
            monthly_overhead: 2_476_000.0,
            working_days_per_month: DEFAULT_WORKING_DAYS_PER_MONTH,
        }
    }
}

impl Benchmarks {
    /// Share of monthly overhead carried by one working day. Zero when the divisor is not positive.
    pub fn overhead_per_day(&self) -> f64 {
        if self.working_days_per_month > 0.0 {
            self.monthly_overhead / self.working_days_per_month
        } else {
            0.0
        }
    }
}

/// Four-level health classification of gross margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginRating {
    Bad,
    Ok,
    Good,
    Great,
}

impl MarginRating {
    /// Inclusive lower bounds, checked greatest first.
    pub fn classify(gross_margin: f64, benchmarks: &Benchmarks) -> Self {
        if gross_margin >= benchmarks.great_margin {
            MarginRating::Great
        } else if gross_margin >= benchmarks.good_margin {
            MarginRating::Good
        } else if gross_margin >= benchmarks.low_margin {
            MarginRating::Ok
        } else {
            MarginRating::Bad
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarginRating::Great => "great",
            MarginRating::Good => "good",
            MarginRating::Ok => "ok",
            MarginRating::Bad => "bad",
        }
    }

    /// Short label shown on the gross profit card.
    pub fn badge(&self, benchmarks: &Benchmarks) -> String {
        match self {
            MarginRating::Great => format!("{}%+", benchmarks.great_margin),
            MarginRating::Good => format!("{}%+", benchmarks.good_margin),
            MarginRating::Ok => "OK".to_string(),
            MarginRating::Bad => "Low".to_string(),
        }
    }
}

impl fmt::Display for MarginRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a gross margin lands on the benchmark bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenchmarkZone {
    Low,
    Ok,
    Great,
}

impl BenchmarkZone {
    pub fn for_margin(gross_margin: f64, benchmarks: &Benchmarks) -> Self {
        if gross_margin >= benchmarks.good_margin {
            BenchmarkZone::Great
        } else if gross_margin >= benchmarks.low_margin {
            BenchmarkZone::Ok
        } else {
            BenchmarkZone::Low
        }
    }
}

/// Marker position on a 0..=100 bar.
pub fn benchmark_marker(gross_margin: f64) -> f64 {
    if gross_margin.is_nan() {
        return 0.0;
    }
    gross_margin.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        let b = Benchmarks::default();
        assert_eq!(MarginRating::classify(80.0, &b), MarginRating::Great);
        assert_eq!(MarginRating::classify(79.99, &b), MarginRating::Good);
        assert_eq!(MarginRating::classify(73.0, &b), MarginRating::Good);
        assert_eq!(MarginRating::classify(53.0, &b), MarginRating::Ok);
        assert_eq!(MarginRating::classify(52.9, &b), MarginRating::Bad);
        assert_eq!(MarginRating::classify(-40.0, &b), MarginRating::Bad);
    }

    #[test]
    fn badge_uses_configured_thresholds() {
        let b = Benchmarks::default();
        assert_eq!(MarginRating::Great.badge(&b), "80%+");
        assert_eq!(MarginRating::Good.badge(&b), "73%+");
        assert_eq!(MarginRating::Ok.badge(&b), "OK");
        assert_eq!(MarginRating::Bad.badge(&b), "Low");
    }

    #[test]
    fn marker_is_clamped() {
        assert_eq!(benchmark_marker(-12.0), 0.0);
        assert_eq!(benchmark_marker(140.0), 100.0);
        assert_eq!(benchmark_marker(64.5), 64.5);
    }

    #[test]
    fn overhead_per_day_guards_zero_divisor() {
        let mut b = Benchmarks::default();
        assert_eq!(b.overhead_per_day(), 123_800.0);
        b.working_days_per_month = 0.0;
        assert_eq!(b.overhead_per_day(), 0.0);
    }
}
