use serde::{Deserialize, Serialize};

use crate::benchmarks::{BenchmarkZone, MarginRating, benchmark_marker};
use crate::config::CalculatorConfig;
use crate::input::{CalculatorInput, CostBucket};

/// Profit-per-day thresholds for the trend indicator, in JPY.
pub const STRONG_DAILY_PROFIT: f64 = 200_000.0;
pub const STEADY_DAILY_PROFIT: f64 = 100_000.0;

/// Every figure derived from one `CalculatorInput`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorOutput {
    pub total_direct_costs: f64,
    pub gross_profit: f64,
    pub gross_margin: f64,
    pub team_time_cost: f64,
    pub overhead_per_day: f64,
    pub overhead_allocation: f64,
    pub fully_loaded_costs: f64,
    pub net_profit: f64,
    pub net_margin: f64,
    pub daily_revenue: f64,
    pub daily_profit: f64,
    pub total_team_days: f64,
    pub revenue_per_team_day: f64,
    pub margin_rating: MarginRating,
}

impl CalculatorOutput {
    pub fn is_profitable(&self) -> bool {
        self.gross_profit > 0.0
    }

    pub fn is_net_profitable(&self) -> bool {
        self.net_profit > 0.0
    }
}

/// `numerator / denominator`, or 0 when the denominator is not positive.
fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

pub fn calculate(input: &CalculatorInput, config: &CalculatorConfig) -> CalculatorOutput {
    let quote = input.quote_amount;
    let benchmarks = &config.benchmarks;

    let total_direct_costs = input.direct_costs.total();
    let gross_profit = quote - total_direct_costs;
    let gross_margin = ratio_or_zero(gross_profit, quote) * 100.0;

    let mut team_time_cost = 0.0;
    let mut total_team_days = 0.0;
    for member in config.roster.members() {
        let days = input.team_days_for(&member.id);
        team_time_cost += days * member.daily_rate;
        total_team_days += days;
    }

    let overhead_per_day = benchmarks.overhead_per_day();
    let overhead_allocation = if input.include_overhead {
        input.total_days * overhead_per_day
    } else {
        0.0
    };

    let fully_loaded_costs = total_direct_costs + team_time_cost + overhead_allocation;
    let net_profit = quote - fully_loaded_costs;
    let net_margin = ratio_or_zero(net_profit, quote) * 100.0;

    CalculatorOutput {
        total_direct_costs,
        gross_profit,
        gross_margin,
        team_time_cost,
        overhead_per_day,
        overhead_allocation,
        fully_loaded_costs,
        net_profit,
        net_margin,
        daily_revenue: ratio_or_zero(quote, input.total_days),
        daily_profit: ratio_or_zero(gross_profit, input.total_days),
        total_team_days,
        revenue_per_team_day: ratio_or_zero(quote, total_team_days),
        margin_rating: MarginRating::classify(gross_margin, benchmarks),
    }
}

/// Direct costs as a share of the quote, in percent.
pub fn direct_cost_ratio(input: &CalculatorInput, output: &CalculatorOutput) -> f64 {
    ratio_or_zero(output.total_direct_costs, input.quote_amount) * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DailyProfitTrend {
    Positive,
    Neutral,
    Negative,
}

impl DailyProfitTrend {
    pub fn for_daily_profit(daily_profit: f64) -> Self {
        if daily_profit > STRONG_DAILY_PROFIT {
            DailyProfitTrend::Positive
        } else if daily_profit > STEADY_DAILY_PROFIT {
            DailyProfitTrend::Neutral
        } else {
            DailyProfitTrend::Negative
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DailyProfitTrend::Positive => "positive",
            DailyProfitTrend::Neutral => "neutral",
            DailyProfitTrend::Negative => "negative",
        }
    }
}

/// One line of the fully loaded cost breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostLine {
    pub label: String,
    pub value: f64,
    /// Share of fully loaded costs, in percent.
    pub share_pct: f64,
    /// `share_pct` capped at 100 for bar rendering.
    pub bar_pct: f64,
}

/// Cost lines in display order. The overhead line is present only when overhead is included.
pub fn cost_breakdown(input: &CalculatorInput, output: &CalculatorOutput) -> Vec<CostLine> {
    let mut items: Vec<(&str, f64)> = CostBucket::ALL
        .iter()
        .map(|bucket| (bucket.label(), input.direct_costs.get(*bucket)))
        .collect();
    items.push(("Team Time (salaries)", output.team_time_cost));
    if input.include_overhead {
        items.push(("Overhead Share", output.overhead_allocation));
    }

    items
        .into_iter()
        .map(|(label, value)| {
            let share_pct = ratio_or_zero(value, output.fully_loaded_costs) * 100.0;
            CostLine {
                label: label.to_string(),
                value,
                share_pct,
                bar_pct: share_pct.min(100.0),
            }
        })
        .collect()
}

/// Everything the dashboard shows beyond the raw output record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardFigures {
    pub output: CalculatorOutput,
    pub direct_cost_ratio: f64,
    pub rating_badge: String,
    pub benchmark_marker: f64,
    pub benchmark_zone: BenchmarkZone,
    pub average_margin: f64,
    pub daily_profit_trend: DailyProfitTrend,
    pub breakdown: Vec<CostLine>,
}

impl DashboardFigures {
    pub fn build(input: &CalculatorInput, config: &CalculatorConfig) -> Self {
        let output = calculate(input, config);
        let benchmarks = &config.benchmarks;
        Self {
            direct_cost_ratio: direct_cost_ratio(input, &output),
            rating_badge: output.margin_rating.badge(benchmarks),
            benchmark_marker: benchmark_marker(output.gross_margin),
            benchmark_zone: BenchmarkZone::for_margin(output.gross_margin, benchmarks),
            average_margin: benchmarks.avg_margin,
            daily_profit_trend: DailyProfitTrend::for_daily_profit(output.daily_profit),
            breakdown: cost_breakdown(input, &output),
            output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_or_zero_handles_zero_and_negative_denominators() {
        assert_eq!(ratio_or_zero(10.0, 0.0), 0.0);
        assert_eq!(ratio_or_zero(10.0, -2.0), 0.0);
        assert_eq!(ratio_or_zero(10.0, 4.0), 2.5);
    }

    #[test]
    fn daily_profit_trend_boundaries_are_exclusive() {
        assert_eq!(
            DailyProfitTrend::for_daily_profit(200_000.0),
            DailyProfitTrend::Neutral
        );
        assert_eq!(
            DailyProfitTrend::for_daily_profit(200_001.0),
            DailyProfitTrend::Positive
        );
        assert_eq!(
            DailyProfitTrend::for_daily_profit(100_000.0),
            DailyProfitTrend::Negative
        );
    }
}
