use shoot_margin::{
    CalculatorConfig, CalculatorInput, CostBucket, DailyProfitTrend, MarginRating, calculate,
    cost_breakdown, direct_cost_ratio,
};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn scenario_one() -> CalculatorInput {
    CalculatorInput::default()
}

#[test]
fn default_job_matches_worked_example() {
    let config = CalculatorConfig::default();
    let out = calculate(&scenario_one(), &config);

    assert_eq!(out.total_direct_costs, 400_000.0);
    assert_eq!(out.gross_profit, 1_600_000.0);
    assert_close(out.gross_margin, 80.0);
    assert_eq!(out.team_time_cost, 146_500.0);
    assert_eq!(out.overhead_per_day, 123_800.0);
    assert_eq!(out.overhead_allocation, 619_000.0);
    assert_eq!(out.fully_loaded_costs, 1_165_500.0);
    assert_eq!(out.net_profit, 834_500.0);
    assert_close(out.net_margin, 41.725);
    assert_eq!(out.daily_revenue, 400_000.0);
    assert_eq!(out.daily_profit, 320_000.0);
    assert_eq!(out.total_team_days, 7.0);
    assert_close(out.revenue_per_team_day, 2_000_000.0 / 7.0);
    assert_eq!(out.margin_rating, MarginRating::Great);
}

#[test]
fn profit_identities_hold() {
    let config = CalculatorConfig::default();
    let inputs = vec![
        scenario_one(),
        scenario_one().with_quote(123_456.0).with_total_days(0.0),
        scenario_one()
            .with_direct_cost(CostBucket::Outsourcing, 3_000_000.0)
            .with_team_days("yuki", 4.5),
        scenario_one().with_include_overhead(false).with_total_days(12.0),
    ];

    for input in inputs {
        let out = calculate(&input, &config);
        let c = input.direct_costs;
        assert_eq!(
            out.total_direct_costs,
            c.crew + c.travel + c.equipment + c.outsourcing + c.other
        );
        assert_eq!(
            out.total_direct_costs,
            c.other + c.outsourcing + c.equipment + c.travel + c.crew
        );
        assert_eq!(out.gross_profit + out.total_direct_costs, input.quote_amount);
        assert_eq!(out.net_profit + out.fully_loaded_costs, input.quote_amount);
        assert_eq!(
            out.fully_loaded_costs,
            out.total_direct_costs + out.team_time_cost + out.overhead_allocation
        );
    }
}

#[test]
fn excluding_overhead_ignores_total_days() {
    let config = CalculatorConfig::default();
    for days in [0.0, 1.0, 5.0, 40.0] {
        let input = scenario_one()
            .with_include_overhead(false)
            .with_total_days(days);
        let out = calculate(&input, &config);
        assert_eq!(out.overhead_allocation, 0.0);
        assert_eq!(
            out.net_profit,
            input.quote_amount - out.total_direct_costs - out.team_time_cost
        );
    }
}

#[test]
fn zero_quote_yields_zero_margins() {
    let config = CalculatorConfig::default();
    let input = scenario_one().with_quote(0.0);
    let out = calculate(&input, &config);
    assert_eq!(out.gross_margin, 0.0);
    assert_eq!(out.net_margin, 0.0);
    assert_eq!(out.gross_profit, -400_000.0);
    assert_eq!(out.margin_rating, MarginRating::Bad);
    assert_eq!(direct_cost_ratio(&input, &out), 0.0);
}

#[test]
fn zero_days_and_team_days_yield_zero_rates() {
    let config = CalculatorConfig::default();
    let mut input = scenario_one().with_total_days(0.0);
    for id in ["andrew", "david", "robert", "paulina", "yuki"] {
        input = input.with_team_days(id, 0.0);
    }
    let out = calculate(&input, &config);
    assert_eq!(out.daily_revenue, 0.0);
    assert_eq!(out.daily_profit, 0.0);
    assert_eq!(out.total_team_days, 0.0);
    assert_eq!(out.revenue_per_team_day, 0.0);
    assert_eq!(out.overhead_allocation, 0.0);
}

#[test]
fn team_days_outside_roster_are_ignored() {
    let config = CalculatorConfig::default();
    let base = calculate(&scenario_one(), &config);
    let with_stranger = calculate(&scenario_one().with_team_days("freelancer", 10.0), &config);
    assert_eq!(with_stranger.team_time_cost, base.team_time_cost);
    assert_eq!(with_stranger.total_team_days, base.total_team_days);
}

#[test]
fn margin_rating_is_monotonic_in_gross_margin() {
    let config = CalculatorConfig::default();
    let mut previous = MarginRating::Bad;
    // Raising the quote with fixed costs raises gross margin.
    for step in 0..=60 {
        let quote = 400_000.0 + step as f64 * 50_000.0;
        let out = calculate(&scenario_one().with_quote(quote), &config);
        assert!(out.margin_rating >= previous, "rating dropped at quote {quote}");
        previous = out.margin_rating;
    }
    assert_eq!(previous, MarginRating::Great);
}

#[test]
fn breakdown_lists_overhead_only_when_included() {
    let config = CalculatorConfig::default();
    let input = scenario_one();
    let out = calculate(&input, &config);
    let lines = cost_breakdown(&input, &out);
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0].label, "Crew / Staff");
    assert_eq!(lines[6].label, "Overhead Share");
    let share_total: f64 = lines.iter().map(|l| l.share_pct).sum();
    assert!((share_total - 100.0).abs() < 1e-9);

    let input = input.with_include_overhead(false);
    let out = calculate(&input, &config);
    let lines = cost_breakdown(&input, &out);
    assert_eq!(lines.len(), 6);
    assert!(lines.iter().all(|l| l.label != "Overhead Share"));
}

#[test]
fn breakdown_with_no_costs_has_zero_shares() {
    let config = CalculatorConfig::default();
    let mut input = CalculatorInput::default()
        .with_include_overhead(false)
        .with_total_days(0.0);
    for bucket in CostBucket::ALL {
        input = input.with_direct_cost(bucket, 0.0);
    }
    for id in ["andrew", "david", "robert"] {
        input = input.with_team_days(id, 0.0);
    }
    let out = calculate(&input, &config);
    assert_eq!(out.fully_loaded_costs, 0.0);
    assert!(
        cost_breakdown(&input, &out)
            .iter()
            .all(|l| l.share_pct == 0.0 && l.bar_pct == 0.0)
    );
}

#[test]
fn daily_profit_trend_follows_profit_per_day() {
    let config = CalculatorConfig::default();
    let out = calculate(&scenario_one(), &config);
    assert_eq!(
        DailyProfitTrend::for_daily_profit(out.daily_profit),
        DailyProfitTrend::Positive
    );
}

#[test]
fn output_serializes_with_camel_case_names() {
    let out = calculate(&scenario_one(), &CalculatorConfig::default());
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["totalDirectCosts"], 400_000.0);
    assert_eq!(json["marginRating"], "great");
    assert_eq!(json["overheadAllocation"], 619_000.0);
}
