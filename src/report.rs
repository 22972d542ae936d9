use crate::benchmarks::{BenchmarkZone, Benchmarks};
use crate::calculator::DashboardFigures;
use crate::format::{DisplayCurrency, format_currency, format_jpy, format_percent};
use crate::reference::ReferenceTable;
use crate::session::CalculatorSession;

const BAR_WIDTH: usize = 50;

fn push_row<'a>(
    out: &mut String,
    widths: &[usize],
    mut cells: impl Iterator<Item = &'a str>,
) {
    out.push('|');
    for w in widths {
        let cell = cells.next().unwrap_or("");
        out.push(' ');
        out.push_str(cell);
        out.push_str(&" ".repeat(w.saturating_sub(cell.chars().count())));
        out.push_str(" |");
    }
    out.push('\n');
}

/// Renders rows as a boxed plain-text table.
pub fn render_text_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (ci, cell) in row.iter().enumerate().take(widths.len()) {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    push_row(&mut out, &widths, headers.iter().copied());
    out.push_str(&sep);
    out.push('\n');
    for row in rows {
        push_row(&mut out, &widths, row.iter().map(String::as_str));
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn signed(value: f64, currency: DisplayCurrency, jpy_per_usd: f64) -> String {
    let sign = if value > 0.0 { "+" } else if value < 0.0 { "-" } else { "" };
    format!("{sign}{}", format_currency(value.abs(), currency, jpy_per_usd))
}

/// ASCII benchmark bar. `-` is the low zone, `~` ok, `=` great, and `|` marks the margin.
pub fn render_benchmark_bar(marker: f64, benchmarks: &Benchmarks) -> String {
    let cell_pct = 100.0 / BAR_WIDTH as f64;
    let marker_cell = ((marker / cell_pct).floor() as usize).min(BAR_WIDTH - 1);
    let mut bar = String::with_capacity(BAR_WIDTH + 2);
    bar.push('[');
    for cell in 0..BAR_WIDTH {
        if cell == marker_cell {
            bar.push('|');
            continue;
        }
        let pct = cell as f64 * cell_pct;
        bar.push(match BenchmarkZone::for_margin(pct, benchmarks) {
            BenchmarkZone::Low => '-',
            BenchmarkZone::Ok => '~',
            BenchmarkZone::Great => '=',
        });
    }
    bar.push(']');
    bar
}

pub fn render_dashboard(session: &CalculatorSession) -> String {
    let input = session.input();
    let config = session.config();
    let figures = DashboardFigures::build(input, config);
    let out = &figures.output;
    let currency = session.currency();
    let rate = config.jpy_per_usd;
    let money = |v: f64| format_currency(v, currency, rate);

    let mut text = String::new();
    if !input.project.name.is_empty() || !input.project.client.is_empty() {
        text.push_str(&format!(
            "Project: {} / Client: {} [{}]\n",
            input.project.name,
            input.project.client,
            input.project.project_type.as_str()
        ));
    }

    let overhead_note = if input.include_overhead {
        "after overhead"
    } else {
        "excl. overhead"
    };
    let cards = vec![
        vec![
            "Gross Profit".to_string(),
            signed(out.gross_profit, currency, rate),
            format!("{} margin", format_percent(out.gross_margin)),
            figures.rating_badge.clone(),
        ],
        vec![
            "Net Profit (Fully Loaded)".to_string(),
            signed(out.net_profit, currency, rate),
            format!("{} {}", format_percent(out.net_margin), overhead_note),
            if out.is_net_profitable() { "Take it" } else { "Pass" }.to_string(),
        ],
        vec![
            "Profit per Day".to_string(),
            signed(out.daily_profit, currency, rate),
            format!("{} working days", input.total_days),
            figures.daily_profit_trend.as_str().to_string(),
        ],
        vec![
            "Direct Costs".to_string(),
            money(out.total_direct_costs),
            format!("{} of quote", format_percent(figures.direct_cost_ratio)),
            String::new(),
        ],
    ];
    text.push_str(&render_text_table(&["Metric", "Value", "Detail", "Badge"], &cards));

    text.push_str(&format!(
        "Margin vs. benchmarks {}\nYour margin: {}, average was {}\n",
        render_benchmark_bar(figures.benchmark_marker, &config.benchmarks),
        format_percent(out.gross_margin),
        format_percent(figures.average_margin)
    ));

    let mut pnl = vec![
        vec!["Quote Amount".to_string(), format!("+{}", money(input.quote_amount))],
        vec!["Direct Costs".to_string(), format!("-{}", money(out.total_direct_costs))],
        vec!["Team Time".to_string(), format!("-{}", money(out.team_time_cost))],
    ];
    if input.include_overhead {
        pnl.push(vec![
            format!("Overhead ({}/day)", money(out.overhead_per_day)),
            format!("-{}", money(out.overhead_allocation)),
        ]);
    }
    pnl.push(vec!["Net Profit".to_string(), signed(out.net_profit, currency, rate)]);
    pnl.push(vec!["Net Margin".to_string(), format_percent(out.net_margin)]);
    text.push_str(&render_text_table(&["P&L", "Amount"], &pnl));

    text.push_str(&format!(
        "Daily revenue {} | Revenue per team-member-day {} ({} person-days)\n",
        money(out.daily_revenue),
        money(out.revenue_per_team_day),
        out.total_team_days
    ));
    text
}

pub fn render_team(session: &CalculatorSession) -> String {
    let input = session.input();
    let config = session.config();
    let currency = session.currency();
    let mut rows = Vec::with_capacity(config.roster.len());
    for member in config.roster.members() {
        let days = input.team_days_for(&member.id);
        rows.push(vec![
            member.id.clone(),
            member.name.clone(),
            days.to_string(),
            format!("{}/day", format_jpy(member.daily_rate)),
            format_currency(days * member.daily_rate, currency, config.jpy_per_usd),
        ]);
    }
    render_text_table(&["Id", "Member", "Days", "Rate", "Cost"], &rows)
}

pub fn render_breakdown(session: &CalculatorSession) -> String {
    let figures = session.dashboard();
    let currency = session.currency();
    let rate = session.config().jpy_per_usd;
    let rows: Vec<Vec<String>> = figures
        .breakdown
        .iter()
        .map(|line| {
            let filled = (line.bar_pct / 100.0 * 20.0).round() as usize;
            vec![
                line.label.clone(),
                format_currency(line.value, currency, rate),
                format_percent(line.share_pct),
                "#".repeat(filled.min(20)),
            ]
        })
        .collect();
    let mut text = render_text_table(&["Cost", "Amount", "Share", ""], &rows);
    text.push_str(&format!(
        "Total costs {} | Quote {} | Net profit {}\n",
        format_currency(figures.output.fully_loaded_costs, currency, rate),
        format_currency(session.input().quote_amount, currency, rate),
        signed(figures.output.net_profit, currency, rate)
    ));
    text
}

pub fn render_reference(
    table: &ReferenceTable,
    currency: DisplayCurrency,
    jpy_per_usd: f64,
) -> String {
    let summary = match table.summary() {
        Ok(summary) => summary,
        Err(err) => return format!("Reference table unavailable: {err}\n"),
    };
    let cells: Vec<Vec<String>> = summary
        .jobs
        .iter()
        .map(|row| {
            vec![
                row.job.clone(),
                format_currency(row.revenue, currency, jpy_per_usd),
                format_currency(row.costs, currency, jpy_per_usd),
                format_currency(row.profit, currency, jpy_per_usd),
                format_percent(row.margin),
                row.tier.as_str().to_string(),
            ]
        })
        .collect();
    let mut text = render_text_table(
        &["Job", "Revenue", "Costs", "Profit", "Margin", "Tier"],
        &cells,
    );
    text.push_str(&format!(
        "Average margin {} across {} jobs\n",
        format_percent(summary.average_margin),
        summary.jobs.len()
    ));
    text
}
