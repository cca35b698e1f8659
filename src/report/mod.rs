//! Console report rendering
//!
//! Renders ranked collar candidates as aligned tables with colored
//! highlights: profitable plays green, ITM calls yellow, OTM cyan.
//! Money and percentage cells round to two decimal places half-to-even
//! before display.

use std::collections::BTreeMap;

use colored::Colorize;
use rust_decimal::Decimal;

use crate::collar::{self, CandidateKey, CollarCandidate};

/// Column order is fixed so the two rankings align vertically.
const HEADERS: [&str; 10] = [
    "days_to_profit",
    "annualized_play_performance",
    "breakeven_borrow_rate",
    "call_moneyness",
    "estimated_payout",
    "cost_of_trade_per_day",
    "expiration_net",
    "strike",
    "expiration_date",
    "profitable",
];

/// Format a currency amount as `$<amt>` with two decimals
pub fn format_money(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

/// Format a percentage as `<pct>%` with two decimals
pub fn format_pct(value: Decimal) -> String {
    format!("{:.2}%", value.round_dp(2))
}

fn format_days(days: Option<i64>) -> String {
    match days {
        Some(days) => days.to_string(),
        None => "never".to_string(),
    }
}

fn row(candidate: &CollarCandidate) -> [String; 10] {
    [
        format_days(candidate.days_to_profit),
        format_pct(candidate.annualized_pct),
        format_pct(candidate.breakeven_borrow_rate_pct),
        candidate.call_moneyness.to_string(),
        format_money(candidate.net_payout),
        format_money(candidate.cost_per_day),
        format_money(candidate.expiration_net),
        format!("${}", candidate.strikes),
        candidate.expiration.format("%Y-%m-%d").to_string(),
        candidate.profitable.to_string(),
    ]
}

/// Highlight cells the way a trader scans for them. Padding happens before
/// coloring so escape codes never skew the column widths.
fn paint(padded: &str) -> String {
    match padded.trim_end() {
        "true" => padded.green().to_string(),
        "itm" => padded.yellow().to_string(),
        "otm" => padded.cyan().to_string(),
        _ => padded.to_string(),
    }
}

fn print_table(title: &str, candidates: &[&CollarCandidate]) {
    println!("{}", title.bold());

    if candidates.is_empty() {
        println!("  (no viable candidates)\n");
        return;
    }

    let rows: Vec<[String; 10]> = candidates.iter().map(|c| row(c)).collect();

    let mut widths: [usize; 10] = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let header_line = HEADERS
        .iter()
        .zip(&widths)
        .map(|(header, &width)| format!("{:<width$}", header))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", header_line);

    for row in &rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| paint(&format!("{:<width$}", cell)))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", line);
    }

    println!();
}

/// Print both rankings for one collar shape.
pub fn print_rankings(
    shape: &str,
    candidates: &BTreeMap<CandidateKey, CollarCandidate>,
    top: usize,
) {
    let by_risk = collar::top_by_risk(candidates, top);
    let by_profit = collar::top_by_profit(candidates, top);

    print_table(
        &format!("Top {} {} collar trades by risk factor:", top, shape),
        &by_risk,
    );
    print_table(
        &format!("Top {} most profitable {} collar trades:", top, shape),
        &by_profit,
    );
}
