//! collar-scan: ranks options-collar trades against share-lending income
//!
//! This library provides the core components for:
//! - Market snapshots (stock quote + option chains) from the Tradier API
//! - Collar pricing for symmetric and asymmetric strike combinations
//! - Ranking candidate trades by breakeven risk and by net payout
//! - Colored tabular console reports

pub mod cli;
pub mod collar;
pub mod config;
pub mod market;
pub mod report;
pub mod telemetry;
