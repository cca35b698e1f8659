//! CLI interface for collar-scan
//!
//! Provides subcommands for:
//! - `scan`: price and rank collar trades for a symbol
//! - `quote`: fetch the current stock quote
//! - `config`: show the effective configuration

mod quote;
mod scan;

pub use quote::QuoteArgs;
pub use scan::ScanArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "collar-scan")]
#[command(about = "Rank collar trades against fully-paid share lending income")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price and rank collar trades for a symbol
    Scan(ScanArgs),
    /// Fetch the current stock quote
    Quote(QuoteArgs),
    /// Show the effective configuration
    Config,
}

/// Strip the decorations people paste in with ticker symbols.
pub(crate) fn normalize_symbol(raw: &str) -> String {
    raw.replace([' ', '$'], "").to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol("$amc "), "AMC");
        assert_eq!(normalize_symbol("GME"), "GME");
    }
}
