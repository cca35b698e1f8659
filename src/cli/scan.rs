//! Scan command implementation

use chrono::Utc;
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::collar::{self, CollarCosts, CollarParameters};
use crate::config::Config;
use crate::market::{load_api_key, MarketData, TradierClient, TradierConfig};
use crate::report;

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Stock symbol to scan
    pub symbol: String,

    /// Share-lending utilization rate, as a percentage
    #[arg(short, long)]
    pub utilization: Decimal,

    /// Current annualized borrow rate, as a percentage
    #[arg(short, long)]
    pub borrow_rate: Decimal,

    /// Number of plays to show per ranking
    #[arg(long, default_value_t = collar::DEFAULT_TOP_N)]
    pub top: usize,
}

impl ScanArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let symbol = super::normalize_symbol(&self.symbol);
        let params =
            CollarParameters::new(self.utilization / dec!(100), self.borrow_rate / dec!(100))?;
        let costs = CollarCosts::from(&config.collar);

        let api_key = load_api_key(&config.data.key_path)?;
        let client = TradierClient::with_config(&symbol, api_key, TradierConfig::from(&config.data));

        let snapshot = client.gather().await?;
        tracing::info!(
            symbol = %snapshot.quote.symbol,
            ask = %snapshot.quote.ask,
            chain_count = snapshot.chains.len(),
            "Market snapshot ready"
        );

        let today = Utc::now().date_naive();
        let symmetric = collar::price_symmetric(&snapshot, &params, &costs, today);
        let asymmetric = collar::price_asymmetric(&snapshot, &params, &costs, today);
        tracing::info!(
            symmetric = symmetric.len(),
            asymmetric = asymmetric.len(),
            "Priced collar candidates"
        );

        report::print_rankings("symmetric", &symmetric, self.top);
        report::print_rankings("asymmetric", &asymmetric, self.top);

        Ok(())
    }
}
