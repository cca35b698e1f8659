//! Quote command implementation

use clap::Args;

use crate::config::Config;
use crate::market::{load_api_key, MarketData, TradierClient, TradierConfig};

#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Stock symbol to look up
    pub symbol: String,
}

impl QuoteArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let symbol = super::normalize_symbol(&self.symbol);

        let api_key = load_api_key(&config.data.key_path)?;
        let client = TradierClient::with_config(&symbol, api_key, TradierConfig::from(&config.data));

        let quote = client.quote().await?;
        println!("{}  ask ${:.2}", quote.symbol, quote.ask.round_dp(2));

        Ok(())
    }
}
