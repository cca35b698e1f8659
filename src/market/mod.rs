//! Market data module
//!
//! Domain types for quotes and option chains, plus acquisition from the
//! Tradier API. The pricing engine only ever sees a fully materialized
//! [`MarketSnapshot`]; everything network-facing lives behind [`MarketData`].

mod tradier;

pub use tradier::{load_api_key, TradierClient, TradierConfig, TRADIER_SANDBOX_URL};

use async_trait::async_trait;
use chrono::NaiveDate;
use futures_util::future;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Market data acquisition errors
#[derive(Debug, Error)]
pub enum DataError {
    /// Key file holding the bearer token was not found
    #[error("Problem with Tradier API key: no key file at {0}")]
    MissingApiKey(PathBuf),
    /// A double-extension sibling exists instead of the expected key file
    #[error("Problem with Tradier API key: found {0} instead, double-check the file name")]
    MisnamedKeyFile(PathBuf),
    /// Key file exists but does not hold a bearer token
    #[error("Problem with Tradier API key: expected a Bearer token in the key file")]
    MalformedApiKey,
    /// Could not read the key file
    #[error("Problem reading Tradier API key: {0}")]
    Io(#[from] std::io::Error),
    /// HTTP transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success status from the API
    #[error("Tradier API error: {status} - {body}")]
    Api { status: u16, body: String },
}

/// A stock quote at query time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Stock symbol (e.g., "AMC")
    pub symbol: String,
    /// Ask price, used downstream as the quick-fill assumption
    pub ask: Decimal,
}

/// Option contract type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

/// A single option contract within an expiration's chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionContract {
    /// OCC option symbol (e.g., "AMC260116C00010000")
    pub symbol: String,
    /// Strike price
    pub strike: Decimal,
    /// Call or put
    pub option_type: OptionType,
    /// Bid price
    pub bid: Decimal,
    /// Ask price
    pub ask: Decimal,
}

/// All contracts quoted for one expiration date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpirationChain {
    pub expiration: NaiveDate,
    pub contracts: Vec<OptionContract>,
}

/// One quote plus every expiration's chain, read-only after construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub quote: Quote,
    pub chains: Vec<ExpirationChain>,
}

/// Trait for market data providers
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Fetch the current stock quote
    async fn quote(&self) -> Result<Quote, DataError>;

    /// Fetch available option expiration dates
    async fn expirations(&self) -> Result<Vec<NaiveDate>, DataError>;

    /// Fetch the option chain for one expiration
    async fn chain(&self, expiration: NaiveDate) -> Result<ExpirationChain, DataError>;

    /// Materialize a full snapshot: quote plus every expiration's chain.
    ///
    /// Chain queries are independent reads, so they are issued concurrently.
    async fn gather(&self) -> Result<MarketSnapshot, DataError> {
        let quote = self.quote().await?;
        let expirations = self.expirations().await?;

        tracing::info!(
            symbol = %quote.symbol,
            expiration_count = expirations.len(),
            "Fetching option chains"
        );

        let chains =
            future::try_join_all(expirations.into_iter().map(|exp| self.chain(exp))).await?;

        Ok(MarketSnapshot { quote, chains })
    }
}
