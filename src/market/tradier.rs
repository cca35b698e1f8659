//! Tradier API client
//!
//! Fetches stock quotes, option expirations, and option chains from the
//! Tradier sandbox REST API. Every request carries a bearer token read from
//! a local key file, and the `X-Ratelimit-Available` response header is
//! tracked for throttle debugging.

use super::{DataError, ExpirationChain, MarketData, OptionContract, OptionType, Quote};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Tradier sandbox base URL
pub const TRADIER_SANDBOX_URL: &str = "https://sandbox.tradier.com";

/// Configuration for the Tradier client
#[derive(Debug, Clone)]
pub struct TradierConfig {
    /// Base URL for the Tradier API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for TradierConfig {
    fn default() -> Self {
        Self {
            base_url: TRADIER_SANDBOX_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl From<&crate::config::DataConfig> for TradierConfig {
    fn from(config: &crate::config::DataConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

/// Read and validate the bearer token used to query the API.
///
/// The token file must exist and contain a `Bearer` prefix. A
/// `<name>.txt.txt` sibling gets its own error since that misnaming is easy
/// to produce on Windows and hard to spot.
pub fn load_api_key(path: impl AsRef<Path>) -> Result<String, DataError> {
    let path = path.as_ref();

    if !path.is_file() {
        let misnamed = path.with_extension("txt.txt");
        if misnamed.is_file() {
            return Err(DataError::MisnamedKeyFile(misnamed));
        }
        return Err(DataError::MissingApiKey(path.to_path_buf()));
    }

    let key = std::fs::read_to_string(path)?.trim().to_string();
    if !key.contains("Bearer") {
        return Err(DataError::MalformedApiKey);
    }

    Ok(key)
}

/// Client for the Tradier market data API, pinned to one symbol per run
pub struct TradierClient {
    config: TradierConfig,
    client: Client,
    api_key: String,
    symbol: String,
}

impl TradierClient {
    /// Create a new client with default configuration
    pub fn new(symbol: impl Into<String>, api_key: String) -> Self {
        Self::with_config(symbol, api_key, TradierConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(symbol: impl Into<String>, api_key: String, config: TradierConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            client,
            api_key,
            symbol: symbol.into(),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, DataError> {
        let url = format!("{}{}", self.config.base_url, path);

        tracing::debug!(url = %url, "Querying Tradier API");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .header("Authorization", &self.api_key)
            .query(query)
            .send()
            .await?;

        if let Some(remaining) = response
            .headers()
            .get("X-Ratelimit-Available")
            .and_then(|v| v.to_str().ok())
        {
            tracing::debug!(calls_remaining = %remaining, "Tradier rate limit budget");
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl MarketData for TradierClient {
    async fn quote(&self) -> Result<Quote, DataError> {
        let envelope: QuotesEnvelope = self
            .get("/v1/markets/quotes", &[("symbols", self.symbol.as_str())])
            .await?;

        let quote = envelope.quotes.quote;
        Ok(Quote {
            symbol: quote.symbol,
            ask: quote.ask,
        })
    }

    async fn expirations(&self) -> Result<Vec<NaiveDate>, DataError> {
        let envelope: ExpirationsEnvelope = self
            .get(
                "/v1/markets/options/expirations",
                &[
                    ("symbol", self.symbol.as_str()),
                    ("includeAllRoots", "true"),
                    ("strikes", "false"),
                ],
            )
            .await?;

        Ok(envelope.expirations.map(|e| e.date).unwrap_or_default())
    }

    async fn chain(&self, expiration: NaiveDate) -> Result<ExpirationChain, DataError> {
        let date = expiration.format("%Y-%m-%d").to_string();
        let envelope: ChainsEnvelope = self
            .get(
                "/v1/markets/options/chains",
                &[
                    ("symbol", self.symbol.as_str()),
                    ("expiration", date.as_str()),
                    ("greeks", "true"),
                ],
            )
            .await?;

        let raw = envelope.options.map(|o| o.option).unwrap_or_default();
        let total = raw.len();

        // Contracts quoted without both sides are unusable downstream.
        let contracts: Vec<OptionContract> = raw
            .into_iter()
            .filter_map(|o| {
                let (bid, ask) = (o.bid?, o.ask?);
                Some(OptionContract {
                    symbol: o.symbol,
                    strike: o.strike,
                    option_type: o.option_type,
                    bid,
                    ask,
                })
            })
            .collect();

        if contracts.len() < total {
            tracing::debug!(
                expiration = %expiration,
                dropped = total - contracts.len(),
                "Dropped contracts with missing bid/ask"
            );
        }

        Ok(ExpirationChain {
            expiration,
            contracts,
        })
    }
}

/// Quotes response envelope
#[derive(Debug, Deserialize)]
struct QuotesEnvelope {
    quotes: QuotesBody,
}

#[derive(Debug, Deserialize)]
struct QuotesBody {
    quote: TradierQuote,
}

#[derive(Debug, Deserialize)]
struct TradierQuote {
    symbol: String,
    ask: Decimal,
}

/// Expirations response envelope
#[derive(Debug, Deserialize)]
struct ExpirationsEnvelope {
    expirations: Option<ExpirationsBody>,
}

#[derive(Debug, Deserialize)]
struct ExpirationsBody {
    date: Vec<NaiveDate>,
}

/// Option chain response envelope
#[derive(Debug, Deserialize)]
struct ChainsEnvelope {
    options: Option<ChainsBody>,
}

#[derive(Debug, Deserialize)]
struct ChainsBody {
    option: Vec<TradierOption>,
}

#[derive(Debug, Deserialize)]
struct TradierOption {
    symbol: String,
    strike: Decimal,
    option_type: OptionType,
    bid: Option<Decimal>,
    ask: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tradier_config_default() {
        let config = TradierConfig::default();
        assert_eq!(config.base_url, TRADIER_SANDBOX_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_client_creation() {
        let client = TradierClient::new("AMC", "Bearer abc123".to_string());
        assert_eq!(client.symbol, "AMC");
        assert_eq!(client.config.base_url, TRADIER_SANDBOX_URL);
    }

    #[test]
    fn test_load_api_key_missing() {
        let result = load_api_key("/nonexistent/tradier_bearer.txt");
        assert!(matches!(result, Err(DataError::MissingApiKey(_))));
    }

    #[test]
    fn test_quotes_envelope_parse() {
        let json = r#"{"quotes": {"quote": {"symbol": "AMC", "ask": 10.55, "bid": 10.50}}}"#;
        let envelope: QuotesEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.quotes.quote.symbol, "AMC");
        assert_eq!(envelope.quotes.quote.ask, dec!(10.55));
    }

    #[test]
    fn test_expirations_envelope_parse() {
        let json = r#"{"expirations": {"date": ["2026-08-21", "2026-09-18"]}}"#;
        let envelope: ExpirationsEnvelope = serde_json::from_str(json).unwrap();
        let dates = envelope.expirations.unwrap().date;
        assert_eq!(dates.len(), 2);
        assert_eq!(
            dates[0],
            NaiveDate::from_ymd_opt(2026, 8, 21).unwrap()
        );
    }

    #[test]
    fn test_expirations_envelope_empty() {
        let json = r#"{"expirations": null}"#;
        let envelope: ExpirationsEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.expirations.is_none());
    }

    #[test]
    fn test_chain_option_parse() {
        let json = r#"{
            "symbol": "AMC260116C00010000",
            "strike": 10.0,
            "option_type": "call",
            "bid": 1.05,
            "ask": 1.15
        }"#;
        let option: TradierOption = serde_json::from_str(json).unwrap();
        assert_eq!(option.option_type, OptionType::Call);
        assert_eq!(option.strike, dec!(10));
        assert_eq!(option.bid, Some(dec!(1.05)));
    }

    #[test]
    fn test_chain_option_null_bid() {
        let json = r#"{
            "symbol": "AMC260116P00010000",
            "strike": 10.0,
            "option_type": "put",
            "bid": null,
            "ask": 1.15
        }"#;
        let option: TradierOption = serde_json::from_str(json).unwrap();
        assert!(option.bid.is_none());
        assert_eq!(option.ask, Some(dec!(1.15)));
    }
}
