//! Configuration types for collar-scan

use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub collar: CollarConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Market data acquisition configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Base URL for the Tradier API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// File holding the Tradier bearer token
    #[serde(default = "default_key_path")]
    pub key_path: PathBuf,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    crate::market::TRADIER_SANDBOX_URL.to_string()
}
fn default_key_path() -> PathBuf {
    PathBuf::from("tradier_bearer.txt")
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            key_path: default_key_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Collar cost constants
#[derive(Debug, Clone, Deserialize)]
pub struct CollarConfig {
    /// Flat fee per option leg, one-lot minimum
    #[serde(default = "default_contract_cost")]
    pub contract_cost: Decimal,

    /// Option legs traded per collar when managing around pin risk
    #[serde(default = "default_actions_per_collar")]
    pub actions_per_collar: u32,

    /// Lending fees accrue at an annual rate but only pay out on trading days
    #[serde(default = "default_trading_days_per_year")]
    pub trading_days_per_year: Decimal,

    /// Share of the borrow rate the broker passes through to the lender
    #[serde(default = "default_fee_split")]
    pub fee_split: Decimal,

    /// Shares per option contract
    #[serde(default = "default_contract_size")]
    pub contract_size: Decimal,
}

fn default_contract_cost() -> Decimal {
    Decimal::ONE
}
fn default_actions_per_collar() -> u32 {
    4
}
fn default_trading_days_per_year() -> Decimal {
    Decimal::new(253, 0)
}
fn default_fee_split() -> Decimal {
    Decimal::new(5, 1) // 0.5
}
fn default_contract_size() -> Decimal {
    Decimal::new(100, 0)
}

impl Default for CollarConfig {
    fn default() -> Self {
        Self {
            contract_cost: default_contract_cost(),
            actions_per_collar: default_actions_per_collar(),
            trading_days_per_year: default_trading_days_per_year(),
            fee_split: default_fee_split(),
            contract_size: default_contract_size(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
