//! Collar pricing types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Collar pricing errors
#[derive(Debug, Error)]
pub enum CollarError {
    /// Parameter outside its valid range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(&'static str),
}

/// Trader-supplied inputs, both as fractions (0.5 = 50%).
///
/// Rates above 1 are accepted; they are implausible but not invalid.
#[derive(Debug, Clone, Copy)]
pub struct CollarParameters {
    utilization: Decimal,
    borrow_rate: Decimal,
}

impl CollarParameters {
    /// Validate and construct. Negative rates are rejected here so the
    /// engine never sees them.
    pub fn new(utilization: Decimal, borrow_rate: Decimal) -> Result<Self, CollarError> {
        if utilization < Decimal::ZERO {
            return Err(CollarError::InvalidParameter(
                "utilization must be non-negative",
            ));
        }
        if borrow_rate < Decimal::ZERO {
            return Err(CollarError::InvalidParameter(
                "borrow rate must be non-negative",
            ));
        }
        Ok(Self {
            utilization,
            borrow_rate,
        })
    }

    /// Fraction of lent shares actually borrowed
    pub fn utilization(&self) -> Decimal {
        self.utilization
    }

    /// Annualized borrow rate
    pub fn borrow_rate(&self) -> Decimal {
        self.borrow_rate
    }
}

/// Per-run cost constants for collar pricing
#[derive(Debug, Clone)]
pub struct CollarCosts {
    /// Flat fee per option leg
    pub contract_cost: Decimal,
    /// Option legs traded per collar when managing around pin risk
    pub actions_per_collar: u32,
    /// Trading days per year; fees accrue annually but pay out on trading days
    pub trading_days_per_year: Decimal,
    /// Lender's share of the borrow-rate income
    pub fee_split: Decimal,
    /// Shares per option contract
    pub contract_size: Decimal,
}

impl CollarCosts {
    /// Factor converting an annual APR into a trading-day-paid rate
    pub fn loan_adjusted_rate(&self) -> Decimal {
        self.trading_days_per_year / Decimal::new(365, 0)
    }

    /// Total option fees for one collar
    pub fn fees_per_collar(&self) -> Decimal {
        self.contract_cost * Decimal::from(self.actions_per_collar)
    }
}

impl Default for CollarCosts {
    fn default() -> Self {
        Self::from(&crate::config::CollarConfig::default())
    }
}

impl From<&crate::config::CollarConfig> for CollarCosts {
    fn from(config: &crate::config::CollarConfig) -> Self {
        Self {
            contract_cost: config.contract_cost,
            actions_per_collar: config.actions_per_collar,
            trading_days_per_year: config.trading_days_per_year,
            fee_split: config.fee_split,
            contract_size: config.contract_size,
        }
    }
}

/// Call-leg moneyness relative to the stock ask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Moneyness {
    Itm,
    Otm,
}

impl fmt::Display for Moneyness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Moneyness::Itm => write!(f, "itm"),
            Moneyness::Otm => write!(f, "otm"),
        }
    }
}

/// Strike legs of a candidate collar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CollarStrikes {
    /// Sold call and bought put at the same strike
    Symmetric(Decimal),
    /// Different strikes for the two legs
    Split { call: Decimal, put: Decimal },
}

impl fmt::Display for CollarStrikes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollarStrikes::Symmetric(strike) => write!(f, "{:.2}", strike.round_dp(2)),
            CollarStrikes::Split { call, put } => {
                write!(f, "{}c/{}p", call.normalize(), put.normalize())
            }
        }
    }
}

/// Composite map key for priced candidates.
///
/// Keying on (expiration, strikes) rather than a synthesized display
/// identifier rules out silent overwrites when two combinations would
/// render the same tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CandidateKey {
    pub expiration: NaiveDate,
    pub call_strike: Decimal,
    pub put_strike: Decimal,
}

/// One evaluated strike combination. Immutable after creation.
#[derive(Debug, Clone, Serialize)]
pub struct CollarCandidate {
    /// Display identifier: OCC symbol for symmetric plays, "{c}c/{p}p" tag otherwise
    pub label: String,
    /// Strike legs
    pub strikes: CollarStrikes,
    /// Expiration date
    pub expiration: NaiveDate,
    /// Calendar days from valuation to expiration
    pub days_remaining: i64,
    /// Call-leg moneyness
    pub call_moneyness: Moneyness,
    /// Net premium at expiration: positive = credit, negative = debit
    pub expiration_net: Decimal,
    /// Up-front cost of establishing the collar (zero for credits)
    pub cost_of_trade: Decimal,
    /// Cost amortized over the days remaining
    pub cost_per_day: Decimal,
    /// Days of lending income needed to cover the cost; `None` = never
    pub days_to_profit: Option<i64>,
    /// Estimated lending payout over the holding period, net of cost
    pub net_payout: Decimal,
    /// Annualized play performance, percent
    pub annualized_pct: Decimal,
    /// Borrow rate at which the play breaks even, percent
    pub breakeven_borrow_rate_pct: Decimal,
    /// Whether the play breaks even strictly before expiration
    pub profitable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parameters_accept_zero_and_above_one() {
        assert!(CollarParameters::new(dec!(0), dec!(0)).is_ok());
        assert!(CollarParameters::new(dec!(1.5), dec!(2)).is_ok());
    }

    #[test]
    fn test_parameters_reject_negative_utilization() {
        let result = CollarParameters::new(dec!(-0.1), dec!(0.04));
        assert!(matches!(result, Err(CollarError::InvalidParameter(_))));
    }

    #[test]
    fn test_parameters_reject_negative_borrow_rate() {
        let result = CollarParameters::new(dec!(0.5), dec!(-0.04));
        assert!(matches!(result, Err(CollarError::InvalidParameter(_))));
    }

    #[test]
    fn test_costs_derivations() {
        let costs = CollarCosts::default();
        assert_eq!(costs.fees_per_collar(), dec!(4));
        assert_eq!(
            costs.loan_adjusted_rate(),
            dec!(253) / dec!(365)
        );
    }

    #[test]
    fn test_strikes_display() {
        let symmetric = CollarStrikes::Symmetric(dec!(10));
        assert_eq!(symmetric.to_string(), "10.00");

        let split = CollarStrikes::Split {
            call: dec!(105.0),
            put: dec!(95.5),
        };
        assert_eq!(split.to_string(), "105c/95.5p");
    }

    #[test]
    fn test_candidate_key_ordering() {
        let earlier = CandidateKey {
            expiration: NaiveDate::from_ymd_opt(2026, 8, 21).unwrap(),
            call_strike: dec!(10),
            put_strike: dec!(10),
        };
        let later = CandidateKey {
            expiration: NaiveDate::from_ymd_opt(2026, 9, 18).unwrap(),
            call_strike: dec!(5),
            put_strike: dec!(5),
        };
        assert!(earlier < later);
    }
}
