//! End-to-end pipeline tests: fixture provider -> snapshot -> pricing -> ranking

use async_trait::async_trait;
use chrono::NaiveDate;
use collar_scan::collar::{self, CollarCosts, CollarParameters};
use collar_scan::market::{
    DataError, ExpirationChain, MarketData, OptionContract, OptionType, Quote,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Canned market data standing in for the Tradier API
struct FixtureProvider {
    quote: Quote,
    chains: Vec<ExpirationChain>,
}

#[async_trait]
impl MarketData for FixtureProvider {
    async fn quote(&self) -> Result<Quote, DataError> {
        Ok(self.quote.clone())
    }

    async fn expirations(&self) -> Result<Vec<NaiveDate>, DataError> {
        Ok(self.chains.iter().map(|c| c.expiration).collect())
    }

    async fn chain(&self, expiration: NaiveDate) -> Result<ExpirationChain, DataError> {
        Ok(self
            .chains
            .iter()
            .find(|c| c.expiration == expiration)
            .cloned()
            .expect("fixture chain"))
    }
}

fn contract(
    symbol: &str,
    strike: Decimal,
    option_type: OptionType,
    bid: Decimal,
    ask: Decimal,
) -> OptionContract {
    OptionContract {
        symbol: symbol.to_string(),
        strike,
        option_type,
        bid,
        ask,
    }
}

fn both_sides(strike: Decimal, call_bid: Decimal, put_ask: Decimal) -> Vec<OptionContract> {
    let tag = strike.normalize();
    vec![
        contract(
            &format!("TSTC{}", tag),
            strike,
            OptionType::Call,
            call_bid,
            call_bid + dec!(0.10),
        ),
        contract(
            &format!("TSTP{}", tag),
            strike,
            OptionType::Put,
            put_ask - dec!(0.10),
            put_ask,
        ),
    ]
}

fn fixture() -> FixtureProvider {
    let near = NaiveDate::from_ymd_opt(2026, 9, 4).unwrap();
    let far = NaiveDate::from_ymd_opt(2026, 12, 18).unwrap();

    let mut near_contracts = Vec::new();
    near_contracts.extend(both_sides(dec!(9), dec!(1.45), dec!(0.35)));
    near_contracts.extend(both_sides(dec!(10), dec!(0.80), dec!(0.70)));
    near_contracts.extend(both_sides(dec!(11), dec!(0.35), dec!(1.40)));

    let mut far_contracts = Vec::new();
    far_contracts.extend(both_sides(dec!(10), dec!(1.30), dec!(1.10)));
    far_contracts.extend(both_sides(dec!(12), dec!(0.55), dec!(2.60)));

    FixtureProvider {
        quote: Quote {
            symbol: "TST".to_string(),
            ask: dec!(10.00),
        },
        chains: vec![
            ExpirationChain {
                expiration: near,
                contracts: near_contracts,
            },
            ExpirationChain {
                expiration: far,
                contracts: far_contracts,
            },
        ],
    }
}

fn params() -> CollarParameters {
    CollarParameters::new(dec!(0.9), dec!(0.45)).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()
}

#[tokio::test]
async fn test_gather_materializes_all_chains() {
    let snapshot = fixture().gather().await.unwrap();

    assert_eq!(snapshot.quote.symbol, "TST");
    assert_eq!(snapshot.chains.len(), 2);
    // Chains come back in expiration order.
    assert!(snapshot.chains[0].expiration < snapshot.chains[1].expiration);
}

#[tokio::test]
async fn test_symmetric_pipeline_end_to_end() {
    let snapshot = fixture().gather().await.unwrap();
    let candidates =
        collar::price_symmetric(&snapshot, &params(), &CollarCosts::default(), today());

    // One candidate per strike quoted both sides: 3 near + 2 far.
    assert_eq!(candidates.len(), 5);

    let by_risk = collar::top_by_risk(&candidates, 5);
    let by_profit = collar::top_by_profit(&candidates, 5);
    assert_eq!(by_risk.len(), 5);
    assert_eq!(by_profit.len(), 5);

    // The 9-strike collar is a credit: zero cost, breakeven on day zero.
    let nine = by_risk[0];
    assert_eq!(nine.label, "TSTC9");
    assert_eq!(nine.cost_of_trade, Decimal::ZERO);
    assert_eq!(nine.days_to_profit, Some(0));
    assert!(nine.profitable);

    // Every candidate obeys the cost invariants.
    for candidate in candidates.values() {
        assert!(candidate.cost_of_trade >= Decimal::ZERO);
        assert!(candidate.cost_per_day >= Decimal::ZERO);
        if candidate.expiration_net > Decimal::ZERO {
            assert_eq!(candidate.cost_of_trade, Decimal::ZERO);
        }
    }
}

#[tokio::test]
async fn test_asymmetric_pipeline_counts() {
    let snapshot = fixture().gather().await.unwrap();
    let candidates =
        collar::price_asymmetric(&snapshot, &params(), &CollarCosts::default(), today());

    // Near chain: calls {10, 11} x puts {9, 10} minus the 10/10 pair = 3.
    // Far chain: calls {10, 12} x puts {10} minus the 10/10 pair = 1.
    assert_eq!(candidates.len(), 4);

    let near = NaiveDate::from_ymd_opt(2026, 9, 4).unwrap();
    let near_count = candidates.keys().filter(|k| k.expiration == near).count();
    assert_eq!(near_count, 3);
}

#[tokio::test]
async fn test_ranking_truncates_to_requested_size() {
    let snapshot = fixture().gather().await.unwrap();
    let candidates =
        collar::price_symmetric(&snapshot, &params(), &CollarCosts::default(), today());

    assert_eq!(collar::top_by_risk(&candidates, 2).len(), 2);
    assert_eq!(collar::top_by_profit(&candidates, 2).len(), 2);
}

#[tokio::test]
async fn test_no_overlap_expiration_contributes_nothing() {
    // Calls only on one expiration: nothing viable, but nothing fails either.
    let lonely = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    let provider = FixtureProvider {
        quote: Quote {
            symbol: "TST".to_string(),
            ask: dec!(10.00),
        },
        chains: vec![ExpirationChain {
            expiration: lonely,
            contracts: vec![
                contract("TSTC10", dec!(10), OptionType::Call, dec!(0.80), dec!(0.90)),
                contract("TSTC11", dec!(11), OptionType::Call, dec!(0.35), dec!(0.45)),
            ],
        }],
    };

    let snapshot = provider.gather().await.unwrap();
    let symmetric = collar::price_symmetric(&snapshot, &params(), &CollarCosts::default(), today());
    let asymmetric =
        collar::price_asymmetric(&snapshot, &params(), &CollarCosts::default(), today());

    assert!(symmetric.is_empty());
    assert!(asymmetric.is_empty());
    assert!(collar::top_by_risk(&symmetric, 5).is_empty());
    assert!(collar::top_by_profit(&asymmetric, 5).is_empty());
}
