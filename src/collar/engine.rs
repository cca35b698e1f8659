//! Collar pricing engine
//!
//! Pure functions turning a market snapshot plus trader parameters into
//! per-combination economics. A collar sells a call and buys a put against
//! lent-out shares; the engine weighs the cost (or credit) of the option
//! legs against the daily share-lending payout.
//!
//! Both entry points return fresh candidate maps keyed by
//! (expiration, strikes) so runs never share mutable state and identical
//! display tags cannot clobber each other.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::market::{ExpirationChain, MarketSnapshot, OptionType};

use super::types::{
    CandidateKey, CollarCandidate, CollarCosts, CollarParameters, CollarStrikes, Moneyness,
};

/// Per-symbol figures shared by every candidate in a run
#[derive(Debug, Clone)]
struct RunContext {
    stock_ask: Decimal,
    contract_size: Decimal,
    fee_split: Decimal,
    loan_adjusted_rate: Decimal,
    daily_payout_per_contract: Decimal,
    fees_per_collar: Decimal,
    buying_power: Decimal,
}

impl RunContext {
    fn new(stock_ask: Decimal, params: &CollarParameters, costs: &CollarCosts) -> Self {
        let loan_adjusted_rate = costs.loan_adjusted_rate();

        // Lending fees accrue at an annual rate, paid daily, on trading days only.
        let daily_payout_per_share =
            ((stock_ask * (params.borrow_rate() * costs.fee_split)) / dec!(365))
                * loan_adjusted_rate;
        let daily_payout_per_contract =
            (daily_payout_per_share * params.utilization()) * costs.contract_size;

        Self {
            stock_ask,
            contract_size: costs.contract_size,
            fee_split: costs.fee_split,
            loan_adjusted_rate,
            daily_payout_per_contract,
            fees_per_collar: costs.fees_per_collar(),
            buying_power: stock_ask * costs.contract_size,
        }
    }

    /// Net premium at expiration: positive = credit, negative = debit.
    ///
    /// The put strike carries the intrinsic term; for symmetric collars it
    /// is the shared strike.
    fn expiration_net(&self, call_bid: Decimal, put_ask: Decimal, put_strike: Decimal) -> Decimal {
        ((call_bid - put_ask) - (self.stock_ask - put_strike)) * self.contract_size
    }

    fn build_candidate(
        &self,
        label: String,
        strikes: CollarStrikes,
        expiration: NaiveDate,
        days_remaining: i64,
        call_moneyness: Moneyness,
        expiration_net: Decimal,
    ) -> CollarCandidate {
        // Credits establish for free in this model; option fees only count
        // against debits.
        let (cost_of_trade, cost_per_day) = if expiration_net > Decimal::ZERO {
            (Decimal::ZERO, Decimal::ZERO)
        } else {
            let cost = (expiration_net - self.fees_per_collar).abs();
            // Shares lend out at the morning auction, so a same-day
            // expiration bears the full cost.
            let per_day = if days_remaining == 0 {
                cost
            } else {
                cost / Decimal::from(days_remaining)
            };
            (cost, per_day)
        };

        let total_payout = self.daily_payout_per_contract * Decimal::from(days_remaining);
        let net_payout = total_payout - cost_of_trade;

        let annualized_pct = (self.daily_payout_per_contract - cost_per_day)
            .checked_div(self.buying_power)
            .map(|v| v * dec!(36500))
            .unwrap_or(Decimal::ZERO);

        let breakeven_borrow_rate_pct = cost_per_day
            .checked_div(self.buying_power)
            .map(|v| v * dec!(36500))
            .and_then(|v| v.checked_div(self.fee_split))
            .and_then(|v| v.checked_div(self.loan_adjusted_rate))
            .unwrap_or(Decimal::ZERO);

        // With no payout stream there is nothing to earn the cost back.
        let days_to_profit = if self.daily_payout_per_contract.is_zero() {
            None
        } else {
            Some(
                (cost_of_trade / self.daily_payout_per_contract)
                    .ceil()
                    .to_i64()
                    .unwrap_or(i64::MAX),
            )
        };

        let profitable = days_to_profit.is_some_and(|days| days < days_remaining);

        CollarCandidate {
            label,
            strikes,
            expiration,
            days_remaining,
            call_moneyness,
            expiration_net,
            cost_of_trade,
            cost_per_day,
            days_to_profit,
            net_payout,
            annualized_pct,
            breakeven_borrow_rate_pct,
            profitable,
        }
    }
}

/// Best quoted prices at one strike: the bid of the call we would sell and
/// the ask of the put we would buy.
#[derive(Debug, Default)]
struct StrikeQuotes {
    call: Option<CallQuote>,
    put_ask: Option<Decimal>,
}

#[derive(Debug)]
struct CallQuote {
    bid: Decimal,
    symbol: String,
}

fn strike_ledger(chain: &ExpirationChain) -> BTreeMap<Decimal, StrikeQuotes> {
    let mut ledger: BTreeMap<Decimal, StrikeQuotes> = BTreeMap::new();
    for contract in &chain.contracts {
        let entry = ledger.entry(contract.strike).or_default();
        match contract.option_type {
            OptionType::Call => {
                entry.call = Some(CallQuote {
                    bid: contract.bid,
                    symbol: contract.symbol.clone(),
                });
            }
            OptionType::Put => entry.put_ask = Some(contract.ask),
        }
    }
    ledger
}

fn days_remaining(expiration: NaiveDate, today: NaiveDate) -> Option<i64> {
    // Calendar days, deliberately: lending income accrues on a 365-day base.
    let days = (expiration - today).num_days();
    if days < 0 {
        tracing::debug!(%expiration, "Skipping expired chain");
        return None;
    }
    Some(days)
}

/// Price every strike quoted as both a call and a put, selling the call and
/// buying the put at the same strike.
///
/// Strikes quoted on only one side are skipped; they cannot form a collar.
pub fn price_symmetric(
    snapshot: &MarketSnapshot,
    params: &CollarParameters,
    costs: &CollarCosts,
    today: NaiveDate,
) -> BTreeMap<CandidateKey, CollarCandidate> {
    let mut candidates = BTreeMap::new();

    let stock_ask = snapshot.quote.ask;
    if stock_ask <= Decimal::ZERO {
        tracing::warn!(symbol = %snapshot.quote.symbol, %stock_ask, "No usable stock ask");
        return candidates;
    }
    let ctx = RunContext::new(stock_ask, params, costs);

    for chain in &snapshot.chains {
        let Some(days) = days_remaining(chain.expiration, today) else {
            continue;
        };

        for (strike, quotes) in strike_ledger(chain) {
            let (Some(call), Some(put_ask)) = (quotes.call, quotes.put_ask) else {
                tracing::debug!(%strike, expiration = %chain.expiration, "Skipping one-sided strike");
                continue;
            };

            let net = ctx.expiration_net(call.bid, put_ask, strike);
            let moneyness = if strike < stock_ask {
                Moneyness::Itm
            } else {
                Moneyness::Otm
            };

            candidates.insert(
                CandidateKey {
                    expiration: chain.expiration,
                    call_strike: strike,
                    put_strike: strike,
                },
                ctx.build_candidate(
                    call.symbol,
                    CollarStrikes::Symmetric(strike),
                    chain.expiration,
                    days,
                    moneyness,
                    net,
                ),
            );
        }
    }

    candidates
}

/// Price every (call strike ≥ stock ask, put strike ≤ stock ask) pair per
/// expiration.
///
/// In-the-money calls belong to the symmetric scan, as do same-strike
/// pairs, so both are excluded. The output grows as calls × puts per chain;
/// this is the dominant cost on large chains.
pub fn price_asymmetric(
    snapshot: &MarketSnapshot,
    params: &CollarParameters,
    costs: &CollarCosts,
    today: NaiveDate,
) -> BTreeMap<CandidateKey, CollarCandidate> {
    let mut candidates = BTreeMap::new();

    let stock_ask = snapshot.quote.ask;
    if stock_ask <= Decimal::ZERO {
        tracing::warn!(symbol = %snapshot.quote.symbol, %stock_ask, "No usable stock ask");
        return candidates;
    }
    let ctx = RunContext::new(stock_ask, params, costs);

    for chain in &snapshot.chains {
        let Some(days) = days_remaining(chain.expiration, today) else {
            continue;
        };

        let ledger = strike_ledger(chain);
        for (&call_strike, call_quotes) in &ledger {
            if call_strike < stock_ask {
                continue;
            }
            let Some(call) = &call_quotes.call else {
                continue;
            };

            for (&put_strike, put_quotes) in &ledger {
                if put_strike > stock_ask || put_strike == call_strike {
                    continue;
                }
                let Some(put_ask) = put_quotes.put_ask else {
                    continue;
                };

                let strikes = CollarStrikes::Split {
                    call: call_strike,
                    put: put_strike,
                };
                let net = ctx.expiration_net(call.bid, put_ask, put_strike);

                candidates.insert(
                    CandidateKey {
                        expiration: chain.expiration,
                        call_strike,
                        put_strike,
                    },
                    ctx.build_candidate(
                        strikes.to_string(),
                        strikes,
                        chain.expiration,
                        days,
                        Moneyness::Otm,
                        net,
                    ),
                );
            }
        }
    }

    candidates
}
