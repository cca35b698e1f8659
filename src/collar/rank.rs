//! Ranking and selection of priced candidates
//!
//! Both orderings are stable sorts over the candidate map's deterministic
//! (expiration, strike) iteration order, truncated to the requested size.

use std::collections::BTreeMap;

use super::types::{CandidateKey, CollarCandidate};

/// Default number of plays per ranking
pub const DEFAULT_TOP_N: usize = 5;

/// Lowest-risk plays first: ascending days to breakeven, with plays that
/// never break even ordered last.
pub fn top_by_risk(
    candidates: &BTreeMap<CandidateKey, CollarCandidate>,
    n: usize,
) -> Vec<&CollarCandidate> {
    let mut ranked: Vec<&CollarCandidate> = candidates.values().collect();
    ranked.sort_by_key(|c| c.days_to_profit.unwrap_or(i64::MAX));
    ranked.truncate(n);
    ranked
}

/// Most profitable plays first: descending estimated payout net of cost.
pub fn top_by_profit(
    candidates: &BTreeMap<CandidateKey, CollarCandidate>,
    n: usize,
) -> Vec<&CollarCandidate> {
    let mut ranked: Vec<&CollarCandidate> = candidates.values().collect();
    ranked.sort_by(|a, b| b.net_payout.cmp(&a.net_payout));
    ranked.truncate(n);
    ranked
}
