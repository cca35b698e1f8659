//! Collar pricing and ranking
//!
//! The core of the scanner: prices symmetric and asymmetric collars from a
//! market snapshot and ranks the results by breakeven risk and by net
//! payout. Everything here is pure and synchronous; acquisition and
//! rendering live elsewhere.

mod engine;
mod rank;
mod types;

pub use engine::{price_asymmetric, price_symmetric};
pub use rank::{top_by_profit, top_by_risk, DEFAULT_TOP_N};
pub use types::{
    CandidateKey, CollarCandidate, CollarCosts, CollarError, CollarParameters, CollarStrikes,
    Moneyness,
};
