//! Eligibility index.
//!
//! Cuts the pool down to a bounded candidate list per slot so stochastic
//! search has a manageable branching factor, while keeping boosted and
//! explicitly pinned entities reachable.

mod config;
mod index;

pub use config::EligibilityConfig;
pub use index::{EligibilityIndex, Overrides};
