//! Best-improvement hill-climb.
//!
//! Deterministic, exhaustive local search: each iteration scans every
//! single-slot substitution and applies the one with the largest strict
//! improvement. Cheap to perfect a roster whose broad structure is
//! already good; stuck at the first local optimum otherwise.
//!
//! # References
//!
//! - Russell & Norvig (2010), *Artificial Intelligence: A Modern Approach*, §4.1
//! - Hoos & Stützle (2004), *Stochastic Local Search: Foundations and Applications*

mod config;
pub mod neighborhood;
mod runner;

pub use config::HillConfig;
pub use neighborhood::{best_step, neighborhood, Move};
pub use runner::{HillResult, HillRunner};
