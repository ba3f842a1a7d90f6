//! Simulated Annealing (SA).
//!
//! A single-roster trajectory metaheuristic inspired by the physical
//! annealing process. Proposals stack one or more single-slot swaps;
//! worsening proposals are accepted with probability `exp(Δ/T)`, which
//! shrinks as the temperature cools, letting the walk escape local
//! optima that a pure hill-climb cannot.
//!
//! The best roster is tracked separately from the current one and only
//! ever improves.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"

mod config;
mod runner;

pub use config::{SaConfig, EXTRA_SWAPS};
pub use runner::{SaResult, SaRunner};
