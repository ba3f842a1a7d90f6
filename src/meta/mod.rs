//! Meta-orchestrator.
//!
//! Chains the three optimizers into a fixed five-stage pipeline. GA
//! explores broad structural variation cheaply, annealing escapes the
//! local optima GA settles into, and the hill-climb perfects whatever
//! comes out. Every stage is seeded from the best roster so far, and the
//! large GA from all of them.
//!
//! [`optimize`] is the one-call entry point for drivers: pool, slot
//! table, weights and objective in, best roster and its score out.

mod config;
mod runner;

pub use config::MetaConfig;
pub use runner::{optimize, optimize_with, MetaResult, MetaRunner, Stage, StageReport};
