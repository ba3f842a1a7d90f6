//! Scoring engine and objectives.
//!
//! [`ScoringEngine::score`] turns a roster into a [`ScoreResult`]: per-slot
//! raw and boosted attributes plus raw and rounded aggregates per group
//! and overall. An [`Objective`] reduces that result to the scalar every
//! optimizer maximizes.

mod engine;
mod objective;
mod types;

pub use engine::{cap_attribute, ScoringEngine, ATTRIBUTE_CAP};
pub use objective::{Objective, ScoreKind, ScoreObjective, ScoreScope};
pub use types::{Aggregate, ScoreResult, SlotScore};
