//! Error taxonomy shared by every component.
//!
//! Constraint violations are reported before any roster state is touched,
//! so a `RosterError` never leaves a half-applied assignment behind.

use thiserror::Error;

/// Errors raised while building inputs or running an optimizer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RosterError {
    /// The entity's category is not allowed at the target slot.
    #[error("{entity} is not eligible for slot {slot}")]
    InvalidAssignment {
        /// Entity identity.
        entity: String,
        /// Slot label.
        slot: String,
    },

    /// The entity already occupies a different slot.
    #[error("{entity} is already on the roster at slot {slot}")]
    DuplicateEntity {
        /// Entity identity.
        entity: String,
        /// Slot label the entity currently holds.
        slot: String,
    },

    /// No eligible candidate is available for a slot.
    #[error("no eligible candidates for slot {slot}")]
    NoCandidates {
        /// Slot label.
        slot: String,
    },

    /// Crossover could not produce a duplicate-free child.
    #[error("crossover failed after {attempts} attempts")]
    BreedFailure {
        /// Number of attempts made.
        attempts: usize,
    },

    /// Invalid configuration or input tables.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RosterError>;

impl RosterError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        RosterError::Config(msg.into())
    }
}
