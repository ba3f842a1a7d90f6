//! Hill-climb configuration.

use crate::error::{Result, RosterError};

/// Configuration parameters for the best-improvement hill-climb.
///
/// # Examples
///
/// ```
/// use u_roster::hill::HillConfig;
///
/// let config = HillConfig::default()
///     .with_max_iterations(50)
///     .with_candidate_slots(vec!["QB".into()]);
/// assert_eq!(config.max_iterations, 50);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct HillConfig {
    /// Maximum number of applied steps.
    pub max_iterations: usize,
    /// Slot labels the climb may change. `None` = every slot.
    pub candidate_slots: Option<Vec<String>>,
    /// Evaluate the neighborhood in parallel (requires the `parallel`
    /// feature).
    pub parallel: bool,
}

impl Default for HillConfig {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            candidate_slots: None,
            parallel: false,
        }
    }
}

impl HillConfig {
    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_candidate_slots(mut self, labels: Vec<String>) -> Self {
        self.candidate_slots = Some(labels);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(RosterError::config("max_iterations must be at least 1"));
        }
        if self.candidate_slots.as_ref().is_some_and(Vec::is_empty) {
            return Err(RosterError::config("candidate_slots must not be empty"));
        }
        Ok(())
    }
}
