//! SA configuration.

use crate::error::{Result, RosterError};

/// Extra single-slot swaps stacked onto a proposal, drawn uniformly.
///
/// Skewed toward small counts so most proposals stay local.
pub const EXTRA_SWAPS: [usize; 16] = [0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 4, 5, 6, 7, 8];

/// Configuration for the Simulated Annealing walk.
///
/// Cooling is geometric: `T_{k+1} = alpha * T_k`, one proposal per
/// temperature step. With the defaults the walk runs about 18 400
/// iterations.
///
/// # Examples
///
/// ```
/// use u_roster::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(2.0)
///     .with_alpha(0.99)
///     .with_candidate_slots(vec!["QB".into(), "WR1".into()])
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SaConfig {
    /// Initial temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// Minimum temperature. The algorithm stops when T drops below this.
    pub min_temperature: f64,

    /// Cooling factor in (0, 1). Higher = slower cooling.
    pub alpha: f64,

    /// Maximum total iterations (hard budget). 0 = no limit.
    pub max_iterations: usize,

    /// Slot labels the walk may change. `None` = every slot.
    pub candidate_slots: Option<Vec<String>>,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1.0,
            min_temperature: 1e-4,
            alpha: 0.9995,
            max_iterations: 0,
            candidate_slots: None,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_candidate_slots(mut self, labels: Vec<String>) -> Self {
        self.candidate_slots = Some(labels);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_temperature > 0.0) {
            return Err(RosterError::config("initial_temperature must be positive"));
        }
        if !(self.min_temperature > 0.0) {
            return Err(RosterError::config("min_temperature must be positive"));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(RosterError::config(
                "min_temperature must be less than initial_temperature",
            ));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(RosterError::config(format!(
                "alpha must be in (0, 1), got {}",
                self.alpha
            )));
        }
        if self.candidate_slots.as_ref().is_some_and(Vec::is_empty) {
            return Err(RosterError::config("candidate_slots must not be empty"));
        }
        Ok(())
    }
}
