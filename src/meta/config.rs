//! Meta-orchestrator configuration.

use crate::error::Result;
use crate::ga::GaConfig;
use crate::hill::HillConfig;
use crate::sa::SaConfig;

/// Per-stage settings for the five-stage pipeline.
///
/// Both hill-climb stages share `hill`. Per-stage `seed` fields are
/// ignored: every stage draws from the one random source the runner is
/// given, seeded from `seed` here.
///
/// # Examples
///
/// ```
/// use u_roster::ga::GaConfig;
/// use u_roster::meta::MetaConfig;
///
/// let config = MetaConfig::default()
///     .with_large_ga(GaConfig::large().with_max_generations(200))
///     .with_seed(42);
/// assert_eq!(config.small_ga.population_size, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct MetaConfig {
    /// Stage 1: quick exploratory GA.
    pub small_ga: GaConfig,
    /// Stage 2: annealing of the stage 1 winner.
    pub anneal: SaConfig,
    /// Stages 3 and 5: hill-climb.
    pub hill: HillConfig,
    /// Stage 4: broad GA seeded with every earlier best.
    pub large_ga: GaConfig,
    /// Random seed for the whole pipeline. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            small_ga: GaConfig::small(),
            anneal: SaConfig::default(),
            hill: HillConfig::default(),
            large_ga: GaConfig::large(),
            seed: None,
        }
    }
}

impl MetaConfig {
    pub fn with_small_ga(mut self, config: GaConfig) -> Self {
        self.small_ga = config;
        self
    }

    pub fn with_anneal(mut self, config: SaConfig) -> Self {
        self.anneal = config;
        self
    }

    pub fn with_hill(mut self, config: HillConfig) -> Self {
        self.hill = config;
        self
    }

    pub fn with_large_ga(mut self, config: GaConfig) -> Self {
        self.large_ga = config;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates every stage's configuration up front.
    pub fn validate(&self) -> Result<()> {
        self.small_ga.validate()?;
        self.anneal.validate()?;
        self.hill.validate()?;
        self.large_ga.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;

    #[test]
    fn test_default_pipeline_sizes() {
        let config = MetaConfig::default();
        assert_eq!(config.small_ga.population_size, 5);
        assert_eq!(config.small_ga.max_generations, 100);
        assert_eq!(config.large_ga.population_size, 50);
        assert_eq!(config.large_ga.max_generations, 1000);
        assert_eq!(config.hill.max_iterations, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_bad_stage() {
        let config =
            MetaConfig::default().with_anneal(SaConfig::default().with_alpha(2.0));
        assert!(matches!(config.validate(), Err(RosterError::Config(_))));
    }
}
