//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::{Result, RosterError};

/// Configuration for the genetic optimizer.
///
/// Each generation is split into three disjoint shares: the top
/// `keep_pct` survive unchanged, `mutate_pct` are mutated copies of
/// uniformly sampled parents, and the remainder are crossover children.
///
/// # Defaults
///
/// ```
/// use u_roster::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 1000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_roster::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_keep_pct(0.1)
///     .with_mutate_pct(0.4)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Number of individuals in the population.
    ///
    /// Seeds beyond this size are kept; random individuals only fill up
    /// to it.
    pub population_size: usize,

    /// Number of generations to evolve.
    pub max_generations: usize,

    /// Fraction of the population carried over unmutated (elites).
    pub keep_pct: f64,

    /// Fraction of the population produced by mutation.
    pub mutate_pct: f64,

    /// Probability that a sampled parent is mutated at all.
    ///
    /// A parent that is not mutated is copied unchanged.
    pub mutation_probability: f64,

    /// Per-slot replacement probability within a mutation.
    pub mutation_rate: f64,

    /// Whole-child retries per crossover before `BreedFailure`.
    pub max_breed_attempts: usize,

    /// Fresh parent pairs tried after a `BreedFailure` before the child
    /// is replaced by a copy of a parent.
    pub max_parent_resamples: usize,

    /// Generations without a new best before stopping. 0 disables.
    pub stagnation_limit: usize,

    /// Whether to evaluate offspring in parallel (requires the
    /// `parallel` feature).
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// Checked at the start of each generation.
    pub time_limit_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 1000,
            keep_pct: 0.2,
            mutate_pct: 0.5,
            mutation_probability: 0.5,
            mutation_rate: 0.1,
            max_breed_attempts: 10,
            max_parent_resamples: 10,
            stagnation_limit: 0,
            parallel: false,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the elite share.
    pub fn with_keep_pct(mut self, pct: f64) -> Self {
        self.keep_pct = pct.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation share.
    pub fn with_mutate_pct(mut self, pct: f64) -> Self {
        self.mutate_pct = pct.clamp(0.0, 1.0);
        self
    }

    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p.clamp(0.0, 1.0);
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_max_breed_attempts(mut self, n: usize) -> Self {
        self.max_breed_attempts = n;
        self
    }

    pub fn with_max_parent_resamples(mut self, n: usize) -> Self {
        self.max_parent_resamples = n;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Quick exploratory pass: population 5, 100 generations.
    ///
    /// First stage of the meta pipeline.
    pub fn small() -> Self {
        Self {
            population_size: 5,
            max_generations: 100,
            ..Self::default()
        }
    }

    /// Broad pass: population 50, 1000 generations.
    pub fn large() -> Self {
        Self {
            population_size: 50,
            max_generations: 1000,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(RosterError::config("population_size must be at least 2"));
        }
        if self.max_generations == 0 {
            return Err(RosterError::config("max_generations must be at least 1"));
        }
        for (name, v) in [
            ("keep_pct", self.keep_pct),
            ("mutate_pct", self.mutate_pct),
            ("mutation_probability", self.mutation_probability),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(RosterError::config(format!(
                    "{name} must be in [0, 1], got {v}"
                )));
            }
        }
        if self.keep_pct + self.mutate_pct > 1.0 {
            return Err(RosterError::config(
                "keep_pct and mutate_pct must sum to at most 1.0",
            ));
        }
        if self.max_breed_attempts == 0 {
            return Err(RosterError::config("max_breed_attempts must be at least 1"));
        }
        if self.time_limit_ms == Some(0) {
            return Err(RosterError::config("time_limit_ms must be positive or None"));
        }
        Ok(())
    }

    /// Splits `n` individuals into (elites, mutants, children).
    pub fn shares(&self, n: usize) -> Result<(usize, usize, usize)> {
        let keep = (n as f64 * self.keep_pct) as usize;
        let mutate = (n as f64 * self.mutate_pct) as usize;
        let combine = n.checked_sub(keep + mutate).ok_or_else(|| {
            RosterError::config("keep_pct and mutate_pct must sum to at most 1.0")
        })?;
        Ok((keep, mutate, combine))
    }
}
