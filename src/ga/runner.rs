//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! seeding → evaluation → elites / mutants / children → repeat.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::Rng;
use tracing::{debug, trace, warn};

use super::config::GaConfig;
use super::operators::{create_individual, evaluate_all, evolve_counted};
use super::types::{fittest, GenerationStats, Individual};
use crate::error::{Result, RosterError};
use crate::model::Roster;
use crate::problem::RosterProblem;
use crate::random::rng_from;
use crate::scoring::Objective;

/// Result of a GA optimization run.
///
/// Contains the best roster found, the final population, and statistics
/// about the evolutionary process.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best roster found during the entire run.
    pub best: Roster,

    /// Objective value of `best`.
    pub best_fitness: f64,

    /// The last generation, in no particular order.
    pub population: Vec<Individual>,

    /// Total number of generations executed.
    pub generations: usize,

    /// Whether the final population holds a single genotype.
    pub converged: bool,

    /// Children replaced by a parent copy because no parent pair could
    /// breed.
    pub copied_children: usize,

    /// Whether the run was terminated due to stagnation.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Statistics for the initial population and after each generation.
    pub history: Vec<GenerationStats>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config, &[])?;
/// println!("Best fitness: {}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA, warm-started from `seeds`.
    ///
    /// Every seed enters the initial population; random individuals fill
    /// it up to `population_size`.
    pub fn run<O: Objective>(
        problem: &RosterProblem<'_, O>,
        config: &GaConfig,
        seeds: &[Roster],
    ) -> Result<GaResult> {
        Self::run_with_cancel(problem, config, seeds, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA will
    /// stop before the next generation and return the best roster found
    /// so far.
    pub fn run_with_cancel<O: Objective>(
        problem: &RosterProblem<'_, O>,
        config: &GaConfig,
        seeds: &[Roster],
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult> {
        let mut rng = rng_from(config.seed);
        Self::run_with_rng(problem, config, seeds, &mut rng, cancel.as_deref())
    }

    /// Runs the GA drawing from an injected random source.
    ///
    /// `config.seed` is ignored.
    ///
    /// # Errors
    ///
    /// - [`RosterError::Config`] for an invalid configuration or an
    ///   incomplete seed
    /// - any roster invariant violation carried by a seed
    /// - [`RosterError::NoCandidates`] if a random individual cannot be
    ///   completed
    pub fn run_with_rng<O: Objective, R: Rng>(
        problem: &RosterProblem<'_, O>,
        config: &GaConfig,
        seeds: &[Roster],
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> Result<GaResult> {
        config.validate()?;
        for seed in seeds {
            problem.validate(seed)?;
        }

        let start = Instant::now();
        debug!(
            population = config.population_size,
            generations = config.max_generations,
            seeds = seeds.len(),
            "ga started"
        );

        // 1. Initialize population
        let mut rosters = seeds.to_vec();
        while rosters.len() < config.population_size {
            rosters.push(create_individual(problem, rng)?);
        }

        // 2. Evaluate initial population
        let mut population = evaluate_all(problem, rosters, config.parallel);

        // 3. Track best
        let mut best = fittest(&population)
            .cloned()
            .ok_or_else(|| RosterError::config("empty population"))?;
        let mut history = Vec::with_capacity(config.max_generations + 1);
        history.push(GenerationStats::of(&population, best.fitness));

        let mut generations = 0;
        let mut stagnation_counter = 0usize;
        let mut copied_children = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;

        // 4. Evolutionary loop
        for gen in 0..config.max_generations {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                cancelled = true;
                break;
            }
            if let Some(limit) = config.time_limit_ms {
                if start.elapsed().as_millis() >= u128::from(limit) {
                    break;
                }
            }

            let (next, copies) = evolve_counted(problem, &population, config, rng)?;
            if copies > 0 && copied_children == 0 {
                warn!(
                    generation = gen,
                    copies,
                    resamples = config.max_parent_resamples,
                    "parents failed to breed, copying parents into the next generation"
                );
            }
            copied_children += copies;
            population = next;
            generations = gen + 1;

            match fittest(&population) {
                Some(gen_best) if gen_best.fitness > best.fitness => {
                    best = gen_best.clone();
                    stagnation_counter = 0;
                }
                _ => stagnation_counter += 1,
            }

            let stats = GenerationStats::of(&population, best.fitness);
            trace!(
                generation = generations,
                mean = stats.mean,
                max = stats.max,
                best = stats.best,
                "ga generation"
            );
            history.push(stats);

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        let converged = population
            .split_first()
            .is_some_and(|(first, rest)| rest.iter().all(|i| i.roster == first.roster));
        debug!(
            generations,
            best = best.fitness,
            converged,
            copied_children,
            cancelled,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "ga finished"
        );

        Ok(GaResult {
            best_fitness: best.fitness,
            best: best.roster,
            population,
            generations,
            converged,
            copied_children,
            stagnated,
            cancelled,
            history,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::{EligibilityConfig, EligibilityIndex, Overrides};
    use crate::model::Roster;
    use crate::random::create_rng;
    use crate::scoring::{ScoreObjective, ScoringEngine};
    use crate::test_fixtures::{base_roster, four_slot_problem, problem, standard_problem};

    fn quick() -> GaConfig {
        GaConfig::default()
            .with_population_size(12)
            .with_max_generations(25)
            .with_seed(42)
    }

    #[test]
    fn test_population_stays_valid() {
        let (pool, table, weights) = standard_problem();
        let problem = problem(&pool, &table, &weights);
        let result = GaRunner::run(&problem, &quick(), &[]).unwrap();

        assert_eq!(result.population.len(), 12);
        assert!(problem.validate(&result.best).is_ok());
        for ind in &result.population {
            assert!(problem.validate(&ind.roster).is_ok());
        }
        assert_eq!(result.best_fitness, problem.evaluate(&result.best));
    }

    #[test]
    fn test_best_history_non_decreasing() {
        let (pool, table, weights) = four_slot_problem();
        let problem = problem(&pool, &table, &weights);
        let result = GaRunner::run(&problem, &quick(), &[]).unwrap();

        assert_eq!(result.history.len(), result.generations + 1);
        for window in result.history.windows(2) {
            assert!(window[1].best >= window[0].best);
            // elitism keeps the population max from dropping
            assert!(window[1].max >= window[0].max);
        }
        let last = result.history.last().unwrap();
        assert_eq!(last.best, result.best_fitness);
    }

    #[test]
    fn test_seed_is_never_lost() {
        let (pool, table, weights) = four_slot_problem();
        let problem = problem(&pool, &table, &weights);
        let seed = base_roster(&pool, &table);
        let result = GaRunner::run(&problem, &quick(), &[seed.clone()]).unwrap();
        assert!(result.best_fitness >= problem.evaluate(&seed));
    }

    #[test]
    fn test_seeds_beyond_population_are_kept() {
        let (pool, table, weights) = four_slot_problem();
        let problem = problem(&pool, &table, &weights);
        let seeds = vec![base_roster(&pool, &table); 3];
        let config = quick().with_population_size(2).with_max_generations(1);
        let result = GaRunner::run(&problem, &config, &seeds).unwrap();
        assert_eq!(result.population.len(), 3);
    }

    #[test]
    fn test_incomplete_seed_rejected() {
        let (pool, table, weights) = four_slot_problem();
        let problem = problem(&pool, &table, &weights);
        let err = GaRunner::run(&problem, &quick(), &[Roster::empty(&table)]).unwrap_err();
        assert!(matches!(err, RosterError::Config(_)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let (pool, table, weights) = four_slot_problem();
        let problem = problem(&pool, &table, &weights);
        let config = quick().with_keep_pct(0.7).with_mutate_pct(0.7);
        assert!(matches!(
            GaRunner::run(&problem, &config, &[]),
            Err(RosterError::Config(_))
        ));
    }

    #[test]
    fn test_same_seed_same_result() {
        let (pool, table, weights) = standard_problem();
        let problem = problem(&pool, &table, &weights);
        let a = GaRunner::run(&problem, &quick(), &[]).unwrap();
        let b = GaRunner::run(&problem, &quick(), &[]).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.best_fitness, b.best_fitness);
    }

    #[test]
    fn test_injected_rng() {
        let (pool, table, weights) = four_slot_problem();
        let problem = problem(&pool, &table, &weights);
        let mut rng = create_rng(3);
        let result = GaRunner::run_with_rng(&problem, &quick(), &[], &mut rng, None).unwrap();
        assert_eq!(result.generations, 25);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_cancellation() {
        let (pool, table, weights) = four_slot_problem();
        let problem = problem(&pool, &table, &weights);
        let cancel = Arc::new(AtomicBool::new(true));
        let result = GaRunner::run_with_cancel(&problem, &quick(), &[], Some(cancel)).unwrap();
        assert!(result.cancelled, "expected cancelled result");
        assert_eq!(result.generations, 0);
        assert_eq!(result.history.len(), 1);
    }

    #[test]
    fn test_fully_pinned_population_converges() {
        let (pool, table, weights) = four_slot_problem();
        let engine = ScoringEngine::new(&table, &weights, &pool).unwrap();
        let mut overrides = Overrides::new();
        for (slot, name) in [("QB", "QB1"), ("WR", "WR2"), ("CB", "CB3"), ("K", "K4")] {
            overrides.insert(slot.into(), vec![name.into()]);
        }
        let config = EligibilityConfig::default();
        let index = EligibilityIndex::build(&pool, &table, &config, Some(&overrides)).unwrap();
        let problem = RosterProblem::new(engine, index, ScoreObjective::default());

        let result = GaRunner::run(&problem, &quick(), &[]).unwrap();
        assert!(result.converged);
        assert!(result.copied_children > 0);
        assert_eq!(result.generations, 25);
        assert!(problem.validate(&result.best).is_ok());
    }

    #[test]
    fn test_small_population_runs_every_generation() {
        let (pool, table, weights) = four_slot_problem();
        let problem = problem(&pool, &table, &weights);
        for seed in 0..8 {
            let config = GaConfig::small().with_seed(seed);
            let result = GaRunner::run(&problem, &config, &[]).unwrap();
            assert_eq!(result.generations, 100);
            assert_eq!(result.history.len(), 101);
            assert_eq!(result.population.len(), 5);
        }
    }

    #[test]
    fn test_stagnation_termination() {
        let (pool, table, weights) = four_slot_problem();
        let problem = problem(&pool, &table, &weights);
        let config = quick()
            .with_max_generations(1000)
            .with_stagnation_limit(5);
        let result = GaRunner::run(&problem, &config, &[]).unwrap();
        assert!(
            result.stagnated && result.generations < 1000,
            "expected early stop"
        );
    }

    #[test]
    fn test_parallel_flag_gives_valid_result() {
        let (pool, table, weights) = standard_problem();
        let problem = problem(&pool, &table, &weights);
        let result = GaRunner::run(&problem, &quick().with_parallel(true), &[]).unwrap();
        assert!(problem.validate(&result.best).is_ok());
    }
}
