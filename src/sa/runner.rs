//! SA execution loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, trace};

use super::config::{SaConfig, EXTRA_SWAPS};
use crate::error::Result;
use crate::model::{Roster, SlotId};
use crate::problem::RosterProblem;
use crate::random::rng_from;
use crate::scoring::Objective;

const HISTORY_INTERVAL: usize = 100;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult {
    /// The best roster accepted during the walk.
    pub best: Roster,

    /// Objective value of the best roster.
    pub best_objective: f64,

    /// Total number of iterations (proposal evaluations).
    pub iterations: usize,

    /// Final temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best objective sampled at regular intervals for history tracking.
    pub best_history: Vec<f64>,
}

/// Executes the Simulated Annealing walk from a given roster.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA starting from `start`.
    pub fn run<O: Objective>(
        problem: &RosterProblem<'_, O>,
        start: &Roster,
        config: &SaConfig,
    ) -> Result<SaResult> {
        Self::run_with_cancel(problem, start, config, None)
    }

    /// Runs SA with an optional cancellation token.
    pub fn run_with_cancel<O: Objective>(
        problem: &RosterProblem<'_, O>,
        start: &Roster,
        config: &SaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult> {
        let mut rng = rng_from(config.seed);
        Self::run_with_rng(problem, start, config, &mut rng, cancel.as_deref())
    }

    /// Runs SA drawing from an injected random source.
    ///
    /// `config.seed` is ignored. The start roster must be complete and
    /// valid; the walk never leaves the feasible space.
    pub fn run_with_rng<O: Objective, R: Rng>(
        problem: &RosterProblem<'_, O>,
        start: &Roster,
        config: &SaConfig,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> Result<SaResult> {
        config.validate()?;
        problem.validate(start)?;
        let slots = problem.resolve_slots(config.candidate_slots.as_deref())?;

        // Initialize
        let mut current = start.clone();
        let mut current_obj = problem.evaluate(&current);
        let mut best = current.clone();
        let mut best_obj = current_obj;

        debug!(
            initial = current_obj,
            temperature = config.initial_temperature,
            slots = slots.len(),
            "sa started"
        );

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cancelled = false;
        let mut best_history = vec![best_obj];

        while temperature > config.min_temperature {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                cancelled = true;
                break;
            }
            if config.max_iterations > 0 && iterations >= config.max_iterations {
                break;
            }

            let mut proposal = current.clone();
            let swaps = 1 + EXTRA_SWAPS[rng.random_range(0..EXTRA_SWAPS.len())];
            for _ in 0..swaps {
                random_step(problem, &mut proposal, &slots, rng)?;
            }
            let proposal_obj = problem.evaluate(&proposal);
            let delta = proposal_obj - current_obj;

            // Metropolis acceptance criterion
            let accept = if delta > 0.0 {
                improving_moves += 1;
                true
            } else {
                rng.random_range(0.0..1.0) < (delta / temperature).exp()
            };

            if accept {
                current = proposal;
                current_obj = proposal_obj;
                accepted_moves += 1;

                if current_obj > best_obj {
                    best = current.clone();
                    best_obj = current_obj;
                }
            }

            iterations += 1;
            if iterations % HISTORY_INTERVAL == 0 {
                trace!(
                    iterations,
                    temperature,
                    current = current_obj,
                    best = best_obj,
                    "sa progress"
                );
                best_history.push(best_obj);
            }

            temperature *= config.alpha;
        }

        if best_history.last() != Some(&best_obj) {
            best_history.push(best_obj);
        }

        debug!(
            iterations,
            accepted_moves,
            improving_moves,
            best = best_obj,
            cancelled,
            "sa finished"
        );

        Ok(SaResult {
            best,
            best_objective: best_obj,
            iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cancelled,
            best_history,
        })
    }
}

/// Replaces the occupant of one random candidate slot.
///
/// Leaves the roster unchanged when the slot has no open replacement.
fn random_step<O: Objective, R: Rng>(
    problem: &RosterProblem<'_, O>,
    roster: &mut Roster,
    slots: &[SlotId],
    rng: &mut R,
) -> Result<()> {
    let slot = slots[rng.random_range(0..slots.len())];
    match problem.index().choose(roster, slot, rng) {
        Some(pick) if !roster.contains(pick) => problem.assign(roster, slot, pick),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;
    use crate::random::create_rng;
    use crate::test_fixtures::{base_roster, four_slot_problem, problem, standard_problem};

    fn short() -> SaConfig {
        SaConfig::default().with_alpha(0.995).with_seed(42)
    }

    #[test]
    fn test_best_ever_monotonic() {
        let (pool, table, weights) = standard_problem();
        let problem = problem(&pool, &table, &weights);
        let start = crate::ga::operators::create_individual(&problem, &mut create_rng(1)).unwrap();
        let result = SaRunner::run(&problem, &start, &short()).unwrap();

        assert!(result.best_objective >= problem.evaluate(&start));
        for window in result.best_history.windows(2) {
            assert!(
                window[1] >= window[0],
                "best objective should never decrease: {} < {}",
                window[1],
                window[0]
            );
        }
        assert_eq!(result.best_history.last(), Some(&result.best_objective));
    }

    #[test]
    fn test_result_is_valid_and_scored() {
        let (pool, table, weights) = standard_problem();
        let problem = problem(&pool, &table, &weights);
        let start = crate::ga::operators::create_individual(&problem, &mut create_rng(2)).unwrap();
        let result = SaRunner::run(&problem, &start, &short()).unwrap();
        assert!(problem.validate(&result.best).is_ok());
        assert_eq!(result.best_objective, problem.evaluate(&result.best));
        assert!(result.accepted_moves >= result.improving_moves);
    }

    #[test]
    fn test_geometric_schedule_length() {
        let (pool, table, weights) = four_slot_problem();
        let problem = problem(&pool, &table, &weights);
        let config = SaConfig::default()
            .with_min_temperature(0.1)
            .with_alpha(0.5)
            .with_seed(1);
        let result = SaRunner::run(&problem, &base_roster(&pool, &table), &config).unwrap();
        // 1.0, 0.5, 0.25, 0.125 then 0.0625 < 0.1
        assert_eq!(result.iterations, 4);
        assert!((result.final_temperature - 0.0625).abs() < 1e-12);
    }

    #[test]
    fn test_max_iterations_limit() {
        let (pool, table, weights) = four_slot_problem();
        let problem = problem(&pool, &table, &weights);
        let config = SaConfig::default().with_max_iterations(250).with_seed(3);
        let result = SaRunner::run(&problem, &base_roster(&pool, &table), &config).unwrap();
        assert_eq!(result.iterations, 250);
    }

    #[test]
    fn test_candidate_slots_restrict_changes() {
        let (pool, table, weights) = four_slot_problem();
        let problem = problem(&pool, &table, &weights);
        let start = base_roster(&pool, &table);
        let config = short().with_candidate_slots(vec!["WR".into()]);
        let result = SaRunner::run(&problem, &start, &config).unwrap();
        let wr = table.find("WR").unwrap();
        for slot in table.ids().filter(|s| *s != wr) {
            assert_eq!(result.best.get(slot), start.get(slot));
        }
    }

    #[test]
    fn test_unknown_candidate_slot() {
        let (pool, table, weights) = four_slot_problem();
        let problem = problem(&pool, &table, &weights);
        let config = short().with_candidate_slots(vec!["XX".into()]);
        let err = SaRunner::run(&problem, &base_roster(&pool, &table), &config).unwrap_err();
        assert!(matches!(err, RosterError::Config(_)));
    }

    #[test]
    fn test_incomplete_start_rejected() {
        let (pool, table, weights) = four_slot_problem();
        let problem = problem(&pool, &table, &weights);
        assert!(SaRunner::run(&problem, &Roster::empty(&table), &short()).is_err());
    }

    #[test]
    fn test_cancellation() {
        let (pool, table, weights) = four_slot_problem();
        let problem = problem(&pool, &table, &weights);
        let cancel = Arc::new(AtomicBool::new(true));
        let start = base_roster(&pool, &table);
        let result = SaRunner::run_with_cancel(&problem, &start, &short(), Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best, start);
    }

    #[test]
    fn test_same_seed_same_walk() {
        let (pool, table, weights) = four_slot_problem();
        let problem = problem(&pool, &table, &weights);
        let start = base_roster(&pool, &table);
        let a = SaRunner::run(&problem, &start, &short()).unwrap();
        let b = SaRunner::run(&problem, &start, &short()).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.accepted_moves, b.accepted_moves);
    }

    #[test]
    fn test_metropolis_accepts_downhill() {
        // hot walk: worsening proposals are accepted often
        let (pool, table, weights) = four_slot_problem();
        let problem = problem(&pool, &table, &weights);
        let config = SaConfig::default()
            .with_initial_temperature(1000.0)
            .with_min_temperature(999.0)
            .with_alpha(0.99999)
            .with_max_iterations(200)
            .with_seed(5);
        let result = SaRunner::run(&problem, &base_roster(&pool, &table), &config).unwrap();
        assert!(result.accepted_moves > result.improving_moves);
    }
}
