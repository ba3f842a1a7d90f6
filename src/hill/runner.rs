//! Hill-climb execution engine.
//!
//! # Algorithm
//!
//! 1. Score every single substitution over the candidate slots
//! 2. Apply the best strictly improving one
//! 3. Repeat until no move improves or the iteration cap is reached
//!
//! The objective never decreases, at a cost of
//! O(slots × candidates per slot) evaluations per iteration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, trace};

use super::config::HillConfig;
use super::neighborhood::best_step;
use crate::error::Result;
use crate::model::Roster;
use crate::problem::RosterProblem;
use crate::scoring::Objective;

/// Result of a hill-climb run.
#[derive(Debug, Clone)]
pub struct HillResult {
    /// The climbed roster.
    pub best: Roster,
    /// Objective of `best`.
    pub best_objective: f64,
    /// Objective of the input roster.
    pub initial_objective: f64,
    /// Steps applied.
    pub iterations: usize,
    /// Whether cancelled externally.
    pub cancelled: bool,
    /// Objective before the first step and after each step.
    pub history: Vec<f64>,
}

/// Deterministic best-improvement local search.
pub struct HillRunner;

impl HillRunner {
    /// Climbs from `roster`.
    pub fn run<O: Objective>(
        problem: &RosterProblem<'_, O>,
        roster: &Roster,
        config: &HillConfig,
    ) -> Result<HillResult> {
        Self::run_with_cancel(problem, roster, config, None)
    }

    /// Climbs with an optional cancellation token, checked before each
    /// step.
    pub fn run_with_cancel<O: Objective>(
        problem: &RosterProblem<'_, O>,
        roster: &Roster,
        config: &HillConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<HillResult> {
        Self::climb(problem, roster, config, cancel.as_deref())
    }

    pub(crate) fn climb<O: Objective>(
        problem: &RosterProblem<'_, O>,
        roster: &Roster,
        config: &HillConfig,
        cancel: Option<&AtomicBool>,
    ) -> Result<HillResult> {
        config.validate()?;
        problem.validate(roster)?;
        let slots = problem.resolve_slots(config.candidate_slots.as_deref())?;

        let mut best = roster.clone();
        let initial_objective = problem.evaluate(&best);
        let mut best_objective = initial_objective;
        let mut history = vec![initial_objective];
        let mut cancelled = false;

        debug!(initial = initial_objective, slots = slots.len(), "hill-climb started");

        while history.len() <= config.max_iterations {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                cancelled = true;
                break;
            }
            let Some(step) = best_step(problem, &best, &slots, config.parallel) else {
                break;
            };
            trace!(
                slot = %problem.table().get(step.slot).label,
                entity = %problem.pool().get(step.entity).display_name,
                delta = step.delta,
                "hill-climb step"
            );
            problem.assign(&mut best, step.slot, step.entity)?;
            best_objective = step.objective;
            history.push(best_objective);
        }

        let iterations = history.len() - 1;
        debug!(
            iterations,
            initial = initial_objective,
            best = best_objective,
            "hill-climb finished"
        );

        Ok(HillResult {
            best,
            best_objective,
            initial_objective,
            iterations,
            cancelled,
            history,
        })
    }
}
