//! Meta-orchestrator execution.
//!
//! # Pipeline
//!
//! 1. Small GA, seeded with the initial guess if one is given
//! 2. Anneal the stage 1 winner
//! 3. Hill-climb the annealed roster
//! 4. Large GA seeded with the initial guess and every best so far
//! 5. Final hill-climb
//!
//! Each stage starts from the previous stage's best, so progress is
//! never thrown away.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::Rng;
use tracing::{debug, info};

use super::config::MetaConfig;
use crate::eligibility::{EligibilityConfig, EligibilityIndex};
use crate::error::Result;
use crate::ga::GaRunner;
use crate::hill::HillRunner;
use crate::model::{Pool, Roster, SlotTable, WeightProfile};
use crate::problem::RosterProblem;
use crate::random::rng_from;
use crate::sa::SaRunner;
use crate::scoring::{Objective, ScoreResult, ScoringEngine};

/// A pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    SmallGenetic,
    Anneal,
    HillClimb,
    LargeGenetic,
    FinalHillClimb,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::SmallGenetic => "small genetic",
            Stage::Anneal => "anneal",
            Stage::HillClimb => "hill-climb",
            Stage::LargeGenetic => "large genetic",
            Stage::FinalHillClimb => "final hill-climb",
        })
    }
}

/// Outcome of one stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageReport {
    pub stage: Stage,
    /// Objective of the stage's best roster.
    pub objective: f64,
    /// Generations or iterations the stage ran.
    pub iterations: usize,
    pub elapsed_ms: u64,
}

/// Result of a full pipeline run.
#[derive(Debug, Clone)]
pub struct MetaResult {
    /// The best roster, complete and validated.
    pub roster: Roster,
    /// Full score breakdown of `roster`.
    pub score: ScoreResult,
    /// Objective value of `roster`.
    pub objective: f64,
    /// One report per stage that ran, in order.
    pub stages: Vec<StageReport>,
    /// Whether the pipeline stopped early on cancellation.
    pub cancelled: bool,
}

/// Chains GA, annealing and hill-climb stages.
pub struct MetaRunner;

impl MetaRunner {
    /// Runs the pipeline, optionally warm-started from `initial`.
    pub fn run<O: Objective>(
        problem: &RosterProblem<'_, O>,
        config: &MetaConfig,
        initial: Option<&Roster>,
    ) -> Result<MetaResult> {
        Self::run_with_cancel(problem, config, initial, None)
    }

    /// Runs the pipeline with an optional cancellation token.
    ///
    /// The token is checked between stages and passed into each stage.
    /// The first stage always runs so that a roster can be returned.
    pub fn run_with_cancel<O: Objective>(
        problem: &RosterProblem<'_, O>,
        config: &MetaConfig,
        initial: Option<&Roster>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<MetaResult> {
        let mut rng = rng_from(config.seed);
        Self::run_with_rng(problem, config, initial, &mut rng, cancel.as_deref())
    }

    /// Runs the pipeline drawing every stage from one injected random
    /// source.
    ///
    /// # Errors
    ///
    /// Any stage error aborts the pipeline and is returned as is.
    pub fn run_with_rng<O: Objective, R: Rng>(
        problem: &RosterProblem<'_, O>,
        config: &MetaConfig,
        initial: Option<&Roster>,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> Result<MetaResult> {
        config.validate()?;
        if let Some(initial) = initial {
            problem.validate(initial)?;
        }
        let mut seeds: Vec<Roster> = initial.cloned().into_iter().collect();

        // 1. small GA
        let started = Instant::now();
        let ga = GaRunner::run_with_rng(problem, &config.small_ga, &seeds, rng, cancel)?;
        let mut pipeline = Pipeline::first(
            Stage::SmallGenetic,
            ga.best,
            ga.best_fitness,
            ga.generations,
            started,
        );

        if !pipeline.halted(cancel) {
            // 2. anneal the winner
            let current = pipeline.latest.clone();
            seeds.push(current.clone());
            let started = Instant::now();
            let sa = SaRunner::run_with_rng(problem, &current, &config.anneal, rng, cancel)?;
            pipeline.record(
                Stage::Anneal,
                sa.best,
                sa.best_objective,
                sa.iterations,
                started,
            );
        }
        if !pipeline.halted(cancel) {
            // 3. hill-climb
            let current = pipeline.latest.clone();
            seeds.push(current.clone());
            let started = Instant::now();
            let hill = HillRunner::climb(problem, &current, &config.hill, cancel)?;
            pipeline.record(
                Stage::HillClimb,
                hill.best,
                hill.best_objective,
                hill.iterations,
                started,
            );
        }
        if !pipeline.halted(cancel) {
            // 4. large GA over every best so far
            seeds.push(pipeline.latest.clone());
            let started = Instant::now();
            let ga = GaRunner::run_with_rng(problem, &config.large_ga, &seeds, rng, cancel)?;
            pipeline.record(
                Stage::LargeGenetic,
                ga.best,
                ga.best_fitness,
                ga.generations,
                started,
            );
        }
        if !pipeline.halted(cancel) {
            // 5. final hill-climb
            let current = pipeline.latest.clone();
            let started = Instant::now();
            let hill = HillRunner::climb(problem, &current, &config.hill, cancel)?;
            pipeline.record(
                Stage::FinalHillClimb,
                hill.best,
                hill.best_objective,
                hill.iterations,
                started,
            );
        }

        let Pipeline {
            best,
            best_objective: objective,
            reports,
            cancelled,
            ..
        } = pipeline;
        problem.validate(&best)?;
        let score = problem.score(&best);
        debug!(
            objective,
            stages = reports.len(),
            cancelled,
            roster = %problem.describe(&best),
            "meta pipeline finished"
        );

        Ok(MetaResult {
            roster: best,
            score,
            objective,
            stages: reports,
            cancelled,
        })
    }
}

/// Stage bookkeeping: latest roster, best roster and reports.
struct Pipeline {
    latest: Roster,
    best: Roster,
    best_objective: f64,
    reports: Vec<StageReport>,
    cancelled: bool,
}

impl Pipeline {
    fn first(
        stage: Stage,
        roster: Roster,
        objective: f64,
        iterations: usize,
        started: Instant,
    ) -> Self {
        let mut pipeline = Self {
            latest: roster.clone(),
            best: roster.clone(),
            best_objective: f64::NEG_INFINITY,
            reports: Vec::new(),
            cancelled: false,
        };
        pipeline.record(stage, roster, objective, iterations, started);
        pipeline
    }

    fn record(
        &mut self,
        stage: Stage,
        roster: Roster,
        objective: f64,
        iterations: usize,
        started: Instant,
    ) {
        let elapsed_ms = started.elapsed().as_millis() as u64;
        info!(%stage, objective, iterations, elapsed_ms, "meta stage finished");
        if objective > self.best_objective {
            self.best = roster.clone();
            self.best_objective = objective;
        }
        self.latest = roster;
        self.reports.push(StageReport {
            stage,
            objective,
            iterations,
            elapsed_ms,
        });
    }

    /// Checks the cancellation token before the next stage.
    fn halted(&mut self, cancel: Option<&AtomicBool>) -> bool {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            self.cancelled = true;
        }
        self.cancelled
    }
}

/// Optimizes a roster over `pool` with the default pipeline.
///
/// Builds the scoring engine and a default eligibility index, then runs
/// [`MetaRunner`] warm-started from `initial` when given.
///
/// # Errors
///
/// Configuration errors in `weights`, eligibility errors such as a slot
/// with no candidates, and any stage error.
pub fn optimize<O: Objective>(
    pool: &Pool,
    table: &SlotTable,
    weights: &WeightProfile,
    objective: O,
    initial: Option<&Roster>,
) -> Result<(Roster, ScoreResult)> {
    optimize_with(
        pool,
        table,
        weights,
        objective,
        initial,
        &MetaConfig::default(),
    )
}

/// [`optimize`] with an explicit pipeline configuration.
pub fn optimize_with<O: Objective>(
    pool: &Pool,
    table: &SlotTable,
    weights: &WeightProfile,
    objective: O,
    initial: Option<&Roster>,
    config: &MetaConfig,
) -> Result<(Roster, ScoreResult)> {
    let engine = ScoringEngine::new(table, weights, pool)?;
    let index = EligibilityIndex::build(pool, table, &EligibilityConfig::default(), None)?;
    let problem = RosterProblem::new(engine, index, objective);
    let result = MetaRunner::run(&problem, config, initial)?;
    Ok((result.roster, result.score))
}
