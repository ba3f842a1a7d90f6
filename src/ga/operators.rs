//! Roster-encoded genetic operators.
//!
//! A chromosome is a [`Roster`]: one gene (entity) per slot. Every
//! operator keeps the two roster invariants (category eligibility and
//! uniqueness) by placing genes through [`RosterProblem::assign`].
//!
//! # Operators
//!
//! - [`create_individual`]: random feasible roster in slot-table order
//! - [`crossover`]: per-slot uniform crossover with other-parent fallback
//! - [`mutate`]: per-slot replacement with a fresh eligible pick
//! - [`evolve_one_step`]: one generation of elites, mutants and children
//!
//! # References
//!
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

use rand::Rng;

use super::config::GaConfig;
use super::types::Individual;
use crate::error::{Result, RosterError};
use crate::model::Roster;
use crate::problem::RosterProblem;
use crate::scoring::Objective;

// ============================================================================
// Construction
// ============================================================================

/// Builds a complete roster by filling slots in table order.
///
/// Each slot takes a uniformly random candidate that is not yet on the
/// roster. Pinned slots always take their pin.
///
/// # Errors
///
/// [`RosterError::NoCandidates`] when a slot's candidates are all used up
/// by earlier slots.
pub fn create_individual<O: Objective, R: Rng>(
    problem: &RosterProblem<'_, O>,
    rng: &mut R,
) -> Result<Roster> {
    let table = problem.table();
    let mut roster = Roster::empty(table);
    for slot in table.ids() {
        let entity = problem
            .index()
            .choose(&roster, slot, rng)
            .ok_or_else(|| RosterError::NoCandidates {
                slot: table.get(slot).label.clone(),
            })?;
        problem.assign(&mut roster, slot, entity)?;
    }
    Ok(roster)
}

// ============================================================================
// Crossover
// ============================================================================

/// Uniform crossover of two rosters.
///
/// For every slot a coin flip decides which parent is asked first; if
/// that parent's gene is already in the child, the other parent's gene
/// is tried. A slot where both genes are taken spoils the attempt, and
/// the whole child is rebuilt. A child identical to both parents is not
/// an offspring and also spoils the attempt.
///
/// # Errors
///
/// [`RosterError::BreedFailure`] after `max_attempts` spoiled attempts.
/// Genetically identical parents always end here.
pub fn crossover<O: Objective, R: Rng>(
    problem: &RosterProblem<'_, O>,
    mother: &Roster,
    father: &Roster,
    max_attempts: usize,
    rng: &mut R,
) -> Result<Roster> {
    let table = problem.table();
    'attempt: for _ in 0..max_attempts {
        let mut child = Roster::empty(table);
        for slot in table.ids() {
            let (first, second) = if rng.random_bool(0.5) {
                (mother, father)
            } else {
                (father, mother)
            };
            let gene = [first.get(slot), second.get(slot)]
                .into_iter()
                .flatten()
                .find(|e| !child.contains(*e));
            let Some(gene) = gene else {
                continue 'attempt;
            };
            problem.assign(&mut child, slot, gene)?;
        }
        if child != *mother || child != *father {
            return Ok(child);
        }
    }
    Err(RosterError::BreedFailure {
        attempts: max_attempts,
    })
}

// ============================================================================
// Mutation
// ============================================================================

/// Replaces each slot's occupant with probability `rate`.
///
/// The replacement is drawn from candidates not already on the roster.
/// A slot is left alone when no replacement exists or the draw resolves
/// to an entity already placed (always the case for pinned slots).
///
/// Returns the number of slots changed.
pub fn mutate<O: Objective, R: Rng>(
    problem: &RosterProblem<'_, O>,
    roster: &mut Roster,
    rate: f64,
    rng: &mut R,
) -> Result<usize> {
    let mut changed = 0;
    for slot in problem.table().ids() {
        if rng.random_range(0.0..1.0) >= rate {
            continue;
        }
        let Some(pick) = problem.index().choose(roster, slot, rng) else {
            continue;
        };
        if roster.contains(pick) {
            continue;
        }
        problem.assign(roster, slot, pick)?;
        changed += 1;
    }
    Ok(changed)
}

// ============================================================================
// Generation step
// ============================================================================

/// Produces the next generation from `population`.
///
/// The result has the same length as the input and is made of three
/// disjoint shares (see [`GaConfig::shares`]):
///
/// 1. the fittest `keep_pct` individuals, unchanged;
/// 2. `mutate_pct` copies of uniformly sampled parents, each mutated with
///    probability `mutation_probability`;
/// 3. crossover children of two distinct uniformly sampled parents.
///
/// A child whose parents fail to breed within `max_parent_resamples`
/// fresh draws is replaced by a copy of its last sampled mother.
///
/// # Errors
///
/// [`RosterError::Config`] if shares overflow or the population holds
/// fewer than two individuals.
pub fn evolve_one_step<O: Objective, R: Rng>(
    problem: &RosterProblem<'_, O>,
    population: &[Individual],
    config: &GaConfig,
    rng: &mut R,
) -> Result<Vec<Individual>> {
    evolve_counted(problem, population, config, rng).map(|(next, _)| next)
}

/// [`evolve_one_step`], also returning how many children were copies.
pub(crate) fn evolve_counted<O: Objective, R: Rng>(
    problem: &RosterProblem<'_, O>,
    population: &[Individual],
    config: &GaConfig,
    rng: &mut R,
) -> Result<(Vec<Individual>, usize)> {
    let n = population.len();
    if n < 2 {
        return Err(RosterError::config(
            "population must hold at least 2 individuals",
        ));
    }
    let (keep, mutants, children) = config.shares(n)?;

    let mut ranked: Vec<&Individual> = population.iter().collect();
    ranked.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
    let mut next: Vec<Individual> = ranked[..keep].iter().map(|i| (*i).clone()).collect();

    let mut offspring = Vec::with_capacity(mutants + children);
    for _ in 0..mutants {
        let mut roster = population[rng.random_range(0..n)].roster.clone();
        if rng.random_range(0.0..1.0) < config.mutation_probability {
            mutate(problem, &mut roster, config.mutation_rate, rng)?;
        }
        offspring.push(roster);
    }
    let mut copies = 0;
    for _ in 0..children {
        match breed(problem, population, config, rng)? {
            Bred::Child(child) => offspring.push(child),
            Bred::Copy(mother) => {
                copies += 1;
                offspring.push(mother);
            }
        }
    }

    next.extend(evaluate_all(problem, offspring, config.parallel));
    Ok((next, copies))
}

enum Bred {
    Child(Roster),
    Copy(Roster),
}

/// Crosses distinct random parents, resampling the pair on breed failure.
fn breed<O: Objective, R: Rng>(
    problem: &RosterProblem<'_, O>,
    population: &[Individual],
    config: &GaConfig,
    rng: &mut R,
) -> Result<Bred> {
    let n = population.len();
    let mut mother = 0;
    for _ in 0..=config.max_parent_resamples {
        mother = rng.random_range(0..n);
        let mut father = rng.random_range(0..n - 1);
        if father >= mother {
            father += 1;
        }
        match crossover(
            problem,
            &population[mother].roster,
            &population[father].roster,
            config.max_breed_attempts,
            rng,
        ) {
            Ok(child) => return Ok(Bred::Child(child)),
            Err(RosterError::BreedFailure { .. }) => {}
            Err(err) => return Err(err),
        }
    }
    Ok(Bred::Copy(population[mother].roster.clone()))
}

/// Scores a batch of rosters.
#[cfg(feature = "parallel")]
pub(crate) fn evaluate_all<O: Objective>(
    problem: &RosterProblem<'_, O>,
    rosters: Vec<Roster>,
    parallel: bool,
) -> Vec<Individual> {
    use rayon::prelude::*;

    if parallel {
        rosters
            .into_par_iter()
            .map(|r| Individual::evaluated(problem, r))
            .collect()
    } else {
        rosters
            .into_iter()
            .map(|r| Individual::evaluated(problem, r))
            .collect()
    }
}

/// Scores a batch of rosters.
#[cfg(not(feature = "parallel"))]
pub(crate) fn evaluate_all<O: Objective>(
    problem: &RosterProblem<'_, O>,
    rosters: Vec<Roster>,
    _parallel: bool,
) -> Vec<Individual> {
    rosters
        .into_iter()
        .map(|r| Individual::evaluated(problem, r))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
