//! Population members and per-generation statistics.

use crate::model::Roster;
use crate::problem::RosterProblem;
use crate::scoring::Objective;

/// A roster together with its objective value.
///
/// Fitness is higher-is-better and is computed once, when the individual
/// enters a population.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    pub roster: Roster,
    pub fitness: f64,
}

impl Individual {
    /// Scores `roster` against `problem`.
    pub fn evaluated<O: Objective>(problem: &RosterProblem<'_, O>, roster: Roster) -> Self {
        let fitness = problem.evaluate(&roster);
        Self { roster, fitness }
    }
}

/// Fitness summary of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// Mean fitness of the population.
    pub mean: f64,
    /// Best fitness within the population.
    pub max: f64,
    /// Best fitness observed so far in the run.
    pub best: f64,
}

impl GenerationStats {
    pub(crate) fn of(population: &[Individual], best: f64) -> Self {
        let n = population.len().max(1) as f64;
        let mean = population.iter().map(|i| i.fitness).sum::<f64>() / n;
        let max = population
            .iter()
            .map(|i| i.fitness)
            .fold(f64::NEG_INFINITY, f64::max);
        Self { mean, max, best }
    }
}

/// Returns the fittest individual, first occurrence on ties.
pub(crate) fn fittest(population: &[Individual]) -> Option<&Individual> {
    population.iter().fold(None, |best, ind| match best {
        Some(b) if b.fitness >= ind.fitness => Some(b),
        _ => Some(ind),
    })
}
