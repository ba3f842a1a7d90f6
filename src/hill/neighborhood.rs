//! Single-substitution neighborhood of a roster.

use crate::model::{EntityId, Roster, SlotId};
use crate::problem::RosterProblem;
use crate::scoring::Objective;

/// Replacing one slot's occupant with another entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    pub slot: SlotId,
    pub entity: EntityId,
    /// Objective of the roster after the move.
    pub objective: f64,
    /// `objective` minus the objective of the roster before the move.
    pub delta: f64,
}

impl Move {
    /// The roster with this move applied.
    ///
    /// `roster` must be the roster the move was generated from.
    pub fn apply_to(&self, roster: &Roster) -> Roster {
        let mut next = roster.clone();
        next.place(self.slot, self.entity);
        next
    }
}

/// Every single substitution over `slots`, scored by full re-evaluation.
///
/// Skips the current occupant and any candidate placed in (or pinned to)
/// a different slot, so every move yields a valid roster. Moves come out
/// in slot order, then candidate order, regardless of `parallel`.
pub fn neighborhood<O: Objective>(
    problem: &RosterProblem<'_, O>,
    roster: &Roster,
    slots: &[SlotId],
    parallel: bool,
) -> Vec<Move> {
    let index = problem.index();
    let pairs: Vec<(SlotId, EntityId)> = slots
        .iter()
        .flat_map(|&slot| {
            index
                .candidates(slot)
                .iter()
                .filter(move |&&e| !roster.contains(e) && !index.pinned_elsewhere(e, slot))
                .map(move |&e| (slot, e))
        })
        .collect();
    let base = problem.evaluate(roster);
    score_moves(problem, roster, pairs, base, parallel)
}

/// The strictly improving move with the highest objective.
///
/// Ties go to the first move in scan order. Returns `None` at a local
/// optimum.
pub fn best_step<O: Objective>(
    problem: &RosterProblem<'_, O>,
    roster: &Roster,
    slots: &[SlotId],
    parallel: bool,
) -> Option<Move> {
    neighborhood(problem, roster, slots, parallel)
        .into_iter()
        .filter(|m| m.delta > 0.0)
        .fold(None, |best: Option<Move>, m| match best {
            Some(b) if b.objective >= m.objective => Some(b),
            _ => Some(m),
        })
}

fn score_one<O: Objective>(
    problem: &RosterProblem<'_, O>,
    roster: &Roster,
    (slot, entity): (SlotId, EntityId),
    base: f64,
) -> Move {
    let mut trial = roster.clone();
    trial.place(slot, entity);
    let objective = problem.evaluate(&trial);
    Move {
        slot,
        entity,
        objective,
        delta: objective - base,
    }
}

#[cfg(feature = "parallel")]
fn score_moves<O: Objective>(
    problem: &RosterProblem<'_, O>,
    roster: &Roster,
    pairs: Vec<(SlotId, EntityId)>,
    base: f64,
    parallel: bool,
) -> Vec<Move> {
    use rayon::prelude::*;

    if parallel {
        pairs
            .into_par_iter()
            .map(|p| score_one(problem, roster, p, base))
            .collect()
    } else {
        pairs
            .into_iter()
            .map(|p| score_one(problem, roster, p, base))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn score_moves<O: Objective>(
    problem: &RosterProblem<'_, O>,
    roster: &Roster,
    pairs: Vec<(SlotId, EntityId)>,
    base: f64,
    _parallel: bool,
) -> Vec<Move> {
    pairs
        .into_iter()
        .map(|p| score_one(problem, roster, p, base))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::operators::create_individual;
    use crate::random::create_rng;
    use crate::test_fixtures::{base_roster, four_slot_problem, problem, standard_problem};

    #[test]
    fn test_neighborhood_moves_are_valid() {
        let (pool, table, weights) = standard_problem();
        let problem = problem(&pool, &table, &weights);
        let roster = create_individual(&problem, &mut create_rng(4)).unwrap();
        let slots: Vec<SlotId> = table.ids().collect();
        let moves = neighborhood(&problem, &roster, &slots, false);
        assert!(!moves.is_empty());
        for m in &moves {
            let next = m.apply_to(&roster);
            assert!(problem.validate(&next).is_ok());
            assert_ne!(roster.get(m.slot), Some(m.entity));
        }
    }

    #[test]
    fn test_neighborhood_size_on_four_slots() {
        let (pool, table, weights) = four_slot_problem();
        let problem = problem(&pool, &table, &weights);
        let roster = base_roster(&pool, &table);
        let slots: Vec<SlotId> = table.ids().collect();
        // four candidates left per slot
        assert_eq!(neighborhood(&problem, &roster, &slots, false).len(), 16);
    }

    #[test]
    fn test_delta_matches_full_rescore() {
        let (pool, table, weights) = standard_problem();
        let problem = problem(&pool, &table, &weights);
        let roster = create_individual(&problem, &mut create_rng(8)).unwrap();
        let slots: Vec<SlotId> = table.ids().collect();
        let base = problem.evaluate(&roster);
        for m in neighborhood(&problem, &roster, &slots, false) {
            let after = problem.evaluate(&m.apply_to(&roster));
            assert_eq!(m.objective, after);
            assert_eq!(m.delta, after - base);
        }
    }

    #[test]
    fn test_deltas_independent_of_scan_order() {
        let (pool, table, weights) = standard_problem();
        let problem = problem(&pool, &table, &weights);
        let roster = create_individual(&problem, &mut create_rng(12)).unwrap();
        let forward: Vec<SlotId> = table.ids().collect();
        let backward: Vec<SlotId> = forward.iter().rev().copied().collect();

        let mut a = neighborhood(&problem, &roster, &forward, false);
        let mut b = neighborhood(&problem, &roster, &backward, false);
        let key = |m: &Move| (m.slot.0, m.entity.0);
        a.sort_by_key(key);
        b.sort_by_key(key);
        assert_eq!(a, b);
    }

    #[test]
    fn test_independent_swaps_commute() {
        let (pool, table, weights) = four_slot_problem();
        let problem = problem(&pool, &table, &weights);
        let roster = base_roster(&pool, &table);
        let slots: Vec<SlotId> = table.ids().collect();
        let moves = neighborhood(&problem, &roster, &slots, false);
        let qb = moves.iter().find(|m| m.slot == SlotId(0)).unwrap();
        let k = moves.iter().find(|m| m.slot == SlotId(3)).unwrap();

        let qb_then_k = k.apply_to(&qb.apply_to(&roster));
        let k_then_qb = qb.apply_to(&k.apply_to(&roster));
        assert_eq!(qb_then_k, k_then_qb);
        assert_eq!(problem.evaluate(&qb_then_k), problem.evaluate(&k_then_qb));
    }

    #[test]
    fn test_best_step_is_strict_maximum() {
        let (pool, table, weights) = standard_problem();
        let problem = problem(&pool, &table, &weights);
        let roster = create_individual(&problem, &mut create_rng(21)).unwrap();
        let slots: Vec<SlotId> = table.ids().collect();
        let moves = neighborhood(&problem, &roster, &slots, false);
        match best_step(&problem, &roster, &slots, false) {
            Some(step) => {
                assert!(step.delta > 0.0);
                assert!(moves.iter().all(|m| m.objective <= step.objective));
                let first = moves.iter().find(|m| m.objective == step.objective).unwrap();
                assert_eq!(*first, step);
            }
            None => assert!(moves.iter().all(|m| m.delta <= 0.0)),
        }
    }

    #[test]
    fn test_parallel_neighborhood_same_order() {
        let (pool, table, weights) = standard_problem();
        let problem = problem(&pool, &table, &weights);
        let roster = create_individual(&problem, &mut create_rng(30)).unwrap();
        let slots: Vec<SlotId> = table.ids().collect();
        assert_eq!(
            neighborhood(&problem, &roster, &slots, true),
            neighborhood(&problem, &roster, &slots, false)
        );
    }
}
