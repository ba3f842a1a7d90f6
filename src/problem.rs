//! The optimization problem shared by every optimizer.

use crate::eligibility::EligibilityIndex;
use crate::error::Result;
use crate::model::{EntityId, Pool, Roster, SlotId, SlotTable};
use crate::scoring::{Objective, ScoreResult, ScoringEngine};

/// Scoring engine, eligibility index and objective bundled together.
///
/// All three are read-only; optimizers borrow the problem and own their
/// working rosters.
pub struct RosterProblem<'a, O: Objective> {
    engine: ScoringEngine<'a>,
    index: EligibilityIndex,
    objective: O,
}

impl<'a, O: Objective> RosterProblem<'a, O> {
    pub fn new(engine: ScoringEngine<'a>, index: EligibilityIndex, objective: O) -> Self {
        Self {
            engine,
            index,
            objective,
        }
    }

    pub fn engine(&self) -> &ScoringEngine<'a> {
        &self.engine
    }

    pub fn index(&self) -> &EligibilityIndex {
        &self.index
    }

    pub fn table(&self) -> &'a SlotTable {
        self.engine.table()
    }

    pub fn pool(&self) -> &'a Pool {
        self.engine.pool()
    }

    pub fn score(&self, roster: &Roster) -> ScoreResult {
        self.engine.score(roster)
    }

    /// Objective value of `roster`. Higher is better.
    pub fn evaluate(&self, roster: &Roster) -> f64 {
        self.objective.evaluate(&self.engine.score(roster))
    }

    /// Checked assignment against this problem's pool and table.
    pub fn assign(&self, roster: &mut Roster, slot: SlotId, entity: EntityId) -> Result<()> {
        roster.assign(slot, entity, self.pool(), self.table())
    }

    /// Full invariant check, including completeness.
    pub fn validate(&self, roster: &Roster) -> Result<()> {
        roster.validate(self.pool(), self.table())
    }

    /// Resolves optional slot labels, defaulting to every slot.
    pub fn resolve_slots(&self, labels: Option<&[String]>) -> Result<Vec<SlotId>> {
        match labels {
            Some(labels) => self.table().resolve(labels),
            None => Ok(self.table().ids().collect()),
        }
    }

    /// Human-readable `slot=entity` listing, used in log output.
    pub fn describe(&self, roster: &Roster) -> String {
        roster
            .filled()
            .map(|(s, e)| {
                format!(
                    "{}={}",
                    self.table().get(s).label,
                    self.pool().get(e).display_name
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
