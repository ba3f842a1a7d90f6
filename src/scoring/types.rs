//! Score breakdown types.

use std::collections::BTreeMap;

use crate::model::{EntityId, SlotGroup, SlotId};

/// Score of one filled slot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotScore {
    pub slot: SlotId,
    pub entity: EntityId,
    /// Attribute values before boosts.
    pub raw_attributes: BTreeMap<String, f64>,
    /// Attribute values after boosts and capping.
    pub boosted_attributes: BTreeMap<String, f64>,
    /// Weighted attribute sum divided by the category total.
    pub weighted: f64,
    /// Rescaled score from the unrounded weighted sum.
    pub raw: f64,
    /// Rescaled score from the rounded weighted sum, truncated.
    pub rounded: i64,
}

/// Mean score over a set of slots.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aggregate {
    pub raw: f64,
    /// Mean of the integer slot scores.
    pub rounded: f64,
}

/// Full scoring output for a roster.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreResult {
    /// Filled slots in slot-table order.
    pub slots: Vec<SlotScore>,
    pub offense: Aggregate,
    pub defense: Aggregate,
    pub special: Aggregate,
    pub overall: Aggregate,
}

impl ScoreResult {
    pub fn group(&self, group: SlotGroup) -> Aggregate {
        match group {
            SlotGroup::Offense => self.offense,
            SlotGroup::Defense => self.defense,
            SlotGroup::Special => self.special,
        }
    }

    /// Breakdown for one slot, if it was filled.
    pub fn slot(&self, slot: SlotId) -> Option<&SlotScore> {
        self.slots.iter().find(|s| s.slot == slot)
    }
}
