//! Roster slots and the fixed slot table.

use std::collections::HashSet;

use crate::error::{Result, RosterError};

/// Scoring partition a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotGroup {
    Offense,
    Defense,
    Special,
}

impl SlotGroup {
    /// All groups in reporting order.
    pub const ALL: [SlotGroup; 3] = [SlotGroup::Offense, SlotGroup::Defense, SlotGroup::Special];
}

/// A labeled roster position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot {
    pub label: String,
    /// Entity categories permitted here.
    pub allowed: Vec<String>,
    pub group: SlotGroup,
}

impl Slot {
    pub fn new(label: impl Into<String>, allowed: &[&str], group: SlotGroup) -> Self {
        Self {
            label: label.into(),
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
            group,
        }
    }

    /// Returns `true` if `category` may fill this slot.
    pub fn allows(&self, category: &str) -> bool {
        self.allowed.iter().any(|c| c == category)
    }
}

/// Index of a slot inside its [`SlotTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotId(pub usize);

/// Ordered, immutable set of slots.
///
/// The order is the deterministic fill order used by the optimizers.
#[derive(Debug, Clone)]
pub struct SlotTable {
    slots: Vec<Slot>,
}

impl SlotTable {
    /// Builds a table from slots.
    ///
    /// Rejects an empty table, duplicate labels, and slots with no
    /// allowed category.
    pub fn new(slots: Vec<Slot>) -> Result<Self> {
        if slots.is_empty() {
            return Err(RosterError::config("slot table must not be empty"));
        }
        let mut seen = HashSet::new();
        for slot in &slots {
            if !seen.insert(slot.label.as_str()) {
                return Err(RosterError::config(format!(
                    "duplicate slot label: {}",
                    slot.label
                )));
            }
            if slot.allowed.is_empty() {
                return Err(RosterError::config(format!(
                    "slot {} has no allowed categories",
                    slot.label
                )));
            }
        }
        Ok(Self { slots })
    }

    /// The 30-slot football roster: 12 offense, 14 defense, 4 special.
    pub fn standard() -> Self {
        use SlotGroup::*;
        let slots = vec![
            Slot::new("C", &["C"], Offense),
            Slot::new("FB", &["HB", "FB"], Offense),
            Slot::new("HB", &["HB"], Offense),
            Slot::new("LG", &["OG"], Offense),
            Slot::new("RG", &["OG"], Offense),
            Slot::new("LT", &["OT"], Offense),
            Slot::new("RT", &["OT"], Offense),
            Slot::new("QB", &["QB"], Offense),
            Slot::new("TE", &["TE"], Offense),
            Slot::new("WR1", &["WR"], Offense),
            Slot::new("WR2", &["WR"], Offense),
            Slot::new("SLOT", &["WR", "TE"], Offense),
            Slot::new("CB1", &["CB"], Defense),
            Slot::new("CB2", &["CB"], Defense),
            Slot::new("FS", &["S"], Defense),
            Slot::new("SS", &["S"], Defense),
            Slot::new("NICKEL", &["CB", "S"], Defense),
            Slot::new("DIME", &["CB", "S"], Defense),
            Slot::new("LOLB", &["LB"], Defense),
            Slot::new("MLB", &["MLB"], Defense),
            Slot::new("MLB34", &["LB", "MLB"], Defense),
            Slot::new("ROLB", &["LB"], Defense),
            Slot::new("LE", &["DE"], Defense),
            Slot::new("DT", &["DT"], Defense),
            Slot::new("DT43", &["DT"], Defense),
            Slot::new("RE", &["DE"], Defense),
            Slot::new("K", &["K"], Special),
            Slot::new("KR", &["KR"], Special),
            Slot::new("P", &["P"], Special),
            Slot::new("PR", &["PR"], Special),
        ];
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// # Panics
    /// Panics if `id` did not come from this table.
    pub fn get(&self, id: SlotId) -> &Slot {
        &self.slots[id.0]
    }

    /// Looks up a slot by label.
    pub fn find(&self, label: &str) -> Option<SlotId> {
        self.slots.iter().position(|s| s.label == label).map(SlotId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &Slot)> {
        self.slots.iter().enumerate().map(|(i, s)| (SlotId(i), s))
    }

    pub fn ids(&self) -> impl Iterator<Item = SlotId> {
        (0..self.slots.len()).map(SlotId)
    }

    /// Slots belonging to `group`, in table order.
    pub fn slots_in(&self, group: SlotGroup) -> impl Iterator<Item = SlotId> + '_ {
        self.iter()
            .filter(move |(_, s)| s.group == group)
            .map(|(id, _)| id)
    }

    /// Resolves a list of labels to ids, failing on unknown labels.
    pub fn resolve(&self, labels: &[String]) -> Result<Vec<SlotId>> {
        labels
            .iter()
            .map(|l| {
                self.find(l)
                    .ok_or_else(|| RosterError::config(format!("unknown slot label: {l}")))
            })
            .collect()
    }

    /// Every category allowed by at least one slot.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for slot in &self.slots {
            for c in &slot.allowed {
                if seen.insert(c.as_str()) {
                    out.push(c.as_str());
                }
            }
        }
        out
    }
}
