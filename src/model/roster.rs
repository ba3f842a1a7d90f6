//! Slot-to-entity assignments.

use super::entity::{EntityId, Pool};
use super::slot::{SlotGroup, SlotId, SlotTable};
use crate::error::{Result, RosterError};

/// A (possibly partial) assignment of entities to slots.
///
/// Indexed by [`SlotId`]. Cloning copies one `Option<EntityId>` per slot,
/// so optimizers clone freely before every speculative change.
///
/// Invariants maintained by [`assign`](Roster::assign):
/// - every entity's category is allowed by its slot;
/// - no entity occupies more than one slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    slots: Vec<Option<EntityId>>,
}

impl Roster {
    /// An empty roster shaped for `table`.
    pub fn empty(table: &SlotTable) -> Self {
        Self {
            slots: vec![None; table.len()],
        }
    }

    /// Builds a complete roster from `(slot label, entity name)` pairs.
    pub fn from_labels(pairs: &[(&str, &str)], pool: &Pool, table: &SlotTable) -> Result<Self> {
        let mut roster = Self::empty(table);
        for &(label, name) in pairs {
            let slot = table
                .find(label)
                .ok_or_else(|| RosterError::config(format!("unknown slot label: {label}")))?;
            let entity = pool
                .find(name)
                .ok_or_else(|| RosterError::config(format!("unknown entity: {name}")))?;
            roster.assign(slot, entity, pool, table)?;
        }
        let missing: Vec<&str> = table
            .iter()
            .filter(|(id, _)| roster.get(*id).is_none())
            .map(|(_, s)| s.label.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(RosterError::config(format!(
                "missing slots: {}",
                missing.join(", ")
            )));
        }
        Ok(roster)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, slot: SlotId) -> Option<EntityId> {
        self.slots.get(slot.0).copied().flatten()
    }

    /// Returns the slot holding `entity`, if any.
    pub fn slot_of(&self, entity: EntityId) -> Option<SlotId> {
        self.slots
            .iter()
            .position(|s| *s == Some(entity))
            .map(SlotId)
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.slot_of(entity).is_some()
    }

    /// Returns `true` once every slot is filled.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Filled slots in table order.
    pub fn filled(&self) -> impl Iterator<Item = (SlotId, EntityId)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.map(|e| (SlotId(i), e)))
    }

    /// Filled slots belonging to `group`.
    pub fn group_view(&self, table: &SlotTable, group: SlotGroup) -> Vec<(SlotId, EntityId)> {
        table
            .slots_in(group)
            .filter_map(|id| self.get(id).map(|e| (id, e)))
            .collect()
    }

    /// Places `entity` into `slot`.
    ///
    /// Fails without modifying the roster if the category is not allowed
    /// or the entity sits in a different slot. Re-assigning an entity to
    /// the slot it already holds is a no-op.
    pub fn assign(
        &mut self,
        slot: SlotId,
        entity: EntityId,
        pool: &Pool,
        table: &SlotTable,
    ) -> Result<()> {
        let s = table.get(slot);
        let e = pool.get(entity);
        if !s.allows(&e.category) {
            return Err(RosterError::InvalidAssignment {
                entity: e.name.clone(),
                slot: s.label.clone(),
            });
        }
        if let Some(other) = self.slot_of(entity) {
            if other != slot {
                return Err(RosterError::DuplicateEntity {
                    entity: e.name.clone(),
                    slot: table.get(other).label.clone(),
                });
            }
        }
        self.slots[slot.0] = Some(entity);
        Ok(())
    }

    /// Unchecked write for moves whose validity the caller has already
    /// established.
    pub(crate) fn place(&mut self, slot: SlotId, entity: EntityId) {
        self.slots[slot.0] = Some(entity);
    }

    /// Checks every invariant, including completeness.
    pub fn validate(&self, pool: &Pool, table: &SlotTable) -> Result<()> {
        if self.slots.len() != table.len() {
            return Err(RosterError::config(format!(
                "roster has {} slots, table has {}",
                self.slots.len(),
                table.len()
            )));
        }
        let mut check = Self::empty(table);
        for (id, slot) in table.iter() {
            let entity = self
                .get(id)
                .ok_or_else(|| RosterError::config(format!("slot {} is unfilled", slot.label)))?;
            check.assign(id, entity, pool, table)?;
        }
        Ok(())
    }
}
