//! Per-slot candidate lists.

use std::collections::{BTreeMap, HashMap};

use rand::Rng;

use super::config::EligibilityConfig;
use crate::error::{Result, RosterError};
use crate::model::{EntityId, Pool, Roster, SlotId, SlotTable};

/// Explicit candidate sets: slot label → entity identities.
pub type Overrides = BTreeMap<String, Vec<String>>;

/// Precomputed slot → candidate list mapping.
///
/// A slot with exactly one candidate *pins* that entity: it is always
/// chosen for the slot and never offered to any other slot.
#[derive(Debug, Clone)]
pub struct EligibilityIndex {
    candidates: Vec<Vec<EntityId>>,
    pins: HashMap<EntityId, SlotId>,
}

impl EligibilityIndex {
    /// Builds the index.
    ///
    /// For each slot: allowed-category entities sorted by adjusted rank
    /// (descending, stable), cut to `top_k`, then boosted entities lost
    /// to the cutoff appended in pool order. An override replaces the
    /// slot's list outright.
    ///
    /// # Errors
    ///
    /// - [`RosterError::Config`] for an override naming an unknown slot,
    ///   or two slots pinning the same entity
    /// - [`RosterError::InvalidAssignment`] for an override entity whose
    ///   category the slot does not allow
    /// - [`RosterError::NoCandidates`] for any slot left empty
    pub fn build(
        pool: &Pool,
        table: &SlotTable,
        config: &EligibilityConfig,
        overrides: Option<&Overrides>,
    ) -> Result<Self> {
        let mut candidates: Vec<Vec<EntityId>> = table
            .iter()
            .map(|(_, slot)| {
                let mut eligible: Vec<EntityId> = pool
                    .iter()
                    .filter(|(_, e)| slot.allows(&e.category))
                    .map(|(id, _)| id)
                    .collect();

                let boosted: Vec<EntityId> = if config.include_boosted {
                    eligible
                        .iter()
                        .copied()
                        .filter(|id| pool.get(*id).is_boosted())
                        .collect()
                } else {
                    Vec::new()
                };
                eligible.sort_by(|a, b| {
                    pool.get(*b)
                        .adjusted_rank
                        .total_cmp(&pool.get(*a).adjusted_rank)
                });
                let Some(k) = config.top_k else {
                    return eligible;
                };
                eligible.truncate(k);
                for id in boosted {
                    if !eligible.contains(&id) {
                        eligible.push(id);
                    }
                }
                eligible
            })
            .collect();

        if let Some(overrides) = overrides {
            for (label, names) in overrides {
                let slot_id = table
                    .find(label)
                    .ok_or_else(|| RosterError::config(format!("unknown slot label: {label}")))?;
                let slot = table.get(slot_id);
                let mut list = Vec::new();
                for (id, e) in pool.iter().filter(|(_, e)| names.contains(&e.name)) {
                    if !slot.allows(&e.category) {
                        return Err(RosterError::InvalidAssignment {
                            entity: e.name.clone(),
                            slot: label.clone(),
                        });
                    }
                    list.push(id);
                }
                candidates[slot_id.0] = list;
            }
        }

        if let Some((_, slot)) = table.iter().find(|(id, _)| candidates[id.0].is_empty()) {
            return Err(RosterError::NoCandidates {
                slot: slot.label.clone(),
            });
        }

        let mut pins = HashMap::new();
        for (slot_id, slot) in table.iter() {
            if let [only] = candidates[slot_id.0].as_slice() {
                if let Some(other) = pins.insert(*only, slot_id) {
                    return Err(RosterError::config(format!(
                        "{} is the only candidate for both {} and {}",
                        pool.get(*only).name,
                        table.get(other).label,
                        slot.label
                    )));
                }
            }
        }

        tracing::debug!(
            slots = table.len(),
            pinned = pins.len(),
            max_candidates = candidates.iter().map(Vec::len).max().unwrap_or(0),
            "eligibility index built"
        );

        Ok(Self { candidates, pins })
    }

    /// Candidates for `slot`, best adjusted rank first.
    pub fn candidates(&self, slot: SlotId) -> &[EntityId] {
        &self.candidates[slot.0]
    }

    /// Returns `true` if `slot` has exactly one candidate.
    pub fn is_pinned(&self, slot: SlotId) -> bool {
        self.candidates[slot.0].len() == 1
    }

    /// Returns `true` if `entity` is reserved by a slot other than `slot`.
    pub fn pinned_elsewhere(&self, entity: EntityId, slot: SlotId) -> bool {
        self.pins.get(&entity).is_some_and(|s| *s != slot)
    }

    /// Picks a uniformly random candidate for `slot`.
    ///
    /// A pinned slot always yields its pin. Otherwise only candidates not
    /// on `roster` and not pinned elsewhere are considered. Returns
    /// `None` when none remain.
    pub fn choose<R: Rng>(&self, roster: &Roster, slot: SlotId, rng: &mut R) -> Option<EntityId> {
        let list = self.candidates(slot);
        if self.is_pinned(slot) {
            return list.first().copied();
        }
        let open: Vec<EntityId> = list
            .iter()
            .copied()
            .filter(|e| !roster.contains(*e) && !self.pinned_elsewhere(*e, slot))
            .collect();
        if open.is_empty() {
            None
        } else {
            Some(open[rng.random_range(0..open.len())])
        }
    }
}
