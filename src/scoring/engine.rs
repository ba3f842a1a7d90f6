//! Roster scoring.
//!
//! # Algorithm
//!
//! 1. Pool the boosts of every rostered entity
//! 2. Per slot, read the attributes weighted for the entity's category
//! 3. Add each boost scoped to all entities or to the entity's group
//! 4. Cap boosted values at 99 unless the raw value already exceeds 99
//! 5. Rescale the weighted mean onto 0–100, once from the exact sum and
//!    once from the sum rounded before rescaling
//! 6. Average per group and overall

use std::collections::BTreeMap;

use super::types::{Aggregate, ScoreResult, SlotScore};
use crate::error::{Result, RosterError};
use crate::model::{Boost, Pool, Roster, SlotGroup, SlotTable, WeightProfile};

/// Attribute ceiling applied after boosting.
pub const ATTRIBUTE_CAP: f64 = 99.0;

/// Applies the boost cap rule to one attribute.
///
/// Boosting never pushes a sub-99 raw value past 99, and never lowers a
/// raw value that already exceeds 99.
pub fn cap_attribute(raw: f64, boosted: f64) -> f64 {
    if boosted > ATTRIBUTE_CAP {
        if raw > ATTRIBUTE_CAP {
            raw.min(boosted)
        } else {
            ATTRIBUTE_CAP
        }
    } else {
        boosted
    }
}

/// Pure scoring function over rosters drawn from one pool.
///
/// Holds borrowed, read-only inputs; construct once per run.
#[derive(Debug, Clone, Copy)]
pub struct ScoringEngine<'a> {
    table: &'a SlotTable,
    weights: &'a WeightProfile,
    pool: &'a Pool,
}

impl<'a> ScoringEngine<'a> {
    /// Validates the inputs and builds the engine.
    ///
    /// Fails if the profile is malformed, misses a category some slot
    /// allows, or if an eligible entity lacks a weighted attribute.
    pub fn new(table: &'a SlotTable, weights: &'a WeightProfile, pool: &'a Pool) -> Result<Self> {
        weights.validate()?;
        weights.require_categories(table)?;
        let categories = table.categories();
        for (_, entity) in pool.iter() {
            if !categories.contains(&entity.category.as_str()) {
                continue;
            }
            if let Some(cw) = weights.get(&entity.category) {
                if let Some(attr) = cw
                    .weights
                    .keys()
                    .find(|a| !entity.attributes.contains_key(*a))
                {
                    return Err(RosterError::config(format!(
                        "entity {} is missing attribute {attr}",
                        entity.name
                    )));
                }
            }
        }
        Ok(Self {
            table,
            weights,
            pool,
        })
    }

    pub fn table(&self) -> &'a SlotTable {
        self.table
    }

    pub fn pool(&self) -> &'a Pool {
        self.pool
    }

    /// Scores the filled slots of `roster`.
    ///
    /// Deterministic: the same roster always yields a bit-identical
    /// result. Groups without any filled slot aggregate to zero.
    pub fn score(&self, roster: &Roster) -> ScoreResult {
        let boosts: Vec<&Boost> = roster
            .filled()
            .flat_map(|(_, id)| self.pool.get(id).boosts.iter())
            .collect();

        let mut slots = Vec::with_capacity(roster.len());
        let mut sums = [(0.0f64, 0i64, 0usize); 3];
        let mut overall = (0.0f64, 0i64, 0usize);

        for (slot_id, entity_id) in roster.filled() {
            let entity = self.pool.get(entity_id);
            // Categories are checked against the profile at construction.
            let Some(cw) = self.weights.get(&entity.category) else {
                continue;
            };

            let mut raw_attributes = BTreeMap::new();
            let mut boosted_attributes = BTreeMap::new();
            let mut weighted_sum = 0.0;
            for (attr, weight) in &cw.weights {
                let raw = entity.attributes.get(attr).copied().unwrap_or(0.0);
                let boosted = boosts
                    .iter()
                    .filter(|b| b.attribute == *attr && b.applies_to(entity))
                    .fold(raw, |acc, b| acc + b.delta);
                let value = cap_attribute(raw, boosted);
                weighted_sum += value * weight;
                raw_attributes.insert(attr.clone(), raw);
                boosted_attributes.insert(attr.clone(), value);
            }

            let weighted = weighted_sum / cw.total;
            let scaler = cw.scaler();
            let raw = scaler * (weighted - cw.low);
            // round the weighted sum first, then rescale and truncate
            let rounded = (scaler * (weighted.round() - cw.low)).trunc() as i64;

            let g = group_index(self.table.get(slot_id).group);
            sums[g].0 += raw;
            sums[g].1 += rounded;
            sums[g].2 += 1;
            overall.0 += raw;
            overall.1 += rounded;
            overall.2 += 1;

            slots.push(SlotScore {
                slot: slot_id,
                entity: entity_id,
                raw_attributes,
                boosted_attributes,
                weighted,
                raw,
                rounded,
            });
        }

        ScoreResult {
            slots,
            offense: mean(sums[0]),
            defense: mean(sums[1]),
            special: mean(sums[2]),
            overall: mean(overall),
        }
    }
}

fn group_index(group: SlotGroup) -> usize {
    match group {
        SlotGroup::Offense => 0,
        SlotGroup::Defense => 1,
        SlotGroup::Special => 2,
    }
}

fn mean((raw, rounded, n): (f64, i64, usize)) -> Aggregate {
    if n == 0 {
        return Aggregate::default();
    }
    Aggregate {
        raw: raw / n as f64,
        rounded: rounded as f64 / n as f64,
    }
}
