//! Per-category attribute weights and calibration constants.

use std::collections::BTreeMap;

use super::slot::SlotTable;
use crate::error::{Result, RosterError};

/// Weights for one entity category.
///
/// A weighted attribute sum divided by `total` lands on a scale whose
/// `low..high` range is rescaled onto 0–100.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryWeights {
    /// Attribute name → weight.
    pub weights: BTreeMap<String, f64>,
    pub low: f64,
    pub high: f64,
    pub total: f64,
}

impl CategoryWeights {
    pub fn new(low: f64, high: f64, total: f64) -> Self {
        Self {
            weights: BTreeMap::new(),
            low,
            high,
            total,
        }
    }

    pub fn with_weight(mut self, attribute: impl Into<String>, weight: f64) -> Self {
        self.weights.insert(attribute.into(), weight);
        self
    }

    /// Multiplier mapping `low..high` onto `0..100`.
    pub fn scaler(&self) -> f64 {
        100.0 / (self.high - self.low)
    }
}

/// Weight tables for every category, keyed by category name.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightProfile {
    categories: BTreeMap<String, CategoryWeights>,
}

impl WeightProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>, weights: CategoryWeights) -> Self {
        self.categories.insert(category.into(), weights);
        self
    }

    pub fn insert(&mut self, category: impl Into<String>, weights: CategoryWeights) {
        self.categories.insert(category.into(), weights);
    }

    pub fn get(&self, category: &str) -> Option<&CategoryWeights> {
        self.categories.get(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &CategoryWeights)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Rejects non-positive totals, inverted calibration ranges and
    /// non-finite constants.
    pub fn validate(&self) -> Result<()> {
        for (name, c) in self.categories() {
            if !(c.total.is_finite() && c.low.is_finite() && c.high.is_finite()) {
                return Err(RosterError::config(format!(
                    "category {name}: calibration constants must be finite"
                )));
            }
            if c.total <= 0.0 {
                return Err(RosterError::config(format!(
                    "category {name}: total weight must be positive, got {}",
                    c.total
                )));
            }
            if c.high <= c.low {
                return Err(RosterError::config(format!(
                    "category {name}: high ({}) must exceed low ({})",
                    c.high, c.low
                )));
            }
            if let Some((attr, w)) = c.weights.iter().find(|(_, w)| !w.is_finite()) {
                return Err(RosterError::config(format!(
                    "category {name}: weight for {attr} is not finite ({w})"
                )));
            }
        }
        Ok(())
    }

    /// Fails if any category allowed by `table` has no weights.
    pub fn require_categories(&self, table: &SlotTable) -> Result<()> {
        for category in table.categories() {
            if !self.categories.contains_key(category) {
                return Err(RosterError::config(format!(
                    "weight profile is missing category {category}"
                )));
            }
        }
        Ok(())
    }
}
