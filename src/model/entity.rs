//! Candidate entities, their boosts, and the pool that owns them.

use std::collections::{BTreeMap, HashMap};

use crate::error::{Result, RosterError};

/// Which entities a [`Boost`] applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoostScope {
    /// Every entity on the roster.
    All,
    /// Only entities whose group equals the given value.
    Group(String),
}

/// An additive modifier to one attribute.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Boost {
    /// Which entities are affected.
    pub scope: BoostScope,
    /// Target attribute name.
    pub attribute: String,
    /// Signed delta added to the attribute.
    pub delta: f64,
}

impl Boost {
    /// Boost applying to every rostered entity.
    pub fn all(attribute: impl Into<String>, delta: f64) -> Self {
        Self {
            scope: BoostScope::All,
            attribute: attribute.into(),
            delta,
        }
    }

    /// Boost applying to one group only.
    pub fn group(group: impl Into<String>, attribute: impl Into<String>, delta: f64) -> Self {
        Self {
            scope: BoostScope::Group(group.into()),
            attribute: attribute.into(),
            delta,
        }
    }

    /// Returns `true` if this boost modifies `entity`.
    pub fn applies_to(&self, entity: &Entity) -> bool {
        match &self.scope {
            BoostScope::All => true,
            BoostScope::Group(g) => *g == entity.group,
        }
    }
}

/// A candidate assignable to a roster slot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    /// Unique identity.
    pub name: String,
    /// Human-facing label; not required to be unique.
    pub display_name: String,
    /// Eligibility tag (positional role).
    pub category: String,
    /// Organizational affiliation, matched by group-scoped boosts.
    pub group: String,
    /// Primary rank metric.
    pub rank: f64,
    /// Secondary rank used for eligibility cutoffs.
    pub adjusted_rank: f64,
    /// Attribute values.
    pub attributes: BTreeMap<String, f64>,
    /// Boosts this entity grants to the roster it joins.
    pub boosts: Vec<Boost>,
}

impl Entity {
    /// Creates an entity with no attributes or boosts.
    ///
    /// The display name defaults to the identity.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        group: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            category: category.into(),
            group: group.into(),
            rank: 0.0,
            adjusted_rank: 0.0,
            attributes: BTreeMap::new(),
            boosts: Vec::new(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Sets the rank; the adjusted rank follows unless set separately.
    pub fn with_rank(mut self, rank: f64) -> Self {
        self.rank = rank;
        self.adjusted_rank = rank;
        self
    }

    pub fn with_adjusted_rank(mut self, adjusted_rank: f64) -> Self {
        self.adjusted_rank = adjusted_rank;
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: f64) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn with_boost(mut self, boost: Boost) -> Self {
        self.boosts.push(boost);
        self
    }

    /// Returns `true` if the entity carries at least one boost.
    pub fn is_boosted(&self) -> bool {
        !self.boosts.is_empty()
    }
}

/// Index of an entity inside its [`Pool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub usize);

/// The ordered candidate pool.
///
/// Entities are addressed by [`EntityId`] so rosters stay small and
/// cheap to copy.
#[derive(Debug, Clone)]
pub struct Pool {
    entities: Vec<Entity>,
    by_name: HashMap<String, EntityId>,
}

impl Pool {
    /// Builds a pool, rejecting duplicate identities.
    pub fn new(entities: Vec<Entity>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(entities.len());
        for (i, e) in entities.iter().enumerate() {
            if by_name.insert(e.name.clone(), EntityId(i)).is_some() {
                return Err(RosterError::config(format!(
                    "duplicate entity name in pool: {}",
                    e.name
                )));
            }
        }
        Ok(Self { entities, by_name })
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns the entity for `id`.
    ///
    /// # Panics
    /// Panics if `id` did not come from this pool.
    pub fn get(&self, id: EntityId) -> &Entity {
        &self.entities[id.0]
    }

    /// Looks up an entity by identity.
    pub fn find(&self, name: &str) -> Option<EntityId> {
        self.by_name.get(name).copied()
    }

    /// Iterates entities in pool order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(i, e)| (EntityId(i), e))
    }
}
