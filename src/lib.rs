//! Roster assignment optimization.
//!
//! Assigns candidate entities to labeled roster slots so as to maximize
//! a computed score, under slot eligibility and uniqueness constraints.
//! The search is heuristic: no global optimum is guaranteed.
//!
//! - **Model**: entities, slots, rosters and weight profiles, with the
//!   roster invariants enforced at every assignment.
//! - **Scoring**: a pure function from roster to boost-adjusted,
//!   normalized per-slot, per-group and overall scores.
//! - **Eligibility**: per-slot candidate lists bounded by a rank cutoff,
//!   keeping boosted and explicitly pinned entities reachable.
//! - **Genetic Algorithm (GA)**: population search with elitism,
//!   mutation and uniform crossover.
//! - **Simulated Annealing (SA)**: single-roster walk with Metropolis
//!   acceptance and geometric cooling.
//! - **Hill-climb**: deterministic best-improvement local search.
//! - **Meta**: a five-stage pipeline chaining the three optimizers.
//!
//! # Architecture
//!
//! Inputs (pool, slot table, weight profile) are read-only for the whole
//! run and borrowed by a [`RosterProblem`]. Optimizers own their working
//! rosters and draw every random choice from an injected, seedable
//! generator. Loading inputs and persisting results belong to callers.
//!
//! # Example
//!
//! ```
//! use u_roster::model::{CategoryWeights, Entity, Pool, Slot, SlotGroup, SlotTable, WeightProfile};
//! use u_roster::meta::{optimize_with, MetaConfig};
//! use u_roster::ga::GaConfig;
//! use u_roster::scoring::ScoreObjective;
//!
//! let pool = Pool::new(vec![
//!     Entity::new("qb1", "QB", "A").with_rank(80.0).with_attribute("ACC", 80.0),
//!     Entity::new("qb2", "QB", "B").with_rank(70.0).with_attribute("ACC", 90.0),
//! ])
//! .unwrap();
//! let table = SlotTable::new(vec![Slot::new("QB", &["QB"], SlotGroup::Offense)]).unwrap();
//! let weights = WeightProfile::new()
//!     .with_category("QB", CategoryWeights::new(50.0, 99.0, 1.0).with_weight("ACC", 1.0));
//!
//! let config = MetaConfig::default()
//!     .with_small_ga(GaConfig::small().with_max_generations(5))
//!     .with_large_ga(GaConfig::large().with_population_size(4).with_max_generations(5))
//!     .with_seed(1);
//! let (roster, score) =
//!     optimize_with(&pool, &table, &weights, ScoreObjective::default(), None, &config).unwrap();
//! assert_eq!(roster.get(table.find("QB").unwrap()), pool.find("qb2"));
//! assert!(score.overall.raw > 0.0);
//! ```

pub mod eligibility;
pub mod error;
pub mod ga;
pub mod hill;
pub mod meta;
pub mod model;
pub mod problem;
pub mod random;
pub mod sa;
pub mod scoring;

#[cfg(test)]
mod test_fixtures;

pub use error::{Result, RosterError};
pub use meta::optimize;
pub use problem::RosterProblem;
