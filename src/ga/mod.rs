//! Genetic Algorithm over rosters.
//!
//! Population-based search in which every chromosome is a complete
//! [`Roster`](crate::model::Roster). Each generation is split into elites
//! carried over unchanged, mutated copies of random parents, and uniform
//! crossover children of distinct parents.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, shares, presets)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Final optimization result with statistics
//! - [`Individual`]: A roster paired with its fitness
//!
//! # Submodules
//!
//! - [`operators`]: Roster construction, crossover, mutation, generation step
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
pub mod operators;
mod runner;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner};
pub use types::{GenerationStats, Individual};
