//! Safari Matcher - ranks safari camps against a traveller's preferences
//!
//! The core of the crate is a pure scoring engine: given a catalog snapshot and
//! a ranked preference request, it filters camps by trip length, scores them on
//! animal sightings, activities and travel months, and returns the best camps
//! per luxury category. Everything around it (HTTP, catalog storage, caching)
//! lives in `routes` and `services`.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{rank_weight, MatchError, Matcher, MatchingConfig};
pub use models::{Camp, Catalog, Category, MatchRequest, MatchResults, NightRange, RankedItem, ScoredCamp};
