// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Camp, Catalog, CatalogItem, Category, DEFAULT_MAX_NIGHTS, DEFAULT_MIN_NIGHTS};
pub use requests::{ItemKind, MatchRequest, NightRange, PreferencesRequest, RankedItem};
pub use responses::{ErrorResponse, HealthResponse, MatchResults, PreferencesResponse, ScoredCamp};
