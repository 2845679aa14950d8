// Service exports
pub mod cache;
pub mod catalog;
pub mod postgres;

pub use cache::CatalogCache;
pub use catalog::{apply_seed_durations, read_catalog_file, validate_catalog, CatalogError, CatalogStore};
pub use postgres::{CatalogCounts, Collection, PostgresClient, PostgresError};
