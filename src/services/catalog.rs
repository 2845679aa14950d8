use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use crate::models::Catalog;
use crate::services::postgres::{PostgresClient, PostgresError};

/// Night bounds written by the seed tool for camps that omit them
pub const SEED_MIN_NIGHTS: u32 = 3;
pub const SEED_MAX_NIGHTS: u32 = 10;

/// Errors that can occur while loading a catalog snapshot
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid camps in catalog: {}", .0.join("; "))]
    InvalidCamps(Vec<String>),

    #[error("Database error: {0}")]
    Database(#[from] PostgresError),

    #[error(transparent)]
    Shared(#[from] Arc<CatalogError>),
}

/// Where catalog snapshots come from
///
/// The engine never reaches for the catalog itself: handlers ask the store for
/// a snapshot and pass it in.
#[derive(Clone)]
pub enum CatalogStore {
    /// JSON document on disk, same shape as `GET /api/catalog`
    File(PathBuf),
    /// `animals`, `adventures`, `months` and `camps` tables
    Postgres(Arc<PostgresClient>),
    /// Fixed in-memory snapshot
    Static(Arc<Catalog>),
}

impl CatalogStore {
    /// Load and validate a fresh snapshot
    pub async fn load(&self) -> Result<Arc<Catalog>, CatalogError> {
        let catalog = match self {
            CatalogStore::File(path) => read_catalog_file(path).await?,
            CatalogStore::Postgres(client) => client.load_catalog().await?,
            CatalogStore::Static(catalog) => return Ok(Arc::clone(catalog)),
        };

        validate_catalog(&catalog)?;

        tracing::info!(
            "Loaded catalog from {}: {} camps, {} animals, {} adventures, {} months",
            self.describe(),
            catalog.camps.len(),
            catalog.animals.len(),
            catalog.adventures.len(),
            catalog.months.len()
        );

        Ok(Arc::new(catalog))
    }

    pub fn describe(&self) -> String {
        match self {
            CatalogStore::File(path) => format!("file {}", path.display()),
            CatalogStore::Postgres(_) => "postgres".to_string(),
            CatalogStore::Static(_) => "memory".to_string(),
        }
    }
}

/// Read a catalog JSON document
pub async fn read_catalog_file(path: &std::path::Path) -> Result<Catalog, CatalogError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;

    Ok(serde_json::from_slice(&bytes)?)
}

/// Check every camp, reporting all problems at once
pub fn validate_catalog(catalog: &Catalog) -> Result<(), CatalogError> {
    let errors: Vec<String> = catalog
        .camps
        .iter()
        .filter_map(|camp| camp.validate().err())
        .flatten()
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(CatalogError::InvalidCamps(errors))
    }
}

/// Fill missing night bounds with the seed defaults
///
/// Returns the number of camps that were changed.
pub fn apply_seed_durations(catalog: &mut Catalog) -> usize {
    let mut changed = 0;
    for camp in &mut catalog.camps {
        if camp.min_duration.is_none() || camp.max_duration.is_none() {
            camp.min_duration.get_or_insert(SEED_MIN_NIGHTS);
            camp.max_duration.get_or_insert(SEED_MAX_NIGHTS);
            changed += 1;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_json() -> serde_json::Value {
        serde_json::json!({
            "animals": [{ "id": "lion", "label": "Lion", "full": "lion" }],
            "camps": [
                { "id": "a", "name": "A", "category": "CAMP", "animalProb": { "lion": 0.8 } },
                { "id": "b", "name": "B", "category": "FANCY", "minDuration": 5 }
            ]
        })
    }

    #[test]
    fn test_validate_catalog_ok() {
        let catalog: Catalog = serde_json::from_value(catalog_json()).unwrap();
        assert!(validate_catalog(&catalog).is_ok());
    }

    #[test]
    fn test_validate_catalog_collects_errors() {
        let mut catalog: Catalog = serde_json::from_value(catalog_json()).unwrap();
        catalog.camps[0].animal_prob.insert("lion".to_string(), -0.1);
        catalog.camps[1].max_duration = Some(2);

        match validate_catalog(&catalog) {
            Err(CatalogError::InvalidCamps(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected InvalidCamps, got {:?}", other),
        }
    }

    #[test]
    fn test_apply_seed_durations() {
        let mut catalog: Catalog = serde_json::from_value(catalog_json()).unwrap();

        let changed = apply_seed_durations(&mut catalog);

        assert_eq!(changed, 2);
        assert_eq!(catalog.camps[0].min_duration, Some(3));
        assert_eq!(catalog.camps[0].max_duration, Some(10));
        // Declared bounds are kept
        assert_eq!(catalog.camps[1].min_duration, Some(5));
        assert_eq!(catalog.camps[1].max_duration, Some(10));
    }

    #[test]
    fn test_static_store_returns_same_snapshot() {
        let catalog = Arc::new(Catalog::default());
        let store = CatalogStore::Static(Arc::clone(&catalog));

        let loaded = tokio_test::block_on(store.load()).unwrap();

        assert!(Arc::ptr_eq(&loaded, &catalog));
        assert_eq!(store.describe(), "memory");
    }

    #[test]
    fn test_missing_file_reports_path() {
        let store = CatalogStore::File(PathBuf::from("/nonexistent/catalog.json"));

        let err = tokio_test::block_on(store.load()).unwrap_err();

        assert!(err.to_string().contains("/nonexistent/catalog.json"));
    }
}
