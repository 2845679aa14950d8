use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;
use crate::models::Catalog;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// Catalog collections, each stored as a table of JSONB documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Animals,
    Adventures,
    Months,
    Camps,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Animals,
        Collection::Adventures,
        Collection::Months,
        Collection::Camps,
    ];

    pub fn table(&self) -> &'static str {
        match self {
            Collection::Animals => "animals",
            Collection::Adventures => "adventures",
            Collection::Months => "months",
            Collection::Camps => "camps",
        }
    }
}

/// Documents written per collection by [`PostgresClient::replace_catalog`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogCounts {
    pub animals: usize,
    pub adventures: usize,
    pub months: usize,
    pub camps: usize,
}

/// PostgreSQL client for the catalog collections and the preference log
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Append a preference document to the log
    pub async fn save_preferences(&self, prefs: &Map<String, Value>) -> Result<Uuid, PostgresError> {
        let id = Uuid::new_v4();
        let query = r#"
            INSERT INTO user_preferences (id, prefs, created_at)
            VALUES ($1, $2, NOW())
        "#;

        sqlx::query(query)
            .bind(id)
            .bind(Json(prefs))
            .execute(&self.pool)
            .await?;

        tracing::debug!("Stored preferences {} ({} fields)", id, prefs.len());

        Ok(id)
    }

    /// Read the whole catalog, each collection in insertion order
    pub async fn load_catalog(&self) -> Result<Catalog, PostgresError> {
        let (animals, adventures, months, camps) = tokio::try_join!(
            self.load_collection(Collection::Animals),
            self.load_collection(Collection::Adventures),
            self.load_collection(Collection::Months),
            self.load_collection(Collection::Camps),
        )?;

        Ok(Catalog {
            animals,
            adventures,
            months,
            camps,
        })
    }

    async fn load_collection<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, PostgresError> {
        let query = format!("SELECT doc FROM {} ORDER BY seq", collection.table());

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| {
                row.try_get::<Json<T>, _>("doc")
                    .map(|doc| doc.0)
                    .map_err(PostgresError::from)
            })
            .collect()
    }

    /// Replace every catalog collection in a single transaction
    ///
    /// Existing documents are cleared before inserting so repeated runs never
    /// duplicate entries.
    pub async fn replace_catalog(&self, catalog: &Catalog) -> Result<CatalogCounts, PostgresError> {
        let mut tx = self.pool.begin().await?;

        let counts = CatalogCounts {
            animals: replace_collection(&mut tx, Collection::Animals, &catalog.animals).await?,
            adventures: replace_collection(&mut tx, Collection::Adventures, &catalog.adventures).await?,
            months: replace_collection(&mut tx, Collection::Months, &catalog.months).await?,
            camps: replace_collection(&mut tx, Collection::Camps, &catalog.camps).await?,
        };

        tx.commit().await?;

        tracing::info!("Replaced catalog: {:?}", counts);

        Ok(counts)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

async fn replace_collection<T: Serialize + Sync>(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    collection: Collection,
    docs: &[T],
) -> Result<usize, PostgresError> {
    sqlx::query(&format!("DELETE FROM {}", collection.table()))
        .execute(&mut **tx)
        .await?;

    let insert = format!("INSERT INTO {} (doc) VALUES ($1)", collection.table());
    for doc in docs {
        sqlx::query(&insert).bind(Json(doc)).execute(&mut **tx).await?;
    }

    tracing::info!("Inserted {} documents into '{}'", docs.len(), collection.table());

    Ok(docs.len())
}
