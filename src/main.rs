use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use safari_matcher::config::{CatalogSource, Settings};
use safari_matcher::core::{Matcher, MatchingConfig};
use safari_matcher::routes::{self, matches::AppState};
use safari_matcher::services::{CatalogCache, CatalogStore, PostgresClient};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    // Initialize logging
    settings.logging.init_subscriber();

    info!("Starting SafariMatcher service...");

    // Initialize PostgreSQL client (optional unless the catalog lives there)
    let postgres = match &settings.database {
        Some(db) => match PostgresClient::from_settings(
            &db.url,
            db.max_connections,
            db.min_connections,
            db.acquire_timeout_secs,
            db.idle_timeout_secs,
        )
        .await
        {
            Ok(client) => {
                info!("PostgreSQL client initialized (max: {} connections)", db.max_connections.unwrap_or(10));
                Some(Arc::new(client))
            }
            Err(e) if settings.catalog.source == CatalogSource::Postgres => {
                error!("Failed to connect to PostgreSQL: {}", e);
                return Err(io::Error::new(io::ErrorKind::ConnectionRefused, e));
            }
            Err(e) => {
                warn!("Failed to connect to PostgreSQL ({}), preferences will not be stored", e);
                None
            }
        },
        None => {
            info!("No database configured, preferences will not be stored");
            None
        }
    };

    // Catalog store
    let catalog = match (settings.catalog.source, &postgres) {
        (CatalogSource::File, _) => CatalogStore::File(PathBuf::from(&settings.catalog.path)),
        (CatalogSource::Postgres, Some(client)) => CatalogStore::Postgres(Arc::clone(client)),
        (CatalogSource::Postgres, None) => {
            error!("catalog.source = \"postgres\" requires a [database] section");
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "missing database settings"));
        }
    };

    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let cache = Arc::new(CatalogCache::new(cache_ttl));

    // Fail fast on a missing or invalid catalog
    let snapshot = cache.get_or_load(&catalog).await.map_err(|e| {
        error!("Failed to load catalog from {}: {}", catalog.describe(), e);
        io::Error::new(io::ErrorKind::InvalidData, e)
    })?;

    info!("Catalog ready: {} camps (cache TTL: {}s)", snapshot.camps.len(), cache_ttl);

    // Initialize matcher
    let matcher = Matcher::new(MatchingConfig::from(&settings.matching));

    info!("Matcher initialized with config: {:?}", matcher.config());

    // Build application state
    let app_state = AppState {
        catalog,
        cache,
        postgres,
        matcher,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
