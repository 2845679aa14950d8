use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;
use crate::core::{MatchError, Matcher};
use crate::models::{
    Catalog, ErrorResponse, HealthResponse, MatchRequest, PreferencesRequest, PreferencesResponse,
};
use crate::services::{CatalogCache, CatalogError, CatalogStore, PostgresClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogStore,
    pub cache: Arc<CatalogCache>,
    /// Absent when no database is configured; preferences are then rejected
    pub postgres: Option<Arc<PostgresClient>>,
    pub matcher: Matcher,
}

impl AppState {
    /// Current catalog snapshot, served from the cache when warm
    pub async fn snapshot(&self) -> Result<Arc<Catalog>, CatalogError> {
        self.cache.get_or_load(&self.catalog).await
    }
}

/// Configure all matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/catalog", web::get().to(get_catalog))
        .route("/preferences", web::post().to(save_preferences))
        .route("/match", web::post().to(find_matches));
}

fn error_response(status: actix_web::http::StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = match &state.postgres {
        Some(postgres) => postgres.health_check().await.unwrap_or(false),
        None => true,
    };

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Full catalog endpoint
///
/// GET /api/catalog
async fn get_catalog(state: web::Data<AppState>) -> impl Responder {
    match state.snapshot().await {
        Ok(catalog) => HttpResponse::Ok().json(catalog.as_ref()),
        Err(e) => {
            tracing::error!("Failed to fetch catalog: {}", e);
            error_response(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch catalog",
                e.to_string(),
            )
        }
    }
}

/// Record preferences endpoint
///
/// POST /api/preferences
///
/// Stores the posted document as-is for analytics.
async fn save_preferences(
    state: web::Data<AppState>,
    req: web::Json<PreferencesRequest>,
) -> impl Responder {
    let Some(postgres) = &state.postgres else {
        return error_response(
            actix_web::http::StatusCode::SERVICE_UNAVAILABLE,
            "Preferences storage unavailable",
            "No database is configured".to_string(),
        );
    };

    match postgres.save_preferences(&req.prefs).await {
        Ok(id) => {
            tracing::info!("Stored preferences {}", id);
            HttpResponse::Ok().json(PreferencesResponse { ok: true, id })
        }
        Err(e) => {
            tracing::error!("Failed to save preferences: {}", e);
            error_response(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save preferences",
                e.to_string(),
            )
        }
    }
}

/// Match endpoint
///
/// POST /api/match
///
/// Request body:
/// ```json
/// {
///   "rankedItems": [{ "type": "animal", "name": "lion" }, { "type": "adventure", "name": "balloon" }],
///   "months": ["June", "July"],
///   "range": { "min": 3, "max": 10 }
/// }
/// ```
///
/// Returns the top camps per category: `{"CAMP": [...], "GLAMP": [...], "FANCY": [...]}`
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match request: field_errors={:?}", errors);
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }

    tracing::info!(
        "Matching {} ranked items, {} months, range {}..{}",
        req.ranked_items.len(),
        req.months.len(),
        req.range.min,
        req.range.max
    );

    let catalog = match state.snapshot().await {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!("Failed to load catalog for matching: {}", e);
            return error_response(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to match safaris",
                e.to_string(),
            );
        }
    };

    match state.matcher.find_matches(&catalog.camps, &req) {
        Ok(results) => {
            tracing::info!(
                "Returning {} camps (from {} in catalog)",
                results.total(),
                catalog.camps.len()
            );
            HttpResponse::Ok().json(results)
        }
        Err(e @ MatchError::InvalidRange { .. }) => error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Validation failed",
            e.to_string(),
        ),
        Err(e @ MatchError::UnknownCategory { .. }) => {
            tracing::error!("Catalog rejected during matching: {}", e);
            error_response(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to match safaris",
                e.to_string(),
            )
        }
    }
}
