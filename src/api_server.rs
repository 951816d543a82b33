// Axum API Server Module
//
// Purpose: REST transport over the query layer (one GET endpoint per query)
// Queries are CPU-bound Polars work and run on the blocking pool; results are
// cached as JSON since every query is a pure function of immutable data.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::data::GameData;
use crate::error::QueryError;
use crate::queries::{
    best_developer_year, developer, developer_reviews_analysis, user_for_genre, userdata,
};

// ============================================================================
// Application State
// ============================================================================

/// Response cache sizing
#[derive(Debug, Clone, Copy)]
pub struct CacheSettings {
    pub max_capacity: u64,
    pub time_to_live: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            time_to_live: Duration::from_secs(300),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub data: Arc<GameData>,
    pub cache: Cache<String, serde_json::Value>,
}

impl AppState {
    /// Load all datasets from `data_dir`; fails before any request is served
    pub async fn new(data_dir: impl Into<PathBuf>, cache: CacheSettings) -> anyhow::Result<Self> {
        let data_dir = data_dir.into();

        tracing::info!("Loading datasets...");
        let data = tokio::task::spawn_blocking(move || GameData::load(&data_dir)).await??;

        Ok(Self::from_data(data, cache))
    }

    /// Wrap already-loaded data
    pub fn from_data(data: GameData, cache: CacheSettings) -> Self {
        tracing::info!(
            "Initializing Moka cache ({} entries, {:?} TTL)...",
            cache.max_capacity,
            cache.time_to_live
        );
        let cache = Cache::builder()
            .max_capacity(cache.max_capacity)
            .time_to_live(cache.time_to_live)
            .build();

        Self {
            data: Arc::new(data),
            cache,
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Query endpoints (one scalar query parameter each)
        .route("/developer", get(get_developer))
        .route("/userdata", get(get_userdata))
        .route("/userforgenre", get(get_user_for_genre))
        .route("/best_developer_year", get(get_best_developer_year))
        .route("/developer_reviews_analysis", get(get_developer_reviews_analysis))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let tables: serde_json::Map<String, serde_json::Value> = state
        .data
        .heights()
        .into_iter()
        .map(|(kind, rows)| (kind.label().to_string(), rows.into()))
        .collect();

    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "tables": tables,
    }))
}

#[derive(Debug, Deserialize)]
struct DeveloperParams {
    desarrollador: String,
}

async fn get_developer(
    State(state): State<AppState>,
    Query(params): Query<DeveloperParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let name = params.desarrollador;
    let cache_key = format!("developer:{}", name);
    run_cached(&state, cache_key, move |data| developer(data, &name)).await
}

#[derive(Debug, Deserialize)]
struct UserDataParams {
    user_id: String,
}

async fn get_userdata(
    State(state): State<AppState>,
    Query(params): Query<UserDataParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user_id = params.user_id;
    let cache_key = format!("userdata:{}", user_id);
    run_cached(&state, cache_key, move |data| userdata(data, &user_id)).await
}

#[derive(Debug, Deserialize)]
struct GenreParams {
    genero: String,
}

async fn get_user_for_genre(
    State(state): State<AppState>,
    Query(params): Query<GenreParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let genre = params.genero;
    let cache_key = format!("userforgenre:{}", genre);
    run_cached(&state, cache_key, move |data| user_for_genre(data, &genre)).await
}

#[derive(Debug, Deserialize)]
struct YearParams {
    anio: i32,
}

async fn get_best_developer_year(
    State(state): State<AppState>,
    Query(params): Query<YearParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let year = params.anio;
    let cache_key = format!("best_developer_year:{}", year);
    run_cached(&state, cache_key, move |data| best_developer_year(data, year)).await
}

#[derive(Debug, Deserialize)]
struct DeveloperReviewsParams {
    desarrolladora: String,
}

async fn get_developer_reviews_analysis(
    State(state): State<AppState>,
    Query(params): Query<DeveloperReviewsParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let name = params.desarrolladora;
    let cache_key = format!("developer_reviews_analysis:{}", name);
    run_cached(&state, cache_key, move |data| developer_reviews_analysis(data, &name)).await
}

/// Serve from cache, or run `query` on the blocking pool and cache its JSON
///
/// Errors are returned as-is and never cached.
async fn run_cached<T, F>(
    state: &AppState,
    cache_key: String,
    query: F,
) -> Result<Json<serde_json::Value>, AppError>
where
    F: FnOnce(&GameData) -> Result<T, QueryError> + Send + 'static,
    T: Serialize + Send + 'static,
{
    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for {}", cache_key);
        return Ok(Json(cached));
    }

    let data = state.data.clone();
    let start = Instant::now();
    let result = tokio::task::spawn_blocking(move || query(&data))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    let value = serde_json::to_value(&result)
        .map_err(|e| AppError::Internal(format!("Serialization error: {}", e)))?;
    tracing::debug!("{} answered in {:?}", cache_key, start.elapsed());

    state.cache.insert(cache_key, value.clone()).await;

    Ok(Json(value))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Internal(String),
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::NotFound(msg) => AppError::NotFound(msg),
            QueryError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Error interno del servidor: {}", msg),
                )
            }
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
