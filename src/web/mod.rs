//! Public-facing HTTP API.
//!
//! One lookup endpoint with two modes (profile search, media search) plus a
//! health check. The handler owns everything request-scoped: query parsing,
//! mode selection, wall-clock stamps for `search_metadata`, and the mapping
//! from typed errors to status codes. The normalization core stays pure.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::core::config;
use crate::core::error::{AppError, AppResult};
use crate::fetch::error::FetchError;
use crate::fetch::{ProfileTarget, RecordFetcher};
use crate::normalize::{extract_shortcode, NormalizerConfig, PostNormalizer};
use crate::response::labels::{LabelSet, LabelStyle};
use crate::response::media::{media_envelope, AuthorBlock};
use crate::response::profile::{profile_envelope, recent_posts};
use crate::response::SearchMeta;

/// Shared state for the API.
#[derive(Clone)]
pub struct ApiState {
    pub fetcher: Arc<dyn RecordFetcher>,
    pub normalizer: PostNormalizer,
    pub labels: &'static LabelSet,
    pub posts_cap: usize,
}

impl ApiState {
    /// Build state from the environment-resolved configuration.
    pub fn new(fetcher: Arc<dyn RecordFetcher>) -> Self {
        Self {
            fetcher,
            normalizer: PostNormalizer::new(NormalizerConfig::from_env()),
            labels: LabelStyle::from_env().labels(),
            posts_cap: *config::PROFILE_POSTS_CAP,
        }
    }
}

/// Build the API router.
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/ig", get(ig_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the public web server.
pub async fn start_web_server(port: u16, state: ApiState) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router(state);

    log::info!("Starting web server on http://{}", addr);
    log::info!("  /ig?url=|id=|username=|userid=  - Post / profile lookup");
    log::info!("  /health                         - Health check");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Query parameters for the lookup endpoint.
#[derive(Debug, Deserialize)]
pub struct IgQuery {
    pub url: Option<String>,
    pub id: Option<String>,
    pub username: Option<String>,
    pub userid: Option<String>,
}

/// GET /ig — profile mode when username/userid is present, else media mode.
async fn ig_handler(State(state): State<ApiState>, Query(query): Query<IgQuery>) -> Response {
    let started = Instant::now();

    if query.username.is_some() || query.userid.is_some() {
        let target = match profile_target(&query) {
            Ok(target) => target,
            Err(response) => return response,
        };
        return match run_profile_lookup(&state, &target, started).await {
            Ok(envelope) => Json(envelope).into_response(),
            Err(e) => error_response(&e),
        };
    }

    if let Some(target) = query.url.as_deref().or(query.id.as_deref()) {
        return match run_media_lookup(&state, target, started).await {
            Ok(envelope) => Json(envelope).into_response(),
            Err(e) => error_response(&e),
        };
    }

    (
        StatusCode::BAD_REQUEST,
        Json(json!({"status": "Error", "message": "Missing params"})),
    )
        .into_response()
}

/// GET /health — simple health check.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Resolve the profile target from query params. Usernames are accepted with
/// a leading `@`; userid must be numeric.
fn profile_target(query: &IgQuery) -> Result<ProfileTarget, Response> {
    if let Some(ref username) = query.username {
        return Ok(ProfileTarget::Username(username.replace('@', "").trim().to_string()));
    }
    if let Some(ref userid) = query.userid {
        return match userid.trim().parse::<u64>() {
            Ok(id) => Ok(ProfileTarget::UserId(id)),
            Err(_) => Err((
                StatusCode::BAD_REQUEST,
                Json(json!({"status": "Error", "message": "userid must be numeric"})),
            )
                .into_response()),
        };
    }
    Err((
        StatusCode::BAD_REQUEST,
        Json(json!({"status": "Error", "message": "Missing params"})),
    )
        .into_response())
}

/// Fetch a profile and assemble the profile-mode envelope.
///
/// Also used by the one-shot CLI, which is why it returns the envelope value
/// instead of an HTTP response.
pub async fn run_profile_lookup(state: &ApiState, target: &ProfileTarget, started: Instant) -> AppResult<Value> {
    let profile = state.fetcher.fetch_profile(target).await?;
    let posts = recent_posts(&profile, &state.normalizer, state.posts_cap);

    let now = Utc::now();
    let meta = SearchMeta {
        id: format!("search_{}", now.timestamp()),
        created_at: Some(now.format("%Y-%m-%dT%H:%M:%SZ").to_string()),
        elapsed_secs: elapsed_secs(started),
    };
    Ok(profile_envelope(&profile, &posts, &meta))
}

/// Extract the shortcode, fetch the post, and assemble the media-mode
/// envelope. The author fetch is best-effort: on failure the envelope
/// carries the degraded author block instead of erroring.
pub async fn run_media_lookup(state: &ApiState, input: &str, started: Instant) -> AppResult<Value> {
    let shortcode = extract_shortcode(input)?;
    let record = state.fetcher.fetch_post(&shortcode).await?;

    let author = match state
        .fetcher
        .fetch_profile(&ProfileTarget::Username(record.owner_username.clone()))
        .await
    {
        Ok(profile) => AuthorBlock::Full(profile),
        Err(e) => {
            log::warn!("Author fetch failed for @{}: {}", record.owner_username, e);
            AuthorBlock::Hidden {
                username: record.owner_username.clone(),
                id: record.owner_id.clone(),
            }
        }
    };

    let post = state.normalizer.normalize(&record, None);
    let meta = SearchMeta {
        id: format!("req_{}", shortcode),
        created_at: None,
        elapsed_secs: elapsed_secs(started),
    };
    Ok(media_envelope(&record, &post, &author, state.labels, &meta))
}

/// Map a typed error to its status code and JSON error body.
fn error_response(err: &AppError) -> Response {
    let status = match err {
        AppError::NotExtractable(_) => StatusCode::BAD_REQUEST,
        AppError::Fetch(FetchError::NotFound(_)) => StatusCode::NOT_FOUND,
        AppError::Fetch(FetchError::AuthRequired(_)) => StatusCode::FORBIDDEN,
        AppError::Fetch(FetchError::Upstream(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::MalformedRecord(_) => StatusCode::BAD_GATEWAY,
    };
    log::warn!("Request failed ({}): {}", status.as_u16(), err);
    (status, Json(json!({"status": "Error", "message": err.to_string()}))).into_response()
}

/// Elapsed wall-clock seconds, rounded to two decimals for the envelope.
fn elapsed_secs(started: Instant) -> f64 {
    (started.elapsed().as_secs_f64() * 100.0).round() / 100.0
}
