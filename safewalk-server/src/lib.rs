//! HTTP surface over the safewalk routing core.

use std::{sync::Arc, time::Duration};

use axum::{
    BoxError, Json, Router,
    error_handling::HandleErrorLayer,
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use safewalk_core::store::GraphStore;
use serde_json::json;
use tower::{ServiceBuilder, limit::ConcurrencyLimitLayer};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;

pub use config::{Cli, ServerConfig};

/// Shared handler state; the store is passed in explicitly, never global
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn GraphStore>,
}

impl AppState {
    pub fn new<S: GraphStore + 'static>(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Builds the HTTP router.
///
/// Reads run under the request timeout. Hazard reports only share the
/// concurrency limit: a blend already handed to the blocking pool commits
/// even if the request future is dropped, so a timeout would report 408 for
/// an observation that was applied.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let reads = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/route", get(handlers::get_route))
        .route("/api/route/safewalk", post(handlers::post_route))
        .route("/api/route/geojson", get(handlers::get_route_geojson))
        .route("/api/route/intersections", get(handlers::list_intersections))
        .route("/api/route/streets", get(handlers::list_streets))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(Duration::from_secs(config.request_timeout_secs))
                .concurrency_limit(config.concurrency_limit),
        );

    let writes = Router::new()
        .route("/api/hazards", post(handlers::report_hazard))
        .layer(ConcurrencyLimitLayer::new(config.concurrency_limit));

    reads
        .merge(writes)
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{origin}'");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}

async fn handle_middleware_error(err: BoxError) -> impl IntoResponse {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "request timed out" })),
        )
    } else {
        tracing::error!("Unhandled middleware error: {err}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": err.to_string() })),
        )
    }
}
