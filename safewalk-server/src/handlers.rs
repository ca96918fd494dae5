use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use safewalk_core::{
    BlendReport, Edge, Error, HazardObservation, Node, PathResult, RouteRequest, RoutingMode,
    apply_hazard_observation, compute_route, store::GraphStore,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{AppState, error::ApiError};

/// Query string form of a route request
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub mode: RoutingMode,
    #[serde(default)]
    pub ada_required: bool,
}

impl From<RouteQuery> for RouteRequest {
    fn from(query: RouteQuery) -> Self {
        RouteRequest::new(query.start, query.end)
            .mode(query.mode)
            .ada_required(query.ada_required)
    }
}

/// Runs a store-bound operation on the blocking pool
async fn with_store<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&dyn GraphStore) -> Result<T, Error> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    let result = tokio::task::spawn_blocking(move || op(store.as_ref())).await?;
    Ok(result?)
}

fn validate(request: &RouteRequest) -> Result<(), ApiError> {
    if request.origin.trim().is_empty() || request.destination.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "origin and destination must not be empty".to_string(),
        ));
    }
    Ok(())
}

pub async fn get_route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<PathResult>, ApiError> {
    post_route(State(state), Json(query.into())).await
}

pub async fn post_route(
    State(state): State<AppState>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<PathResult>, ApiError> {
    validate(&request)?;
    let result = with_store(&state, move |store| compute_route(store, &request)).await?;
    Ok(Json(result))
}

pub async fn get_route_geojson(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<geojson::Feature>, ApiError> {
    let request = RouteRequest::from(query);
    validate(&request)?;
    let feature = with_store(&state, move |store| {
        compute_route(store, &request)?.to_geojson()
    })
    .await?;
    Ok(Json(feature))
}

pub async fn list_intersections(
    State(state): State<AppState>,
) -> Result<Json<Vec<Node>>, ApiError> {
    Ok(Json(with_store(&state, |store| store.list_nodes()).await?))
}

pub async fn list_streets(State(state): State<AppState>) -> Result<Json<Vec<Edge>>, ApiError> {
    Ok(Json(with_store(&state, |store| store.list_edges()).await?))
}

/// Blends a hazard observation into matching streets.
///
/// Not retried on timeout by the router: once on the blocking pool the blend
/// runs to completion, and resubmitting the observation blends it twice.
/// Edges that stayed contended are returned in `conflicts`.
pub async fn report_hazard(
    State(state): State<AppState>,
    Json(observation): Json<HazardObservation>,
) -> Result<Json<BlendReport>, ApiError> {
    let report = with_store(&state, move |store| {
        apply_hazard_observation(store, &observation)
    })
    .await?;
    tracing::info!(
        updated = report.updated_count,
        conflicts = report.conflicts.len(),
        "hazard observation applied"
    );
    Ok(Json(report))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
