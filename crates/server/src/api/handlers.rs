//! HTTP request handlers and shared application state.

use crate::api::errors::ApiError;
use crate::api::models::*;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use callrank_core::HybridSearchEngine;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state passed to every handler via Axum's `State`
/// extractor.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<HybridSearchEngine>,
    pub start_time: Instant,
}

/// `POST /search`
pub async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponseBody>, ApiError> {
    let response = state.engine.search(&req.query, req.limit).await?;

    Ok(Json(SearchResponseBody {
        results: response.results.iter().map(SearchResultBody::from).collect(),
        total: response.total,
        query: req.query,
    }))
}

/// `PUT /weights`
pub async fn update_weights(
    State(state): State<AppState>,
    Json(req): Json<UpdateWeightsRequest>,
) -> Result<Json<WeightsResponse>, ApiError> {
    state.engine.update_weights(&req.weights)?;
    Ok(Json(WeightsResponse {
        weights: state.engine.current_weights(),
    }))
}

/// `GET /weights`
pub async fn get_weights(State(state): State<AppState>) -> Json<WeightsResponse> {
    Json(WeightsResponse {
        weights: state.engine.current_weights(),
    })
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_secs: state.start_time.elapsed().as_secs(),
            semantic_enabled: state.engine.semantic_enabled(),
            llm_enabled: state.engine.llm_enabled(),
        }),
    )
}
