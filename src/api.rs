use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::metrics::Metrics;
use crate::model::TrendsResponse;
use crate::service::TrendsService;

pub const UNAVAILABLE_DETAIL: &str = "Failed to fetch trends. Please try again later.";

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TrendsService>,
}

impl AppState {
    pub fn new(service: TrendsService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Trends routes only; see `create_router_with_metrics` for the full app.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/trends", get(get_trends))
        .route("/api/trends/health", get(health))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

pub fn create_router_with_metrics(state: AppState, metrics: &Metrics) -> Router {
    create_router(state).merge(metrics.router())
}

pub fn router(state: AppState) -> Router {
    create_router(state)
}

/// Failures that escape the orchestrator. Detail stays server-side.
#[derive(Debug)]
pub enum ApiError {
    Unavailable,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "detail": UNAVAILABLE_DETAIL })),
            )
                .into_response(),
        }
    }
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Tech Trends API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "trends": "/api/trends",
            "health": "/api/trends/health"
        }
    }))
}

async fn get_trends(State(state): State<AppState>) -> Result<Json<TrendsResponse>, ApiError> {
    let service = state.service.clone();
    // Own task: a crash there becomes a 503 instead of a dropped connection.
    match tokio::spawn(async move { service.get_trends().await }).await {
        Ok(resp) => Ok(Json(resp)),
        Err(e) => {
            tracing::error!(error = %e, "trends task failed");
            Err(ApiError::Unavailable)
        }
    }
}

#[derive(serde::Serialize)]
struct HealthResp {
    status: &'static str,
    google_configured: bool,
    openai_configured: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthResp> {
    Json(HealthResp {
        status: "ok",
        google_configured: state.service.search_configured(),
        openai_configured: state.service.openai_configured(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_maps_to_503() {
        let resp = ApiError::Unavailable.into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
