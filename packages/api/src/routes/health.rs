use crate::state::AppState;
use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
        .route("/startup", get(startup))
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<usize>,
}

impl HealthResponse {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            features: None,
        }
    }
}

#[utoipa::path(
    get,
    path = "/health/live",
    tag = "health",
    responses((status = 200, description = "Process is running", body = HealthResponse))
)]
pub async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy"))
}

// The model is loaded before the listener is bound, so a reachable service is
// always ready.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses((status = 200, description = "Model is loaded", body = HealthResponse))
)]
pub async fn readiness(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        features: Some(state.predictor.schema().len()),
        ..HealthResponse::new("ready")
    })
}

#[utoipa::path(
    get,
    path = "/health/startup",
    tag = "health",
    responses((status = 200, description = "Startup finished", body = HealthResponse))
)]
pub async fn startup() -> Json<HealthResponse> {
    Json(HealthResponse::new("started"))
}
