use axum::Json;
use utoipa::OpenApi;

use crate::error::ErrorBody;
use crate::routes::{health, predict, root};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Income Prediction API",
        description = "Predicts income category based on user features."
    ),
    paths(
        root::welcome,
        predict::predict,
        health::liveness,
        health::readiness,
        health::startup
    ),
    components(schemas(
        root::WelcomeResponse,
        predict::PredictRequest,
        predict::PredictResponse,
        health::HealthResponse,
        ErrorBody
    )),
    tags(
        (name = "root", description = "Welcome endpoint"),
        (name = "prediction", description = "Income category prediction"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

#[tracing::instrument(name = "GET /openapi.json")]
pub async fn spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
