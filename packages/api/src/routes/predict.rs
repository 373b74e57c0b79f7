use crate::error::{ApiError, ErrorBody};
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PredictRequest {
    /// Feature values, in the order of the service's feature list.
    pub features: Vec<f64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PredictResponse {
    /// Either `>50K` or `<=50K`.
    pub predicted_income: String,
}

#[utoipa::path(
    post,
    path = "/predict",
    tag = "prediction",
    request_body = PredictRequest,
    responses(
        (status = 200, description = "Predicted income category", body = PredictResponse),
        (status = 400, description = "Wrong number of features", body = ErrorBody),
        (status = 422, description = "Malformed request body", body = ErrorBody),
        (status = 500, description = "Inference failed", body = ErrorBody)
    )
)]
#[tracing::instrument(name = "POST /predict", skip(state, payload))]
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(request) = payload?;
    let prediction = state.predictor.predict(&request.features)?;
    Ok(Json(PredictResponse {
        predicted_income: prediction.label.to_string(),
    }))
}
