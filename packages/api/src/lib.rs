use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};
use error::ApiError;
use state::AppState;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer, cors::CorsLayer,
    trace::TraceLayer,
};

pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;

pub use axum;

pub fn construct_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::root::welcome))
        .route("/predict", post(routes::predict::predict))
        .nest("/health", routes::health::routes())
        .route("/openapi.json", get(openapi::spec))
        .fallback(not_found)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(error::panic_response))
                .layer(CompressionLayer::new()),
        )
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}
