#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use income_api::{construct_router, state::State};
use income_model::PredictionContext;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(env_filter)
        .init();

    tracing::info!("Starting Income Prediction API");

    let config = config::Config::from_env()?;
    tracing::info!(
        "Loading model from {} with feature list {}",
        config.model_path.display(),
        config.features_path.display()
    );

    let predictor = match PredictionContext::load(&config.model_path, &config.features_path) {
        Ok(predictor) => predictor,
        Err(err) => {
            tracing::error!("Failed to load model artifacts: {}", err);
            return Err(err.into());
        }
    };
    tracing::info!(
        "Model ready: {} features, decision threshold {}",
        predictor.schema().len(),
        predictor.threshold()
    );

    let state = Arc::new(State::new(predictor));
    let app = construct_router(state);

    let addr = config.bind_address();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
