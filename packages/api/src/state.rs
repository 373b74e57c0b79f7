use income_model::PredictionContext;
use std::sync::Arc;

pub type AppState = Arc<State>;

/// Read-only state shared by every request handler.
#[derive(Debug)]
pub struct State {
    pub predictor: PredictionContext,
}

impl State {
    pub fn new(predictor: PredictionContext) -> Self {
        Self { predictor }
    }
}
