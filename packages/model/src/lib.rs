//! Income classifier: feature schema, tree ensemble inference and the decision rule.
//!
//! A [`PredictionContext`] is loaded once from disk and then answers
//! [`PredictionContext::predict`] calls without further I/O.

pub mod classifier;
pub mod ensemble;
pub mod error;
pub mod loader;
pub mod prediction;
pub mod schema;

pub use classifier::Classifier;
pub use ensemble::ObliviousEnsemble;
pub use error::{LoadError, ModelError, SchemaError};
pub use loader::{load_classifier, load_feature_schema};
pub use prediction::{DECISION_THRESHOLD, IncomeLabel, Prediction, PredictError, PredictionContext};
pub use schema::{FeatureRecord, FeatureSchema};
