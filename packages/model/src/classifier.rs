use crate::error::ModelError;
use crate::schema::{FeatureRecord, FeatureSchema};

/// A pre-trained binary classifier.
///
/// Implementations are immutable after construction and shared across
/// request handlers.
pub trait Classifier: Send + Sync {
    /// Probability of the positive class for a single row.
    fn predict_proba(&self, record: &FeatureRecord<'_>) -> Result<f64, ModelError>;

    /// Verifies that every column the classifier reads is provided by `schema`.
    fn check_schema(&self, _schema: &FeatureSchema) -> Result<(), ModelError> {
        Ok(())
    }
}
