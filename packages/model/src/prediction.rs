use crate::classifier::Classifier;
use crate::error::ModelError;
use crate::schema::FeatureSchema;
use serde::Serialize;
use std::fmt;

/// Positive-class probability at or above which the high-income label is returned.
pub const DECISION_THRESHOLD: f64 = 0.41;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IncomeLabel {
    #[serde(rename = ">50K")]
    High,
    #[serde(rename = "<=50K")]
    Low,
}

impl IncomeLabel {
    pub fn from_probability(probability: f64, threshold: f64) -> Self {
        if probability >= threshold {
            IncomeLabel::High
        } else {
            IncomeLabel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeLabel::High => ">50K",
            IncomeLabel::Low => "<=50K",
        }
    }
}

impl fmt::Display for IncomeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub probability: f64,
    pub label: IncomeLabel,
}

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("Expected {expected} features, but got {received}.")]
    ArityMismatch { expected: usize, received: usize },
    #[error("inference failed: {0}")]
    Inference(#[from] ModelError),
}

/// Everything a request needs to produce a prediction.
///
/// Built once at startup and shared read-only between requests.
pub struct PredictionContext {
    schema: FeatureSchema,
    classifier: Box<dyn Classifier>,
    threshold: f64,
}

impl PredictionContext {
    pub fn new<C>(schema: FeatureSchema, classifier: C) -> Result<Self, ModelError>
    where
        C: Classifier + 'static,
    {
        classifier.check_schema(&schema)?;
        Ok(Self {
            schema,
            classifier: Box::new(classifier),
            threshold: DECISION_THRESHOLD,
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Validates the vector against the schema, runs the classifier and
    /// applies the decision threshold.
    pub fn predict(&self, features: &[f64]) -> Result<Prediction, PredictError> {
        let record = self
            .schema
            .record(features)
            .ok_or(PredictError::ArityMismatch {
                expected: self.schema.len(),
                received: features.len(),
            })?;

        let probability = self.classifier.predict_proba(&record)?;
        if probability.is_nan() {
            return Err(ModelError::NonFinite.into());
        }

        Ok(Prediction {
            probability,
            label: IncomeLabel::from_probability(probability, self.threshold),
        })
    }
}

impl fmt::Debug for PredictionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredictionContext")
            .field("features", &self.schema.len())
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FeatureRecord;

    struct Fixed(f64);

    impl Classifier for Fixed {
        fn predict_proba(&self, _record: &FeatureRecord<'_>) -> Result<f64, ModelError> {
            Ok(self.0)
        }
    }

    /// Probability equals the value of the first column.
    struct FirstColumn;

    impl Classifier for FirstColumn {
        fn predict_proba(&self, record: &FeatureRecord<'_>) -> Result<f64, ModelError> {
            record
                .get("a")
                .ok_or_else(|| ModelError::MissingFeature("a".to_string()))
        }
    }

    struct Failing;

    impl Classifier for Failing {
        fn predict_proba(&self, _record: &FeatureRecord<'_>) -> Result<f64, ModelError> {
            Err(ModelError::NonFinite)
        }
    }

    fn schema() -> FeatureSchema {
        FeatureSchema::new(vec!["a".to_string(), "b".to_string(), "c".to_string()]).unwrap()
    }

    #[test]
    fn threshold_is_inclusive() {
        let context = PredictionContext::new(schema(), Fixed(0.41)).unwrap();
        let prediction = context.predict(&[0.0, 0.0, 0.0]).unwrap();
        assert_eq!(prediction.label, IncomeLabel::High);

        let context = PredictionContext::new(schema(), Fixed(0.409999)).unwrap();
        let prediction = context.predict(&[0.0, 0.0, 0.0]).unwrap();
        assert_eq!(prediction.label, IncomeLabel::Low);
    }

    #[test]
    fn labels_follow_probability() {
        let context = PredictionContext::new(schema(), FirstColumn).unwrap();
        assert_eq!(context.threshold(), DECISION_THRESHOLD);
        assert_eq!(
            context.predict(&[0.9, 0.0, 0.0]).unwrap().label,
            IncomeLabel::High
        );
        assert_eq!(
            context.predict(&[0.1, 0.0, 0.0]).unwrap().label,
            IncomeLabel::Low
        );
    }

    #[test]
    fn reports_arity_mismatch_counts() {
        let context = PredictionContext::new(schema(), Fixed(0.5)).unwrap();

        for values in [vec![0.0; 2], vec![0.0; 4], Vec::new()] {
            match context.predict(&values) {
                Err(PredictError::ArityMismatch { expected, received }) => {
                    assert_eq!(expected, 3);
                    assert_eq!(received, values.len());
                }
                other => panic!("expected arity mismatch, got {other:?}"),
            }
        }

        let err = context.predict(&[0.0; 2]).unwrap_err();
        assert_eq!(err.to_string(), "Expected 3 features, but got 2.");
    }

    #[test]
    fn identical_inputs_give_identical_labels() {
        let context = PredictionContext::new(schema(), FirstColumn).unwrap();
        let first = context.predict(&[0.41, 1.0, 2.0]).unwrap();
        for _ in 0..10 {
            assert_eq!(context.predict(&[0.41, 1.0, 2.0]).unwrap(), first);
        }
    }

    #[test]
    fn classifier_failures_become_inference_errors() {
        let context = PredictionContext::new(schema(), Failing).unwrap();
        assert!(matches!(
            context.predict(&[0.0, 0.0, 0.0]),
            Err(PredictError::Inference(ModelError::NonFinite))
        ));

        let context = PredictionContext::new(schema(), Fixed(f64::NAN)).unwrap();
        assert!(matches!(
            context.predict(&[0.0, 0.0, 0.0]),
            Err(PredictError::Inference(ModelError::NonFinite))
        ));
    }

    #[test]
    fn labels_serialize_to_income_strings() {
        assert_eq!(serde_json::to_string(&IncomeLabel::High).unwrap(), "\">50K\"");
        assert_eq!(serde_json::to_string(&IncomeLabel::Low).unwrap(), "\"<=50K\"");
        assert_eq!(IncomeLabel::Low.to_string(), "<=50K");
    }
}
