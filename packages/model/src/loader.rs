//! Startup loading of the model artifact and the ordered feature list.

use crate::ensemble::{ModelDocument, ObliviousEnsemble};
use crate::error::LoadError;
use crate::prediction::PredictionContext;
use crate::schema::FeatureSchema;
use serde::de::DeserializeOwned;
use std::path::Path;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a JSON array of feature names.
pub fn load_feature_schema(path: impl AsRef<Path>) -> Result<FeatureSchema, LoadError> {
    let path = path.as_ref();
    let names: Vec<String> = read_json(path)?;
    FeatureSchema::new(names).map_err(|source| LoadError::Schema {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a JSON tree ensemble export.
pub fn load_classifier(path: impl AsRef<Path>) -> Result<ObliviousEnsemble, LoadError> {
    let path = path.as_ref();
    let document: ModelDocument = read_json(path)?;
    ObliviousEnsemble::try_from(document).map_err(|source| LoadError::Model {
        path: path.to_path_buf(),
        source,
    })
}

impl PredictionContext {
    /// Loads both artifacts and checks that they agree with each other.
    pub fn load(
        model_path: impl AsRef<Path>,
        features_path: impl AsRef<Path>,
    ) -> Result<Self, LoadError> {
        let schema = load_feature_schema(features_path.as_ref())?;
        tracing::debug!("Loaded feature list with {} features", schema.len());

        let classifier = load_classifier(model_path.as_ref())?;
        tracing::debug!(
            "Loaded classifier with {} trees over {} features",
            classifier.tree_count(),
            classifier.feature_count()
        );

        PredictionContext::new(schema, classifier).map_err(LoadError::Mismatch)
    }
}
