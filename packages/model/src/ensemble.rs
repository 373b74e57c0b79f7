//! Oblivious decision tree ensembles, read from CatBoost's JSON model export.
//!
//! Every tree applies the same split at each depth level, so a tree of depth
//! `d` is evaluated by computing a `d`-bit leaf index: bit `i` is set when the
//! value of split `i`'s feature is strictly greater than its border. The raw
//! score is `scale * Σ leaf + bias`, and the positive-class probability is the
//! logistic sigmoid of the raw score.
//!
//! Only numeric splits are supported. Categorical and one-hot splits require
//! feature derivation that happens before the service sees the vector.

use crate::classifier::Classifier;
use crate::error::ModelError;
use crate::schema::{FeatureRecord, FeatureSchema};
use serde::Deserialize;

const MAX_DEPTH: usize = 16;
const FLOAT_SPLIT: &str = "FloatFeature";

// ============================================================================
// JSON layout
// ============================================================================

/// Raw JSON model document, converted with [`ObliviousEnsemble::try_from`].
#[derive(Debug, Deserialize)]
pub struct ModelDocument {
    #[serde(default)]
    features_info: FeaturesInfo,
    #[serde(default)]
    oblivious_trees: Vec<TreeDocument>,
    #[serde(default)]
    scale_and_bias: Option<ScaleAndBias>,
}

#[derive(Debug, Default, Deserialize)]
struct FeaturesInfo {
    #[serde(default)]
    float_features: Vec<FloatFeatureDocument>,
}

#[derive(Debug, Deserialize)]
struct FloatFeatureDocument {
    #[serde(default)]
    feature_index: Option<usize>,
    flat_feature_index: usize,
    #[serde(default)]
    feature_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TreeDocument {
    #[serde(default)]
    splits: Vec<SplitDocument>,
    leaf_values: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct SplitDocument {
    #[serde(default)]
    float_feature_index: Option<usize>,
    #[serde(default)]
    border: f64,
    split_type: String,
}

/// `[scale, bias]`, where older exports write the bias as a plain number and
/// newer ones as a one-element array.
#[derive(Debug, Deserialize)]
struct ScaleAndBias(f64, Bias);

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Bias {
    Scalar(f64),
    Vector(Vec<f64>),
}

impl Bias {
    fn single(self) -> Result<f64, ModelError> {
        match self {
            Bias::Scalar(value) => Ok(value),
            Bias::Vector(values) if values.len() == 1 => Ok(values[0]),
            Bias::Vector(values) => Err(ModelError::UnsupportedBias(values.len())),
        }
    }
}

// ============================================================================
// Compiled model
// ============================================================================

/// Where a model feature is read from in a [`FeatureRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
enum Column {
    Named(String),
    Position(usize),
}

impl Column {
    fn from_document(feature: &FloatFeatureDocument) -> Self {
        match feature.feature_id.as_deref() {
            Some(name) if !name.is_empty() => Column::Named(name.to_string()),
            _ => Column::Position(feature.flat_feature_index),
        }
    }

    fn resolve(&self, record: &FeatureRecord<'_>) -> Result<f64, ModelError> {
        match self {
            Column::Named(name) => record
                .get(name)
                .ok_or_else(|| ModelError::MissingFeature(name.clone())),
            Column::Position(position) => {
                record
                    .at(*position)
                    .ok_or(ModelError::PositionOutOfRange {
                        position: *position,
                        len: record.len(),
                    })
            }
        }
    }

    fn check(&self, schema: &FeatureSchema) -> Result<(), ModelError> {
        match self {
            Column::Named(name) if !schema.contains(name) => {
                Err(ModelError::MissingFeature(name.clone()))
            }
            Column::Position(position) if *position >= schema.len() => {
                Err(ModelError::PositionOutOfRange {
                    position: *position,
                    len: schema.len(),
                })
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
struct Split {
    /// Index into `ObliviousEnsemble::columns`.
    column: usize,
    border: f64,
}

#[derive(Debug, Clone)]
struct ObliviousTree {
    splits: Vec<Split>,
    leaf_values: Vec<f64>,
}

impl ObliviousTree {
    fn leaf_value(&self, values: &[f64]) -> f64 {
        let index = self
            .splits
            .iter()
            .enumerate()
            .fold(0usize, |index, (depth, split)| {
                if values[split.column] > split.border {
                    index | (1 << depth)
                } else {
                    index
                }
            });
        self.leaf_values[index]
    }
}

/// A binary classifier made of oblivious trees.
#[derive(Debug, Clone)]
pub struct ObliviousEnsemble {
    columns: Vec<Column>,
    trees: Vec<ObliviousTree>,
    scale: f64,
    bias: f64,
}

impl ObliviousEnsemble {
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    pub fn feature_count(&self) -> usize {
        self.columns.len()
    }

    /// Untransformed score before the sigmoid.
    pub fn raw_score(&self, record: &FeatureRecord<'_>) -> Result<f64, ModelError> {
        let values = self
            .columns
            .iter()
            .map(|column| column.resolve(record))
            .collect::<Result<Vec<_>, _>>()?;

        let sum: f64 = self.trees.iter().map(|tree| tree.leaf_value(&values)).sum();
        Ok(self.scale * sum + self.bias)
    }
}

impl TryFrom<ModelDocument> for ObliviousEnsemble {
    type Error = ModelError;

    fn try_from(document: ModelDocument) -> Result<Self, Self::Error> {
        let ModelDocument {
            features_info,
            oblivious_trees,
            scale_and_bias,
        } = document;

        if oblivious_trees.is_empty() {
            return Err(ModelError::NoTrees);
        }

        let float_features = features_info.float_features;
        let columns: Vec<Column> = float_features.iter().map(Column::from_document).collect();

        let column_of = |index: usize| {
            float_features
                .iter()
                .enumerate()
                .find(|(pos, feature)| feature.feature_index.unwrap_or(*pos) == index)
                .map(|(pos, _)| pos)
        };

        let mut trees = Vec::with_capacity(oblivious_trees.len());
        for (tree_idx, tree) in oblivious_trees.into_iter().enumerate() {
            let depth = tree.splits.len();
            if depth > MAX_DEPTH {
                return Err(ModelError::TreeTooDeep {
                    tree: tree_idx,
                    depth,
                    max: MAX_DEPTH,
                });
            }

            let expected = 1usize << depth;
            if tree.leaf_values.len() != expected {
                return Err(ModelError::LeafCount {
                    tree: tree_idx,
                    expected,
                    found: tree.leaf_values.len(),
                });
            }

            let mut splits = Vec::with_capacity(depth);
            for split in &tree.splits {
                let index = match (split.split_type.as_str(), split.float_feature_index) {
                    (FLOAT_SPLIT, Some(index)) => index,
                    _ => {
                        return Err(ModelError::UnsupportedSplit {
                            tree: tree_idx,
                            split_type: split.split_type.clone(),
                        });
                    }
                };
                let column = column_of(index).ok_or(ModelError::UnknownSplitFeature {
                    tree: tree_idx,
                    index,
                })?;
                splits.push(Split {
                    column,
                    border: split.border,
                });
            }

            trees.push(ObliviousTree {
                splits,
                leaf_values: tree.leaf_values,
            });
        }

        let (scale, bias) = match scale_and_bias {
            Some(ScaleAndBias(scale, bias)) => (scale, bias.single()?),
            None => (1.0, 0.0),
        };

        Ok(Self {
            columns,
            trees,
            scale,
            bias,
        })
    }
}

impl Classifier for ObliviousEnsemble {
    fn predict_proba(&self, record: &FeatureRecord<'_>) -> Result<f64, ModelError> {
        let probability = sigmoid(self.raw_score(record)?);
        if !probability.is_finite() {
            return Err(ModelError::NonFinite);
        }
        Ok(probability)
    }

    fn check_schema(&self, schema: &FeatureSchema) -> Result<(), ModelError> {
        self.columns.iter().try_for_each(|column| column.check(schema))
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
