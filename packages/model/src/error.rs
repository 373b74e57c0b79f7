use std::path::PathBuf;

/// Errors raised while validating or evaluating a classifier.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model contains no trees")]
    NoTrees,
    #[error("tree {tree} has depth {depth}, the maximum supported depth is {max}")]
    TreeTooDeep { tree: usize, depth: usize, max: usize },
    #[error("tree {tree}: expected {expected} leaf values, found {found}")]
    LeafCount {
        tree: usize,
        expected: usize,
        found: usize,
    },
    #[error("tree {tree}: split references unknown float feature {index}")]
    UnknownSplitFeature { tree: usize, index: usize },
    #[error("tree {tree}: unsupported split type `{split_type}`")]
    UnsupportedSplit { tree: usize, split_type: String },
    #[error("expected a single bias value for a binary classifier, found {0}")]
    UnsupportedBias(usize),
    #[error("feature `{0}` is not part of the feature schema")]
    MissingFeature(String),
    #[error("feature position {position} is out of range for {len} features")]
    PositionOutOfRange { position: usize, len: usize },
    #[error("model produced a non-finite probability")]
    NonFinite,
}

/// Errors raised when the feature name list is not usable.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("feature list is empty")]
    Empty,
    #[error("feature `{0}` appears more than once")]
    Duplicate(String),
}

/// Startup failures. Any of these keeps the service from accepting traffic.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid feature list {}: {source}", path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },
    #[error("invalid model artifact {}: {source}", path.display())]
    Model {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
    #[error("model does not match the feature list: {0}")]
    Mismatch(#[source] ModelError),
}
