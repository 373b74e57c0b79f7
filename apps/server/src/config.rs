use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: &str = "8000";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_MODEL_PATH: &str = "final_catboost_model.json";
const DEFAULT_FEATURES_PATH: &str = "expected_features.json";

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// JSON export of the trained classifier
    pub model_path: PathBuf,
    /// JSON array with the ordered feature names
    pub features_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &'static str, default: &str| -> Result<String, ConfigError> {
            match lookup(key) {
                Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidValue(key)),
                Some(value) => Ok(value),
                None => Ok(default.to_string()),
            }
        };

        Ok(Config {
            host: non_empty("HOST", DEFAULT_HOST)?,
            port: non_empty("PORT", DEFAULT_PORT)?
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT"))?,
            model_path: non_empty("MODEL_PATH", DEFAULT_MODEL_PATH)?.into(),
            features_path: non_empty("FEATURES_PATH", DEFAULT_FEATURES_PATH)?.into(),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(var) => write!(f, "Invalid value for: {}", var),
        }
    }
}

impl std::error::Error for ConfigError {}
