use crate::error::{BrowseError, Result};

/// Immutable deployment configuration, read once at process start
///
/// Passed explicitly into the upstream client rather than read from the
/// environment at arbitrary points, so tests can inject their own values.
#[derive(Debug, Clone)]
pub struct Config {
    /// Identifier of the one dataset this deployment browses
    pub dataset: String,
    /// Static bearer token for the upstream API
    pub token: String,
}

impl Config {
    pub fn new(dataset: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            token: token.into(),
        }
    }

    /// Read configuration from `HF_DATASET` and `HF_TOKEN`
    pub fn from_env() -> Result<Self> {
        let dataset = require_env("HF_DATASET")?;
        let token = require_env("HF_TOKEN")?;
        Ok(Self { dataset, token })
    }
}

fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(BrowseError::InvalidConfig {
            message: format!("environment variable {} is not set", name),
        }),
    }
}
