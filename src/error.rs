use thiserror::Error;

/// Errors that can occur while browsing the dataset
#[derive(Error, Debug)]
pub enum BrowseError {
    #[error("Missing required parameter: {name}")]
    MissingParameter { name: String },

    #[error("Upstream API returned status {status}")]
    Upstream { status: reqwest::StatusCode },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid URL: {message}")]
    InvalidUrl { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for browse operations
pub type Result<T> = std::result::Result<T, BrowseError>;
