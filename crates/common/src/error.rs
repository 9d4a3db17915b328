//! Error types for casework entity models

use thiserror::Error;

/// Result type alias using the casework-common Error
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown role: {0}")]
    InvalidRole(String),

    #[error("Unknown note share type: {0}")]
    InvalidShare(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
