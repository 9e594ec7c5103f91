use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid platform: {0} (expected: windows|osx|linux)")]
    InvalidPlatform(String),
    #[error("configuration document must be an object")]
    NotAnObject,
    #[error("failed to parse document: {0}")]
    Parse(#[from] serde_json::Error),
}
