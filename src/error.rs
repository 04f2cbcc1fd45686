use crate::validate::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FcError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP Client Error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Validation Error: {0}")]
    Validation(#[from] ValidationError),

    #[error("An optimization request is already running")]
    Busy,
}

pub type FcResult<T> = Result<T, FcError>;
