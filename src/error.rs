//! Error handling for the resume-gpt application

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeGptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Text extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Completion service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ResumeGptError>;

/// Transport failures surface as service unavailability
impl From<reqwest::Error> for ResumeGptError {
    fn from(err: reqwest::Error) -> Self {
        ResumeGptError::ServiceUnavailable(err.to_string())
    }
}
