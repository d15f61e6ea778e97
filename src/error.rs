//! Error handling and custom error types
//!
//! Provides unified error handling across the solver using thiserror.

use crate::models::FailureKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Could not read image: {0}")]
    FileRead(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("Could not decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invariant violation: {0}")]
    Invariant(String),
}

impl Error {
    /// Category reported to callers once the error crosses the solve boundary.
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::Validation(_) => FailureKind::Validation,
            Error::Configuration(_) => FailureKind::Configuration,
            Error::FileRead(_) | Error::Image(_) => FailureKind::FileRead,
            Error::Http(_) | Error::AiProvider(_) => FailureKind::Transport,
            Error::Invariant(_) => FailureKind::Unknown,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
