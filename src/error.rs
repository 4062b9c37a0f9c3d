use std::io;

use reqwest::StatusCode;
use thiserror::Error;

use crate::form::FieldErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("backend responded with {status}")]
    Api { status: StatusCode },
    #[error("could not reach backend: {0}")]
    Transport(String),
    #[error("ticket #{0} is not in the loaded collection")]
    NotFound(i64),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AppError {
    /// Failures that happened at the network boundary rather than locally.
    pub fn is_remote(&self) -> bool {
        matches!(self, AppError::Api { .. } | AppError::Transport(_))
    }

    /// Failures that may clear up on their own: the backend was unreachable
    /// or answered with a server error. Client errors never will.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Transport(_) => true,
            AppError::Api { status } => status.is_server_error(),
            _ => false,
        }
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}

pub type AppResult<T> = Result<T, AppError>;
