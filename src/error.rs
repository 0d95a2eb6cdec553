use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid corpus: {0}")]
    InvalidCorpus(String),

    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("Invalid selection: {index} (expected 1..={available})")]
    InvalidSelection { index: usize, available: usize },

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get an error message safe for logging
    /// Filesystem and decoder errors are collapsed to a generic description
    pub fn log_safe(&self) -> String {
        match self {
            // Paths and row contents can leak through these
            Error::Csv(_) => "Dataset CSV decoding failed".to_string(),
            Error::Json(_) => "Dataset JSON decoding failed".to_string(),
            Error::Io(_) => "File system operation failed".to_string(),

            Error::Internal(msg) => {
                if msg.to_lowercase().contains("password")
                    || msg.to_lowercase().contains("secret")
                    || msg.to_lowercase().contains("token")
                {
                    "Internal error (details redacted)".to_string()
                } else {
                    format!("Internal error: {msg}")
                }
            }

            Error::InvalidCorpus(msg) => format!("Invalid corpus: {msg}"),
            Error::RecipeNotFound(name) => format!("Recipe not found: {name}"),
            Error::InvalidSelection { index, available } => {
                format!("Invalid selection: {index} of {available}")
            }
            Error::Dataset(msg) => format!("Dataset error: {msg}"),
            Error::Config(msg) => format!("Configuration error: {msg}"),
            Error::Validation(msg) => format!("Validation error: {msg}"),
        }
    }
}

// Implement IntoResponse for API error handling
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("Request error: {}", self.log_safe());

        let (status, error_message) = match &self {
            Error::RecipeNotFound(name) => {
                (StatusCode::NOT_FOUND, format!("Recipe not found: {name}"))
            }
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::InvalidSelection { .. } => (StatusCode::BAD_REQUEST, self.to_string()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
