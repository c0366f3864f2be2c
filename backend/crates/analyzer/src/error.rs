//! Analyzer Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Analyzer-specific result type alias
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// Analyzer-specific error variants
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Essay missing, empty or whitespace only
    #[error("Essay text is required.")]
    EmptyEssay,

    /// The classifier call failed or its answer could not be used
    #[error("An error occurred during analysis.")]
    Upstream(String),

    /// Classifier credentials are missing
    #[error("An error occurred during analysis.")]
    Config(String),

    #[error("Only .docx files are supported")]
    UnsupportedFile,

    #[error("No file uploaded")]
    MissingFile,

    #[error("Invalid upload")]
    InvalidUpload(String),

    #[error("File too large")]
    UploadTooLarge,

    /// The upload is not a readable OOXML document
    #[error("Could not read document")]
    MalformedDocument(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AnalyzerError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalyzerError::EmptyEssay
            | AnalyzerError::UnsupportedFile
            | AnalyzerError::MissingFile
            | AnalyzerError::InvalidUpload(_)
            | AnalyzerError::MalformedDocument(_) => ErrorKind::BadRequest,
            AnalyzerError::UploadTooLarge => ErrorKind::PayloadTooLarge,
            AnalyzerError::Upstream(_)
            | AnalyzerError::Config(_)
            | AnalyzerError::Database(_)
            | AnalyzerError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        let app_error = AppError::new(self.kind(), self.to_string());
        match self {
            AnalyzerError::Upstream(details)
            | AnalyzerError::Config(details)
            | AnalyzerError::InvalidUpload(details)
            | AnalyzerError::MalformedDocument(details) => app_error.with_details(details.clone()),
            AnalyzerError::Database(_) | AnalyzerError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => app_error,
        }
    }

    fn log(&self) {
        match self {
            AnalyzerError::Upstream(details) => {
                tracing::error!(details = %details, "Essay classification failed");
            }
            AnalyzerError::Config(details) => {
                tracing::error!(details = %details, "Analyzer misconfigured");
            }
            AnalyzerError::Database(e) => {
                tracing::error!(error = %e, "Analyzer database error");
            }
            AnalyzerError::Internal(msg) => {
                tracing::error!(message = %msg, "Analyzer internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Analyzer request rejected");
            }
        }
    }
}

impl IntoResponse for AnalyzerError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
