use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures while loading the book dataset at startup
///
/// All variants are fatal: the server never starts serving without a valid table.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Failed to read book source: {0}")]
    Source(#[from] csv::Error),

    #[error("Book source missing columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Book source line {line} has no value for `{field}`")]
    IncompleteRecord { line: u64, field: &'static str },
}

/// Request-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("no_books")]
    NoBooks,

    #[error("no_books_for_mood")]
    NoBooksForMood,

    #[error("missing_tag_param")]
    MissingTagParam,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Error code placed in the JSON body
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NoBooks => "no_books",
            AppError::NoBooksForMood => "no_books_for_mood",
            AppError::MissingTagParam => "missing_tag_param",
            AppError::Internal(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NoBooks | AppError::NoBooksForMood => StatusCode::NOT_FOUND,
            AppError::MissingTagParam => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(detail) = &self {
            tracing::error!(error = %detail, "Request failed");
        }

        let body = Json(json!({
            "error": self.code()
        }));

        (self.status(), body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
