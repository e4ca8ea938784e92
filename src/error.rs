use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum JoblyError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    /// A create targeted a unique key that already exists. A kind of bad request.
    #[error("{0}")]
    Duplicate(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),
}

impl JoblyError {
    pub fn is_bad_request(&self) -> bool {
        matches!(self, JoblyError::BadRequest(_) | JoblyError::Duplicate(_))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            JoblyError::NotFound(_) => StatusCode::NOT_FOUND,
            JoblyError::BadRequest(_) | JoblyError::Duplicate(_) => StatusCode::BAD_REQUEST,
            JoblyError::Unauthorized => StatusCode::UNAUTHORIZED,
            JoblyError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for JoblyError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let error_body = match self {
            JoblyError::NotFound(message) => ApiErrorBody {
                code: "NOT_FOUND".to_string(),
                message,
            },
            JoblyError::BadRequest(message) => ApiErrorBody {
                code: "BAD_REQUEST".to_string(),
                message,
            },
            JoblyError::Duplicate(message) => ApiErrorBody {
                code: "DUPLICATE".to_string(),
                message,
            },
            JoblyError::Unauthorized => ApiErrorBody {
                code: "UNAUTHORIZED".to_string(),
                message: "Admin key missing or invalid.".to_string(),
            },
            JoblyError::DatabaseError(e) => {
                error!(error = %e, "database failure");
                ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                }
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
