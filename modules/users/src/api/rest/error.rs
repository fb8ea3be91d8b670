use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::domain::error::DomainError;

/// Error surface of every handler: a status code plus the
/// `{"error": "<message>"}` envelope the browser form expects.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let status = match &err {
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::EmailAlreadyExists { .. } => StatusCode::CONFLICT,
            DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
            // The save went through but the ERP could not hand the record
            // back; the upstream is in a questionable state either way.
            DomainError::CreatedUserMissing { .. } => StatusCode::BAD_GATEWAY,
            DomainError::Backend { .. } => StatusCode::BAD_GATEWAY,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
