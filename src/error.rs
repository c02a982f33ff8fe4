use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::models::load::LoadError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid carga: {0}")]
    InvalidLoad(#[from] LoadError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::InvalidLoad(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<AppError> for tonic::Status {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound(msg) => tonic::Status::not_found(msg),
            AppError::BadRequest(msg) => tonic::Status::invalid_argument(msg),
            AppError::Conflict(msg) => tonic::Status::already_exists(msg),
            AppError::InvalidLoad(err) => tonic::Status::invalid_argument(err.to_string()),
            AppError::Internal(msg) => tonic::Status::internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use tonic::Code;

    use super::AppError;
    use crate::models::load::LoadError;

    #[test]
    fn grpc_codes_follow_error_kind() {
        let code = |err: AppError| tonic::Status::from(err).code();

        assert_eq!(code(AppError::NotFound("c1".into())), Code::NotFound);
        assert_eq!(code(AppError::BadRequest("sort".into())), Code::InvalidArgument);
        assert_eq!(code(AppError::Conflict("c1".into())), Code::AlreadyExists);
        assert_eq!(code(AppError::InvalidLoad(LoadError::MissingId)), Code::InvalidArgument);
        assert_eq!(code(AppError::Internal("boom".into())), Code::Internal);
    }
}
