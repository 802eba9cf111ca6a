//! HTTP-facing error type. Core scoring never fails; these cover unknown
//! rounds, bad parameters, joker conflicts and startup-ordering bugs.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::options::OptionsError;
use crate::state::RoundError;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("Resource not found: {0}")]
  NotFound(String),
  #[error("Invalid request: {0}")]
  BadRequest(String),
  #[error("Conflict: {0}")]
  Conflict(String),
  #[error("Internal server error: {0}")]
  Internal(String),
}

impl From<RoundError> for ApiError {
  fn from(e: RoundError) -> Self {
    match e {
      RoundError::NotFound(_) => ApiError::NotFound(e.to_string()),
      RoundError::Closed(_) | RoundError::JokerAlreadyUsed(_) => ApiError::Conflict(e.to_string()),
      RoundError::SubjectMissing(_) => ApiError::Internal(e.to_string()),
    }
  }
}

impl From<OptionsError> for ApiError {
  fn from(e: OptionsError) -> Self {
    ApiError::Internal(e.to_string())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, code) = match &self {
      ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
      ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
      ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
      ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    };
    let message = match self {
      ApiError::NotFound(m) | ApiError::BadRequest(m) | ApiError::Conflict(m) | ApiError::Internal(m) => m,
    };
    if status.is_server_error() {
      error!(target: "motosound", %code, %message, "Request failed");
    }
    (status, Json(json!({ "error": { "code": code, "message": message } }))).into_response()
  }
}

pub type ApiResult<T> = Result<T, ApiError>;
