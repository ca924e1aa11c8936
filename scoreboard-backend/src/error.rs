use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use scoreboard_store::StoreError;
use serde::Serialize;

use crate::validation::ValidationError;

/// API error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
  pub error: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<String>,
}

impl ErrorResponse {
  pub fn new(error: impl Into<String>) -> Self {
    Self {
      error: error.into(),
      details: None,
    }
  }

  pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
    Self {
      error: error.into(),
      details: Some(details.into()),
    }
  }
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
  StoreError(StoreError),
  ValidationError(String),
  Forbidden(String),
  /// Body could not be read at all (e.g. over the size limit); keeps its status
  Rejection(StatusCode, String),
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    match self {
      AppError::StoreError(store_err) => {
        let (status, message) = match &store_err {
          // Empty leaderboard is a valid "no data" outcome
          StoreError::NoPlayers => return StatusCode::NO_CONTENT.into_response(),
          StoreError::RankOutOfRange { .. } => (StatusCode::NOT_FOUND, "Rank not found"),
          StoreError::UnknownPlayer(_) => (StatusCode::NOT_FOUND, "Player not found"),
        };

        tracing::debug!(%store_err, "Store lookup failed");
        let error_response = ErrorResponse::with_details(message, store_err.to_string());
        (status, Json(error_response)).into_response()
      }
      AppError::ValidationError(msg) => {
        tracing::warn!(validation_error = %msg, "Validation failed");
        let error_response = ErrorResponse::new(msg);
        (StatusCode::BAD_REQUEST, Json(error_response)).into_response()
      }
      AppError::Forbidden(msg) => {
        tracing::warn!(forbidden = %msg, "Rejected forbidden change");
        let error_response = ErrorResponse::new(msg);
        (StatusCode::FORBIDDEN, Json(error_response)).into_response()
      }
      AppError::Rejection(status, msg) => {
        tracing::warn!(%status, rejection = %msg, "Request body rejected");
        let error_response = ErrorResponse::new(msg);
        (status, Json(error_response)).into_response()
      }
    }
  }
}

impl From<StoreError> for AppError {
  fn from(err: StoreError) -> Self {
    AppError::StoreError(err)
  }
}

impl From<ValidationError> for AppError {
  fn from(err: ValidationError) -> Self {
    match err {
      ValidationError::CountryImmutable => AppError::Forbidden(err.to_string()),
      other => AppError::ValidationError(other.to_string()),
    }
  }
}

impl From<JsonRejection> for AppError {
  fn from(rejection: JsonRejection) -> Self {
    match rejection {
      JsonRejection::BytesRejection(_) => {
        AppError::Rejection(rejection.status(), rejection.body_text())
      }
      // Syntax, data and content-type problems are the client's input
      other => ValidationError::Body(other.body_text()).into(),
    }
  }
}
