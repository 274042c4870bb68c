//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use helpdesk_core::store::StoreError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("unauthorized: {0}")]
  Unauthorized(String),

  #[error("forbidden: {0}")]
  Forbidden(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("knowledge error: {0}")]
  Knowledge(#[from] helpdesk_rag::Error),

  #[error("internal error: {0}")]
  Internal(String),
}

impl ApiError {
  /// Wrap a store error, surfacing uniqueness violations as conflicts.
  pub fn store<E: StoreError>(e: E) -> Self {
    if e.is_conflict() {
      Self::Conflict(e.to_string())
    } else {
      Self::Store(Box::new(e))
    }
  }
}

impl From<helpdesk_core::Error> for ApiError {
  fn from(e: helpdesk_core::Error) -> Self { Self::BadRequest(e.to_string()) }
}

impl From<helpdesk_workflow::Error> for ApiError {
  fn from(e: helpdesk_workflow::Error) -> Self {
    use helpdesk_workflow::Error as W;
    match e {
      W::InvalidInput(m) => Self::BadRequest(m),
      W::Store(e) => Self::Store(e),
      other => Self::Internal(other.to_string()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m.clone()),
      ApiError::Forbidden(m) => (StatusCode::FORBIDDEN, m.clone()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
      ApiError::Knowledge(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
      ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.clone()),
    };
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }

    let mut res = (status, Json(json!({ "error": message }))).into_response();
    if status == StatusCode::UNAUTHORIZED {
      res
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    }
    res
  }
}
