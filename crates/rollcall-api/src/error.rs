//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use rollcall_core::Code;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Workflow(#[from] rollcall_core::Error),

  #[error("malformed request: {0}")]
  BadRequest(String),
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl ApiError {
  pub fn code(&self) -> Code {
    match self {
      ApiError::Workflow(e) => e.code(),
      ApiError::BadRequest(_) => Code::InvalidArgument,
    }
  }
}

fn status_for(code: Code) -> StatusCode {
  match code {
    Code::InvalidArgument => StatusCode::BAD_REQUEST,
    Code::AlreadyExists => StatusCode::CONFLICT,
    Code::NotFound => StatusCode::NOT_FOUND,
    Code::Internal => StatusCode::INTERNAL_SERVER_ERROR,
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let code = self.code();
    if code == Code::Internal {
      tracing::error!(error = %self, "request failed");
    }
    (
      status_for(code),
      Json(json!({ "error": self.to_string(), "code": code })),
    )
      .into_response()
  }
}
