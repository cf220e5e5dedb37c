use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use std::fmt;

use crate::domain::auth::AuthError;
use crate::domain::catalog::CatalogError;
use crate::domain::errors::ErrorKind;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Clone)]
pub struct ApiError {
  kind: ErrorKind,
  /// Sent to the client
  message: String,
  /// Logged only
  detail: Option<String>,
}

impl ApiError {
  pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
    Self {
      kind,
      message: message.into(),
      detail: None,
    }
  }

  pub fn bad_request(message: impl Into<String>) -> Self {
    Self::new(ErrorKind::BadRequest, message)
  }

  pub fn kind(&self) -> ErrorKind {
    self.kind
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  fn with_detail(mut self, detail: String) -> Self {
    self.detail = Some(detail);
    self
  }
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.kind.code(), self.message)
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    StatusCode::from_u16(self.kind.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let detail = self.detail.as_deref().unwrap_or(self.message.as_str());

    if status.is_server_error() {
      tracing::error!(code = status.as_u16(), detail, "request failed");
    } else {
      tracing::info!(code = status.as_u16(), detail, "request rejected");
    }

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(ErrorResponse {
        code: status.as_u16(),
        message: self.message.clone(),
      })
  }
}

impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    ApiError::new(error.kind(), error.public_message()).with_detail(error.to_string())
  }
}

impl From<CatalogError> for ApiError {
  fn from(error: CatalogError) -> Self {
    ApiError::new(error.kind(), error.public_message()).with_detail(error.to_string())
  }
}

/// Request DTOs that pass JSON decoding but break a declared constraint
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let mut messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors.iter().map(move |error| {
          error
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("Invalid field: {}", field))
        })
      })
      .collect();
    messages.sort();

    ApiError::new(ErrorKind::UnprocessableEntity, messages.join(", "))
  }
}
