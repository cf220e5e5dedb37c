pub mod actors;
pub mod auth;
pub mod films;

use std::str::FromStr;

use crate::adapters::http::errors::ApiError;

/// Parses an optional query parameter, falling back to the type's default
fn parse_or_default<T>(value: Option<&str>, name: &str) -> Result<T, ApiError>
where
  T: FromStr + Default,
{
  match value {
    None => Ok(T::default()),
    Some(raw) => raw
      .parse()
      .map_err(|_| ApiError::bad_request(format!("invalid {}", name))),
  }
}

/// `connection` accepts only the one relation a resource can load
fn wants_connection(value: Option<&str>, relation: &str) -> Result<bool, ApiError> {
  match value {
    None => Ok(false),
    Some(v) if v == relation => Ok(true),
    Some(_) => Err(ApiError::bad_request("invalid connection")),
  }
}
