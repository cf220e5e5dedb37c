use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use super::value_objects::Role;

/// Identity embedded in every issued token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSubject {
  pub account_id: Uuid,
  pub role: Role,
}

/// Freshly issued access/refresh credentials
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
  pub access_token: String,
  pub refresh_token: String,
}

impl fmt::Debug for TokenPair {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("TokenPair(***)")
  }
}

/// Why a presented credential was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthorizedReason {
  Missing,
  BadToken,
  Expired,
  BadSignature,
  Revoked,
}

impl fmt::Display for UnauthorizedReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let text = match self {
      UnauthorizedReason::Missing => "token is missing",
      UnauthorizedReason::BadToken => "token is malformed",
      UnauthorizedReason::Expired => "token is expired",
      UnauthorizedReason::BadSignature => "token signature is invalid",
      UnauthorizedReason::Revoked => "token is no longer active",
    };
    f.write_str(text)
  }
}

/// Issuance failures. These come from operator configuration, never from user input.
#[derive(Debug, Error)]
pub enum TokenError {
  #[error("invalid {kind} token lifetime '{value}': {reason}")]
  InvalidLifetime {
    kind: &'static str,
    value: String,
    reason: String,
  },

  #[error("token signing failed: {0}")]
  SigningFailed(String),
}
