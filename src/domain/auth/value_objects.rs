use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
  #[error("password min length {}", Password::MIN_LENGTH)]
  TooShort,

  #[error("password max length {}", Password::MAX_LENGTH)]
  TooLong,

  #[error("password must contain a digit and a lowercase letter")]
  InvalidFormat,

  #[error("invalid password hash format")]
  InvalidHash,

  #[error("password hashing failed: {0}")]
  HashingFailed(String),
}

// ============================================================================
// Password Value Object (hash only, plaintext never retained)
// ============================================================================

lazy_static! {
  static ref DIGIT: Regex = Regex::new(r"[0-9]").expect("digit pattern is valid");
  static ref LOWERCASE: Regex = Regex::new(r"[a-z]").expect("lowercase pattern is valid");
}

// Same parameters as `Argon2::default()`; matches no password
const DECOY_HASH: &str =
  "$argon2id$v=19$m=19456,t=2,p=1$kFt1+jDMAqzMFIJavUDiGQ$nlAHeM/BsZxl1U60Qz//UZHuDi7dp+7j8jLswFOm9K0";

/// Argon2id hash of an account password.
///
/// Construction is the only place the plaintext is inspected. The type has no
/// `Serialize` impl so it cannot leak into API payloads; repositories read the
/// PHC string through [`Password::as_hash`].
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
  pub const MIN_LENGTH: usize = 8;
  pub const MAX_LENGTH: usize = 35;

  /// Checks complexity rules and hashes the plaintext. Length bounds count
  /// UTF-8 bytes, not characters.
  pub fn new(plaintext: &str) -> Result<Self, PasswordError> {
    let length = plaintext.len();

    if length < Self::MIN_LENGTH {
      return Err(PasswordError::TooShort);
    }

    if length > Self::MAX_LENGTH {
      return Err(PasswordError::TooLong);
    }

    if !DIGIT.is_match(plaintext) || !LOWERCASE.is_match(plaintext) {
      return Err(PasswordError::InvalidFormat);
    }

    let salt = SaltString::generate(&mut rand::rngs::OsRng);
    let hash = Argon2::default()
      .hash_password(plaintext.as_bytes(), &salt)
      .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    Ok(Self(hash.to_string()))
  }

  /// Wraps a hash loaded from storage
  pub fn from_hash(hash: impl Into<String>) -> Result<Self, PasswordError> {
    let hash = hash.into();
    PasswordHash::new(&hash).map_err(|_| PasswordError::InvalidHash)?;
    Ok(Self(hash))
  }

  /// Constant-time comparison through the argon2 verifier
  pub fn verify(&self, plaintext: &str) -> bool {
    match PasswordHash::new(&self.0) {
      Ok(parsed) => Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok(),
      Err(_) => false,
    }
  }

  /// Runs one full verification against a hash no plaintext matches.
  ///
  /// Rejecting an unknown account name through this costs as much as
  /// rejecting a wrong password, so response time does not reveal which
  /// names exist. Always returns `false`.
  pub fn verify_decoy(plaintext: &str) -> bool {
    match PasswordHash::new(DECOY_HASH) {
      Ok(parsed) => Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok(),
      Err(_) => false,
    }
  }

  pub fn as_hash(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

// ============================================================================
// Role
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
  User,
  Admin,
}

impl Role {
  pub const TAGS: &'static [&'static str] = &["USER", "ADMIN"];

  pub fn as_str(&self) -> &'static str {
    match self {
      Role::User => "USER",
      Role::Admin => "ADMIN",
    }
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Role {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "USER" => Ok(Role::User),
      "ADMIN" => Ok(Role::Admin),
      other => Err(format!("unknown role: {}", other)),
    }
  }
}
