use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::domain::auth::{
  AuthError, Role, TokenError, TokenIssuer, TokenPair, TokenSubject, UnauthorizedReason,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum TokenKind {
  Access,
  Refresh,
}

/// JWT claims shared by access and refresh tokens
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
  id: Uuid,
  role: Role,
  typ: TokenKind,
  exp: i64,
  iat: i64,
  // Keeps two pairs issued in the same second distinct
  jti: String,
}

/// Configured token lifetimes as humantime strings ("15m", "720h")
#[derive(Debug, Clone)]
pub struct TokenLifetimes {
  access: String,
  refresh: String,
}

impl TokenLifetimes {
  pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
    Self {
      access: access.into(),
      refresh: refresh.into(),
    }
  }

  pub fn access(&self) -> Result<Duration, TokenError> {
    parse_lifetime("access", &self.access)
  }

  pub fn refresh(&self) -> Result<Duration, TokenError> {
    parse_lifetime("refresh", &self.refresh)
  }
}

fn parse_lifetime(kind: &'static str, value: &str) -> Result<Duration, TokenError> {
  humantime::parse_duration(value).map_err(|e| TokenError::InvalidLifetime {
    kind,
    value: value.to_string(),
    reason: e.to_string(),
  })
}

/// HS256 token issuer keyed by a shared secret
pub struct JwtTokenIssuer {
  encoding_key: EncodingKey,
  decoding_key: DecodingKey,
  validation: Validation,
  lifetimes: TokenLifetimes,
}

impl JwtTokenIssuer {
  pub fn new(secret: &str, lifetimes: TokenLifetimes) -> Self {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    Self {
      encoding_key: EncodingKey::from_secret(secret.as_bytes()),
      decoding_key: DecodingKey::from_secret(secret.as_bytes()),
      validation,
      lifetimes,
    }
  }

  fn sign(
    &self,
    subject: TokenSubject,
    kind: TokenKind,
    lifetime: Duration,
  ) -> Result<String, TokenError> {
    let now = chrono::Utc::now().timestamp();
    let lifetime = i64::try_from(lifetime.as_secs()).unwrap_or(i64::MAX);

    let claims = Claims {
      id: subject.account_id,
      role: subject.role,
      typ: kind,
      exp: now.saturating_add(lifetime),
      iat: now,
      jti: Uuid::new_v4().to_string(),
    };

    encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
      .map_err(|e| TokenError::SigningFailed(e.to_string()))
  }

  /// A valid token of the other kind is rejected as a bad token
  fn verify(&self, token: &str, expected: TokenKind) -> Result<TokenSubject, AuthError> {
    let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
      .map_err(|e| AuthError::Unauthorized(classify(e.kind())))?
      .claims;

    if claims.typ != expected {
      return Err(AuthError::Unauthorized(UnauthorizedReason::BadToken));
    }

    Ok(TokenSubject {
      account_id: claims.id,
      role: claims.role,
    })
  }
}

fn classify(kind: &ErrorKind) -> UnauthorizedReason {
  match kind {
    ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
      UnauthorizedReason::BadToken
    }
    ErrorKind::ExpiredSignature | ErrorKind::ImmatureSignature => UnauthorizedReason::Expired,
    _ => UnauthorizedReason::BadSignature,
  }
}

impl TokenIssuer for JwtTokenIssuer {
  fn generate(&self, subject: TokenSubject) -> Result<TokenPair, TokenError> {
    let access_lifetime = self.lifetimes.access()?;
    let refresh_lifetime = self.lifetimes.refresh()?;

    Ok(TokenPair {
      access_token: self.sign(subject, TokenKind::Access, access_lifetime)?,
      refresh_token: self.sign(subject, TokenKind::Refresh, refresh_lifetime)?,
    })
  }

  fn verify_refresh(&self, token: &str) -> Result<TokenSubject, AuthError> {
    self.verify(token, TokenKind::Refresh)
  }

  fn verify_access(&self, token: &str) -> Result<TokenSubject, AuthError> {
    self.verify(token, TokenKind::Access)
  }
}
