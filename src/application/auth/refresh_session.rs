use std::sync::Arc;

use super::account_view::SessionResponse;
use crate::domain::auth::{AuthError, AuthService};

/// Use case for exchanging a refresh token for a new token pair.
///
/// The presented token is retired: only the newly issued refresh token is
/// accepted afterwards.
pub struct RefreshSessionUseCase {
  auth_service: Arc<AuthService>,
}

impl RefreshSessionUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, refresh_token: &str) -> Result<SessionResponse, AuthError> {
    let (account, tokens) = self.auth_service.refresh(refresh_token).await?;
    Ok(SessionResponse::new(&account, tokens))
  }
}
