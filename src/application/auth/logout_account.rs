use std::sync::Arc;

use crate::domain::auth::{AuthError, AuthService};

/// Use case for ending a session by revoking its refresh token
pub struct LogoutAccountUseCase {
  auth_service: Arc<AuthService>,
}

impl LogoutAccountUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Succeeds for empty or already revoked tokens
  pub async fn execute(&self, refresh_token: &str) -> Result<(), AuthError> {
    self.auth_service.logout(refresh_token).await
  }
}
