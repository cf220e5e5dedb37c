use std::sync::Arc;
use zeroize::Zeroizing;

use super::account_view::SessionResponse;
use crate::domain::auth::{AuthError, AuthService};

/// Command for logging in with a name and password
#[derive(Clone)]
pub struct LoginAccountCommand {
  pub name: String,
  pub password: Zeroizing<String>,
}

/// Use case for logging in; replaces any previous session of the account
pub struct LoginAccountUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginAccountUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, command: LoginAccountCommand) -> Result<SessionResponse, AuthError> {
    let (account, tokens) = self
      .auth_service
      .login(&command.name, &command.password)
      .await?;

    Ok(SessionResponse::new(&account, tokens))
  }
}
