use std::sync::Arc;
use zeroize::Zeroizing;

use super::account_view::SessionResponse;
use crate::domain::auth::{AuthError, AuthService};

/// Command for registering a new account
#[derive(Clone)]
pub struct RegisterAccountCommand {
  pub name: String,
  /// Plain text, wiped from memory once the command is dropped
  pub password: Zeroizing<String>,
}

/// Use case for registering a new USER account
pub struct RegisterAccountUseCase {
  auth_service: Arc<AuthService>,
}

impl RegisterAccountUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Creates the account and opens its first session
  ///
  /// # Errors
  /// `AuthError::NameAlreadyExists` when the name is taken, validation and
  /// password errors when the input is rejected
  pub async fn execute(&self, command: RegisterAccountCommand) -> Result<SessionResponse, AuthError> {
    let (account, tokens) = self
      .auth_service
      .register(&command.name, &command.password)
      .await?;

    Ok(SessionResponse::new(&account, tokens))
  }
}
