use uuid::Uuid;

use crate::domain::auth::{Account, Role, TokenPair};

/// Public projection of an account; never carries the password hash
#[derive(Debug, Clone, PartialEq)]
pub struct AccountView {
  pub id: Uuid,
  pub name: String,
  pub role: Role,
}

impl From<&Account> for AccountView {
  fn from(account: &Account) -> Self {
    Self {
      id: account.id,
      name: account.name.clone(),
      role: account.role,
    }
  }
}

/// Result of every operation that opens or rotates a session
#[derive(Debug, Clone)]
pub struct SessionResponse {
  pub account: AccountView,
  pub tokens: TokenPair,
}

impl SessionResponse {
  pub(super) fn new(account: &Account, tokens: TokenPair) -> Self {
    Self {
      account: account.into(),
      tokens,
    }
  }
}
