use std::fmt;
use uuid::Uuid;

use super::value_objects::{Password, Role};
use crate::domain::validation::{Rule, RuleTable, Validatable, Violations};

/// Account entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
  pub id: Uuid,
  pub name: String,
  pub password: Password,
  pub role: Role,
}

impl Account {
  /// Builds a new account with a fresh id and validates it
  pub fn new(name: impl Into<String>, password: Password, role: Role) -> Result<Self, Violations> {
    let account = Self {
      id: Uuid::new_v4(),
      name: name.into(),
      password,
      role,
    };
    account.validate()?;
    Ok(account)
  }

  /// Reconstitutes an account from storage
  pub fn from_db(id: Uuid, name: String, password: Password, role: Role) -> Self {
    Self {
      id,
      name,
      password,
      role,
    }
  }
}

impl Validatable for Account {
  fn rules(&self) -> RuleTable<'_> {
    RuleTable::new()
      .field("id", self.id, &[Rule::Required, Rule::UuidV4])
      .field("name", &self.name, &[Rule::Required, Rule::MinLength(3), Rule::MaxLength(100)])
      .field("password", self.password.as_hash(), &[Rule::Required])
      .field("role", self.role.as_str(), &[Rule::Required, Rule::OneOf(Role::TAGS)])
  }
}

/// The single live refresh token of an account, keyed by the account id
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshTokenRecord {
  pub id: Uuid,
  pub value: String,
}

impl RefreshTokenRecord {
  pub fn new(id: Uuid, value: impl Into<String>) -> Result<Self, Violations> {
    let record = Self {
      id,
      value: value.into(),
    };
    record.validate()?;
    Ok(record)
  }
}

impl Validatable for RefreshTokenRecord {
  fn rules(&self) -> RuleTable<'_> {
    RuleTable::new()
      .field("id", self.id, &[Rule::Required, Rule::UuidV4])
      .field("value", &self.value, &[Rule::Required])
  }
}

impl fmt::Debug for RefreshTokenRecord {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RefreshTokenRecord")
      .field("id", &self.id)
      .field("value", &"***")
      .finish()
  }
}

/// Account plus its pending refresh token, persisted together on creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountAggregate {
  pub account: Account,
  pub token: Option<RefreshTokenRecord>,
}

impl AccountAggregate {
  pub fn new(account: Account) -> Self {
    Self {
      account,
      token: None,
    }
  }

  /// Attaches a refresh token after validating the resulting record
  pub fn attach_token(&mut self, value: impl Into<String>) -> Result<(), Violations> {
    self.token = Some(RefreshTokenRecord::new(self.account.id, value)?);
    Ok(())
  }
}
