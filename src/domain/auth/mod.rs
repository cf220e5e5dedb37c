pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod tokens;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{Account, AccountAggregate, RefreshTokenRecord};
pub use errors::AuthError;
pub use ports::{AccountRepository, TokenIssuer, TokenRepository};
pub use services::AuthService;
pub use tokens::{TokenError, TokenPair, TokenSubject, UnauthorizedReason};
pub use value_objects::{Password, PasswordError, Role};
