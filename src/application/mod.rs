//! Application layer
//!
//! Use cases translate caller commands into domain service calls and shape
//! the results for the adapters.

pub mod actor;
pub mod auth;
pub mod film;
