//! Account and session use cases

mod account_view;
mod login_account;
mod logout_account;
mod refresh_session;
mod register_account;

pub use account_view::{AccountView, SessionResponse};
pub use login_account::{LoginAccountCommand, LoginAccountUseCase};
pub use logout_account::LogoutAccountUseCase;
pub use refresh_session::RefreshSessionUseCase;
pub use register_account::{RegisterAccountCommand, RegisterAccountUseCase};
