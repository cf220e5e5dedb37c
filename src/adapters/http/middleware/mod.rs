pub mod request_id;
pub mod role_guard;

pub use request_id::{RequestId, RequestIdMiddleware};
pub use role_guard::{RoleGuard, TokenSubjectExt};
