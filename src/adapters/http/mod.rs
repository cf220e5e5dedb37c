pub mod cookies;
pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use cookies::SessionCookies;
pub use errors::ApiError;
pub use middleware::{RequestId, RequestIdMiddleware, RoleGuard};
pub use routes::{
  ApiDependencies, configure_actor_routes, configure_api, configure_auth_routes,
  configure_film_routes, health_handler,
};
