use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::application::actor::{
  CreateActorUseCase, DeleteActorUseCase, GetActorUseCase, LinkFilmsUseCase, ListActorsUseCase,
  UpdateActorUseCase,
};
use crate::application::auth::{
  LoginAccountUseCase, LogoutAccountUseCase, RefreshSessionUseCase, RegisterAccountUseCase,
};
use crate::application::film::{
  CreateFilmUseCase, DeleteFilmUseCase, GetFilmUseCase, ListFilmsUseCase, SearchFilmsUseCase,
  UpdateFilmUseCase,
};
use crate::domain::auth::AuthService;
use crate::domain::catalog::CatalogService;

use super::cookies::SessionCookies;
use super::errors::ApiError;
use super::handlers::{actors, auth, films};
use super::middleware::RoleGuard;

/// Services the HTTP surface is built from
#[derive(Clone)]
pub struct ApiDependencies {
  pub auth_service: Arc<AuthService>,
  pub catalog_service: Arc<CatalogService>,
  pub cookies: SessionCookies,
}

/// Mounts the whole API under the caller's scope (`/http/v1` in production)
///
/// Malformed JSON bodies and query strings are answered with 400.
pub fn configure_api(cfg: &mut web::ServiceConfig, deps: &ApiDependencies) {
  cfg
    .app_data(json_config())
    .app_data(query_config())
    .service(web::scope("/auth").configure(|cfg| {
      configure_auth_routes(cfg, deps.auth_service.clone(), deps.cookies.clone())
    }))
    .service(web::scope("/actor").configure(|cfg| {
      configure_actor_routes(cfg, deps.catalog_service.clone(), deps.auth_service.clone())
    }))
    .service(web::scope("/film").configure(|cfg| {
      configure_film_routes(cfg, deps.catalog_service.clone(), deps.auth_service.clone())
    }));
}

/// Configure authentication routes
///
/// - POST /registration
/// - POST /login
/// - POST /refresh
/// - GET /logout
pub fn configure_auth_routes(
  cfg: &mut web::ServiceConfig,
  auth_service: Arc<AuthService>,
  cookies: SessionCookies,
) {
  cfg
    .app_data(web::Data::new(cookies))
    .app_data(web::Data::new(Arc::new(RegisterAccountUseCase::new(
      auth_service.clone(),
    ))))
    .app_data(web::Data::new(Arc::new(LoginAccountUseCase::new(
      auth_service.clone(),
    ))))
    .app_data(web::Data::new(Arc::new(RefreshSessionUseCase::new(
      auth_service.clone(),
    ))))
    .app_data(web::Data::new(Arc::new(LogoutAccountUseCase::new(
      auth_service,
    ))))
    .route("/registration", web::post().to(auth::register_handler))
    .route("/login", web::post().to(auth::login_handler))
    .route("/refresh", web::post().to(auth::refresh_handler))
    .route("/logout", web::get().to(auth::logout_handler));
}

/// Configure actor routes; every mutation requires the ADMIN role
///
/// - GET ?id= | ?page&page-count&connection=film
/// - POST, PUT ?id=, DELETE ?id=
/// - POST /add-film
pub fn configure_actor_routes(
  cfg: &mut web::ServiceConfig,
  catalog: Arc<CatalogService>,
  auth_service: Arc<AuthService>,
) {
  cfg
    .app_data(web::Data::new(Arc::new(GetActorUseCase::new(catalog.clone()))))
    .app_data(web::Data::new(Arc::new(ListActorsUseCase::new(catalog.clone()))))
    .app_data(web::Data::new(Arc::new(CreateActorUseCase::new(catalog.clone()))))
    .app_data(web::Data::new(Arc::new(UpdateActorUseCase::new(catalog.clone()))))
    .app_data(web::Data::new(Arc::new(DeleteActorUseCase::new(catalog.clone()))))
    .app_data(web::Data::new(Arc::new(LinkFilmsUseCase::new(catalog))))
    .service(
      web::resource("/add-film").route(
        web::post()
          .to(actors::add_films_handler)
          .wrap(RoleGuard::admin(auth_service.clone())),
      ),
    )
    .service(
      web::resource("")
        .route(web::get().to(actors::get_actors_handler))
        .route(
          web::post()
            .to(actors::create_actor_handler)
            .wrap(RoleGuard::admin(auth_service.clone())),
        )
        .route(
          web::put()
            .to(actors::update_actor_handler)
            .wrap(RoleGuard::admin(auth_service.clone())),
        )
        .route(
          web::delete()
            .to(actors::delete_actor_handler)
            .wrap(RoleGuard::admin(auth_service)),
        ),
    );
}

/// Configure film routes; every mutation requires the ADMIN role
///
/// - GET ?id= | ?page&page-count&order-by&order-field&connection=actor
/// - GET /search?search=
/// - POST, PUT ?id=, DELETE ?id=
pub fn configure_film_routes(
  cfg: &mut web::ServiceConfig,
  catalog: Arc<CatalogService>,
  auth_service: Arc<AuthService>,
) {
  cfg
    .app_data(web::Data::new(Arc::new(GetFilmUseCase::new(catalog.clone()))))
    .app_data(web::Data::new(Arc::new(ListFilmsUseCase::new(catalog.clone()))))
    .app_data(web::Data::new(Arc::new(SearchFilmsUseCase::new(catalog.clone()))))
    .app_data(web::Data::new(Arc::new(CreateFilmUseCase::new(catalog.clone()))))
    .app_data(web::Data::new(Arc::new(UpdateFilmUseCase::new(catalog.clone()))))
    .app_data(web::Data::new(Arc::new(DeleteFilmUseCase::new(catalog))))
    .route("/search", web::get().to(films::search_films_handler))
    .service(
      web::resource("")
        .route(web::get().to(films::get_films_handler))
        .route(
          web::post()
            .to(films::create_film_handler)
            .wrap(RoleGuard::admin(auth_service.clone())),
        )
        .route(
          web::put()
            .to(films::update_film_handler)
            .wrap(RoleGuard::admin(auth_service.clone())),
        )
        .route(
          web::delete()
            .to(films::delete_film_handler)
            .wrap(RoleGuard::admin(auth_service)),
        ),
    );
}

/// GET /health
pub async fn health_handler() -> HttpResponse {
  HttpResponse::Ok().body("OK")
}

fn json_config() -> web::JsonConfig {
  web::JsonConfig::default()
    .error_handler(|err, _req| ApiError::bad_request(format!("invalid body: {}", err)).into())
}

fn query_config() -> web::QueryConfig {
  web::QueryConfig::default()
    .error_handler(|err, _req| ApiError::bad_request(format!("invalid query: {}", err)).into())
}
