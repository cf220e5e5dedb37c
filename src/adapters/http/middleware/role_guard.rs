use actix_web::{
  Error, HttpMessage, ResponseError,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use crate::adapters::http::cookies::ACCESS_COOKIE;
use crate::adapters::http::errors::ApiError;
use crate::domain::auth::{AuthService, Role, TokenSubject};

/// Admits a request only when its `accessToken` cookie carries one of the
/// allowed roles.
///
/// A missing or invalid token is rejected with 401, a valid token with any
/// other role with 403. On success the [`TokenSubject`] is stored in the
/// request extensions.
///
/// # Example
///
/// ```no_run
/// use actix_web::web;
/// use std::sync::Arc;
/// # use filmoteka::adapters::http::middleware::RoleGuard;
/// # use filmoteka::domain::auth::{AuthService, Role};
///
/// # fn example(cfg: &mut web::ServiceConfig, auth_service: Arc<AuthService>) {
/// cfg.route(
///   "",
///   web::post()
///     .to(|| async { "created" })
///     .wrap(RoleGuard::new(auth_service, &[Role::Admin])),
/// );
/// # }
/// ```
pub struct RoleGuard {
  auth_service: Arc<AuthService>,
  allowed: &'static [Role],
}

impl RoleGuard {
  pub fn new(auth_service: Arc<AuthService>, allowed: &'static [Role]) -> Self {
    Self {
      auth_service,
      allowed,
    }
  }

  pub fn admin(auth_service: Arc<AuthService>) -> Self {
    Self::new(auth_service, &[Role::Admin])
  }
}

impl<S, B> Transform<S, ServiceRequest> for RoleGuard
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = RoleGuardService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(RoleGuardService {
      service: Rc::new(service),
      auth_service: self.auth_service.clone(),
      allowed: self.allowed,
    }))
  }
}

pub struct RoleGuardService<S> {
  service: Rc<S>,
  auth_service: Arc<AuthService>,
  allowed: &'static [Role],
}

impl<S, B> Service<ServiceRequest> for RoleGuardService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let auth_service = self.auth_service.clone();
    let allowed = self.allowed;

    Box::pin(async move {
      let token = req
        .cookie(ACCESS_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .unwrap_or_default();

      let subject = match auth_service.authorize(&token, allowed) {
        Ok(subject) => subject,
        Err(e) => {
          let api_error: ApiError = e.into();
          let (request, _) = req.into_parts();
          let response = api_error.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      req.extensions_mut().insert(subject);

      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

/// Extension trait for reading the subject admitted by [`RoleGuard`]
pub trait TokenSubjectExt {
  /// `None` on routes that are not wrapped by the guard
  fn token_subject(&self) -> Option<TokenSubject>;
}

impl TokenSubjectExt for actix_web::HttpRequest {
  fn token_subject(&self) -> Option<TokenSubject> {
    self.extensions().get::<TokenSubject>().copied()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::TokenIssuer;
  use crate::infrastructure::persistence::memory::{
    InMemoryAccountRepository, InMemoryStore, InMemoryTokenRepository,
  };
  use crate::infrastructure::security::{JwtTokenIssuer, TokenLifetimes};
  use actix_web::{
    App, HttpRequest, HttpResponse,
    cookie::Cookie,
    http::StatusCode,
    test::{self, TestRequest},
    web,
  };
  use uuid::Uuid;

  fn issuer() -> Arc<JwtTokenIssuer> {
    Arc::new(JwtTokenIssuer::new("guard-tests", TokenLifetimes::new("15m", "720h")))
  }

  fn auth_service(issuer: Arc<JwtTokenIssuer>) -> Arc<AuthService> {
    let store = Arc::new(InMemoryStore::new());
    Arc::new(AuthService::new(
      Arc::new(InMemoryAccountRepository::new(store.clone())),
      Arc::new(InMemoryTokenRepository::new(store)),
      issuer,
    ))
  }

  fn access_token(issuer: &JwtTokenIssuer, role: Role) -> String {
    issuer
      .generate(TokenSubject {
        account_id: Uuid::new_v4(),
        role,
      })
      .unwrap()
      .access_token
  }

  async fn protected(req: HttpRequest) -> HttpResponse {
    let subject = req.token_subject().unwrap();
    HttpResponse::Ok().body(subject.role.to_string())
  }

  #[actix_web::test]
  async fn test_role_guard_statuses() {
    let issuer = issuer();
    let service = auth_service(issuer.clone());
    let app = test::init_service(App::new().route(
      "/admin",
      web::post()
        .to(protected)
        .wrap(RoleGuard::admin(service)),
    ))
    .await;

    let missing = TestRequest::post().uri("/admin").to_request();
    assert_eq!(test::call_service(&app, missing).await.status(), StatusCode::UNAUTHORIZED);

    let garbage = TestRequest::post()
      .uri("/admin")
      .cookie(Cookie::new(ACCESS_COOKIE, "garbage"))
      .to_request();
    assert_eq!(test::call_service(&app, garbage).await.status(), StatusCode::UNAUTHORIZED);

    let refresh_token = issuer
      .generate(TokenSubject {
        account_id: Uuid::new_v4(),
        role: Role::Admin,
      })
      .unwrap()
      .refresh_token;
    let refresh_as_access = TestRequest::post()
      .uri("/admin")
      .cookie(Cookie::new(ACCESS_COOKIE, refresh_token))
      .to_request();
    assert_eq!(
      test::call_service(&app, refresh_as_access).await.status(),
      StatusCode::UNAUTHORIZED
    );

    let user = TestRequest::post()
      .uri("/admin")
      .cookie(Cookie::new(ACCESS_COOKIE, access_token(&issuer, Role::User)))
      .to_request();
    assert_eq!(test::call_service(&app, user).await.status(), StatusCode::FORBIDDEN);

    let admin = TestRequest::post()
      .uri("/admin")
      .cookie(Cookie::new(ACCESS_COOKIE, access_token(&issuer, Role::Admin)))
      .to_request();
    let response = test::call_service(&app, admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(test::read_body(response).await, "ADMIN");
  }
}
