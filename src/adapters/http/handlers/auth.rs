use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder, web};
use std::sync::Arc;
use validator::Validate;
use zeroize::Zeroizing;

use crate::adapters::http::{
  cookies::{REFRESH_COOKIE, SessionCookies},
  dtos::{AccountResponse, CredentialsRequest},
  errors::ApiError,
};
use crate::application::auth::{
  LoginAccountCommand, LoginAccountUseCase, LogoutAccountUseCase, RefreshSessionUseCase,
  RegisterAccountCommand, RegisterAccountUseCase, SessionResponse,
};

/// Missing cookie reads as an empty token, which the use cases reject or ignore
fn refresh_cookie(req: &HttpRequest) -> String {
  req
    .cookie(REFRESH_COOKIE)
    .map(|cookie| cookie.value().to_string())
    .unwrap_or_default()
}

fn session_response(session: SessionResponse, cookies: &SessionCookies) -> HttpResponse {
  let mut builder = HttpResponse::Ok();
  set_cookies(&mut builder, cookies.issue(&session.tokens));
  builder.json(AccountResponse::from(session.account))
}

fn set_cookies(
  builder: &mut HttpResponseBuilder,
  cookies: [actix_web::cookie::Cookie<'static>; 2],
) {
  for cookie in cookies {
    builder.cookie(cookie);
  }
}

/// POST /auth/registration
///
/// Body: `{name, password}`. Responds with the account and sets both session cookies.
pub async fn register_handler(
  request: web::Json<CredentialsRequest>,
  use_case: web::Data<Arc<RegisterAccountUseCase>>,
  cookies: web::Data<SessionCookies>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let request = request.into_inner();

  let session = use_case
    .execute(RegisterAccountCommand {
      name: request.name,
      password: Zeroizing::new(request.password),
    })
    .await?;

  Ok(session_response(session, &cookies))
}

/// POST /auth/login
pub async fn login_handler(
  request: web::Json<CredentialsRequest>,
  use_case: web::Data<Arc<LoginAccountUseCase>>,
  cookies: web::Data<SessionCookies>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let request = request.into_inner();

  let session = use_case
    .execute(LoginAccountCommand {
      name: request.name,
      password: Zeroizing::new(request.password),
    })
    .await?;

  Ok(session_response(session, &cookies))
}

/// POST /auth/refresh
///
/// Rotates the session held in the `refreshToken` cookie.
pub async fn refresh_handler(
  req: HttpRequest,
  use_case: web::Data<Arc<RefreshSessionUseCase>>,
  cookies: web::Data<SessionCookies>,
) -> Result<HttpResponse, ApiError> {
  let session = use_case.execute(&refresh_cookie(&req)).await?;
  Ok(session_response(session, &cookies))
}

/// GET /auth/logout
///
/// Revokes the refresh token if one is presented and always clears both cookies.
pub async fn logout_handler(
  req: HttpRequest,
  use_case: web::Data<Arc<LogoutAccountUseCase>>,
  cookies: web::Data<SessionCookies>,
) -> Result<HttpResponse, ApiError> {
  use_case.execute(&refresh_cookie(&req)).await?;

  let mut builder = HttpResponse::Ok();
  set_cookies(&mut builder, cookies.clear());
  Ok(builder.finish())
}
