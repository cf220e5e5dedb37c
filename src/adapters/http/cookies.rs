use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use std::time::Duration;

use crate::domain::auth::TokenPair;

pub const ACCESS_COOKIE: &str = "accessToken";
pub const REFRESH_COOKIE: &str = "refreshToken";

/// Builds the session cookies carrying the token pair
#[derive(Debug, Clone)]
pub struct SessionCookies {
  secure: bool,
  access_max_age: Duration,
  refresh_max_age: Duration,
}

impl SessionCookies {
  pub fn new(secure: bool, access_max_age: Duration, refresh_max_age: Duration) -> Self {
    Self {
      secure,
      access_max_age,
      refresh_max_age,
    }
  }

  /// Access and refresh cookies, each living as long as its token
  pub fn issue(&self, tokens: &TokenPair) -> [Cookie<'static>; 2] {
    [
      self.build(ACCESS_COOKIE, tokens.access_token.clone(), seconds(self.access_max_age)),
      self.build(REFRESH_COOKIE, tokens.refresh_token.clone(), seconds(self.refresh_max_age)),
    ]
  }

  /// Expired, empty cookies that make the client drop the session
  pub fn clear(&self) -> [Cookie<'static>; 2] {
    [
      self.build(ACCESS_COOKIE, String::new(), CookieDuration::seconds(-1)),
      self.build(REFRESH_COOKIE, String::new(), CookieDuration::seconds(-1)),
    ]
  }

  fn build(&self, name: &'static str, value: String, max_age: CookieDuration) -> Cookie<'static> {
    Cookie::build(name, value)
      .path("/")
      .http_only(true)
      .secure(self.secure)
      .same_site(SameSite::Lax)
      .max_age(max_age)
      .finish()
  }
}

fn seconds(duration: Duration) -> CookieDuration {
  CookieDuration::seconds(i64::try_from(duration.as_secs()).unwrap_or(i64::MAX))
}
