use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::application::auth::AccountView;
use crate::domain::auth::Role;
use crate::domain::catalog::{Actor, ActorAggregate, Film, FilmAggregate, Page};

/// Body of both registration and login
#[derive(Clone, Deserialize, Validate)]
pub struct CredentialsRequest {
  #[validate(length(min = 3, max = 100, message = "name must be between 3 and 100 characters"))]
  pub name: String,

  // The byte-length and complexity rules live on the Password value
  #[validate(length(min = 1, max = 35, message = "password must be 1 to 35 characters"))]
  pub password: String,
}

/// Actor fields for create and update
#[derive(Debug, Clone, Deserialize)]
pub struct ActorRequest {
  pub name: String,
  pub gender: String,
  pub birthday: Option<NaiveDate>,
}

/// Film fields for create and update
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmRequest {
  pub name: String,
  #[serde(default)]
  pub description: Option<String>,
  pub release_date: Option<NaiveDate>,
  pub rate: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFilmsRequest {
  pub actor_id: Uuid,
  #[serde(default)]
  pub film_ids: Vec<Uuid>,
}

/// `?id=`
#[derive(Debug, Clone, Deserialize)]
pub struct IdQuery {
  pub id: Uuid,
}

/// Query string of `GET /actor`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActorListQuery {
  pub id: Option<Uuid>,
  pub page: Option<u32>,
  #[serde(rename = "page-count")]
  pub page_count: Option<u32>,
  /// `film` loads each actor's films
  pub connection: Option<String>,
}

/// Query string of `GET /film`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilmListQuery {
  pub id: Option<Uuid>,
  pub page: Option<u32>,
  #[serde(rename = "page-count")]
  pub page_count: Option<u32>,
  /// `actor` loads each film's actors
  pub connection: Option<String>,
  /// `asc` or `desc`
  #[serde(rename = "order-by")]
  pub order_by: Option<String>,
  /// `name`, `release_date` or `rate`
  #[serde(rename = "order-field")]
  pub order_field: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
  #[serde(default)]
  pub search: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
  pub id: Uuid,
  pub name: String,
  pub role: Role,
}

impl From<AccountView> for AccountResponse {
  fn from(view: AccountView) -> Self {
    Self {
      id: view.id,
      name: view.name,
      role: view.role,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActorResponse {
  pub id: Uuid,
  pub name: String,
  pub gender: String,
  pub birthday: Option<NaiveDate>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub films: Option<Vec<FilmResponse>>,
}

impl From<Actor> for ActorResponse {
  fn from(actor: Actor) -> Self {
    Self {
      id: actor.id,
      name: actor.name,
      gender: actor.gender,
      birthday: actor.birthday,
      films: None,
    }
  }
}

impl ActorResponse {
  pub fn with_films(aggregate: ActorAggregate) -> Self {
    Self {
      films: Some(aggregate.films.into_iter().map(FilmResponse::from).collect()),
      ..aggregate.actor.into()
    }
  }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmResponse {
  pub id: Uuid,
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub release_date: Option<NaiveDate>,
  pub rate: f32,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub actors: Option<Vec<ActorResponse>>,
}

impl From<Film> for FilmResponse {
  fn from(film: Film) -> Self {
    Self {
      id: film.id,
      name: film.name,
      description: film.description,
      release_date: film.release_date,
      rate: film.rate,
      actors: None,
    }
  }
}

impl FilmResponse {
  pub fn with_actors(aggregate: FilmAggregate) -> Self {
    Self {
      actors: Some(aggregate.actors.into_iter().map(ActorResponse::from).collect()),
      ..aggregate.film.into()
    }
  }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorListResponse {
  pub actors: Vec<ActorResponse>,
  pub page_count: u32,
}

impl ActorListResponse {
  pub fn new(page: Page<ActorAggregate>, with_films: bool) -> Self {
    let actors = page
      .items
      .into_iter()
      .map(|aggregate| {
        if with_films {
          ActorResponse::with_films(aggregate)
        } else {
          aggregate.actor.into()
        }
      })
      .collect();

    Self {
      actors,
      page_count: page.page_count,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmListResponse {
  pub films: Vec<FilmResponse>,
  pub page_count: u32,
}

impl FilmListResponse {
  pub fn new(page: Page<FilmAggregate>, with_actors: bool) -> Self {
    let films = page
      .items
      .into_iter()
      .map(|aggregate| {
        if with_actors {
          FilmResponse::with_actors(aggregate)
        } else {
          aggregate.film.into()
        }
      })
      .collect();

    Self {
      films,
      page_count: page.page_count,
    }
  }
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// HTTP status code
  pub code: u16,
  pub message: String,
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::catalog::{ActorDraft, FilmDraft};

  #[test]
  fn test_credentials_validation() {
    let valid = CredentialsRequest {
      name: "Neo".to_string(),
      password: "Supperpupper123".to_string(),
    };
    assert!(valid.validate().is_ok());

    let short = CredentialsRequest {
      name: "Ne".to_string(),
      password: String::new(),
    };
    let errors = short.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("name"));
    assert!(errors.field_errors().contains_key("password"));
  }

  #[test]
  fn test_film_request_uses_camel_case() {
    let request: FilmRequest = serde_json::from_str(
      r#"{"name": "Heat", "releaseDate": "1995-12-15", "rate": 8.3}"#,
    )
    .unwrap();

    assert_eq!(request.release_date, NaiveDate::from_ymd_opt(1995, 12, 15));
    assert!(request.description.is_none());
  }

  #[test]
  fn test_list_query_dashed_names() {
    let query: FilmListQuery =
      parse_film_query("page=2&page-count=5&order-by=desc&order-field=name&connection=actor");

    assert_eq!(query.page, Some(2));
    assert_eq!(query.page_count, Some(5));
    assert_eq!(query.order_by.as_deref(), Some("desc"));
    assert_eq!(query.order_field.as_deref(), Some("name"));
    assert_eq!(query.connection.as_deref(), Some("actor"));
  }

  fn parse_film_query(raw: &str) -> FilmListQuery {
    actix_web::web::Query::<FilmListQuery>::from_query(raw)
      .unwrap()
      .into_inner()
  }

  #[test]
  fn test_list_response_shape() {
    let actor = Actor::create(ActorDraft {
      name: "Robert De Niro".to_string(),
      gender: "male".to_string(),
      birthday: NaiveDate::from_ymd_opt(1943, 8, 17),
    })
    .unwrap();
    let film = Film::create(FilmDraft {
      name: "Heat".to_string(),
      description: None,
      release_date: NaiveDate::from_ymd_opt(1995, 12, 15),
      rate: 8.3,
    })
    .unwrap();
    let page = Page {
      items: vec![ActorAggregate {
        actor,
        films: vec![film],
      }],
      page_count: 1,
    };

    let json = serde_json::to_value(ActorListResponse::new(page.clone(), false)).unwrap();
    assert_eq!(json["pageCount"], 1);
    assert!(json["actors"][0].get("films").is_none());

    let json = serde_json::to_value(ActorListResponse::new(page, true)).unwrap();
    assert_eq!(json["actors"][0]["films"][0]["releaseDate"], "1995-12-15");
  }
}
