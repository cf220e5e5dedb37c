use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use super::{parse_or_default, wants_connection};
use crate::adapters::http::{
  dtos::{FilmListQuery, FilmListResponse, FilmRequest, FilmResponse, IdQuery, SearchQuery},
  errors::ApiError,
  middleware::TokenSubjectExt,
};
use crate::application::film::{
  CreateFilmUseCase, DeleteFilmUseCase, FilmCommand, GetFilmUseCase, ListFilmsCommand,
  ListFilmsUseCase, SearchFilmsUseCase, UpdateFilmCommand, UpdateFilmUseCase,
};
use crate::domain::catalog::ports::DEFAULT_PAGE_SIZE;
use crate::domain::catalog::{FilmSortField, SortOrder};

impl From<FilmRequest> for FilmCommand {
  fn from(request: FilmRequest) -> Self {
    FilmCommand {
      name: request.name,
      description: request.description,
      release_date: request.release_date,
      rate: request.rate,
    }
  }
}

/// GET /film
///
/// `?id=` returns one film with its actors; otherwise a page of films
/// (`page`, `page-count`, `order-by`, `order-field`, `connection=actor`).
pub async fn get_films_handler(
  query: web::Query<FilmListQuery>,
  get_use_case: web::Data<Arc<GetFilmUseCase>>,
  list_use_case: web::Data<Arc<ListFilmsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let query = query.into_inner();

  if let Some(id) = query.id {
    let aggregate = get_use_case.execute(id).await?;
    return Ok(HttpResponse::Ok().json(FilmResponse::with_actors(aggregate)));
  }

  let with_actors = wants_connection(query.connection.as_deref(), "actor")?;
  let order: SortOrder = parse_or_default(query.order_by.as_deref(), "order-by")?;
  let sort_field: FilmSortField = parse_or_default(query.order_field.as_deref(), "order-field")?;

  let page = list_use_case
    .execute(ListFilmsCommand {
      sort_field,
      order,
      page: query.page.unwrap_or(1),
      page_size: query.page_count.unwrap_or(DEFAULT_PAGE_SIZE),
      with_actors,
    })
    .await?;

  Ok(HttpResponse::Ok().json(FilmListResponse::new(page, with_actors)))
}

/// GET /film/search?search=
pub async fn search_films_handler(
  query: web::Query<SearchQuery>,
  use_case: web::Data<Arc<SearchFilmsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let films = use_case.execute(&query.search).await?;
  let films: Vec<FilmResponse> = films.into_iter().map(FilmResponse::from).collect();
  Ok(HttpResponse::Ok().json(films))
}

/// POST /film (admin)
pub async fn create_film_handler(
  req: HttpRequest,
  body: web::Json<FilmRequest>,
  use_case: web::Data<Arc<CreateFilmUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let film = use_case.execute(body.into_inner().into()).await?;

  tracing::debug!(
    film_id = %film.id,
    by = ?req.token_subject().map(|s| s.account_id),
    "film created over http"
  );
  Ok(HttpResponse::Ok().json(FilmResponse::from(film)))
}

/// PUT /film?id= (admin)
pub async fn update_film_handler(
  query: web::Query<IdQuery>,
  body: web::Json<FilmRequest>,
  use_case: web::Data<Arc<UpdateFilmUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let film = use_case
    .execute(UpdateFilmCommand {
      id: query.id,
      fields: body.into_inner().into(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(FilmResponse::from(film)))
}

/// DELETE /film?id= (admin)
pub async fn delete_film_handler(
  query: web::Query<IdQuery>,
  use_case: web::Data<Arc<DeleteFilmUseCase>>,
) -> Result<HttpResponse, ApiError> {
  use_case.execute(query.id).await?;
  Ok(HttpResponse::Ok().finish())
}
