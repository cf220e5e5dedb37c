use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use super::wants_connection;
use crate::adapters::http::{
  dtos::{ActorListQuery, ActorListResponse, ActorRequest, ActorResponse, AddFilmsRequest, IdQuery},
  errors::ApiError,
  middleware::TokenSubjectExt,
};
use crate::application::actor::{
  ActorCommand, CreateActorUseCase, DeleteActorUseCase, GetActorUseCase, LinkFilmsCommand,
  LinkFilmsUseCase, ListActorsCommand, ListActorsUseCase, UpdateActorCommand, UpdateActorUseCase,
};
use crate::domain::catalog::ports::DEFAULT_PAGE_SIZE;

impl From<ActorRequest> for ActorCommand {
  fn from(request: ActorRequest) -> Self {
    ActorCommand {
      name: request.name,
      gender: request.gender,
      birthday: request.birthday,
    }
  }
}

/// GET /actor
///
/// `?id=` returns one actor with its films; otherwise a page of actors
/// (`page`, `page-count`, `connection=film`).
pub async fn get_actors_handler(
  query: web::Query<ActorListQuery>,
  get_use_case: web::Data<Arc<GetActorUseCase>>,
  list_use_case: web::Data<Arc<ListActorsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let query = query.into_inner();

  if let Some(id) = query.id {
    let aggregate = get_use_case.execute(id).await?;
    return Ok(HttpResponse::Ok().json(ActorResponse::with_films(aggregate)));
  }

  let with_films = wants_connection(query.connection.as_deref(), "film")?;
  let page = list_use_case
    .execute(ListActorsCommand {
      page: query.page.unwrap_or(1),
      page_size: query.page_count.unwrap_or(DEFAULT_PAGE_SIZE),
      with_films,
    })
    .await?;

  Ok(HttpResponse::Ok().json(ActorListResponse::new(page, with_films)))
}

/// POST /actor (admin)
pub async fn create_actor_handler(
  req: HttpRequest,
  body: web::Json<ActorRequest>,
  use_case: web::Data<Arc<CreateActorUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let actor = use_case.execute(body.into_inner().into()).await?;

  tracing::debug!(
    actor_id = %actor.id,
    by = ?req.token_subject().map(|s| s.account_id),
    "actor created over http"
  );
  Ok(HttpResponse::Ok().json(ActorResponse::from(actor)))
}

/// PUT /actor?id= (admin)
pub async fn update_actor_handler(
  query: web::Query<IdQuery>,
  body: web::Json<ActorRequest>,
  use_case: web::Data<Arc<UpdateActorUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let actor = use_case
    .execute(UpdateActorCommand {
      id: query.id,
      fields: body.into_inner().into(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(ActorResponse::from(actor)))
}

/// DELETE /actor?id= (admin)
pub async fn delete_actor_handler(
  query: web::Query<IdQuery>,
  use_case: web::Data<Arc<DeleteActorUseCase>>,
) -> Result<HttpResponse, ApiError> {
  use_case.execute(query.id).await?;
  Ok(HttpResponse::Ok().finish())
}

/// POST /actor/add-film (admin)
///
/// Body: `{actorId, filmIds}`
pub async fn add_films_handler(
  body: web::Json<AddFilmsRequest>,
  use_case: web::Data<Arc<LinkFilmsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let body = body.into_inner();

  use_case
    .execute(LinkFilmsCommand {
      actor_id: body.actor_id,
      film_ids: body.film_ids,
    })
    .await?;

  Ok(HttpResponse::Ok().finish())
}
