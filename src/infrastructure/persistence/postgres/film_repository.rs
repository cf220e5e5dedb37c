use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use super::rows::{
  ActorRow, FilmRow, LinkedActorRow, order_keyword, required_date, sort_column,
};
use crate::domain::catalog::ports::page_count;
use crate::domain::catalog::{Actor, Film, FilmAggregate, FilmQuery, FilmRepository, Page};
use crate::domain::errors::RepositoryError;

/// PostgreSQL implementation of the FilmRepository trait
pub struct PostgresFilmRepository {
  pool: PgPool,
}

impl PostgresFilmRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  async fn actors_of(&self, film_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<Actor>>, RepositoryError> {
    let rows = sqlx::query_as::<_, LinkedActorRow>(
      r#"
            SELECT af.film_id AS owner_id, a.id, a.name, a.gender, a.birthday
            FROM actor_film af
            JOIN actors a ON a.id = af.actor_id
            WHERE af.film_id = ANY($1)
            ORDER BY a.name, a.id
            "#,
    )
    .bind(film_ids)
    .fetch_all(&self.pool)
    .await?;

    let mut grouped: HashMap<Uuid, Vec<Actor>> = HashMap::new();
    for row in rows {
      grouped.entry(row.owner_id).or_default().push(row.actor.into());
    }
    Ok(grouped)
  }
}

#[async_trait]
impl FilmRepository for PostgresFilmRepository {
  async fn create(&self, film: Film) -> Result<Film, RepositoryError> {
    let row = sqlx::query_as::<_, FilmRow>(
      r#"
            INSERT INTO films (id, name, description, release_date, rate)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, release_date, rate
            "#,
    )
    .bind(film.id)
    .bind(&film.name)
    .bind(&film.description)
    .bind(required_date(film.release_date))
    .bind(film.rate)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }

  async fn update(&self, film: Film) -> Result<Film, RepositoryError> {
    let row = sqlx::query_as::<_, FilmRow>(
      r#"
            UPDATE films
            SET name = $2, description = $3, release_date = $4, rate = $5
            WHERE id = $1
            RETURNING id, name, description, release_date, rate
            "#,
    )
    .bind(film.id)
    .bind(&film.name)
    .bind(&film.description)
    .bind(required_date(film.release_date))
    .bind(film.rate)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }

  async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
    let result = sqlx::query("DELETE FROM films WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(RepositoryError::NotFound);
    }
    Ok(())
  }

  async fn get_by_id(&self, id: Uuid) -> Result<FilmAggregate, RepositoryError> {
    let row = sqlx::query_as::<_, FilmRow>(
      "SELECT id, name, description, release_date, rate FROM films WHERE id = $1",
    )
    .bind(id)
    .fetch_one(&self.pool)
    .await?;

    let actors = sqlx::query_as::<_, ActorRow>(
      r#"
            SELECT a.id, a.name, a.gender, a.birthday
            FROM actors a
            JOIN actor_film af ON af.actor_id = a.id
            WHERE af.film_id = $1
            ORDER BY a.name, a.id
            "#,
    )
    .bind(id)
    .fetch_all(&self.pool)
    .await?;

    Ok(FilmAggregate {
      film: row.into(),
      actors: actors.into_iter().map(Into::into).collect(),
    })
  }

  async fn get_by_query(&self, query: &FilmQuery) -> Result<Page<FilmAggregate>, RepositoryError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM films")
      .fetch_one(&self.pool)
      .await?;

    // Column and direction come from closed enums, never from request text
    let sql = format!(
      r#"
            SELECT id, name, description, release_date, rate
            FROM films
            ORDER BY {} {}, id
            LIMIT $1 OFFSET $2
            "#,
      sort_column(query.sort_field),
      order_keyword(query.order)
    );

    let rows = sqlx::query_as::<_, FilmRow>(&sql)
      .bind(i64::from(query.page_size))
      .bind(i64::try_from(query.offset()).unwrap_or(i64::MAX))
      .fetch_all(&self.pool)
      .await?;

    let mut actors = if query.with_actors && !rows.is_empty() {
      let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
      self.actors_of(&ids).await?
    } else {
      HashMap::new()
    };

    let items = rows
      .into_iter()
      .map(|row| FilmAggregate {
        actors: actors.remove(&row.id).unwrap_or_default(),
        film: row.into(),
      })
      .collect();

    Ok(Page {
      items,
      page_count: page_count(u64::try_from(total).unwrap_or(0), query.page_size),
    })
  }

  async fn search(&self, term: &str, limit: u32) -> Result<Vec<Film>, RepositoryError> {
    // strpos keeps the match literal; LIKE would treat % and _ as wildcards
    let rows = sqlx::query_as::<_, FilmRow>(
      r#"
            SELECT f.id, f.name, f.description, f.release_date, f.rate
            FROM films f
            WHERE strpos(f.name, $1) > 0
               OR EXISTS (
                    SELECT 1
                    FROM actor_film af
                    JOIN actors a ON a.id = af.actor_id
                    WHERE af.film_id = f.id AND strpos(a.name, $1) > 0
                  )
            ORDER BY f.rate ASC, f.id
            LIMIT $2
            "#,
    )
    .bind(term)
    .bind(i64::from(limit))
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }
}
