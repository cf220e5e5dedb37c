use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use super::rows::{ActorRow, FilmRow, LinkedFilmRow, required_date};
use crate::domain::catalog::ports::page_count;
use crate::domain::catalog::{Actor, ActorAggregate, ActorQuery, ActorRepository, Film, Page};
use crate::domain::errors::RepositoryError;

/// PostgreSQL implementation of the ActorRepository trait
pub struct PostgresActorRepository {
  pool: PgPool,
}

impl PostgresActorRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Films linked to each of the given actors, ordered by name
  async fn films_of(&self, actor_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<Film>>, RepositoryError> {
    let rows = sqlx::query_as::<_, LinkedFilmRow>(
      r#"
            SELECT af.actor_id AS owner_id, f.id, f.name, f.description, f.release_date, f.rate
            FROM actor_film af
            JOIN films f ON f.id = af.film_id
            WHERE af.actor_id = ANY($1)
            ORDER BY f.name, f.id
            "#,
    )
    .bind(actor_ids)
    .fetch_all(&self.pool)
    .await?;

    let mut grouped: HashMap<Uuid, Vec<Film>> = HashMap::new();
    for row in rows {
      grouped.entry(row.owner_id).or_default().push(row.film.into());
    }
    Ok(grouped)
  }
}

#[async_trait]
impl ActorRepository for PostgresActorRepository {
  async fn create(&self, actor: Actor) -> Result<Actor, RepositoryError> {
    let row = sqlx::query_as::<_, ActorRow>(
      r#"
            INSERT INTO actors (id, name, gender, birthday)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, gender, birthday
            "#,
    )
    .bind(actor.id)
    .bind(&actor.name)
    .bind(&actor.gender)
    .bind(required_date(actor.birthday))
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }

  async fn update(&self, actor: Actor) -> Result<Actor, RepositoryError> {
    let row = sqlx::query_as::<_, ActorRow>(
      r#"
            UPDATE actors
            SET name = $2, gender = $3, birthday = $4
            WHERE id = $1
            RETURNING id, name, gender, birthday
            "#,
    )
    .bind(actor.id)
    .bind(&actor.name)
    .bind(&actor.gender)
    .bind(required_date(actor.birthday))
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }

  async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
    // actor_film rows go with the actor through ON DELETE CASCADE
    let result = sqlx::query("DELETE FROM actors WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(RepositoryError::NotFound);
    }
    Ok(())
  }

  async fn get_by_id(&self, id: Uuid) -> Result<ActorAggregate, RepositoryError> {
    let row = sqlx::query_as::<_, ActorRow>(
      "SELECT id, name, gender, birthday FROM actors WHERE id = $1",
    )
    .bind(id)
    .fetch_one(&self.pool)
    .await?;

    let films = sqlx::query_as::<_, FilmRow>(
      r#"
            SELECT f.id, f.name, f.description, f.release_date, f.rate
            FROM films f
            JOIN actor_film af ON af.film_id = f.id
            WHERE af.actor_id = $1
            ORDER BY f.name, f.id
            "#,
    )
    .bind(id)
    .fetch_all(&self.pool)
    .await?;

    Ok(ActorAggregate {
      actor: row.into(),
      films: films.into_iter().map(Into::into).collect(),
    })
  }

  async fn get_by_query(&self, query: &ActorQuery) -> Result<Page<ActorAggregate>, RepositoryError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM actors")
      .fetch_one(&self.pool)
      .await?;

    let rows = sqlx::query_as::<_, ActorRow>(
      r#"
            SELECT id, name, gender, birthday
            FROM actors
            ORDER BY name, id
            LIMIT $1 OFFSET $2
            "#,
    )
    .bind(i64::from(query.page_size))
    .bind(i64::try_from(query.offset()).unwrap_or(i64::MAX))
    .fetch_all(&self.pool)
    .await?;

    let mut films = if query.with_films && !rows.is_empty() {
      let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
      self.films_of(&ids).await?
    } else {
      HashMap::new()
    };

    let items = rows
      .into_iter()
      .map(|row| ActorAggregate {
        films: films.remove(&row.id).unwrap_or_default(),
        actor: row.into(),
      })
      .collect();

    Ok(Page {
      items,
      page_count: page_count(u64::try_from(total).unwrap_or(0), query.page_size),
    })
  }

  async fn add_films(&self, actor_id: Uuid, film_ids: &[Uuid]) -> Result<(), RepositoryError> {
    // A missing actor or film trips the foreign key, which maps to NotFound
    sqlx::query(
      r#"
            INSERT INTO actor_film (actor_id, film_id)
            SELECT $1, film_id FROM UNNEST($2::uuid[]) AS film_id
            ON CONFLICT DO NOTHING
            "#,
    )
    .bind(actor_id)
    .bind(film_ids)
    .execute(&self.pool)
    .await?;

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::catalog::{ActorDraft, FilmDraft, FilmRepository};
  use crate::infrastructure::persistence::postgres::PostgresFilmRepository;
  use crate::infrastructure::persistence::postgres::test_support::setup_test_db;
  use chrono::NaiveDate;

  fn actor(name: &str) -> Actor {
    Actor::create(ActorDraft {
      name: name.to_string(),
      gender: "male".to_string(),
      birthday: NaiveDate::from_ymd_opt(1964, 9, 2),
    })
    .unwrap()
  }

  fn film(name: &str) -> Film {
    Film::create(FilmDraft {
      name: name.to_string(),
      description: None,
      release_date: NaiveDate::from_ymd_opt(1999, 3, 31),
      rate: 8.7,
    })
    .unwrap()
  }

  #[tokio::test]
  #[ignore = "requires a container runtime"]
  async fn test_create_link_and_load() {
    let (pool, _container) = setup_test_db().await;
    let actors = PostgresActorRepository::new(pool.clone());
    let films = PostgresFilmRepository::new(pool);

    let keanu = actors.create(actor("Keanu Reeves")).await.unwrap();
    let matrix = films.create(film("The Matrix")).await.unwrap();
    actors.add_films(keanu.id, &[matrix.id]).await.unwrap();
    actors.add_films(keanu.id, &[matrix.id]).await.unwrap();

    let loaded = actors.get_by_id(keanu.id).await.unwrap();
    assert_eq!(loaded.actor, keanu);
    assert_eq!(loaded.films, vec![matrix]);
  }

  #[tokio::test]
  #[ignore = "requires a container runtime"]
  async fn test_query_with_films_and_page_count() {
    let (pool, _container) = setup_test_db().await;
    let actors = PostgresActorRepository::new(pool.clone());
    let films = PostgresFilmRepository::new(pool);

    let heat = films.create(film("Heat")).await.unwrap();
    for name in ["Carol", "Alice", "Bob"] {
      let created = actors.create(actor(name)).await.unwrap();
      actors.add_films(created.id, &[heat.id]).await.unwrap();
    }

    let query = ActorQuery {
      page: 2,
      page_size: 2,
      with_films: true,
    };
    let page = actors.get_by_query(&query).await.unwrap();

    assert_eq!(page.page_count, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].actor.name, "Carol");
    assert_eq!(page.items[0].films, vec![heat]);
  }

  #[tokio::test]
  #[ignore = "requires a container runtime"]
  async fn test_add_missing_film() {
    let (pool, _container) = setup_test_db().await;
    let actors = PostgresActorRepository::new(pool);

    let keanu = actors.create(actor("Keanu Reeves")).await.unwrap();
    let result = actors.add_films(keanu.id, &[Uuid::new_v4()]).await;

    assert!(matches!(result, Err(RepositoryError::NotFound)));
  }

  #[tokio::test]
  #[ignore = "requires a container runtime"]
  async fn test_delete_missing_actor() {
    let (pool, _container) = setup_test_db().await;
    let actors = PostgresActorRepository::new(pool);

    assert!(matches!(actors.delete(Uuid::new_v4()).await, Err(RepositoryError::NotFound)));
  }
}
