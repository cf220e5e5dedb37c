use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use filmoteka::{
  adapters::http::{
    ApiDependencies, RequestIdMiddleware, SessionCookies, configure_api, health_handler,
  },
  domain::auth::{AccountRepository, AuthService, TokenRepository},
  domain::catalog::{ActorRepository, CatalogService, FilmRepository},
  infrastructure::{
    config::{Config, DatabaseConfig, StorageBackend},
    persistence::memory::{
      InMemoryAccountRepository, InMemoryActorRepository, InMemoryFilmRepository, InMemoryStore,
      InMemoryTokenRepository,
    },
    persistence::postgres::{
      PostgresAccountRepository, PostgresActorRepository, PostgresFilmRepository,
      PostgresTokenRepository,
    },
    security::{JwtTokenIssuer, TokenLifetimes},
  },
};

/// One implementation of every port, chosen by `storage.backend`
struct Repositories {
  accounts: Arc<dyn AccountRepository>,
  tokens: Arc<dyn TokenRepository>,
  actors: Arc<dyn ActorRepository>,
  films: Arc<dyn FilmRepository>,
}

impl Repositories {
  fn postgres(pool: PgPool) -> Self {
    Self {
      accounts: Arc::new(PostgresAccountRepository::new(pool.clone())),
      tokens: Arc::new(PostgresTokenRepository::new(pool.clone())),
      actors: Arc::new(PostgresActorRepository::new(pool.clone())),
      films: Arc::new(PostgresFilmRepository::new(pool)),
    }
  }

  fn memory() -> Self {
    let store = Arc::new(InMemoryStore::new());
    Self {
      accounts: Arc::new(InMemoryAccountRepository::new(store.clone())),
      tokens: Arc::new(InMemoryTokenRepository::new(store.clone())),
      actors: Arc::new(InMemoryActorRepository::new(store.clone())),
      films: Arc::new(InMemoryFilmRepository::new(store)),
    }
  }
}

async fn connect_database(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
  tracing::info!("Connecting to database");

  let pool = tokio::time::timeout(
    Duration::from_secs(config.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.max_connections)
      .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
      .connect(&config.url),
  )
  .await
  .map_err(|_| {
    anyhow::anyhow!(
      "database connection timed out after {} seconds; is PostgreSQL running?",
      config.connect_timeout_seconds
    )
  })?
  .context("failed to connect to database")?;

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .context("failed to run database migrations")?;
  tracing::info!("Database migrations completed");

  Ok(pool)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "filmoteka=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting filmoteka");

  let config = Config::load().context("failed to load configuration")?;
  tracing::debug!(?config, "Configuration loaded");

  // Bad lifetimes would otherwise only surface on the first login
  let lifetimes = TokenLifetimes::new(
    config.security.access_token_ttl.clone(),
    config.security.refresh_token_ttl.clone(),
  );
  let access_ttl = lifetimes.access().context("invalid security.access_token_ttl")?;
  let refresh_ttl = lifetimes.refresh().context("invalid security.refresh_token_ttl")?;

  let repositories = match config.storage.backend {
    StorageBackend::Postgres => Repositories::postgres(connect_database(&config.database).await?),
    StorageBackend::Memory => {
      tracing::warn!("Using in-memory storage; data is lost on shutdown");
      Repositories::memory()
    }
  };

  let token_issuer = Arc::new(JwtTokenIssuer::new(&config.security.jwt_secret, lifetimes));
  let auth_service = Arc::new(AuthService::new(
    repositories.accounts,
    repositories.tokens,
    token_issuer,
  ));
  let catalog_service = Arc::new(CatalogService::new(repositories.actors, repositories.films));

  auth_service
    .seed_admin(&config.admin.name, &config.admin.password)
    .await
    .context("failed to seed the administrator account")?;

  let deps = ApiDependencies {
    auth_service,
    catalog_service,
    cookies: SessionCookies::new(config.security.secure_cookies, access_ttl, refresh_ttl),
  };

  let bind_address = (config.server.host.clone(), config.server.port);
  tracing::info!("Listening on {}:{}", bind_address.0, bind_address.1);

  HttpServer::new(move || {
    App::new()
      .wrap(Logger::default())
      .wrap(RequestIdMiddleware::new())
      .route("/health", web::get().to(health_handler))
      .service(web::scope("/http/v1").configure(|cfg| configure_api(cfg, &deps)))
  })
  .bind(bind_address)
  .context("failed to bind server address")?
  .run()
  .await
  .context("server terminated with an error")?;

  Ok(())
}
