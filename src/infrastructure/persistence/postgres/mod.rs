pub mod account_repository;
pub mod actor_repository;
pub mod film_repository;
mod rows;
pub mod token_repository;

pub use account_repository::PostgresAccountRepository;
pub use actor_repository::PostgresActorRepository;
pub use film_repository::PostgresFilmRepository;
pub use token_repository::PostgresTokenRepository;
