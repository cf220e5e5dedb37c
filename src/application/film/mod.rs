//! Film use cases

mod create_film;
mod delete_film;
mod get_film;
mod list_films;
mod search_films;
mod update_film;

pub use create_film::{CreateFilmUseCase, FilmCommand};
pub use delete_film::DeleteFilmUseCase;
pub use get_film::GetFilmUseCase;
pub use list_films::{ListFilmsCommand, ListFilmsUseCase};
pub use search_films::SearchFilmsUseCase;
pub use update_film::{UpdateFilmCommand, UpdateFilmUseCase};
