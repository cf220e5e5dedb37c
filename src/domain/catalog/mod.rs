pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;

pub use entities::{Actor, ActorAggregate, ActorDraft, Film, FilmAggregate, FilmDraft, GENDERS};
pub use errors::CatalogError;
pub use ports::{
  ActorQuery, ActorRepository, FilmQuery, FilmRepository, FilmSortField, Page, SortOrder,
};
pub use services::CatalogService;
