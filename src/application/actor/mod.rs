//! Actor use cases

mod create_actor;
mod delete_actor;
mod get_actor;
mod link_films;
mod list_actors;
mod update_actor;

pub use create_actor::{ActorCommand, CreateActorUseCase};
pub use delete_actor::DeleteActorUseCase;
pub use get_actor::GetActorUseCase;
pub use link_films::{LinkFilmsCommand, LinkFilmsUseCase};
pub use list_actors::{ListActorsCommand, ListActorsUseCase};
pub use update_actor::{UpdateActorCommand, UpdateActorUseCase};
