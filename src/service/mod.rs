//! User service layer.
//!
//! Sits between the HTTP handlers and the repository traits: validates
//! payloads, enforces uniqueness, normalizes list parameters and maps store
//! records and errors to transport-facing DTOs and [`ServiceError`]s.

mod dto;
mod error;
mod users;


pub use dto::{UserDto, UserPage};
pub use error::{ConflictKind, Operation, ServiceError, ServiceResult};
pub use users::{CreateUserInput, ListParams, UserService};
