//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.
//! Returned futures are `Send` so they can be awaited from axum handlers.

use std::future::Future;

use uuid::Uuid;

use crate::db::{
    DbResult,
    models::{ListResult, NewUser, UniqueField, User},
    query::UserQuery,
};

/// Repository for User operations.
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Assigns the id and both timestamps.
    ///
    /// Fails with `DbError::UniqueViolation` when email or application ID is taken.
    fn create(&self, user: &NewUser) -> impl Future<Output = DbResult<User>> + Send;

    /// Get a user by ID.
    fn get(&self, id: Uuid) -> impl Future<Output = DbResult<User>> + Send;

    /// Get a user by one of its unique columns.
    fn get_by_field(
        &self,
        field: UniqueField,
        value: &str,
    ) -> impl Future<Output = DbResult<User>> + Send;

    /// List one page of users plus the total count of the filtered set.
    fn list(&self, query: &UserQuery) -> impl Future<Output = DbResult<ListResult<User>>> + Send;

    /// Delete a user by ID.
    fn delete(&self, id: Uuid) -> impl Future<Output = DbResult<()>> + Send;
}

/// Combined database interface.
pub trait Database: Send + Sync + 'static {
    type Users<'a>: UserRepository
    where
        Self: 'a;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the user repository.
    fn users(&self) -> Self::Users<'_>;
}
