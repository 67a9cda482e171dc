//! Application state for the API server.

use std::sync::Arc;

use crate::db::Database;
use crate::service::UserService;

/// Shared application state.
///
/// Generic over `D: Database` so handlers stay independent of the storage
/// backend. The database is injected by the caller, never created here.
pub struct AppState<D: Database> {
    users: UserService<D>,
}

// Manual Clone impl - UserService only clones its Arc, D need not be Clone
impl<D: Database> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
        }
    }
}

impl<D: Database> AppState<D> {
    pub fn new(db: D) -> Self {
        Self {
            users: UserService::new(Arc::new(db)),
        }
    }

    /// Get a reference to the user service.
    pub fn users(&self) -> &UserService<D> {
        &self.users
    }
}
