//! SQLite implementation of the database traits.
//!
//! This module provides a SQLx-backed implementation of the repository
//! traits defined in the parent module.

mod connection;
mod helpers;
mod user;

#[cfg(test)]
mod user_test;

pub use connection::{DbConfig, SqliteDatabase};
pub use user::SqliteUserRepository;
