//! Aadhaar user record service.
//!
//! - `db`: storage traits, models and the SQLite implementation
//! - `validation`: declarative payload rules and pagination normalization
//! - `service`: create/get/list/delete workflows and the error taxonomy
//! - `api`: axum HTTP surface, configuration and server lifecycle

pub mod api;
pub mod db;
pub mod service;
pub mod validation;
