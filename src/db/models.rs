//! Domain models for the users database.
//!
//! These models are storage-agnostic and represent the records
//! handled by the repository layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of a paginated list query.
#[derive(Debug, Clone)]
pub struct ListResult<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Total count of all matching items (before pagination).
    pub total: u64,
}

/// A persisted user record tied to an Aadhaar application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub aadhaar_application_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub date_of_birth: String,
    pub gender: Gender,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field values for a record that has not been stored yet.
///
/// The store assigns `id`, `created_at` and `updated_at` on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub aadhaar_application_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub date_of_birth: String,
    pub gender: Gender,
}

/// Gender of the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Accepted wire values, in declaration order.
    pub const VALUES: [&'static str; 3] = ["male", "female", "other"];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(format!("Unknown gender: {}", s)),
        }
    }
}

/// Columns that carry a UNIQUE constraint and may be used for point lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    ApplicationId,
}

impl UniqueField {
    pub fn column(self) -> &'static str {
        match self {
            UniqueField::Email => "email",
            UniqueField::ApplicationId => "aadhaar_application_id",
        }
    }
}
