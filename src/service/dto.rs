//! Transport-facing shapes returned by the service.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::User;

/// User response DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserDto {
    /// Unique identifier (UUID v4)
    #[schema(example = "7c9e6679-7425-40de-944b-e07fc1f90ae7")]
    pub id: Uuid,
    /// Aadhaar application ID (14 characters)
    #[schema(example = "12345678901234")]
    pub aadhaar_application_id: String,
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane@x.com")]
    pub email: String,
    #[schema(example = "9876543210")]
    pub phone: String,
    #[schema(example = "1 Main St")]
    pub address: String,
    #[schema(example = "1990-01-01")]
    pub date_of_birth: String,
    /// One of male, female, other
    #[schema(example = "female")]
    pub gender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserDto {
    /// Shape returned right after creation: no `updated_at`.
    pub fn created(user: User) -> Self {
        Self {
            updated_at: None,
            ..Self::from(user)
        }
    }
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            aadhaar_application_id: u.aadhaar_application_id,
            name: u.name,
            email: u.email,
            phone: u.phone,
            address: u.address,
            date_of_birth: u.date_of_birth,
            gender: u.gender.to_string(),
            created_at: Some(u.created_at),
            updated_at: Some(u.updated_at),
        }
    }
}

/// One page of users with pagination metadata
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserPage {
    pub users: Vec<UserDto>,
    /// Matching users across all pages
    #[schema(example = 25)]
    pub total: u64,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub limit: u32,
    /// ceil(total / limit); 0 when there are no matches
    #[schema(example = 3)]
    pub total_pages: u64,
}
