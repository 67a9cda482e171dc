//! Aadhaar user record handlers.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::{instrument, warn};
use utoipa::{IntoParams, ToSchema};

use crate::api::AppState;
use crate::db::Database;
use crate::service::{CreateUserInput, ListParams, UserDto, UserPage};

use super::{ErrorResponse, HandlerError, service_error};

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// Create user request DTO
///
/// Missing fields deserialize as empty strings and are reported by
/// validation rather than rejected as a malformed body.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateUserRequest {
    /// Aadhaar application ID (exactly 14 characters)
    #[schema(example = "12345678901234")]
    pub aadhaar_application_id: String,
    /// Full name (2-100 characters)
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane@x.com")]
    pub email: String,
    /// Exactly 10 digits
    #[schema(example = "9876543210")]
    pub phone: String,
    /// Up to 500 characters
    #[schema(example = "1 Main St")]
    pub address: String,
    #[schema(example = "1990-01-01")]
    pub date_of_birth: String,
    /// One of male, female, other
    #[schema(example = "female")]
    pub gender: String,
}

impl From<CreateUserRequest> for CreateUserInput {
    fn from(r: CreateUserRequest) -> Self {
        Self {
            aadhaar_application_id: r.aadhaar_application_id,
            name: r.name,
            email: r.email,
            phone: r.phone,
            address: r.address,
            date_of_birth: r.date_of_birth,
            gender: r.gender,
        }
    }
}

/// List query parameters.
///
/// `page` and `limit` arrive as raw strings; anything that is not an integer
/// is treated as absent so the defaults apply.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListUsersQuery {
    /// Page number, 1-based (default 1)
    #[param(example = "1")]
    pub page: Option<String>,
    /// Page size (default 10, max 100)
    #[param(example = "10")]
    pub limit: Option<String>,
    /// Sort field (name, email, created_at, aadhaar_application_id)
    #[param(example = "created_at")]
    pub sort_by: Option<String>,
    /// Sort order (asc, desc)
    #[param(example = "desc")]
    pub order: Option<String>,
    /// Case-insensitive substring match on name, email and application ID
    #[param(example = "jane")]
    pub search: Option<String>,
}

impl From<ListUsersQuery> for ListParams {
    fn from(q: ListUsersQuery) -> Self {
        Self {
            page: q.page.as_deref().and_then(parse_int),
            limit: q.limit.as_deref().and_then(parse_int),
            sort_by: q.sort_by,
            order: q.order,
            search: q.search,
        }
    }
}

fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

// =============================================================================
// Handlers
// =============================================================================

/// Create a new user
///
/// Validates the payload and rejects duplicates by email or application ID
#[utoipa::path(
    post,
    path = "/aadhaar/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Invalid request body or validation failure", body = ErrorResponse),
        (status = 409, description = "Email or application ID already exists", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn create_user<D: Database>(
    State(state): State<AppState<D>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserDto>), HandlerError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected create payload");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(ErrorResponse::new("Request body too large")),
            )
        } else {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Invalid request body")),
            )
        }
    })?;

    let user = state
        .users()
        .create(request.into())
        .await
        .map_err(service_error)?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// List users
///
/// Returns a page of users with optional search and whitelisted sorting
#[utoipa::path(
    get,
    path = "/aadhaar/users",
    tag = "users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Paginated list of users", body = UserPage),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_users<D: Database>(
    State(state): State<AppState<D>>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<UserPage>, HandlerError> {
    let page = state
        .users()
        .list(query.into())
        .await
        .map_err(service_error)?;

    Ok(Json(page))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/aadhaar/users/{id}",
    tag = "users",
    params(
        ("id" = String, Path, description = "User ID (UUID)")
    ),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 400, description = "Invalid user ID format", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_user<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<UserDto>, HandlerError> {
    let user = state.users().get(&id).await.map_err(service_error)?;
    Ok(Json(user))
}

/// Delete a user by ID
#[utoipa::path(
    delete,
    path = "/aadhaar/users/{id}",
    tag = "users",
    params(
        ("id" = String, Path, description = "User ID (UUID)")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid user ID format", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_user<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<StatusCode, HandlerError> {
    state.users().delete(&id).await.map_err(service_error)?;
    Ok(StatusCode::NO_CONTENT)
}
