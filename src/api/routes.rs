//! API route configuration.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use tower_http::catch_panic::CatchPanicLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{self, CreateUserRequest, ErrorResponse, HealthResponse};
use super::state::AppState;
use crate::db::Database;
use crate::service::{UserDto, UserPage};
use crate::validation::FieldViolation;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Aadhaar User Service",
        version = "0.1.0",
        description = "CRUD API for Aadhaar application user records",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::health,
        handlers::create_user,
        handlers::list_users,
        handlers::get_user,
        handlers::delete_user,
    ),
    components(
        schemas(
            HealthResponse,
            CreateUserRequest,
            UserDto,
            UserPage,
            FieldViolation,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health endpoints"),
        (name = "users", description = "Aadhaar user record endpoints")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation
pub fn create_router<D: Database>(state: AppState<D>, body_limit: usize) -> Router {
    let api = ApiDoc::openapi();

    let system_routes = Router::new().route("/health", get(handlers::health));

    // Collection path is served with and without the trailing slash
    let user_routes = routes!(D => {
        post "/aadhaar/users" => handlers::create_user,
        post "/aadhaar/users/" => handlers::create_user,
        get "/aadhaar/users" => handlers::list_users,
        get "/aadhaar/users/" => handlers::list_users,
        get "/aadhaar/users/{id}" => handlers::get_user,
        delete "/aadhaar/users/{id}" => handlers::delete_user,
    });

    system_routes
        .merge(user_routes)
        .merge(Scalar::with_url("/docs", api))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::custom(handlers::panic_response))
}
