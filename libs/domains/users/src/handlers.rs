use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{CreateGroup, CreateUser, Group, Membership, UserResponse};
use crate::repository::{GroupRepository, UserRepository};
use crate::service::UserService;

/// OpenAPI documentation for the users and groups endpoints
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, list_groups, create_group),
    components(
        schemas(UserResponse, Membership, Group, CreateUser, CreateGroup),
        responses(BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "users", description = "Users and their group memberships"),
        (name = "groups", description = "Groups users can belong to")
    )
)]
pub struct ApiDoc;

/// `/users` and `/groups` routes. Nest under `/api`.
pub fn router<R>(service: UserService<R>) -> Router
where
    R: UserRepository + GroupRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/users", get(list_users::<R>).post(create_user::<R>))
        .route("/groups", get(list_groups::<R>).post(create_group::<R>))
        .with_state(shared_service)
}

/// List users with their group memberships
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "Users, oldest first", body = Vec<UserResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository + GroupRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<UserResponse>>> {
    Ok(Json(service.list_users().await?))
}

/// Create a user and assign it to groups
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository + GroupRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// List groups ordered by name
#[utoipa::path(
    get,
    path = "/api/groups",
    tag = "groups",
    responses(
        (status = 200, description = "Groups ordered by name", body = Vec<Group>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_groups<R: UserRepository + GroupRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<Group>>> {
    Ok(Json(service.list_groups().await?))
}

/// Create a group
#[utoipa::path(
    post,
    path = "/api/groups",
    tag = "groups",
    request_body = CreateGroup,
    responses(
        (status = 201, description = "Group created", body = Group),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_group<R: UserRepository + GroupRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateGroup>,
) -> UserResult<impl IntoResponse> {
    let group = service.create_group(input).await?;
    Ok((StatusCode::CREATED, Json(group)))
}
