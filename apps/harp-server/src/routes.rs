//! Route table and handlers — one handler per wire operation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::info;

use harp_proto::{
    DeleteKeyRequest, KeyEntry, ProjectLookup, ProjectSummary, RegisterRequest, WriteKeyRequest,
};

use crate::auth::AuthedUser;
use crate::error::ApiError;
use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/user", post(register_user))
        .route("/projects", get(list_projects))
        .route("/projects/create/{project_name}", put(create_project))
        .route(
            "/projects/{project_id}",
            get(get_project).delete(delete_project),
        )
        .route("/projects/{project_id}/keys", get(list_keys))
        .route(
            "/projects/{project_id}/key",
            put(write_key).delete(delete_key),
        )
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

/// The one unauthenticated write: the transported password is hashed here and
/// only the hash reaches the store.
async fn register_user(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<StatusCode, ApiError> {
    if body.username.is_empty() {
        return Err(ApiError::bad_request("username must not be empty"));
    }
    let hash = harp_crypto::password::hash_password(&body.authorization)?;
    state.store.create_user(&body.username, &hash).await?;
    info!(username = %body.username, "registered user");
    Ok(StatusCode::OK)
}

async fn list_projects(
    State(state): State<AppState>,
    AuthedUser(ctx): AuthedUser,
) -> Result<Json<Vec<ProjectSummary>>, ApiError> {
    let projects = state.store.list_projects(&ctx).await?;
    Ok(Json(
        projects
            .into_iter()
            .map(|p| ProjectSummary {
                id: p.id,
                project_name: p.project_name,
                created_at: p.created_at,
            })
            .collect(),
    ))
}

async fn get_project(
    State(state): State<AppState>,
    AuthedUser(ctx): AuthedUser,
    Path(project_id): Path<i64>,
) -> Result<Json<ProjectLookup>, ApiError> {
    let project = state.store.get_project(&ctx, project_id).await?;
    Ok(Json(ProjectLookup {
        auth: ctx.username().to_string(),
        project: project.map(|p| ProjectSummary {
            id: p.id,
            project_name: p.project_name,
            created_at: p.created_at,
        }),
    }))
}

async fn create_project(
    State(state): State<AppState>,
    AuthedUser(ctx): AuthedUser,
    Path(project_name): Path<String>,
) -> Result<StatusCode, ApiError> {
    if project_name.is_empty() {
        return Err(ApiError::bad_request("project name must not be empty"));
    }
    let project = state.store.create_project(&ctx, &project_name).await?;
    info!(owner = %ctx.username(), project_id = project.id, "created project");
    Ok(StatusCode::OK)
}

async fn delete_project(
    State(state): State<AppState>,
    AuthedUser(ctx): AuthedUser,
    Path(project_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_project(&ctx, project_id).await?;
    info!(owner = %ctx.username(), project_id, "deleted project");
    Ok(StatusCode::OK)
}

async fn list_keys(
    State(state): State<AppState>,
    AuthedUser(ctx): AuthedUser,
    Path(project_id): Path<i64>,
) -> Result<Json<Vec<KeyEntry>>, ApiError> {
    Ok(Json(state.store.list_keys(&ctx, project_id).await?))
}

async fn write_key(
    State(state): State<AppState>,
    AuthedUser(ctx): AuthedUser,
    Path(project_id): Path<i64>,
    Json(body): Json<WriteKeyRequest>,
) -> Result<StatusCode, ApiError> {
    if body.name.is_empty() {
        return Err(ApiError::bad_request("key name must not be empty"));
    }
    state
        .store
        .write_key(&ctx, project_id, &body.name, &body.key)
        .await?;
    Ok(StatusCode::OK)
}

async fn delete_key(
    State(state): State<AppState>,
    AuthedUser(ctx): AuthedUser,
    Path(project_id): Path<i64>,
    Json(body): Json<DeleteKeyRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .delete_key(&ctx, project_id, &body.name)
        .await?;
    Ok(StatusCode::OK)
}
