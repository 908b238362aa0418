// ABOUTME: HTTP request handlers for project operations
// ABOUTME: Thin layer: extract identity, map the request body, call the service

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;

use scrumline_projects::{projects, DbState, ProjectCreateInput, ProjectUpdateInput};

use crate::auth::CurrentUser;
use crate::response::{created_or_error, no_content_or_error, ok_or_error};

/// List the organization's projects
pub async fn list_projects(
    State(db): State<DbState>,
    CurrentUser(actor): CurrentUser,
) -> impl IntoResponse {
    ok_or_error(projects::list_projects(&db, &actor).await)
}

/// Get a single project by ID
pub async fn get_project(
    State(db): State<DbState>,
    CurrentUser(actor): CurrentUser,
    Path(project_id): Path<String>,
) -> impl IntoResponse {
    ok_or_error(projects::get_project(&db, &actor, &project_id).await)
}

/// Request body for creating a project
#[derive(Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub key: String,
    pub description: Option<String>,
}

/// Create a new project (org admins only)
pub async fn create_project(
    State(db): State<DbState>,
    CurrentUser(actor): CurrentUser,
    Json(request): Json<CreateProjectRequest>,
) -> impl IntoResponse {
    info!("Creating project '{}' ({})", request.name, request.key);

    let input = ProjectCreateInput {
        name: request.name,
        key: request.key,
        description: request.description,
    };

    created_or_error(projects::create_project(&db, &actor, input).await)
}

/// Request body for updating a project
#[derive(Deserialize)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Update a project's name/description (org admins only)
pub async fn update_project(
    State(db): State<DbState>,
    CurrentUser(actor): CurrentUser,
    Path(project_id): Path<String>,
    Json(request): Json<UpdateProjectRequest>,
) -> impl IntoResponse {
    info!("Updating project: {}", project_id);

    let input = ProjectUpdateInput {
        name: request.name,
        description: request.description,
    };

    ok_or_error(projects::update_project(&db, &actor, &project_id, input).await)
}

/// Delete a project (org admins only)
pub async fn delete_project(
    State(db): State<DbState>,
    CurrentUser(actor): CurrentUser,
    Path(project_id): Path<String>,
) -> impl IntoResponse {
    info!("Deleting project: {}", project_id);

    no_content_or_error(projects::delete_project(&db, &actor, &project_id).await)
}
