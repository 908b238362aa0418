// ABOUTME: HTTP request handlers for sprint operations
// ABOUTME: Creation, lifecycle transitions, deletion and default-sprint selection

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use scrumline_projects::{sprints, DbState, SprintCreateInput, SprintStatus};

use crate::auth::CurrentUser;
use crate::response::{created_or_error, no_content_or_error, ok_or_error};

/// List a project's sprints, newest first
pub async fn list_sprints(
    State(db): State<DbState>,
    CurrentUser(actor): CurrentUser,
    Path(project_id): Path<String>,
) -> impl IntoResponse {
    ok_or_error(sprints::list_sprints(&db, &actor, &project_id).await)
}

/// The sprint a board should open on: first ACTIVE, else newest
pub async fn get_default_sprint(
    State(db): State<DbState>,
    CurrentUser(actor): CurrentUser,
    Path(project_id): Path<String>,
) -> impl IntoResponse {
    ok_or_error(sprints::get_default_sprint(&db, &actor, &project_id).await)
}

/// Get a single sprint by ID
pub async fn get_sprint(
    State(db): State<DbState>,
    CurrentUser(actor): CurrentUser,
    Path(sprint_id): Path<String>,
) -> impl IntoResponse {
    ok_or_error(sprints::get_sprint(&db, &actor, &sprint_id).await)
}

/// Request body for creating a sprint
#[derive(Deserialize)]
pub struct CreateSprintRequest {
    #[serde(rename = "startDate")]
    pub start_date: DateTime<Utc>,
    #[serde(rename = "endDate")]
    pub end_date: DateTime<Utc>,
}

/// Create a new sprint; its name is derived from the project key
pub async fn create_sprint(
    State(db): State<DbState>,
    CurrentUser(actor): CurrentUser,
    Path(project_id): Path<String>,
    Json(request): Json<CreateSprintRequest>,
) -> impl IntoResponse {
    info!("Creating sprint for project: {}", project_id);

    let input = SprintCreateInput {
        start_date: request.start_date,
        end_date: request.end_date,
    };

    created_or_error(sprints::create_sprint(&db, &actor, &project_id, input).await)
}

/// Request body for a sprint status transition
#[derive(Deserialize)]
pub struct UpdateSprintStatusRequest {
    pub status: SprintStatus,
}

/// Transition a sprint (PLANNED -> ACTIVE -> COMPLETED)
pub async fn update_sprint_status(
    State(db): State<DbState>,
    CurrentUser(actor): CurrentUser,
    Path(sprint_id): Path<String>,
    Json(request): Json<UpdateSprintStatusRequest>,
) -> impl IntoResponse {
    info!(
        "Updating sprint {} status to {}",
        sprint_id,
        request.status.as_str()
    );

    ok_or_error(sprints::update_sprint_status(&db, &actor, &sprint_id, request.status).await)
}

/// Delete a sprint (PLANNED only)
pub async fn delete_sprint(
    State(db): State<DbState>,
    CurrentUser(actor): CurrentUser,
    Path(sprint_id): Path<String>,
) -> impl IntoResponse {
    info!("Deleting sprint: {}", sprint_id);

    no_content_or_error(sprints::delete_sprint(&db, &actor, &sprint_id).await)
}
