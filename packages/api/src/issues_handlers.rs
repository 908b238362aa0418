// ABOUTME: HTTP request handlers for issue operations
// ABOUTME: Board fetch, the drag-and-drop move endpoint, CRUD and per-user listings

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;

use scrumline_board::{BoardMove, Slot};
use scrumline_core::{IssuePriority, IssueStatus};
use scrumline_projects::{issues, DbState, IssueCreateInput, IssueUpdateInput};

use crate::auth::CurrentUser;
use crate::response::{created_or_error, no_content_or_error, ok_or_error};

/// Request body for creating an issue
#[derive(Deserialize)]
pub struct CreateIssueRequest {
    pub title: String,
    pub description: Option<String>,
    pub status: IssueStatus,
    pub priority: Option<IssuePriority>,
    #[serde(rename = "sprintId")]
    pub sprint_id: Option<String>,
    #[serde(rename = "assigneeId")]
    pub assignee_id: Option<String>,
}

/// Create a new issue appended to its board column
pub async fn create_issue(
    State(db): State<DbState>,
    CurrentUser(actor): CurrentUser,
    Path(project_id): Path<String>,
    Json(request): Json<CreateIssueRequest>,
) -> impl IntoResponse {
    info!(
        "Creating issue '{}' for project: {}",
        request.title, project_id
    );

    let input = IssueCreateInput {
        title: request.title,
        description: request.description,
        status: request.status,
        priority: request.priority,
        sprint_id: request.sprint_id,
        assignee_id: request.assignee_id,
    };

    created_or_error(issues::create_issue(&db, &actor, &project_id, input).await)
}

/// Authoritative board fetch for a sprint
pub async fn list_sprint_issues(
    State(db): State<DbState>,
    CurrentUser(actor): CurrentUser,
    Path(sprint_id): Path<String>,
) -> impl IntoResponse {
    ok_or_error(issues::get_issues_for_sprint(&db, &actor, &sprint_id).await)
}

/// One end of a drag gesture on the wire
#[derive(Deserialize)]
pub struct SlotRequest {
    pub status: IssueStatus,
    pub index: usize,
}

/// Request body for a board move; `destination` is absent when the gesture
/// was cancelled
#[derive(Deserialize)]
pub struct MoveIssuesRequest {
    pub source: SlotRequest,
    pub destination: Option<SlotRequest>,
}

/// Apply a drag-and-drop result to the sprint board
pub async fn move_issues(
    State(db): State<DbState>,
    CurrentUser(actor): CurrentUser,
    Path(sprint_id): Path<String>,
    Json(request): Json<MoveIssuesRequest>,
) -> impl IntoResponse {
    info!("Board move in sprint: {}", sprint_id);

    let gesture = BoardMove {
        source: Slot {
            status: request.source.status,
            index: request.source.index,
        },
        destination: request.destination.map(|slot| Slot {
            status: slot.status,
            index: slot.index,
        }),
    };

    ok_or_error(issues::move_issues(&db, &actor, &sprint_id, gesture).await)
}

/// Request body for updating an issue
#[derive(Deserialize)]
pub struct UpdateIssueRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<IssueStatus>,
    pub priority: Option<IssuePriority>,
    #[serde(rename = "assigneeId")]
    pub assignee_id: Option<String>,
}

/// Update an issue's fields from the edit dialog
pub async fn update_issue(
    State(db): State<DbState>,
    CurrentUser(actor): CurrentUser,
    Path(issue_id): Path<String>,
    Json(request): Json<UpdateIssueRequest>,
) -> impl IntoResponse {
    info!("Updating issue: {}", issue_id);

    let input = IssueUpdateInput {
        title: request.title,
        description: request.description,
        status: request.status,
        priority: request.priority,
        assignee_id: request.assignee_id,
    };

    ok_or_error(issues::update_issue(&db, &actor, &issue_id, input).await)
}

/// Delete an issue (reporter or org admin)
pub async fn delete_issue(
    State(db): State<DbState>,
    CurrentUser(actor): CurrentUser,
    Path(issue_id): Path<String>,
) -> impl IntoResponse {
    info!("Deleting issue: {}", issue_id);

    no_content_or_error(issues::delete_issue(&db, &actor, &issue_id).await)
}

/// Issues reported by or assigned to a user within the actor's organization
pub async fn list_user_issues(
    State(db): State<DbState>,
    CurrentUser(actor): CurrentUser,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    ok_or_error(issues::get_user_issues(&db, &actor, &user_id).await)
}
