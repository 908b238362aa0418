// ABOUTME: HTTP request handlers for the activity trail
// ABOUTME: Paginated, org-scoped, newest first

use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use tracing::info;

use scrumline_projects::{activity, DbState, PaginationParams};

use crate::auth::CurrentUser;
use crate::response::ok_or_error;

/// List the organization's activity trail
pub async fn list_activity(
    State(db): State<DbState>,
    CurrentUser(actor): CurrentUser,
    Query(pagination): Query<PaginationParams>,
) -> impl IntoResponse {
    info!(
        "Listing activity for organization: {} (page: {})",
        actor.organization_id,
        pagination.page()
    );

    ok_or_error(activity::get_activity_logs(&db, &actor, &pagination).await)
}
