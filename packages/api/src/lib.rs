// ABOUTME: HTTP API layer for Scrumline providing REST endpoints and routing
// ABOUTME: Integration layer over the service crate; handlers stay thin

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use scrumline_projects::DbState;

pub mod activity_handlers;
pub mod auth;
pub mod issues_handlers;
pub mod projects_handlers;
pub mod response;
pub mod sprints_handlers;

/// Creates the projects API router (nested under /api/projects)
pub fn create_projects_router() -> Router<DbState> {
    Router::new()
        .route("/", get(projects_handlers::list_projects))
        .route("/", post(projects_handlers::create_project))
        .route("/{project_id}", get(projects_handlers::get_project))
        .route("/{project_id}", put(projects_handlers::update_project))
        .route("/{project_id}", delete(projects_handlers::delete_project))
        .route("/{project_id}/sprints", get(sprints_handlers::list_sprints))
        .route("/{project_id}/sprints", post(sprints_handlers::create_sprint))
        .route(
            "/{project_id}/sprints/default",
            get(sprints_handlers::get_default_sprint),
        )
        .route("/{project_id}/issues", post(issues_handlers::create_issue))
}

/// Creates the sprints API router (nested under /api/sprints)
pub fn create_sprints_router() -> Router<DbState> {
    Router::new()
        .route("/{sprint_id}", get(sprints_handlers::get_sprint))
        .route("/{sprint_id}", delete(sprints_handlers::delete_sprint))
        .route("/{sprint_id}/status", post(sprints_handlers::update_sprint_status))
        .route("/{sprint_id}/issues", get(issues_handlers::list_sprint_issues))
        .route("/{sprint_id}/board/move", post(issues_handlers::move_issues))
}

/// Creates the issues API router (nested under /api/issues)
pub fn create_issues_router() -> Router<DbState> {
    Router::new()
        .route("/{issue_id}", put(issues_handlers::update_issue))
        .route("/{issue_id}", delete(issues_handlers::delete_issue))
}

/// Creates the users API router (nested under /api/users)
pub fn create_users_router() -> Router<DbState> {
    Router::new().route("/{user_id}/issues", get(issues_handlers::list_user_issues))
}

/// Creates the activity API router (nested under /api/activity)
pub fn create_activity_router() -> Router<DbState> {
    Router::new().route("/", get(activity_handlers::list_activity))
}

/// The complete /api router.
pub fn create_api_router() -> Router<DbState> {
    Router::new()
        .nest("/api/projects", create_projects_router())
        .nest("/api/sprints", create_sprints_router())
        .nest("/api/issues", create_issues_router())
        .nest("/api/users", create_users_router())
        .nest("/api/activity", create_activity_router())
}
