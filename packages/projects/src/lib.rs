//! # Scrumline Projects
//!
//! The service layer tying the board engine to persistence: authorization,
//! input validation, storage orchestration and best-effort activity
//! recording for every mutating operation.

pub mod activity;
pub mod db;
pub mod error;
pub mod issues;
pub mod pagination;
pub mod projects;
pub mod sprints;

// Re-export database state
pub use db::DbState;

// Re-export error types
pub use error::{DomainError, DomainResult};

// Re-export the activity recorder
pub use activity::ActivityRecorder;

// Re-export pagination types
pub use pagination::{PaginatedResponse, PaginationMeta, PaginationParams};

// Re-export the core domain model for consumers of this crate
pub use scrumline_core::{
    ActivityLog, ActivityType, Actor, Issue, IssueCreateInput, IssuePriority, IssueStatus,
    IssueUpdateInput, OrgRole, Project, ProjectCreateInput, ProjectUpdateInput, Sprint,
    SprintCreateInput, SprintStatus,
};

// Re-export the board gesture types used by the move operation
pub use scrumline_board::{BoardMove, Slot};
