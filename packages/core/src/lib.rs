//! # Scrumline Core
//!
//! Foundational package providing the domain model shared across all
//! Scrumline packages: projects, sprints, issues, activity logs, the
//! actor/role model, field validation and policy evaluation.

pub mod policy;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export main types
pub use types::{
    ActivityLog, ActivityType, Actor, Issue, IssueCreateInput, IssuePriority, IssueStatus,
    IssueUpdateInput, NewActivityLog, OrgRole, Project, ProjectCreateInput, ProjectUpdateInput,
    Sprint, SprintCreateInput, SprintStatus,
};

// Re-export policy evaluation
pub use policy::{can_perform, Action};

// Re-export utilities
pub use utils::generate_id;

// Re-export validation
pub use validation::{
    validate_issue_create, validate_project_data, validate_project_update, validate_sprint_dates,
    ValidationError,
};
