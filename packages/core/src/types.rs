// ABOUTME: Domain type definitions for projects, sprints, issues and activity logs
// ABOUTME: Row structs, create/update inputs and the TEXT-backed status enums

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Board column an issue currently sits in. Variant order is board
/// display order, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueStatus {
    Todo,
    InProgress,
    InReview,
    Done,
}

impl IssueStatus {
    /// All statuses in board column order.
    pub const ALL: [IssueStatus; 4] = [
        IssueStatus::Todo,
        IssueStatus::InProgress,
        IssueStatus::InReview,
        IssueStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Todo => "TODO",
            IssueStatus::InProgress => "IN_PROGRESS",
            IssueStatus::InReview => "IN_REVIEW",
            IssueStatus::Done => "DONE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssuePriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Default for IssuePriority {
    fn default() -> Self {
        IssuePriority::Medium
    }
}

/// Sprint lifecycle. Transitions are strictly forward:
/// PLANNED -> ACTIVE -> COMPLETED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SprintStatus {
    Planned,
    Active,
    Completed,
}

impl SprintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SprintStatus::Planned => "PLANNED",
            SprintStatus::Active => "ACTIVE",
            SprintStatus::Completed => "COMPLETED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Created,
    Updated,
    Deleted,
    Moved,
    StatusChanged,
    Commented,
}

/// Organization role resolved by the identity gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrgRole {
    Admin,
    Member,
}

impl OrgRole {
    pub fn parse(s: &str) -> Option<Self> {
        // The upstream identity provider sends either the bare role or the
        // "org:" prefixed form.
        match s.trim_start_matches("org:") {
            "admin" => Some(OrgRole::Admin),
            "member" => Some(OrgRole::Member),
            _ => None,
        }
    }
}

/// The calling user as resolved per request by the identity gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: String,
    pub organization_id: String,
    pub role: OrgRole,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == OrgRole::Admin
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Short uppercase token used in sprint naming, e.g. "PRJ".
    pub key: String,
    #[serde(rename = "organizationId")]
    pub organization_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCreateInput {
    pub name: String,
    pub key: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectUpdateInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Sprint {
    pub id: String,
    /// Generated "{projectKey}-{N}" name; N never reused within a project.
    pub name: String,
    #[serde(rename = "startDate")]
    pub start_date: DateTime<Utc>,
    #[serde(rename = "endDate")]
    pub end_date: DateTime<Utc>,
    pub status: SprintStatus,
    #[serde(rename = "projectId")]
    pub project_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SprintCreateInput {
    #[serde(rename = "startDate")]
    pub start_date: DateTime<Utc>,
    #[serde(rename = "endDate")]
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: IssueStatus,
    pub priority: IssuePriority,
    /// Zero-based rank within the (project, status) partition.
    pub position: i64,
    #[serde(rename = "projectId")]
    pub project_id: String,
    #[serde(rename = "sprintId")]
    pub sprint_id: Option<String>,
    #[serde(rename = "reporterId")]
    pub reporter_id: String,
    #[serde(rename = "assigneeId")]
    pub assignee_id: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueCreateInput {
    pub title: String,
    pub description: Option<String>,
    pub status: IssueStatus,
    pub priority: Option<IssuePriority>,
    #[serde(rename = "sprintId")]
    pub sprint_id: Option<String>,
    #[serde(rename = "assigneeId")]
    pub assignee_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueUpdateInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<IssueStatus>,
    pub priority: Option<IssuePriority>,
    #[serde(rename = "assigneeId")]
    pub assignee_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ActivityLog {
    pub id: String,
    pub message: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "issueId")]
    pub issue_id: Option<String>,
    #[serde(rename = "projectId")]
    pub project_id: Option<String>,
    #[serde(rename = "sprintId")]
    pub sprint_id: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// An activity entry waiting to be appended.
#[derive(Debug, Clone)]
pub struct NewActivityLog {
    pub message: String,
    pub activity_type: ActivityType,
    pub user_id: String,
    pub issue_id: Option<String>,
    pub project_id: Option<String>,
    pub sprint_id: Option<String>,
}

impl NewActivityLog {
    pub fn new(activity_type: ActivityType, message: impl Into<String>, user_id: &str) -> Self {
        Self {
            message: message.into(),
            activity_type,
            user_id: user_id.to_string(),
            issue_id: None,
            project_id: None,
            sprint_id: None,
        }
    }

    pub fn issue(mut self, issue_id: &str) -> Self {
        self.issue_id = Some(issue_id.to_string());
        self
    }

    pub fn project(mut self, project_id: &str) -> Self {
        self.project_id = Some(project_id.to_string());
        self
    }

    pub fn sprint(mut self, sprint_id: Option<&str>) -> Self {
        self.sprint_id = sprint_id.map(|s| s.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_status_round_trips_through_serde() {
        let json = serde_json::to_string(&IssueStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
        let back: IssueStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, IssueStatus::InProgress);
    }

    #[test]
    fn org_role_parses_prefixed_and_bare_forms() {
        assert_eq!(OrgRole::parse("org:admin"), Some(OrgRole::Admin));
        assert_eq!(OrgRole::parse("admin"), Some(OrgRole::Admin));
        assert_eq!(OrgRole::parse("member"), Some(OrgRole::Member));
        assert_eq!(OrgRole::parse("owner"), None);
    }

    #[test]
    fn new_activity_log_builder_sets_references() {
        let entry = NewActivityLog::new(ActivityType::Moved, "Moved issue \"x\"", "u1")
            .issue("i1")
            .project("p1")
            .sprint(Some("s1"));
        assert_eq!(entry.issue_id.as_deref(), Some("i1"));
        assert_eq!(entry.project_id.as_deref(), Some("p1"));
        assert_eq!(entry.sprint_id.as_deref(), Some("s1"));
    }
}
