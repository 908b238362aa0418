// ABOUTME: Issue storage layer using SQLite
// ABOUTME: Handles issue CRUD, partition position assignment and the transactional board batch update

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use scrumline_board::next_position;
use scrumline_core::{generate_id, Issue, IssueCreateInput, IssueUpdateInput};

use crate::{StorageError, StorageResult};

/// Board display order: column order first, then rank within the column.
const BOARD_ORDER: &str = r#"
    CASE status
        WHEN 'TODO' THEN 0
        WHEN 'IN_PROGRESS' THEN 1
        WHEN 'IN_REVIEW' THEN 2
        WHEN 'DONE' THEN 3
    END,
    position
"#;

pub struct IssueStorage {
    pool: SqlitePool,
}

impl IssueStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Authoritative board fetch for one sprint.
    pub async fn list_for_sprint(&self, sprint_id: &str) -> StorageResult<Vec<Issue>> {
        debug!("Fetching issues for sprint: {}", sprint_id);

        let issues = sqlx::query_as::<_, Issue>(&format!(
            "SELECT * FROM issues WHERE sprint_id = ? ORDER BY {BOARD_ORDER}"
        ))
        .bind(sprint_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(issues)
    }

    /// Issues reported by or assigned to a user within one organization,
    /// most recently updated first.
    pub async fn list_for_user(
        &self,
        user_id: &str,
        organization_id: &str,
    ) -> StorageResult<Vec<Issue>> {
        debug!("Fetching issues for user: {}", user_id);

        let issues = sqlx::query_as::<_, Issue>(
            r#"
            SELECT i.*
            FROM issues i
            JOIN projects p ON i.project_id = p.id
            WHERE (i.assignee_id = ? OR i.reporter_id = ?)
            AND p.organization_id = ?
            ORDER BY i.updated_at DESC
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(issues)
    }

    pub async fn get_issue(&self, issue_id: &str) -> StorageResult<Issue> {
        sqlx::query_as::<_, Issue>("SELECT * FROM issues WHERE id = ?")
            .bind(issue_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Creates an issue appended to the end of its (project, status)
    /// partition. Existing siblings are never renumbered here.
    pub async fn create_issue(
        &self,
        project_id: &str,
        reporter_id: &str,
        input: IssueCreateInput,
    ) -> StorageResult<Issue> {
        let issue_id = generate_id();
        let now = Utc::now();
        let priority = input.priority.unwrap_or_default();

        debug!("Creating issue: {} for project: {}", issue_id, project_id);

        let positions: Vec<i64> = sqlx::query_scalar(
            "SELECT position FROM issues WHERE project_id = ? AND status = ?",
        )
        .bind(project_id)
        .bind(input.status)
        .fetch_all(&self.pool)
        .await?;

        let position = next_position(positions);

        sqlx::query(
            r#"
            INSERT INTO issues (
                id, title, description, status, priority, position,
                project_id, sprint_id, reporter_id, assignee_id,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&issue_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.status)
        .bind(priority)
        .bind(position)
        .bind(project_id)
        .bind(&input.sprint_id)
        .bind(reporter_id)
        .bind(&input.assignee_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.get_issue(&issue_id).await
    }

    /// Field edits from the issue dialog. Does not renumber partitions;
    /// positions of existing issues belong to the board reducer alone.
    pub async fn update_issue(
        &self,
        issue_id: &str,
        input: IssueUpdateInput,
    ) -> StorageResult<Issue> {
        debug!("Updating issue: {}", issue_id);

        // Build dynamic UPDATE query based on provided fields
        let mut query = String::from("UPDATE issues SET updated_at = ?");
        if input.title.is_some() {
            query.push_str(", title = ?");
        }
        if input.description.is_some() {
            query.push_str(", description = ?");
        }
        if input.status.is_some() {
            query.push_str(", status = ?");
        }
        if input.priority.is_some() {
            query.push_str(", priority = ?");
        }
        if input.assignee_id.is_some() {
            query.push_str(", assignee_id = ?");
        }
        query.push_str(" WHERE id = ?");

        let mut q = sqlx::query(&query).bind(Utc::now());
        if let Some(title) = &input.title {
            q = q.bind(title);
        }
        if let Some(description) = &input.description {
            q = q.bind(description);
        }
        if let Some(status) = input.status {
            q = q.bind(status);
        }
        if let Some(priority) = input.priority {
            q = q.bind(priority);
        }
        if let Some(assignee_id) = &input.assignee_id {
            q = q.bind(assignee_id);
        }

        let result = q.bind(issue_id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.get_issue(issue_id).await
    }

    pub async fn delete_issue(&self, issue_id: &str) -> StorageResult<()> {
        debug!("Deleting issue: {}", issue_id);

        let result = sqlx::query("DELETE FROM issues WHERE id = ?")
            .bind(issue_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    /// Persists the touched set of a board move as one all-or-nothing
    /// transaction. A row that no longer exists aborts the whole batch so
    /// the stored ranking can never end up half-updated.
    pub async fn update_board_positions(&self, touched: &[Issue]) -> StorageResult<()> {
        if touched.is_empty() {
            return Ok(());
        }

        debug!("Persisting board move touching {} issues", touched.len());

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        for issue in touched {
            let result = sqlx::query(
                "UPDATE issues SET status = ?, position = ?, updated_at = ? WHERE id = ?",
            )
            .bind(issue.status)
            .bind(issue.position)
            .bind(now)
            .bind(&issue.id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                tx.rollback().await?;
                return Err(StorageError::NotFound);
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
