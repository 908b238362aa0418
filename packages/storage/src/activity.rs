// ABOUTME: Activity log storage layer using SQLite
// ABOUTME: Append-only; no update or delete path exists by design

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use scrumline_core::{generate_id, ActivityLog, NewActivityLog};

use crate::StorageResult;

pub struct ActivityLogStorage {
    pool: SqlitePool,
}

impl ActivityLogStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn append(&self, entry: NewActivityLog) -> StorageResult<ActivityLog> {
        let log_id = generate_id();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO activity_logs (id, message, type, user_id, issue_id, project_id, sprint_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&log_id)
        .bind(&entry.message)
        .bind(entry.activity_type)
        .bind(&entry.user_id)
        .bind(&entry.issue_id)
        .bind(&entry.project_id)
        .bind(&entry.sprint_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let log = sqlx::query_as::<_, ActivityLog>("SELECT * FROM activity_logs WHERE id = ?")
            .bind(&log_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(log)
    }

    /// Activity for one organization, newest first. Scoping goes through the
    /// referenced project, so entries whose project has since been deleted
    /// fall out of the listing while remaining on record.
    pub async fn list_for_org(
        &self,
        organization_id: &str,
        limit: i64,
        offset: i64,
    ) -> StorageResult<(Vec<ActivityLog>, i64)> {
        debug!(
            "Fetching activity for organization: {} (limit: {}, offset: {})",
            organization_id, limit, offset
        );

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM activity_logs a
            JOIN projects p ON a.project_id = p.id
            WHERE p.organization_id = ?
            "#,
        )
        .bind(organization_id)
        .fetch_one(&self.pool)
        .await?;

        let logs = sqlx::query_as::<_, ActivityLog>(
            r#"
            SELECT a.*
            FROM activity_logs a
            JOIN projects p ON a.project_id = p.id
            WHERE p.organization_id = ?
            ORDER BY a.created_at DESC, a.id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(organization_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((logs, count))
    }
}
