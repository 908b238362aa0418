// ABOUTME: Sprint storage layer using SQLite
// ABOUTME: Creation relies on UNIQUE(project_id, name) to catch concurrent name derivation

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use scrumline_core::{generate_id, Sprint, SprintStatus};

use crate::{StorageError, StorageResult};

pub struct SprintStorage {
    pool: SqlitePool,
}

impl SprintStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Sprints of a project, newest first.
    pub async fn list_for_project(&self, project_id: &str) -> StorageResult<Vec<Sprint>> {
        debug!("Fetching sprints for project: {}", project_id);

        let sprints = sqlx::query_as::<_, Sprint>(
            "SELECT * FROM sprints WHERE project_id = ? ORDER BY created_at DESC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sprints)
    }

    /// Sibling names within a project; input to sprint name derivation.
    pub async fn list_names_for_project(&self, project_id: &str) -> StorageResult<Vec<String>> {
        let names = sqlx::query_scalar("SELECT name FROM sprints WHERE project_id = ?")
            .bind(project_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(names)
    }

    pub async fn get_sprint(&self, sprint_id: &str) -> StorageResult<Sprint> {
        sqlx::query_as::<_, Sprint>("SELECT * FROM sprints WHERE id = ?")
            .bind(sprint_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Creates a PLANNED sprint. A `UNIQUE(project_id, name)` violation is
    /// surfaced as [`StorageError::DuplicateName`] so callers can retry with
    /// a freshly derived name.
    pub async fn create_sprint(
        &self,
        project_id: &str,
        name: &str,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> StorageResult<Sprint> {
        let sprint_id = generate_id();
        let now = Utc::now();

        debug!("Creating sprint: {} for project: {}", name, project_id);

        sqlx::query(
            r#"
            INSERT INTO sprints (id, name, start_date, end_date, status, project_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&sprint_id)
        .bind(name)
        .bind(start_date)
        .bind(end_date)
        .bind(SprintStatus::Planned)
        .bind(project_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            if StorageError::is_unique_violation(&err) {
                StorageError::DuplicateName(name.to_string())
            } else {
                StorageError::Sqlx(err)
            }
        })?;

        self.get_sprint(&sprint_id).await
    }

    pub async fn update_status(
        &self,
        sprint_id: &str,
        status: SprintStatus,
    ) -> StorageResult<Sprint> {
        debug!("Updating sprint {} status to {}", sprint_id, status.as_str());

        let result = sqlx::query("UPDATE sprints SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(Utc::now())
            .bind(sprint_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.get_sprint(sprint_id).await
    }

    pub async fn delete_sprint(&self, sprint_id: &str) -> StorageResult<()> {
        debug!("Deleting sprint: {}", sprint_id);

        let result = sqlx::query("DELETE FROM sprints WHERE id = ?")
            .bind(sprint_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
