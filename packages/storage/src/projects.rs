// ABOUTME: Project storage layer using SQLite
// ABOUTME: Org-scoped CRUD; project keys are unique per organization

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use scrumline_core::{generate_id, Project, ProjectCreateInput, ProjectUpdateInput};

use crate::{StorageError, StorageResult};

pub struct ProjectStorage {
    pool: SqlitePool,
}

impl ProjectStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Projects of one organization, newest first.
    pub async fn list_for_org(&self, organization_id: &str) -> StorageResult<Vec<Project>> {
        debug!("Fetching projects for organization: {}", organization_id);

        let projects = sqlx::query_as::<_, Project>(
            "SELECT * FROM projects WHERE organization_id = ? ORDER BY created_at DESC",
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    pub async fn get_project(&self, project_id: &str) -> StorageResult<Project> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = ?")
            .bind(project_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn create_project(
        &self,
        organization_id: &str,
        input: ProjectCreateInput,
    ) -> StorageResult<Project> {
        let project_id = generate_id();
        let now = Utc::now();

        debug!(
            "Creating project: {} ({}) for organization: {}",
            input.name, input.key, organization_id
        );

        sqlx::query(
            r#"
            INSERT INTO projects (id, name, description, key, organization_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&project_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.key)
        .bind(organization_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            if StorageError::is_unique_violation(&err) {
                StorageError::DuplicateName(input.key.clone())
            } else {
                StorageError::Sqlx(err)
            }
        })?;

        self.get_project(&project_id).await
    }

    pub async fn update_project(
        &self,
        project_id: &str,
        input: ProjectUpdateInput,
    ) -> StorageResult<Project> {
        debug!("Updating project: {}", project_id);

        let mut query = String::from("UPDATE projects SET updated_at = ?");
        if input.name.is_some() {
            query.push_str(", name = ?");
        }
        if input.description.is_some() {
            query.push_str(", description = ?");
        }
        query.push_str(" WHERE id = ?");

        let mut q = sqlx::query(&query).bind(Utc::now());
        if let Some(name) = &input.name {
            q = q.bind(name);
        }
        if let Some(description) = &input.description {
            q = q.bind(description);
        }

        let result = q.bind(project_id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.get_project(project_id).await
    }

    pub async fn delete_project(&self, project_id: &str) -> StorageResult<()> {
        debug!("Deleting project: {}", project_id);

        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(project_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
