// ABOUTME: Database connection management and storage initialization
// ABOUTME: Provides shared access to the SQLite pool and storage layers

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

use scrumline_storage::{
    ActivityLogStorage, IssueStorage, ProjectStorage, SprintStorage, StorageError,
};

use crate::activity::ActivityRecorder;

/// Shared database state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub project_storage: Arc<ProjectStorage>,
    pub sprint_storage: Arc<SprintStorage>,
    pub issue_storage: Arc<IssueStorage>,
    pub activity_storage: Arc<ActivityLogStorage>,
    pub recorder: ActivityRecorder,
}

impl DbState {
    /// Create new database state from a SQLite pool
    pub fn new(pool: SqlitePool) -> Self {
        let activity_storage = Arc::new(ActivityLogStorage::new(pool.clone()));
        Self {
            project_storage: Arc::new(ProjectStorage::new(pool.clone())),
            sprint_storage: Arc::new(SprintStorage::new(pool.clone())),
            issue_storage: Arc::new(IssueStorage::new(pool.clone())),
            recorder: ActivityRecorder::new(activity_storage.clone()),
            activity_storage,
            pool,
        }
    }

    /// Initialize database state from a database file path, applying
    /// connection settings and migrations.
    pub async fn init_with_path(database_path: &std::path::Path) -> Result<Self, StorageError> {
        // Ensure parent directory exists
        if let Some(parent) = database_path.parent() {
            std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }

        debug!("Connecting to database: {}", database_path.display());

        // Options apply per connection, so foreign keys stay enforced on
        // every pooled connection.
        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        info!("Database connection established");

        // Run migrations
        sqlx::migrate!("../storage/migrations").run(&pool).await?;

        debug!("Database migrations completed");

        Ok(Self::new(pool))
    }

    /// In-memory state for tests. A single connection keeps the database
    /// alive and visible to every query.
    pub async fn init_in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(":memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        sqlx::migrate!("../storage/migrations").run(&pool).await?;
        Ok(Self::new(pool))
    }
}
