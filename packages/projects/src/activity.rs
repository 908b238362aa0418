// ABOUTME: Best-effort activity recording
// ABOUTME: Appends run after the primary mutation commits and never fail it

use std::sync::Arc;

use tracing::warn;

use scrumline_core::{can_perform, Action, ActivityLog, Actor, NewActivityLog};
use scrumline_storage::ActivityLogStorage;

use crate::error::{DomainError, DomainResult};
use crate::{DbState, PaginatedResponse, PaginationParams};

/// Fire-and-forget recorder for the audit trail.
///
/// The single logging policy of the whole service layer: entries are
/// appended after the primary mutation has committed, from a spawned task,
/// and a failed append is logged and swallowed.
#[derive(Clone)]
pub struct ActivityRecorder {
    storage: Arc<ActivityLogStorage>,
}

impl ActivityRecorder {
    pub fn new(storage: Arc<ActivityLogStorage>) -> Self {
        Self { storage }
    }

    /// Spawns the append and returns immediately.
    pub fn record(&self, entry: NewActivityLog) {
        let storage = self.storage.clone();
        tokio::spawn(async move {
            if let Err(err) = storage.append(entry).await {
                warn!("Failed to append activity log entry: {}", err);
            }
        });
    }
}

/// Org-scoped activity trail, newest first.
pub async fn get_activity_logs(
    db: &DbState,
    actor: &Actor,
    params: &PaginationParams,
) -> DomainResult<PaginatedResponse<ActivityLog>> {
    if !can_perform(actor, Action::ViewActivity) {
        return Err(DomainError::Authorization(
            "Not allowed to view activity".to_string(),
        ));
    }
    let (logs, total) = db
        .activity_storage
        .list_for_org(&actor.organization_id, params.limit(), params.offset())
        .await?;
    Ok(PaginatedResponse::new(logs, params, total))
}
