// ABOUTME: Sprint lifecycle state machine and default-sprint selection
// ABOUTME: Transitions are strictly forward; PLANNED -> ACTIVE -> COMPLETED

use chrono::{DateTime, Utc};
use scrumline_core::{Sprint, SprintStatus};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Cannot start sprint outside of its date range")]
    OutsideDateRange,
    #[error("Only a planned sprint can be started")]
    NotPlanned,
    #[error("Can only complete an active sprint")]
    NotActive,
    #[error("A sprint cannot move back to planned")]
    BackwardTransition,
    #[error("Only planned sprints can be deleted")]
    NotDeletable,
}

/// Validates a requested sprint status change.
///
/// PLANNED -> ACTIVE additionally requires `now` to fall within the sprint's
/// date window; both bounds are inclusive.
pub fn validate_transition(
    sprint: &Sprint,
    target: SprintStatus,
    now: DateTime<Utc>,
) -> Result<(), TransitionError> {
    match target {
        SprintStatus::Planned => Err(TransitionError::BackwardTransition),
        SprintStatus::Active => {
            if sprint.status != SprintStatus::Planned {
                return Err(TransitionError::NotPlanned);
            }
            if now < sprint.start_date || now > sprint.end_date {
                return Err(TransitionError::OutsideDateRange);
            }
            Ok(())
        }
        SprintStatus::Completed => {
            if sprint.status != SprintStatus::Active {
                return Err(TransitionError::NotActive);
            }
            Ok(())
        }
    }
}

/// Validates sprint deletion; only PLANNED sprints may be removed.
pub fn validate_delete(sprint: &Sprint) -> Result<(), TransitionError> {
    if sprint.status == SprintStatus::Planned {
        Ok(())
    } else {
        Err(TransitionError::NotDeletable)
    }
}

/// Picks the sprint a board should show by default: the first ACTIVE sprint,
/// else the first sprint in list order.
pub fn select_default_sprint(sprints: &[Sprint]) -> Option<&Sprint> {
    sprints
        .iter()
        .find(|sprint| sprint.status == SprintStatus::Active)
        .or_else(|| sprints.first())
}
