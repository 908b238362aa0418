// ABOUTME: Sprint operations: creation with derived names, lifecycle transitions, deletion
// ABOUTME: Transition guards live in scrumline-board; this module sequences storage and logging

use chrono::Utc;
use tracing::info;

use scrumline_board::{next_sprint_name, select_default_sprint, validate_delete, validate_transition};
use scrumline_core::{
    can_perform, validate_sprint_dates, Action, ActivityType, Actor, NewActivityLog, Sprint,
    SprintCreateInput, SprintStatus,
};
use scrumline_storage::StorageError;

use crate::error::{ensure_org_access, ensure_valid, entity_lookup, DomainError, DomainResult};
use crate::projects::load_scoped_project;
use crate::DbState;

/// Loads a sprint together with its project and verifies organization
/// access. Admins bypass the scope check for lifecycle operations, matching
/// the gateway's role semantics.
async fn load_scoped_sprint(
    db: &DbState,
    actor: &Actor,
    sprint_id: &str,
    admin_bypasses_scope: bool,
) -> DomainResult<Sprint> {
    let sprint = db
        .sprint_storage
        .get_sprint(sprint_id)
        .await
        .map_err(|e| entity_lookup(e, "Sprint"))?;
    let project = db
        .project_storage
        .get_project(&sprint.project_id)
        .await
        .map_err(|e| entity_lookup(e, "Project"))?;

    if !(admin_bypasses_scope && actor.is_admin()) {
        ensure_org_access(actor, &project.organization_id)?;
    }
    Ok(sprint)
}

pub async fn create_sprint(
    db: &DbState,
    actor: &Actor,
    project_id: &str,
    input: SprintCreateInput,
) -> DomainResult<Sprint> {
    if !can_perform(actor, Action::CreateSprint) {
        return Err(DomainError::Authorization(
            "Not allowed to create sprints".to_string(),
        ));
    }
    let project = load_scoped_project(db, actor, project_id).await?;
    ensure_valid(validate_sprint_dates(input.start_date, input.end_date))?;

    let names = db.sprint_storage.list_names_for_project(project_id).await?;
    let name = next_sprint_name(&project.key, names.iter().map(String::as_str));

    let sprint = db
        .sprint_storage
        .create_sprint(project_id, &name, input.start_date, input.end_date)
        .await
        .map_err(|err| match err {
            // A concurrent create derived the same number; the caller can retry.
            StorageError::DuplicateName(name) => DomainError::Conflict(format!("Sprint {name}")),
            other => other.into(),
        })?;

    info!("Created sprint {} for project {}", sprint.name, project_id);
    db.recorder.record(
        NewActivityLog::new(
            ActivityType::Created,
            format!("Created sprint \"{}\"", sprint.name),
            &actor.user_id,
        )
        .project(project_id)
        .sprint(Some(&sprint.id)),
    );

    Ok(sprint)
}

pub async fn list_sprints(
    db: &DbState,
    actor: &Actor,
    project_id: &str,
) -> DomainResult<Vec<Sprint>> {
    load_scoped_project(db, actor, project_id).await?;
    Ok(db.sprint_storage.list_for_project(project_id).await?)
}

pub async fn get_sprint(db: &DbState, actor: &Actor, sprint_id: &str) -> DomainResult<Sprint> {
    load_scoped_sprint(db, actor, sprint_id, false).await
}

/// The sprint a board opens on: the first ACTIVE one, else the newest.
pub async fn get_default_sprint(
    db: &DbState,
    actor: &Actor,
    project_id: &str,
) -> DomainResult<Option<Sprint>> {
    let sprints = list_sprints(db, actor, project_id).await?;
    Ok(select_default_sprint(&sprints).cloned())
}

pub async fn update_sprint_status(
    db: &DbState,
    actor: &Actor,
    sprint_id: &str,
    target: SprintStatus,
) -> DomainResult<Sprint> {
    if !can_perform(actor, Action::TransitionSprint) {
        return Err(DomainError::Authorization(
            "Not allowed to update sprints".to_string(),
        ));
    }
    let sprint = load_scoped_sprint(db, actor, sprint_id, true).await?;

    validate_transition(&sprint, target, Utc::now())
        .map_err(|err| DomainError::StateTransition(err.to_string()))?;

    let updated = db.sprint_storage.update_status(sprint_id, target).await?;

    info!("Sprint {} is now {}", updated.name, target.as_str());
    db.recorder.record(
        NewActivityLog::new(
            ActivityType::StatusChanged,
            format!("Sprint \"{}\" is now {}", updated.name, target.as_str()),
            &actor.user_id,
        )
        .project(&updated.project_id)
        .sprint(Some(&updated.id)),
    );

    Ok(updated)
}

pub async fn delete_sprint(db: &DbState, actor: &Actor, sprint_id: &str) -> DomainResult<()> {
    if !can_perform(actor, Action::DeleteSprint) {
        return Err(DomainError::Authorization(
            "Not allowed to delete sprints".to_string(),
        ));
    }
    let sprint = load_scoped_sprint(db, actor, sprint_id, true).await?;

    validate_delete(&sprint).map_err(|err| DomainError::StateTransition(err.to_string()))?;

    db.sprint_storage.delete_sprint(sprint_id).await?;

    info!("Deleted sprint {}", sprint.name);
    db.recorder.record(
        NewActivityLog::new(
            ActivityType::Deleted,
            format!("Deleted sprint \"{}\"", sprint.name),
            &actor.user_id,
        )
        .project(&sprint.project_id)
        .sprint(Some(&sprint.id)),
    );

    Ok(())
}
