// ABOUTME: Project operations: org-scoped CRUD with admin-gated mutations
// ABOUTME: Every successful mutation leaves an activity trail entry

use tracing::info;

use scrumline_core::{
    can_perform, validate_project_data, validate_project_update, Action, ActivityType, Actor,
    NewActivityLog, Project, ProjectCreateInput, ProjectUpdateInput,
};
use scrumline_storage::StorageError;

use crate::error::{ensure_org_access, ensure_valid, entity_lookup, DomainError, DomainResult};
use crate::DbState;

/// Loads a project and verifies it belongs to the actor's organization.
pub(crate) async fn load_scoped_project(
    db: &DbState,
    actor: &Actor,
    project_id: &str,
) -> DomainResult<Project> {
    let project = db
        .project_storage
        .get_project(project_id)
        .await
        .map_err(|e| entity_lookup(e, "Project"))?;
    ensure_org_access(actor, &project.organization_id)?;
    Ok(project)
}

pub async fn create_project(
    db: &DbState,
    actor: &Actor,
    input: ProjectCreateInput,
) -> DomainResult<Project> {
    if !can_perform(actor, Action::CreateProject) {
        return Err(DomainError::Authorization(
            "Only organization admins can create projects".to_string(),
        ));
    }
    ensure_valid(validate_project_data(&input))?;

    let project = db
        .project_storage
        .create_project(&actor.organization_id, input)
        .await
        .map_err(|err| match err {
            StorageError::DuplicateName(key) => DomainError::Conflict(format!("Project key {key}")),
            other => other.into(),
        })?;

    info!("Created project {} ({})", project.name, project.id);
    db.recorder.record(
        NewActivityLog::new(
            ActivityType::Created,
            format!("Created project \"{}\"", project.name),
            &actor.user_id,
        )
        .project(&project.id),
    );

    Ok(project)
}

pub async fn list_projects(db: &DbState, actor: &Actor) -> DomainResult<Vec<Project>> {
    Ok(db
        .project_storage
        .list_for_org(&actor.organization_id)
        .await?)
}

pub async fn get_project(db: &DbState, actor: &Actor, project_id: &str) -> DomainResult<Project> {
    load_scoped_project(db, actor, project_id).await
}

pub async fn update_project(
    db: &DbState,
    actor: &Actor,
    project_id: &str,
    input: ProjectUpdateInput,
) -> DomainResult<Project> {
    if !can_perform(actor, Action::UpdateProject) {
        return Err(DomainError::Authorization(
            "Only organization admins can update projects".to_string(),
        ));
    }
    load_scoped_project(db, actor, project_id).await?;
    ensure_valid(validate_project_update(&input))?;

    let project = db.project_storage.update_project(project_id, input).await?;

    db.recorder.record(
        NewActivityLog::new(
            ActivityType::Updated,
            format!("Updated project \"{}\"", project.name),
            &actor.user_id,
        )
        .project(&project.id),
    );

    Ok(project)
}

pub async fn delete_project(db: &DbState, actor: &Actor, project_id: &str) -> DomainResult<()> {
    if !can_perform(actor, Action::DeleteProject) {
        return Err(DomainError::Authorization(
            "Only organization admins can delete projects".to_string(),
        ));
    }
    let project = load_scoped_project(db, actor, project_id).await?;

    db.project_storage.delete_project(project_id).await?;

    info!("Deleted project {} ({})", project.name, project.id);
    db.recorder.record(
        NewActivityLog::new(
            ActivityType::Deleted,
            format!("Deleted project \"{}\"", project.name),
            &actor.user_id,
        )
        .project(&project.id),
    );

    Ok(())
}
