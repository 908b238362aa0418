// ABOUTME: Issue operations: creation, board fetch, the drag-and-drop move, edits, deletion
// ABOUTME: The move sequences reducer -> transactional persist -> best-effort logging

use tracing::info;

use scrumline_board::{apply_move, BoardMove, BoardState};
use scrumline_core::{
    can_perform, validate_issue_create, Action, ActivityType, Actor, Issue, IssueCreateInput,
    IssueUpdateInput, NewActivityLog,
};

use crate::error::{ensure_org_access, ensure_valid, entity_lookup, DomainError, DomainResult};
use crate::projects::load_scoped_project;
use crate::DbState;

async fn load_scoped_issue(db: &DbState, actor: &Actor, issue_id: &str) -> DomainResult<Issue> {
    let issue = db
        .issue_storage
        .get_issue(issue_id)
        .await
        .map_err(|e| entity_lookup(e, "Issue"))?;
    let project = db
        .project_storage
        .get_project(&issue.project_id)
        .await
        .map_err(|e| entity_lookup(e, "Project"))?;
    ensure_org_access(actor, &project.organization_id)?;
    Ok(issue)
}

pub async fn create_issue(
    db: &DbState,
    actor: &Actor,
    project_id: &str,
    input: IssueCreateInput,
) -> DomainResult<Issue> {
    if !can_perform(actor, Action::CreateIssue) {
        return Err(DomainError::Authorization(
            "Not allowed to create issues".to_string(),
        ));
    }
    load_scoped_project(db, actor, project_id).await?;
    ensure_valid(validate_issue_create(&input))?;

    let issue = db
        .issue_storage
        .create_issue(project_id, &actor.user_id, input)
        .await?;

    info!("Created issue {} ({})", issue.title, issue.id);
    db.recorder.record(
        NewActivityLog::new(
            ActivityType::Created,
            format!("Created issue \"{}\"", issue.title),
            &actor.user_id,
        )
        .issue(&issue.id)
        .project(project_id)
        .sprint(issue.sprint_id.as_deref()),
    );

    Ok(issue)
}

/// Authoritative board fetch; also the client's recovery path after a
/// failed move.
pub async fn get_issues_for_sprint(
    db: &DbState,
    actor: &Actor,
    sprint_id: &str,
) -> DomainResult<Vec<Issue>> {
    crate::sprints::get_sprint(db, actor, sprint_id).await?;
    Ok(db.issue_storage.list_for_sprint(sprint_id).await?)
}

/// Applies one drag-and-drop gesture to a sprint's board.
///
/// The pure reducer computes the new ranking and the touched set; the
/// touched set is persisted as a single all-or-nothing batch; one MOVED
/// entry per touched issue is recorded after the commit. On persistence
/// failure nothing is patched up row by row - the error propagates and the
/// client re-fetches the authoritative list.
pub async fn move_issues(
    db: &DbState,
    actor: &Actor,
    sprint_id: &str,
    gesture: BoardMove,
) -> DomainResult<Vec<Issue>> {
    if !can_perform(actor, Action::MoveIssues) {
        return Err(DomainError::Authorization(
            "Not allowed to move issues".to_string(),
        ));
    }
    let sprint = crate::sprints::get_sprint(db, actor, sprint_id).await?;
    let issues = db.issue_storage.list_for_sprint(sprint_id).await?;

    let state = BoardState::new(sprint.status, issues);
    let outcome = apply_move(&state, &gesture)?;

    if outcome.is_noop() {
        return Ok(outcome.state.issues);
    }

    db.issue_storage
        .update_board_positions(&outcome.touched)
        .await?;

    info!(
        "Board move in sprint {} touched {} issues",
        sprint.name,
        outcome.touched.len()
    );
    for issue in &outcome.touched {
        db.recorder.record(
            NewActivityLog::new(
                ActivityType::Moved,
                format!("Moved issue \"{}\" to {}", issue.title, issue.status.as_str()),
                &actor.user_id,
            )
            .issue(&issue.id)
            .project(&issue.project_id)
            .sprint(issue.sprint_id.as_deref()),
        );
    }

    Ok(outcome.state.issues)
}

/// Dialog edits. Status changes here do not renumber partitions; only the
/// board reducer assigns positions to existing issues.
pub async fn update_issue(
    db: &DbState,
    actor: &Actor,
    issue_id: &str,
    input: IssueUpdateInput,
) -> DomainResult<Issue> {
    if !can_perform(actor, Action::EditIssue) {
        return Err(DomainError::Authorization(
            "Not allowed to edit issues".to_string(),
        ));
    }
    load_scoped_issue(db, actor, issue_id).await?;

    let issue = db.issue_storage.update_issue(issue_id, input).await?;

    db.recorder.record(
        NewActivityLog::new(
            ActivityType::Updated,
            format!("Updated issue \"{}\"", issue.title),
            &actor.user_id,
        )
        .issue(&issue.id)
        .project(&issue.project_id)
        .sprint(issue.sprint_id.as_deref()),
    );

    Ok(issue)
}

pub async fn delete_issue(db: &DbState, actor: &Actor, issue_id: &str) -> DomainResult<()> {
    let issue = load_scoped_issue(db, actor, issue_id).await?;

    if !can_perform(
        actor,
        Action::DeleteIssue {
            reporter_id: &issue.reporter_id,
        },
    ) {
        return Err(DomainError::Authorization(
            "You are not authorized to delete this issue".to_string(),
        ));
    }

    db.issue_storage.delete_issue(issue_id).await?;

    info!("Deleted issue {} ({})", issue.title, issue.id);
    db.recorder.record(
        NewActivityLog::new(
            ActivityType::Deleted,
            format!("Deleted issue \"{}\"", issue.title),
            &actor.user_id,
        )
        .issue(&issue.id)
        .project(&issue.project_id)
        .sprint(issue.sprint_id.as_deref()),
    );

    Ok(())
}

/// Issues reported by or assigned to `user_id` within the actor's
/// organization, most recently updated first.
pub async fn get_user_issues(
    db: &DbState,
    actor: &Actor,
    user_id: &str,
) -> DomainResult<Vec<Issue>> {
    Ok(db
        .issue_storage
        .list_for_user(user_id, &actor.organization_id)
        .await?)
}
