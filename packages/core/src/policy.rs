// ABOUTME: Central role/ownership policy evaluation
// ABOUTME: Single decision point so authorization rules cannot drift between call sites

use crate::types::Actor;

/// The closed set of guarded operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    CreateProject,
    UpdateProject,
    DeleteProject,
    CreateSprint,
    TransitionSprint,
    DeleteSprint,
    CreateIssue,
    EditIssue,
    MoveIssues,
    /// Deleting an issue is allowed for the reporter or an org admin.
    DeleteIssue { reporter_id: &'a str },
    ViewActivity,
}

/// Evaluates whether `actor` may perform `action`.
///
/// Organization scoping (the resource belonging to the actor's org) is
/// checked separately by the service layer; this function decides the
/// role/ownership half of the rule.
pub fn can_perform(actor: &Actor, action: Action<'_>) -> bool {
    match action {
        Action::CreateProject | Action::UpdateProject | Action::DeleteProject => actor.is_admin(),
        Action::DeleteIssue { reporter_id } => actor.is_admin() || actor.user_id == reporter_id,
        Action::CreateSprint
        | Action::TransitionSprint
        | Action::DeleteSprint
        | Action::CreateIssue
        | Action::EditIssue
        | Action::MoveIssues
        | Action::ViewActivity => true,
    }
}
