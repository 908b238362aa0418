// ABOUTME: Pure board reducer translating one drag gesture into a consistent re-ranking
// ABOUTME: The only code path allowed to assign positions to existing issues

use scrumline_core::{Issue, IssueStatus, SprintStatus};
use thiserror::Error;

/// One end of a drag gesture: a board column and an index within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub status: IssueStatus,
    pub index: usize,
}

/// The result of a drag-and-drop gesture. `destination` is `None` when the
/// gesture was cancelled mid-drag.
#[derive(Debug, Clone)]
pub struct BoardMove {
    pub source: Slot,
    pub destination: Option<Slot>,
}

/// The board of the currently displayed sprint. `version` counts applied
/// moves so a client can tell stale snapshots apart; it is not a
/// concurrency token.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    pub sprint_status: SprintStatus,
    pub issues: Vec<Issue>,
    pub version: u64,
}

impl BoardState {
    pub fn new(sprint_status: SprintStatus, issues: Vec<Issue>) -> Self {
        Self {
            sprint_status,
            issues,
            version: 0,
        }
    }
}

/// A successfully applied (or no-op) move: the next board state plus every
/// issue whose status or position changed and therefore needs persisting.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    pub state: BoardState,
    pub touched: Vec<Issue>,
}

impl MoveOutcome {
    pub fn is_noop(&self) -> bool {
        self.touched.is_empty()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Start the sprint to update the board")]
    SprintNotStarted,
    #[error("Sprint is already completed")]
    SprintCompleted,
    #[error("No issue at index {index} in {status:?}")]
    IndexOutOfRange { status: IssueStatus, index: usize },
}

fn status_rank(status: IssueStatus) -> usize {
    match status {
        IssueStatus::Todo => 0,
        IssueStatus::InProgress => 1,
        IssueStatus::InReview => 2,
        IssueStatus::Done => 3,
    }
}

/// Applies a drag-and-drop gesture to the board.
///
/// Only ACTIVE sprints accept moves. A cancelled gesture or a drop back onto
/// the source slot yields a no-op outcome with an empty touched set and an
/// unchanged version. Otherwise the affected column lists are renumbered
/// zero-based and the merged collection comes back sorted by
/// (status, position), matching the authoritative fetch order.
pub fn apply_move(state: &BoardState, mv: &BoardMove) -> Result<MoveOutcome, BoardError> {
    match state.sprint_status {
        SprintStatus::Planned => return Err(BoardError::SprintNotStarted),
        SprintStatus::Completed => return Err(BoardError::SprintCompleted),
        SprintStatus::Active => {}
    }

    let destination = match mv.destination {
        Some(destination) => destination,
        None => return Ok(noop(state)),
    };
    if destination == mv.source {
        return Ok(noop(state));
    }

    // Partition by status, each column in current display order.
    let mut columns: Vec<Vec<Issue>> = IssueStatus::ALL
        .iter()
        .map(|status| {
            let mut column: Vec<Issue> = state
                .issues
                .iter()
                .filter(|issue| issue.status == *status)
                .cloned()
                .collect();
            column.sort_by_key(|issue| issue.position);
            column
        })
        .collect();

    let source_rank = status_rank(mv.source.status);
    let destination_rank = status_rank(destination.status);

    if mv.source.index >= columns[source_rank].len() {
        return Err(BoardError::IndexOutOfRange {
            status: mv.source.status,
            index: mv.source.index,
        });
    }

    if mv.source.status == destination.status {
        let column = &mut columns[source_rank];
        if destination.index >= column.len() {
            return Err(BoardError::IndexOutOfRange {
                status: destination.status,
                index: destination.index,
            });
        }
        let moved = column.remove(mv.source.index);
        column.insert(destination.index, moved);
        renumber(column);
    } else {
        if destination.index > columns[destination_rank].len() {
            return Err(BoardError::IndexOutOfRange {
                status: destination.status,
                index: destination.index,
            });
        }
        let mut moved = columns[source_rank].remove(mv.source.index);
        moved.status = destination.status;
        columns[destination_rank].insert(destination.index, moved);
        renumber(&mut columns[source_rank]);
        renumber(&mut columns[destination_rank]);
    }

    // Snapshot of the pre-move ranks, to pick out what actually changed.
    let before: std::collections::HashMap<&str, (IssueStatus, i64)> = state
        .issues
        .iter()
        .map(|issue| (issue.id.as_str(), (issue.status, issue.position)))
        .collect();

    let merged: Vec<Issue> = columns.into_iter().flatten().collect();
    let touched: Vec<Issue> = merged
        .iter()
        .filter(|issue| before.get(issue.id.as_str()) != Some(&(issue.status, issue.position)))
        .cloned()
        .collect();

    Ok(MoveOutcome {
        state: BoardState {
            sprint_status: state.sprint_status,
            issues: merged,
            version: state.version + 1,
        },
        touched,
    })
}

fn noop(state: &BoardState) -> MoveOutcome {
    MoveOutcome {
        state: state.clone(),
        touched: Vec::new(),
    }
}

fn renumber(column: &mut [Issue]) {
    for (index, issue) in column.iter_mut().enumerate() {
        issue.position = index as i64;
    }
}
