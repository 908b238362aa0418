//! # Scrumline Board
//!
//! The board engine: a pure, I/O-free reducer that turns one drag-and-drop
//! gesture into a consistent re-ranking of the affected issues, plus the
//! sprint lifecycle state machine, sprint name derivation and append-position
//! assignment. Persistence and activity logging are sequenced by the caller
//! (`scrumline-projects`), never from in here.

pub mod lifecycle;
pub mod naming;
pub mod position;
pub mod reducer;

pub use lifecycle::{select_default_sprint, validate_delete, validate_transition, TransitionError};
pub use naming::next_sprint_name;
pub use position::next_position;
pub use reducer::{apply_move, BoardError, BoardMove, BoardState, MoveOutcome, Slot};
