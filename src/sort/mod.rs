//! Insertion sort, animated step by step.
//!
//! [`SortSession`] is the entry point: it owns the board, shuffles it from a
//! [`crate::permutation::PermutationSource`], and runs the driver that walks
//! insertion sort one animated step at a time.

mod driver;
mod element;
mod session;
mod state;

pub use element::{elements_from_values, Element, ElementId};
pub use session::{RunStatus, SortSession};
pub use state::{CursorPair, SortState, SortStep, CURSOR_HOME};
