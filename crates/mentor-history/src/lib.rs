//! Linear undo/redo ledger of code snapshots.
//!
//! [`HistoryStack`] is pure in-memory state: created empty at session start,
//! mutated only through `push`/`undo`/`redo`/`clear`, and dropped when the
//! session ends. Nothing is persisted.
//!
//! # Example
//!
//! ```
//! use mentor_history::HistoryStack;
//!
//! let mut history = HistoryStack::new();
//! history.push("a");
//! history.push("b");
//!
//! assert_eq!(history.undo(), Some("a"));
//! assert!(history.can_redo());
//! assert_eq!(history.current_state(), "a");
//! ```

pub mod stack;

pub use stack::{HistorySnapshot, HistoryStack};
