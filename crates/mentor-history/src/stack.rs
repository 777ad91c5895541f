//! The undo/redo stack and its read-only snapshot.

use serde::Serialize;

/// Read-only view of the full history state.
///
/// This is the surface UI collaborators consume to render timeline controls;
/// it carries the whole sequence, the cursor, and both capability flags.
/// `current_index` is −1 when the history is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistorySnapshot {
    /// Every snapshot in push order.
    pub entries: Vec<String>,
    /// Index of the current entry, or −1 when empty.
    pub current_index: isize,
    /// Whether `undo` would succeed.
    pub can_undo: bool,
    /// Whether `redo` would succeed.
    pub can_redo: bool,
}

/// A linear undo/redo ledger of code snapshots.
///
/// The cursor always points at the current entry. Pushing discards every
/// entry after the cursor (a new edit invalidates redo history), appends,
/// and advances the cursor to the new last index. Moving past either bound
/// returns `None`, never an error.
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    entries: Vec<String>,
    /// `None` only when `entries` is empty.
    cursor: Option<usize>,
}

impl HistoryStack {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new snapshot as the current state.
    ///
    /// Truncates any redo entries beyond the cursor first. An empty string
    /// is a valid snapshot; no validation is applied.
    pub fn push(&mut self, code: &str) {
        let keep = match self.cursor {
            Some(cursor) => cursor + 1,
            None => 0,
        };
        self.entries.truncate(keep);
        self.entries.push(code.to_string());
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Step back one snapshot and return the entry now pointed to.
    ///
    /// Returns `None` when there is nothing earlier; callers check the
    /// sentinel rather than catching an error.
    pub fn undo(&mut self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        let cursor = self.cursor.expect("can_undo implies a cursor") - 1;
        self.cursor = Some(cursor);
        Some(&self.entries[cursor])
    }

    /// Step forward one snapshot and return the entry now pointed to.
    pub fn redo(&mut self) -> Option<&str> {
        if !self.can_redo() {
            return None;
        }
        let cursor = self.cursor.expect("can_redo implies a cursor") + 1;
        self.cursor = Some(cursor);
        Some(&self.entries[cursor])
    }

    /// Whether an earlier snapshot exists.
    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor > 0)
    }

    /// Whether a later snapshot exists.
    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor + 1 < self.entries.len())
    }

    /// Reset to the empty state.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// The entry at the cursor, or `""` when the history is empty.
    pub fn current_state(&self) -> &str {
        match self.cursor {
            Some(cursor) => &self.entries[cursor],
            None => "",
        }
    }

    /// Number of recorded snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no snapshot has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read-only view of the full state for UI consumers.
    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            entries: self.entries.clone(),
            current_index: self.cursor.map_or(-1, |c| c as isize),
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }
}
