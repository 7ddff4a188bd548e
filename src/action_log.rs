use serde::{Deserialize, Serialize};

use crate::record::BookRecord;

/// The kind of mutation recorded in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ActionKind {
    /// A book was added to the catalog
    Insertion,
    /// A book was removed from the catalog
    Deletion,
}

impl ActionKind {
    /// The operation that reverses this kind of action
    #[must_use]
    pub fn inverse(self) -> InverseAction {
        match self {
            Self::Insertion => InverseAction::Remove,
            Self::Deletion => InverseAction::Restore,
        }
    }
}

/// The operation undo applies to reverse a logged action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum InverseAction {
    /// Delete the snapshot's title from the index
    Remove,
    /// Re-insert the snapshot into the index
    Restore,
}

/// One entry in the undo log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedAction {
    /// What happened
    pub kind: ActionKind,
    /// Value copy of the affected record, detached from the index
    pub snapshot: BookRecord,
}

/// Last-in-first-out log of reversible catalog actions
#[derive(Debug, Default)]
pub struct ActionLog {
    /// Entries, most recent last
    entries: Vec<LoggedAction>,
}

impl ActionLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an action along with a copy of the affected record
    pub fn push(&mut self, kind: ActionKind, record: &BookRecord) {
        self.entries.push(LoggedAction { kind, snapshot: record.clone() });
    }

    /// Remove the most recent entry, handing its snapshot to the caller
    ///
    /// The caller applies `entry.kind.inverse()` and then drops the entry.
    pub fn pop_and_invert(&mut self) -> Option<LoggedAction> {
        self.entries.pop()
    }

    /// The entry the next undo would consume
    #[must_use]
    pub fn peek(&self) -> Option<&LoggedAction> {
        self.entries.last()
    }

    /// Number of recorded actions
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there is nothing left to undo
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
