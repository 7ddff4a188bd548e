use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    action_log::{ActionKind, ActionLog, InverseAction},
    error::CatalogError,
    index::{BookIndex, InOrder},
    observers::{CatalogChange, CatalogObserver},
    record::BookRecord,
};

/// What an undo did
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UndoSummary {
    /// The action that was reversed
    pub reversed: ActionKind,
    /// The inverse operation that was applied
    pub inverse: InverseAction,
    /// The snapshot the inverse was applied with
    pub record: BookRecord,
    /// `false` when the index no longer matched the snapshot and the inverse
    /// silently did nothing
    pub applied: bool,
}

/// Book catalog with single-step undo
///
/// Owns the title index and the undo log. Every successful `add_book` or
/// `remove_book` pushes exactly one log entry; every successful `undo` pops
/// exactly one.
pub struct CatalogService {
    /// Title-ordered storage
    index: BookIndex,
    /// Reversible actions, most recent last
    log: ActionLog,
    /// Registered change observers
    observers: Vec<Box<dyn CatalogObserver>>,
}

impl fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogService")
            .field("index", &self.index)
            .field("log", &self.log)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogService {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self { index: BookIndex::new(), log: ActionLog::new(), observers: Vec::new() }
    }

    /// Register an observer to be notified of catalog changes
    pub fn register_observer(&mut self, observer: Box<dyn CatalogObserver>) {
        self.observers.push(observer);
    }

    /// Add a book and record the insertion for undo
    ///
    /// # Errors
    ///
    /// - `CatalogError::EmptyTitle` if `title` is empty
    /// - `CatalogError::DuplicateTitle` if a book with this title exists
    pub fn add_book(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
    ) -> Result<(), CatalogError> {
        let record = BookRecord::new(title, author, year);
        if record.title.is_empty() {
            return Err(CatalogError::EmptyTitle);
        }
        if self.index.contains(&record.title) {
            return Err(CatalogError::DuplicateTitle(record.title));
        }

        self.index.insert(record.clone())?;
        self.log.push(ActionKind::Insertion, &record);
        self.notify(&CatalogChange::Added(&record));
        Ok(())
    }

    /// Remove a book and record the deletion for undo
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no book has this title.
    pub fn remove_book(&mut self, title: &str) -> Result<(), CatalogError> {
        let removed = self.index.delete(title)?;
        self.log.push(ActionKind::Deletion, &removed);
        self.notify(&CatalogChange::Removed(&removed));
        Ok(())
    }

    /// Look up a book by exact title
    #[must_use]
    pub fn find_book(&self, title: &str) -> Option<&BookRecord> {
        self.index.find(title)
    }

    /// All books in ascending title order
    #[must_use]
    pub fn list_books(&self) -> InOrder<'_> {
        self.index.iter()
    }

    /// Reverse the most recent add or remove
    ///
    /// The inverse is applied without checking that the index still looks
    /// the way it did when the action was logged. If the title's presence
    /// changed in between, the inverse does nothing and the summary reports
    /// `applied: false`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyLog` if there is nothing to undo.
    pub fn undo(&mut self) -> Result<UndoSummary, CatalogError> {
        let entry = self.log.pop_and_invert().ok_or(CatalogError::EmptyLog)?;
        let inverse = entry.kind.inverse();

        let applied = match inverse {
            InverseAction::Remove => self.index.delete(&entry.snapshot.title).is_ok(),
            InverseAction::Restore => self.index.insert(entry.snapshot.clone()).is_ok(),
        };

        let summary = UndoSummary { reversed: entry.kind, inverse, record: entry.snapshot, applied };
        self.notify(&CatalogChange::Undone(&summary));
        Ok(summary)
    }

    /// Number of books stored
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the catalog holds no books
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of actions that can still be undone
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.log.len()
    }

    /// Tell every observer about a change
    fn notify(&self, change: &CatalogChange<'_>) {
        for observer in &self.observers {
            observer.on_change(change);
        }
    }
}
