//! In-memory book catalog with single-step undo.
//!
//! Books are kept in an unbalanced binary search tree ordered by title. Every
//! add or remove is recorded in an undo log together with a value copy of the
//! affected record, so the most recent change can be reversed without
//! depending on the live tree.

pub mod action_log;
pub mod catalog;
pub mod error;
pub mod index;
pub mod listing;
pub mod observers;
pub mod record;

pub use action_log::{ActionKind, ActionLog, InverseAction, LoggedAction};
pub use catalog::{CatalogService, UndoSummary};
pub use error::CatalogError;
pub use index::{BookIndex, InOrder};
pub use listing::CatalogListing;
pub use observers::{ActionLogger, CatalogChange, CatalogObserver};
pub use record::BookRecord;
