use crate::{action_log::InverseAction, catalog::UndoSummary, record::BookRecord};

/// A successful change to the catalog
#[derive(Debug, Clone, Copy)]
pub enum CatalogChange<'a> {
    /// A book was added
    Added(&'a BookRecord),
    /// A book was removed
    Removed(&'a BookRecord),
    /// The most recent action was undone
    Undone(&'a UndoSummary),
}

/// Trait for catalog change observation
pub trait CatalogObserver {
    /// Called after every successful mutation
    fn on_change(&self, change: &CatalogChange<'_>);
}

/// Logs every catalog change to stdout
#[derive(Debug)]
pub struct ActionLogger;

impl CatalogObserver for ActionLogger {
    fn on_change(&self, change: &CatalogChange<'_>) {
        match change {
            CatalogChange::Added(record) => println!("LOGGER: Added {record}"),
            CatalogChange::Removed(record) => println!("LOGGER: Removed {record}"),
            CatalogChange::Undone(summary) => {
                let inverse = match summary.inverse {
                    InverseAction::Remove => "removal",
                    InverseAction::Restore => "restore",
                };
                if summary.applied {
                    println!("LOGGER: Undo {:?} via {inverse} of {}", summary.reversed, summary.record);
                } else {
                    println!(
                        "LOGGER: Undo {:?} of {} left the catalog unchanged",
                        summary.reversed, summary.record
                    );
                }
            }
        }
    }
}
