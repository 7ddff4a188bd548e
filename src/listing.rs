use std::borrow::Borrow;

use crate::{action_log::InverseAction, catalog::UndoSummary, record::BookRecord};

/// Width of the title column in the table listing
const TITLE_WIDTH: usize = 40;
/// Width of the author column in the table listing
const AUTHOR_WIDTH: usize = 25;
/// Width of the rule under the header
const RULE_WIDTH: usize = 80;

/// Text renderings of catalog contents for display
#[derive(Debug)]
pub struct CatalogListing;

impl CatalogListing {
    /// Render books as a fixed-width table
    #[must_use]
    pub fn table<I>(books: I) -> String
    where
        I: IntoIterator,
        I::Item: Borrow<BookRecord>,
    {
        let mut table = format!(
            "{:<title_w$}{:<author_w$}Year\n",
            "Title",
            "Author",
            title_w = TITLE_WIDTH,
            author_w = AUTHOR_WIDTH
        );
        table.push_str(&"-".repeat(RULE_WIDTH));
        table.push('\n');

        let mut empty = true;
        for item in books {
            let book = Borrow::<BookRecord>::borrow(&item);
            empty = false;
            table.push_str(&format!(
                "{:<title_w$}{:<author_w$}{}\n",
                book.title,
                book.author,
                book.year,
                title_w = TITLE_WIDTH,
                author_w = AUTHOR_WIDTH
            ));
        }

        if empty {
            table.push_str("No books stored yet\n");
        }
        table
    }

    /// Render books as a pretty-printed JSON array
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn json<I>(books: I) -> Result<String, serde_json::Error>
    where
        I: IntoIterator,
        I::Item: Borrow<BookRecord>,
    {
        let items: Vec<I::Item> = books.into_iter().collect();
        let records: Vec<&BookRecord> = items.iter().map(Borrow::<BookRecord>::borrow).collect();
        serde_json::to_string_pretty(&records)
    }

    /// User-facing message for an undo outcome
    #[must_use]
    pub fn undo_message(summary: &UndoSummary) -> String {
        let title = &summary.record.title;
        match (summary.inverse, summary.applied) {
            (InverseAction::Remove, true) => format!("Undid adding book: {title}"),
            (InverseAction::Restore, true) => format!("Undid removing book: {title}"),
            (InverseAction::Remove, false) => {
                format!("Undid adding book: {title} (it was no longer in the catalog)")
            }
            (InverseAction::Restore, false) => {
                format!("Undid removing book: {title} (a book with that title already exists)")
            }
        }
    }
}
