use std::fmt;

/// Errors returned by catalog operations
///
/// Every variant is an expected, recoverable outcome. An operation that
/// returns one of these has left the catalog untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A book with this title is already stored
    DuplicateTitle(String),
    /// No book with this title is stored
    NotFound(String),
    /// There is no recorded action to undo
    EmptyLog,
    /// Titles are the catalog key and cannot be empty
    EmptyTitle,
}

impl std::error::Error for CatalogError {}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateTitle(title) => write!(f, "A book titled \"{title}\" already exists"),
            Self::NotFound(title) => write!(f, "No book titled \"{title}\" was found"),
            Self::EmptyLog => write!(f, "There is no action to undo"),
            Self::EmptyTitle => write!(f, "Book title cannot be empty"),
        }
    }
}
