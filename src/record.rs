use std::fmt;

use serde::{Deserialize, Serialize};

/// A single book in the catalog, keyed by its title
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct BookRecord {
    /// Unique key within a catalog
    pub title: String,
    /// Author name, free text
    pub author: String,
    /// Year of publication
    pub year: i32,
}

impl BookRecord {
    /// Build a record from its three fields
    #[must_use]
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self { title: title.into(), author: author.into(), year }
    }
}

impl fmt::Display for BookRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" by {} ({})", self.title, self.author, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::BookRecord;

    #[test]
    fn test_value_equality() {
        let a = BookRecord::new("Dune", "Herbert", 1965);
        let b = BookRecord::new("Dune".to_string(), "Herbert".to_string(), 1965);
        assert_eq!(a, b);
        assert_ne!(a, BookRecord::new("Dune", "Herbert", 1966));
    }

    #[test]
    fn test_display() {
        let record = BookRecord::new("1984", "Orwell", 1949);
        assert_eq!(record.to_string(), "\"1984\" by Orwell (1949)");
    }
}
