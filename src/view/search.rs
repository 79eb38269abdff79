//! Case-insensitive substring search over record fields.

use crate::models::Record;

/// Search term bound to the fields it is matched against.
#[derive(Debug, Clone)]
pub struct SearchFilter<'a> {
    fields: &'a [&'a str],
    needle: String,
}

impl<'a> SearchFilter<'a> {
    /// Creates a filter. Surrounding whitespace in `term` is ignored.
    #[must_use]
    pub fn new(fields: &'a [&'a str], term: &str) -> Self {
        Self {
            fields,
            needle: term.trim().to_lowercase(),
        }
    }

    /// Returns true if the term is empty and every record matches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Returns true if any search field contains the term.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        if self.is_empty() {
            return true;
        }
        self.fields.iter().any(|field| {
            record
                .field_text(field)
                .is_some_and(|text| text.to_lowercase().contains(&self.needle))
        })
    }

    /// Returns the matching records, in order.
    #[must_use]
    pub fn apply<'r>(&self, records: &'r [Record]) -> Vec<&'r Record> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}
