//! Case-insensitive substring matching.
//!
//! # Invariants
//! - An empty filter matches everything.
//! - Matching is not tokenized and not fuzzy.
//! - Filtering preserves the input order.

use crate::model::note::Note;

/// Normalized search term, lowercased once per query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstringFilter {
    needle: String,
}

impl SubstringFilter {
    /// Returns `None` for an absent or empty term, meaning "no filtering".
    pub fn parse(term: Option<&str>) -> Option<Self> {
        match term {
            Some(value) if !value.is_empty() => Some(Self {
                needle: value.to_lowercase(),
            }),
            _ => None,
        }
    }

    pub fn matches(&self, content: &str) -> bool {
        content.to_lowercase().contains(self.needle.as_str())
    }
}

/// Returns the order-preserving subsequence of `notes` matching `term`.
pub fn filter_notes<'a, I>(notes: I, term: Option<&str>) -> Vec<&'a Note>
where
    I: IntoIterator<Item = &'a Note>,
{
    match SubstringFilter::parse(term) {
        Some(filter) => notes
            .into_iter()
            .filter(|note| filter.matches(note.content.as_str()))
            .collect(),
        None => notes.into_iter().collect(),
    }
}
