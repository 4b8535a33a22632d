//! Note domain model.
//!
//! # Responsibility
//! - Define the record owned by the note store and its persisted shape.
//! - Guard creation input through the non-empty `NoteContent` newtype.
//!
//! # Invariants
//! - `id` and `created_at` are fixed at creation.
//! - `content` of a stored note is never empty.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one note.
pub type NoteId = Uuid;

/// One note card record.
///
/// Serialized as `{ "id", "date", "content" }`; `date` is an RFC 3339 UTC
/// timestamp so blobs written by a browser host read back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
    pub content: String,
}

impl Note {
    /// Creates a note with a fresh id and the current time.
    pub fn new(content: NoteContent) -> Self {
        Self::with_id(Uuid::new_v4(), Utc::now(), content)
    }

    /// Creates a note with caller-provided identity, used by import paths.
    pub fn with_id(id: NoteId, created_at: DateTime<Utc>, content: NoteContent) -> Self {
        Self {
            id,
            created_at,
            content: content.into_inner(),
        }
    }
}

/// Non-empty note body accepted by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteContent(String);

impl NoteContent {
    /// Returns `None` for an empty string; any other text is accepted as-is.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NoteContent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteContent};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn content_rejects_empty_but_keeps_whitespace() {
        assert!(NoteContent::new("").is_none());
        let spaces = NoteContent::new("   ").expect("whitespace is opaque text");
        assert_eq!(spaces.as_str(), "   ");
    }

    #[test]
    fn new_notes_get_distinct_ids() {
        let first = Note::new(NoteContent::new("a").unwrap());
        let second = Note::new(NoteContent::new("a").unwrap());
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn serializes_with_date_field_name() {
        let id = Uuid::parse_str("6f1c1d0e-8a3b-4f55-9d3e-2b7c1a9e4f10").unwrap();
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 12, 30, 0).unwrap();
        let note = Note::with_id(id, at, NoteContent::new("buy milk").unwrap());

        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["id"], "6f1c1d0e-8a3b-4f55-9d3e-2b7c1a9e4f10");
        assert_eq!(value["content"], "buy milk");
        assert!(value["date"].as_str().unwrap().starts_with("2024-02-01T12:30:00"));
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn reads_browser_style_blob() {
        let raw = r#"{"id":"6f1c1d0e-8a3b-4f55-9d3e-2b7c1a9e4f10","date":"2024-02-01T12:30:00.000Z","content":"call mom"}"#;
        let note: Note = serde_json::from_str(raw).unwrap();
        assert_eq!(note.content, "call mom");
        assert_eq!(
            note.created_at,
            Utc.with_ymd_and_hms(2024, 2, 1, 12, 30, 0).unwrap()
        );
    }
}
