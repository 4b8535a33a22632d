//! Card rendering from store state.

use crate::model::note::{Note, NoteId};
use crate::storage::KeyValueStore;
use crate::store::note_store::NoteStore;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

const PREVIEW_MAX_CHARS: usize = 240;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// View model for one note card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
    /// Id the card's delete control targets.
    pub id: NoteId,
    pub created_at: DateTime<Utc>,
    /// Human-readable age, e.g. `3 hours ago`.
    pub created_label: String,
    /// Whitespace-collapsed, length-capped content.
    pub preview: String,
}

/// Search term plus the render step for the card grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    search: String,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the raw search input; an empty string shows every note.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Notes visible under the current search term, most recent first.
    pub fn visible<'a, S: KeyValueStore>(&self, store: &'a NoteStore<S>) -> Vec<&'a Note> {
        store.list(Some(self.search.as_str()))
    }

    /// Renders visible notes into cards with ages relative to `now`.
    pub fn cards<S: KeyValueStore>(
        &self,
        store: &NoteStore<S>,
        now: DateTime<Utc>,
    ) -> Vec<NoteCard> {
        self.visible(store)
            .into_iter()
            .map(|note| NoteCard {
                id: note.id,
                created_at: note.created_at,
                created_label: relative_label(note.created_at, now),
                preview: card_preview(note.content.as_str()),
            })
            .collect()
    }
}

/// Collapses whitespace runs and caps the preview length.
pub fn card_preview(content: &str) -> String {
    let normalized = WHITESPACE_RE.replace_all(content, " ");
    let trimmed = normalized.trim();
    if trimmed.chars().count() <= PREVIEW_MAX_CHARS {
        return trimmed.to_string();
    }
    let mut preview: String = trimmed.chars().take(PREVIEW_MAX_CHARS).collect();
    preview.push_str("...");
    preview
}

/// Describes how long ago `at` was, relative to `now`.
///
/// Timestamps in the future (clock skew) read as `just now`.
pub fn relative_label(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    let (count, unit) = if minutes < 60 {
        (minutes, "minute")
    } else if elapsed.num_hours() < 24 {
        (elapsed.num_hours(), "hour")
    } else if elapsed.num_days() < 30 {
        (elapsed.num_days(), "day")
    } else if elapsed.num_days() < 365 {
        (elapsed.num_days() / 30, "month")
    } else {
        (elapsed.num_days() / 365, "year")
    };
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::{card_preview, relative_label};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn preview_collapses_whitespace() {
        assert_eq!(card_preview("  buy\n\nmilk\t now "), "buy milk now");
    }

    #[test]
    fn preview_caps_long_content() {
        let long = "a".repeat(500);
        let preview = card_preview(&long);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 243);
    }

    #[test]
    fn relative_label_picks_largest_unit() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(relative_label(now, now), "just now");
        assert_eq!(relative_label(now + Duration::minutes(5), now), "just now");
        assert_eq!(relative_label(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(relative_label(now - Duration::minutes(59), now), "59 minutes ago");
        assert_eq!(relative_label(now - Duration::hours(3), now), "3 hours ago");
        assert_eq!(relative_label(now - Duration::days(2), now), "2 days ago");
        assert_eq!(relative_label(now - Duration::days(65), now), "2 months ago");
        assert_eq!(relative_label(now - Duration::days(800), now), "2 years ago");
    }
}
