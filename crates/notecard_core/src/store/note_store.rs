//! Note store over an injected key-value slot.
//!
//! # Responsibility
//! - Load the persisted list once on open, falling back to empty.
//! - Provide create/delete/list with full-list persistence on every mutation.
//!
//! # Invariants
//! - List order is most-recent-first; new notes are prepended.
//! - A failed persistence write rolls the in-memory mutation back.
//! - Absent, corrupt and unreadable storage all start from an empty list.

use crate::model::note::{Note, NoteContent, NoteId};
use crate::search::substring::filter_notes;
use crate::storage::{KeyValueStore, KvError};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key used by default for the note list.
pub const DEFAULT_NOTES_KEY: &str = "notes";

pub type StoreResult<T> = Result<T, StoreError>;

/// Note store error for persistence writes.
#[derive(Debug)]
pub enum StoreError {
    Storage(KvError),
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize notes: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<KvError> for StoreError {
    fn from(value: KvError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// How the initial list was obtained when the store was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No value stored under the key.
    Empty,
    /// Stored list decoded successfully.
    Restored { count: usize },
    /// Stored value could not be decoded; started empty.
    Corrupt,
    /// Storage read failed; started empty.
    Unreadable,
}

/// Ordered note list with write-through persistence.
pub struct NoteStore<S: KeyValueStore> {
    storage: S,
    key: String,
    notes: Vec<Note>,
    load_outcome: LoadOutcome,
}

impl<S: KeyValueStore> NoteStore<S> {
    /// Opens the store using [`DEFAULT_NOTES_KEY`].
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, DEFAULT_NOTES_KEY)
    }

    /// Opens the store, reading the persisted list under `key`.
    ///
    /// Never fails: missing or undecodable data yields an empty list, and the
    /// reason is kept in [`NoteStore::load_outcome`].
    pub fn open_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let (notes, load_outcome) = match storage.get(key.as_str()) {
            Ok(None) => (Vec::new(), LoadOutcome::Empty),
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Note>>(raw.as_str()) {
                Ok(notes) => {
                    let count = notes.len();
                    (notes, LoadOutcome::Restored { count })
                }
                Err(err) => {
                    warn!(
                        "event=notes_load module=store status=corrupt bytes={} error={}",
                        raw.len(),
                        err
                    );
                    (Vec::new(), LoadOutcome::Corrupt)
                }
            },
            Err(err) => {
                warn!(
                    "event=notes_load module=store status=unreadable error={}",
                    err
                );
                (Vec::new(), LoadOutcome::Unreadable)
            }
        };

        info!(
            "event=notes_load module=store status=ok outcome={:?} count={}",
            load_outcome,
            notes.len()
        );

        Self {
            storage,
            key,
            notes,
            load_outcome,
        }
    }

    pub fn load_outcome(&self) -> LoadOutcome {
        self.load_outcome
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Returns one note by id.
    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Creates a note from validated content and persists the full list.
    ///
    /// # Errors
    /// - Returns the storage error when the write fails; the list is unchanged.
    pub fn create(&mut self, content: NoteContent) -> StoreResult<Note> {
        let note = Note::new(content);
        self.notes.insert(0, note.clone());

        if let Err(err) = self.persist() {
            self.notes.remove(0);
            error!(
                "event=note_create module=store status=error error={}",
                err
            );
            return Err(err);
        }

        info!(
            "event=note_create module=store status=ok note_id={} chars={} count={}",
            note.id,
            note.content.chars().count(),
            self.notes.len()
        );
        Ok(note)
    }

    /// Creates a note from raw text; empty text is a silent no-op.
    pub fn create_text(&mut self, content: &str) -> StoreResult<Option<Note>> {
        match NoteContent::new(content) {
            Some(content) => self.create(content).map(Some),
            None => {
                debug!("event=note_create module=store status=skipped reason=empty_content");
                Ok(None)
            }
        }
    }

    /// Deletes the note with `id` and persists the resulting list.
    ///
    /// Returns `false` when no note matched. The list is still persisted, so
    /// storage also converges when it was out of sync.
    ///
    /// # Errors
    /// - Returns the storage error when the write fails; the note is restored.
    pub fn delete(&mut self, id: NoteId) -> StoreResult<bool> {
        let removed = self
            .notes
            .iter()
            .position(|note| note.id == id)
            .map(|index| (index, self.notes.remove(index)));

        if let Err(err) = self.persist() {
            if let Some((index, note)) = removed {
                self.notes.insert(index, note);
            }
            error!(
                "event=note_delete module=store status=error note_id={} error={}",
                id, err
            );
            return Err(err);
        }

        info!(
            "event=note_delete module=store status=ok note_id={} found={} count={}",
            id,
            removed.is_some(),
            self.notes.len()
        );
        Ok(removed.is_some())
    }

    /// Lists notes most-recent-first, optionally filtered by substring.
    ///
    /// An empty filter behaves like no filter.
    pub fn list(&self, filter: Option<&str>) -> Vec<&Note> {
        filter_notes(self.notes.iter(), filter)
    }

    /// Returns the full list in storage order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Borrows the backing storage, mainly for inspection in hosts and tests.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) -> StoreResult<()> {
        let serialized = serde_json::to_string(&self.notes)?;
        self.storage.set(self.key.as_str(), serialized.as_str())?;
        Ok(())
    }
}
