//! FFI use-case API for the host UI.
//!
//! # Responsibility
//! - Expose note board operations to the UI layer via FRB.
//! - Keep error semantics simple: envelopes with `ok` and a message.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Each call opens the store, applies one operation and persists it before
//!   returning; calls are serialized within the process.

use chrono::{DateTime, Utc};
use log::{error, warn};
use notecard_core::board::{card_preview, relative_label};
use notecard_core::db::open_db;
use notecard_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    LoadOutcome, Note, NoteStore, SqliteKeyValueStore,
};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use uuid::Uuid;

const STORE_DB_FILE_NAME: &str = "notecard_store.sqlite3";
const STORE_DB_PATH_ENV: &str = "NOTECARD_DB_PATH";
static STORE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static STORE_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the SQLite file used by every note call.
///
/// Must be called before the first note operation; afterwards only the same
/// path is accepted. Returns empty string on success and error message on
/// failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_store_path(db_path: String) -> String {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "db_path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = STORE_DB_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "store path already configured at `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// One card in the note list response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListItem {
    pub note_id: String,
    pub content: String,
    /// Whitespace-collapsed card preview.
    pub preview: String,
    /// RFC 3339 UTC creation time.
    pub created_at: String,
    /// Relative age label, e.g. `2 days ago`.
    pub created_label: String,
}

/// List response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResponse {
    pub ok: bool,
    /// Most recent first.
    pub items: Vec<NoteListItem>,
    pub message: String,
}

/// Mutation response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    pub ok: bool,
    /// Created or deleted note id, when one was affected.
    pub note_id: Option<String>,
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, note_id: Option<String>) -> Self {
        Self {
            ok: true,
            note_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// Creates a note from the capture modal's buffer.
///
/// # FFI contract
/// - Empty content is ignored: `ok=true`, no `note_id`.
/// - Content is stored verbatim, without trimming.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_create(content: String) -> NoteActionResponse {
    let created = with_note_store(|store| {
        store
            .create_text(content.as_str())
            .map_err(|err| err.to_string())
    });
    match created {
        Ok(Some(note)) => NoteActionResponse::success("Note created.", Some(note.id.to_string())),
        Ok(None) => NoteActionResponse::success("Empty content ignored.", None),
        Err(err) => {
            error!("event=ffi_notes_create module=ffi status=error error={err}");
            NoteActionResponse::failure(format!("notes_create failed: {err}"))
        }
    }
}

/// Deletes one note by id.
///
/// # FFI contract
/// - Unknown ids are not an error: `ok=true`, no `note_id`.
/// - Malformed ids return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_delete(note_id: String) -> NoteActionResponse {
    let Ok(id) = Uuid::parse_str(note_id.trim()) else {
        return NoteActionResponse::failure(format!(
            "notes_delete failed: invalid id `{note_id}`"
        ));
    };
    match with_note_store(|store| store.delete(id).map_err(|err| err.to_string())) {
        Ok(true) => NoteActionResponse::success("Note deleted.", Some(id.to_string())),
        Ok(false) => NoteActionResponse::success("Note not found; nothing deleted.", None),
        Err(err) => {
            error!("event=ffi_notes_delete module=ffi status=error error={err}");
            NoteActionResponse::failure(format!("notes_delete failed: {err}"))
        }
    }
}

/// Lists notes most recent first, filtered by the live search input.
///
/// # FFI contract
/// - `None` or empty `search` returns every note.
/// - Matching is a case-insensitive substring test on content.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list(search: Option<String>) -> NotesListResponse {
    let now = Utc::now();
    let result = with_note_store(|store| {
        Ok(store
            .list(search.as_deref())
            .into_iter()
            .map(|note| to_list_item(note, now))
            .collect::<Vec<_>>())
    });
    match result {
        Ok(items) => {
            let message = if items.is_empty() {
                "No notes.".to_string()
            } else {
                format!("Found {} note(s).", items.len())
            };
            NotesListResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(err) => NotesListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("notes_list failed: {err}"),
        },
    }
}

fn resolve_store_db_path() -> PathBuf {
    STORE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(STORE_DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STORE_DB_FILE_NAME)
        })
        .clone()
}

fn with_note_store<T>(
    f: impl FnOnce(&mut NoteStore<SqliteKeyValueStore<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    // A poisoned lock only means an earlier call panicked; the store is
    // reloaded from disk on every call.
    let _guard = STORE_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let db_path = resolve_store_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("store DB open failed: {err}"))?;
    let storage =
        SqliteKeyValueStore::try_new(&conn).map_err(|err| format!("store init failed: {err}"))?;
    let mut store = NoteStore::open(storage);
    if store.load_outcome() == LoadOutcome::Corrupt {
        warn!("event=ffi_store_open module=ffi status=corrupt_fallback");
    }
    f(&mut store)
}

fn to_list_item(note: &Note, now: DateTime<Utc>) -> NoteListItem {
    NoteListItem {
        note_id: note.id.to_string(),
        content: note.content.clone(),
        preview: card_preview(note.content.as_str()),
        created_at: note.created_at.to_rfc3339(),
        created_label: relative_label(note.created_at, now),
    }
}
