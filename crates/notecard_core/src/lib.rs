//! Core domain logic for Notecard.
//! This crate is the single source of truth for note and capture invariants.

pub mod board;
pub mod capture;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod search;
pub mod speech;
pub mod storage;
pub mod store;

pub use board::{Board, NoteCard};
pub use capture::{CaptureEvent, CaptureSession, CaptureState};
pub use config::{ConfigError, NotecardConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteContent, NoteId};
pub use search::substring::{filter_notes, SubstringFilter};
pub use speech::{
    RecognitionConfig, RecognitionResult, ScriptedHandle, ScriptedRecognizer, SpeechError,
    SpeechRecognizer, TranscriptEvent, TranscriptSender, TranscriptStream, UnsupportedRecognizer,
};
pub use storage::{KeyValueStore, KvError, KvResult, MemoryKeyValueStore, SqliteKeyValueStore};
pub use store::note_store::{LoadOutcome, NoteStore, StoreError, StoreResult, DEFAULT_NOTES_KEY};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
