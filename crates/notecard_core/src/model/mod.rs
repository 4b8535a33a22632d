//! Domain model for note cards.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId` that is never reused.
//! - Notes are created and deleted, never edited in place.

pub mod note;
