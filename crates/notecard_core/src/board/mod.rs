//! Note board projection.
//!
//! # Responsibility
//! - Hold the live search term typed by the user.
//! - Render the store's visible notes into card view models.
//!
//! # Invariants
//! - Rendering never mutates the store.
//! - Card order equals `NoteStore::list` order for the same term.

pub mod card;

pub use card::{card_preview, relative_label, Board, NoteCard};
