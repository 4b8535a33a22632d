//! Note store: the single owner of the in-memory note list.
//!
//! # Responsibility
//! - Hold notes most-recent-first for the session.
//! - Mirror every mutation to the key-value slot before returning.
//!
//! # Invariants
//! - After any mutating call returns, memory and storage hold equal lists.

pub mod note_store;
