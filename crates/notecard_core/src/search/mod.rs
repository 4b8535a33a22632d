//! Note search entry points.
//!
//! # Responsibility
//! - Decide whether one note matches the live search term.
//! - Keep matching rules inside core so every surface filters identically.

pub mod substring;
