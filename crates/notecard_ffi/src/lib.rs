//! Host UI bridge for Notecard core.

pub mod api;
