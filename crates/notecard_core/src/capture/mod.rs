//! Note capture workflow (the "new note" modal).
//!
//! # Responsibility
//! - Model the modal as explicit states over one pending-content buffer.
//! - Bridge speech transcripts and typed text into note store creation.
//!
//! # Invariants
//! - The buffer is discarded whenever the modal closes.
//! - No transcript update reaches the buffer after stop or close.
//! - At most one recording session is active.

pub mod session;

pub use session::{CaptureEvent, CaptureSession, CaptureState};
