//! Speech-to-text capability contracts.
//!
//! # Responsibility
//! - Describe the host speech engine as an injected collaborator.
//! - Carry transcript updates over a channel the capture workflow can drop.
//!
//! # Invariants
//! - Hosts without speech support report `SpeechError::Unsupported`.
//! - Dropping a `TranscriptStream` unsubscribes; later sends are discarded.

pub mod recognizer;
pub mod scripted;

pub use recognizer::{
    transcript_of, RecognitionConfig, RecognitionResult, SpeechError, SpeechRecognizer,
    StreamPoll, TranscriptEvent, TranscriptSender, TranscriptStream, UnsupportedRecognizer,
};
pub use scripted::{ScriptedHandle, ScriptedRecognizer};
