//! Recognizer trait, configuration and transcript stream types.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// Spoken language requested when none is configured.
pub const DEFAULT_LANGUAGE: &str = "pt-BR";

/// Recognition session parameters handed to the host engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionConfig {
    /// BCP 47 language tag.
    pub language: String,
    /// Keep listening through pauses until explicitly stopped.
    pub continuous: bool,
    /// Deliver partial hypotheses while the user is still speaking.
    pub interim_results: bool,
    pub max_alternatives: u32,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            continuous: true,
            interim_results: true,
            max_alternatives: 1,
        }
    }
}

/// One recognition segment with ranked alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionResult {
    pub alternatives: Vec<String>,
    pub is_final: bool,
}

impl RecognitionResult {
    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            alternatives: vec![text.into()],
            is_final: false,
        }
    }

    pub fn final_result(text: impl Into<String>) -> Self {
        Self {
            alternatives: vec![text.into()],
            is_final: true,
        }
    }

    /// Best-ranked alternative, or `""` when the engine sent none.
    pub fn best(&self) -> &str {
        self.alternatives.first().map_or("", String::as_str)
    }
}

/// Concatenates the best alternative of every result, in order.
pub fn transcript_of(results: &[RecognitionResult]) -> String {
    results.iter().map(RecognitionResult::best).collect()
}

/// Event delivered by the host engine while a session is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEvent {
    /// Every result of the session so far.
    Results(Vec<RecognitionResult>),
    /// Engine-reported error; the session may keep running.
    Error(String),
}

/// Speech capability errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    /// Host has no speech-to-text capability.
    Unsupported,
    /// A session is already running on this recognizer.
    AlreadyActive,
    /// Host engine refused to start.
    StartFailed(String),
}

impl Display for SpeechError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsupported => write!(f, "speech recognition is not supported on this host"),
            Self::AlreadyActive => write!(f, "speech recognition session already active"),
            Self::StartFailed(message) => {
                write!(f, "speech recognition failed to start: {message}")
            }
        }
    }
}

impl Error for SpeechError {}

/// Host speech-to-text engine.
pub trait SpeechRecognizer {
    /// Starts a session and returns the stream its updates arrive on.
    fn start(&mut self, config: &RecognitionConfig) -> Result<TranscriptStream, SpeechError>;
    /// Stops the active session; a no-op when idle.
    fn stop(&mut self);
}

/// Recognizer for hosts that expose no speech capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedRecognizer;

impl SpeechRecognizer for UnsupportedRecognizer {
    fn start(&mut self, _config: &RecognitionConfig) -> Result<TranscriptStream, SpeechError> {
        Err(SpeechError::Unsupported)
    }

    fn stop(&mut self) {}
}

/// Engine-side half of a transcript stream.
#[derive(Debug, Clone)]
pub struct TranscriptSender {
    tx: Sender<TranscriptEvent>,
}

impl TranscriptSender {
    /// Sends one event; returns `false` once the subscriber is gone.
    pub fn send(&self, event: TranscriptEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Subscriber-side half of a transcript stream.
#[derive(Debug)]
pub struct TranscriptStream {
    rx: Receiver<TranscriptEvent>,
}

/// Result of polling a transcript stream without blocking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamPoll {
    Event(TranscriptEvent),
    Pending,
    /// Every sender is gone; no further events will arrive.
    Ended,
}

impl TranscriptStream {
    /// Creates a connected sender/stream pair.
    pub fn channel() -> (TranscriptSender, TranscriptStream) {
        let (tx, rx) = mpsc::channel();
        (TranscriptSender { tx }, TranscriptStream { rx })
    }

    pub fn poll(&self) -> StreamPoll {
        match self.rx.try_recv() {
            Ok(event) => StreamPoll::Event(event),
            Err(TryRecvError::Empty) => StreamPoll::Pending,
            Err(TryRecvError::Disconnected) => StreamPoll::Ended,
        }
    }
}
