//! Scripted recognizer for hosts that feed transcripts programmatically.
//!
//! The recognizer side is handed to a capture session; the handle side stays
//! with the caller, which pushes transcript events and inspects the session.

use super::recognizer::{
    RecognitionConfig, RecognitionResult, SpeechError, SpeechRecognizer, TranscriptEvent,
    TranscriptSender, TranscriptStream,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct ScriptState {
    sender: Option<TranscriptSender>,
    last_config: Option<RecognitionConfig>,
    starts: usize,
    stops: usize,
}

/// Recognizer whose transcript events are pushed through a [`ScriptedHandle`].
#[derive(Debug)]
pub struct ScriptedRecognizer {
    state: Rc<RefCell<ScriptState>>,
}

/// Caller-side control for a [`ScriptedRecognizer`].
#[derive(Debug, Clone)]
pub struct ScriptedHandle {
    state: Rc<RefCell<ScriptState>>,
}

impl ScriptedRecognizer {
    pub fn new() -> (Self, ScriptedHandle) {
        let state = Rc::new(RefCell::new(ScriptState::default()));
        (
            Self {
                state: Rc::clone(&state),
            },
            ScriptedHandle { state },
        )
    }
}

impl SpeechRecognizer for ScriptedRecognizer {
    fn start(&mut self, config: &RecognitionConfig) -> Result<TranscriptStream, SpeechError> {
        let mut state = self.state.borrow_mut();
        if state.sender.is_some() {
            return Err(SpeechError::AlreadyActive);
        }
        let (tx, stream) = TranscriptStream::channel();
        state.sender = Some(tx);
        state.last_config = Some(config.clone());
        state.starts += 1;
        Ok(stream)
    }

    fn stop(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.sender.take().is_some() {
            state.stops += 1;
        }
    }
}

impl ScriptedHandle {
    /// Pushes the cumulative result list; returns `false` when nobody listens.
    pub fn emit(&self, results: Vec<RecognitionResult>) -> bool {
        self.send(TranscriptEvent::Results(results))
    }

    /// Pushes cumulative results built from plain interim segments.
    pub fn emit_segments(&self, segments: &[&str]) -> bool {
        self.emit(
            segments
                .iter()
                .map(|segment| RecognitionResult::interim(*segment))
                .collect(),
        )
    }

    pub fn emit_error(&self, message: impl Into<String>) -> bool {
        self.send(TranscriptEvent::Error(message.into()))
    }

    /// Simulates the engine ending the session on its own.
    pub fn finish(&self) {
        self.state.borrow_mut().sender = None;
    }

    pub fn is_active(&self) -> bool {
        self.state.borrow().sender.is_some()
    }

    pub fn last_config(&self) -> Option<RecognitionConfig> {
        self.state.borrow().last_config.clone()
    }

    pub fn start_count(&self) -> usize {
        self.state.borrow().starts
    }

    pub fn stop_count(&self) -> usize {
        self.state.borrow().stops
    }

    fn send(&self, event: TranscriptEvent) -> bool {
        match self.state.borrow().sender.as_ref() {
            Some(sender) => sender.send(event),
            None => false,
        }
    }
}
