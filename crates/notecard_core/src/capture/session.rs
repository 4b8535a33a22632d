//! Capture session state machine.
//!
//! States: `Closed -> Onboarding -> EditingText | Recording -> Closed`.
//! Operations that do not apply to the current state are ignored.

use crate::model::note::{Note, NoteContent, NoteId};
use crate::speech::{
    transcript_of, RecognitionConfig, SpeechError, SpeechRecognizer, StreamPoll,
    TranscriptEvent, TranscriptStream,
};
use crate::storage::KeyValueStore;
use crate::store::note_store::{NoteStore, StoreResult};
use log::{debug, error, info, warn};

/// Modal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Closed,
    /// Open, offering "record" and "type" affordances.
    Onboarding,
    EditingText,
    Recording,
}

impl CaptureState {
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// Notification for the UI layer, drained with [`CaptureSession::take_events`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    StateChanged {
        from: CaptureState,
        to: CaptureState,
    },
    /// Host has no speech capability; nothing changed.
    SpeechUnsupported,
    /// Host engine failed to start; nothing changed.
    SpeechFailed(String),
    /// Buffer replaced by a transcript update.
    TranscriptUpdated,
    /// Note created from the buffer; the UI should show a success toast.
    NoteSaved { note_id: NoteId },
}

/// One capture modal bound to an optional speech capability.
pub struct CaptureSession {
    state: CaptureState,
    buffer: String,
    recognizer: Option<Box<dyn SpeechRecognizer>>,
    config: RecognitionConfig,
    stream: Option<TranscriptStream>,
    events: Vec<CaptureEvent>,
}

impl CaptureSession {
    /// Creates a closed session. `None` means the host has no speech support.
    pub fn new(recognizer: Option<Box<dyn SpeechRecognizer>>, config: RecognitionConfig) -> Self {
        Self {
            state: CaptureState::Closed,
            buffer: String::new(),
            recognizer,
            config,
            stream: None,
            events: Vec::new(),
        }
    }

    /// Creates a closed session for a host without speech support.
    pub fn text_only() -> Self {
        Self::new(None, RecognitionConfig::default())
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_recording(&self) -> bool {
        self.state == CaptureState::Recording
    }

    pub fn recognition_config(&self) -> &RecognitionConfig {
        &self.config
    }

    /// Drains pending notifications in emission order.
    pub fn take_events(&mut self) -> Vec<CaptureEvent> {
        std::mem::take(&mut self.events)
    }

    /// Opens the modal in onboarding with an empty buffer.
    pub fn open(&mut self) {
        if self.state.is_open() {
            return;
        }
        self.buffer.clear();
        self.transition(CaptureState::Onboarding);
    }

    /// Switches from onboarding to the text editor.
    pub fn start_text(&mut self) {
        if self.state == CaptureState::Onboarding {
            self.transition(CaptureState::EditingText);
        }
    }

    /// Replaces the buffer with typed text.
    ///
    /// Clearing the buffer in the editor returns to onboarding; the modal
    /// stays open. While recording the text is kept until the next
    /// transcript update replaces it.
    pub fn edit(&mut self, text: impl Into<String>) {
        if !self.state.is_open() {
            return;
        }
        self.buffer = text.into();
        match self.state {
            CaptureState::EditingText if self.buffer.is_empty() => {
                self.transition(CaptureState::Onboarding);
            }
            CaptureState::Onboarding if !self.buffer.is_empty() => {
                self.transition(CaptureState::EditingText);
            }
            _ => {}
        }
    }

    /// Starts voice capture from onboarding.
    ///
    /// Returns `true` when a session started. An unsupported or failing host
    /// emits a notice and leaves state and buffer unchanged.
    pub fn start_recording(&mut self) -> bool {
        if self.state != CaptureState::Onboarding {
            debug!(
                "event=recording_start module=capture status=ignored state={:?}",
                self.state
            );
            return false;
        }

        let Some(recognizer) = self.recognizer.as_mut() else {
            warn!("event=recording_start module=capture status=unsupported reason=no_recognizer");
            self.events.push(CaptureEvent::SpeechUnsupported);
            return false;
        };

        match recognizer.start(&self.config) {
            Ok(stream) => {
                self.stream = Some(stream);
                info!(
                    "event=recording_start module=capture status=ok language={}",
                    self.config.language
                );
                self.transition(CaptureState::Recording);
                true
            }
            Err(SpeechError::Unsupported) => {
                warn!("event=recording_start module=capture status=unsupported");
                self.events.push(CaptureEvent::SpeechUnsupported);
                false
            }
            Err(err) => {
                error!(
                    "event=recording_start module=capture status=error error={}",
                    err
                );
                self.events.push(CaptureEvent::SpeechFailed(err.to_string()));
                false
            }
        }
    }

    /// Applies every pending transcript update and returns how many replaced
    /// the buffer.
    ///
    /// When the engine ends the stream on its own, recording stops as if the
    /// user had stopped it.
    pub fn pump_transcripts(&mut self) -> usize {
        let mut applied = 0;
        let mut ended = false;

        if let Some(stream) = self.stream.as_ref() {
            loop {
                match stream.poll() {
                    StreamPoll::Event(TranscriptEvent::Results(results)) => {
                        self.buffer = transcript_of(&results);
                        self.events.push(CaptureEvent::TranscriptUpdated);
                        applied += 1;
                    }
                    StreamPoll::Event(TranscriptEvent::Error(message)) => {
                        error!(
                            "event=transcript_update module=capture status=error error={}",
                            message
                        );
                    }
                    StreamPoll::Pending => break,
                    StreamPoll::Ended => {
                        ended = true;
                        break;
                    }
                }
            }
        }

        if applied > 0 {
            debug!(
                "event=transcript_update module=capture status=ok updates={} chars={}",
                applied,
                self.buffer.chars().count()
            );
        }
        if ended {
            info!("event=recording_stop module=capture status=ok reason=stream_ended");
            self.stop_recording();
        }
        applied
    }

    /// Ends the speech subscription and keeps the transcript for editing.
    pub fn stop_recording(&mut self) {
        if self.state != CaptureState::Recording {
            return;
        }
        self.cancel_stream();
        self.transition(CaptureState::EditingText);
    }

    /// Creates a note from the buffer and closes the modal.
    ///
    /// Returns `Ok(None)` without side effects when the buffer is empty or
    /// the modal is closed. An active recording is drained and stopped first.
    ///
    /// # Errors
    /// - Returns the store error when persistence fails; the buffer is kept.
    pub fn save<S: KeyValueStore>(
        &mut self,
        store: &mut NoteStore<S>,
    ) -> StoreResult<Option<Note>> {
        if !self.state.is_open() {
            return Ok(None);
        }
        if self.state == CaptureState::Recording {
            self.pump_transcripts();
            self.stop_recording();
        }

        let Some(content) = NoteContent::new(self.buffer.as_str()) else {
            debug!("event=capture_save module=capture status=skipped reason=empty_content");
            return Ok(None);
        };

        let note = store.create(content)?;
        self.buffer.clear();
        self.events.push(CaptureEvent::NoteSaved { note_id: note.id });
        self.transition(CaptureState::Closed);
        info!(
            "event=capture_save module=capture status=ok note_id={}",
            note.id
        );
        Ok(Some(note))
    }

    /// Closes the modal, discarding the buffer and any recording.
    pub fn close(&mut self) {
        if !self.state.is_open() {
            return;
        }
        self.cancel_stream();
        self.buffer.clear();
        self.transition(CaptureState::Closed);
    }

    fn cancel_stream(&mut self) {
        if self.stream.take().is_some() {
            if let Some(recognizer) = self.recognizer.as_mut() {
                recognizer.stop();
            }
        }
    }

    fn transition(&mut self, to: CaptureState) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        debug!(
            "event=capture_state module=capture from={:?} to={:?}",
            from, to
        );
        self.events.push(CaptureEvent::StateChanged { from, to });
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.cancel_stream();
    }
}
