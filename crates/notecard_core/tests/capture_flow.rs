use chrono::Utc;
use notecard_core::{
    Board, CaptureEvent, CaptureSession, CaptureState, MemoryKeyValueStore, NoteStore,
    RecognitionConfig, RecognitionResult, ScriptedHandle, ScriptedRecognizer,
};

#[test]
fn typed_note_is_saved_and_modal_closes() {
    let mut store = NoteStore::open(MemoryKeyValueStore::new());
    let mut capture = CaptureSession::text_only();

    capture.open();
    capture.start_text();
    capture.edit("buy milk");
    let saved = capture.save(&mut store).unwrap().expect("note should be created");

    assert_eq!(saved.content, "buy milk");
    assert_eq!(capture.state(), CaptureState::Closed);
    assert_eq!(capture.buffer(), "");
    assert!(capture
        .take_events()
        .contains(&CaptureEvent::NoteSaved { note_id: saved.id }));
    assert_eq!(store.len(), 1);
}

#[test]
fn saving_empty_buffer_is_silent_no_op() {
    let mut store = NoteStore::open(MemoryKeyValueStore::new());
    let mut capture = CaptureSession::text_only();
    capture.open();
    capture.start_text();
    capture.take_events();

    assert!(capture.save(&mut store).unwrap().is_none());
    assert_eq!(store.len(), 0);
    assert_eq!(capture.state(), CaptureState::EditingText);
    assert!(capture.take_events().is_empty());
}

#[test]
fn recording_without_speech_capability_reports_unsupported() {
    let mut capture = CaptureSession::text_only();
    capture.open();
    capture.take_events();

    assert!(!capture.start_recording());
    assert_eq!(capture.buffer(), "");
    assert_eq!(capture.state(), CaptureState::Onboarding);
    assert_eq!(capture.take_events(), vec![CaptureEvent::SpeechUnsupported]);
}

#[test]
fn dictated_note_flows_into_store() {
    let mut store = NoteStore::open(MemoryKeyValueStore::new());
    let (mut capture, handle) = scripted_capture();

    capture.open();
    assert!(capture.start_recording());
    assert_eq!(handle.last_config(), Some(RecognitionConfig::default()));

    handle.emit(vec![RecognitionResult::interim("call")]);
    capture.pump_transcripts();
    assert_eq!(capture.buffer(), "call");

    handle.emit(vec![
        RecognitionResult::final_result("call "),
        RecognitionResult::interim("mom"),
    ]);
    capture.pump_transcripts();
    capture.stop_recording();

    assert_eq!(capture.state(), CaptureState::EditingText);
    assert_eq!(capture.buffer(), "call mom");
    assert!(!handle.is_active());
    assert_eq!(handle.stop_count(), 1);

    capture.edit("call mom tonight");
    let saved = capture.save(&mut store).unwrap().unwrap();
    assert_eq!(saved.content, "call mom tonight");
}

#[test]
fn no_updates_reach_buffer_after_stop() {
    let (mut capture, handle) = scripted_capture();
    capture.open();
    capture.start_recording();
    handle.emit_segments(&["first"]);
    capture.pump_transcripts();
    capture.stop_recording();

    assert!(!handle.emit_segments(&["first", " late"]));
    assert_eq!(capture.pump_transcripts(), 0);
    assert_eq!(capture.buffer(), "first");
}

#[test]
fn closing_discards_buffer_and_cancels_recording() {
    let mut store = NoteStore::open(MemoryKeyValueStore::new());
    let (mut capture, handle) = scripted_capture();
    capture.open();
    capture.start_recording();
    handle.emit_segments(&["never saved"]);
    capture.pump_transcripts();

    capture.close();
    assert_eq!(capture.state(), CaptureState::Closed);
    assert_eq!(capture.buffer(), "");
    assert!(!handle.is_active());
    assert!(!handle.emit_segments(&["ghost"]));

    assert!(capture.save(&mut store).unwrap().is_none());
    assert!(store.is_empty());

    capture.open();
    assert_eq!(capture.state(), CaptureState::Onboarding);
    assert_eq!(capture.buffer(), "");
}

#[test]
fn saving_while_recording_drains_pending_transcript() {
    let mut store = NoteStore::open(MemoryKeyValueStore::new());
    let (mut capture, handle) = scripted_capture();
    capture.open();
    capture.start_recording();
    handle.emit_segments(&["quick ", "thought"]);

    let saved = capture.save(&mut store).unwrap().unwrap();
    assert_eq!(saved.content, "quick thought");
    assert!(!handle.is_active());
    assert_eq!(capture.state(), CaptureState::Closed);
}

#[test]
fn dropping_capture_stops_recognizer() {
    let (mut capture, handle) = scripted_capture();
    capture.open();
    capture.start_recording();
    drop(capture);
    assert!(!handle.is_active());
}

#[test]
fn board_renders_cards_for_current_search() {
    let mut store = NoteStore::open(MemoryKeyValueStore::new());
    let mut capture = CaptureSession::text_only();
    for text in ["buy milk", "call   mom\n"] {
        capture.open();
        capture.start_text();
        capture.edit(text);
        capture.save(&mut store).unwrap();
    }

    let mut board = Board::new();
    let now = Utc::now();
    let cards = board.cards(&store, now);
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].preview, "call mom");
    assert_eq!(cards[0].created_label, "just now");

    board.set_search("MILK");
    let cards = board.cards(&store, now);
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].preview, "buy milk");

    store.delete(cards[0].id).unwrap();
    assert!(board.cards(&store, now).is_empty());

    board.set_search("");
    assert_eq!(board.visible(&store).len(), 1);
}

fn scripted_capture() -> (CaptureSession, ScriptedHandle) {
    let (recognizer, handle) = ScriptedRecognizer::new();
    (
        CaptureSession::new(Some(Box::new(recognizer)), RecognitionConfig::default()),
        handle,
    )
}
