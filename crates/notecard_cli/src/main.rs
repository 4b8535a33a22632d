//! Terminal front end for the note board.
//!
//! # Subcommands
//! - `add <text>`: create a note
//! - `list [--search <q>] [--json]`: print notes, most recent first
//! - `delete <id>`: delete one note
//! - `dictate`: run the capture workflow with stdin lines as the transcript

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use notecard_core::db::open_db;
use notecard_core::{
    init_logging, Board, CaptureEvent, CaptureSession, NoteStore, NotecardConfig,
    RecognitionConfig, RecognitionResult, SpeechError, SpeechRecognizer, SqliteKeyValueStore,
    TranscriptEvent, TranscriptStream,
};
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

const TRANSCRIPT_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Parser)]
#[command(name = "notecard", version, about = "Text and voice note cards")]
struct Cli {
    /// TOML configuration file
    #[arg(long, env = "NOTECARD_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite file holding the notes (overrides storage.db_path)
    #[arg(long)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a note from the given words
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List notes, most recent first
    List {
        /// Case-insensitive substring filter
        #[arg(short, long)]
        search: Option<String>,

        /// Print the stored JSON records instead of cards
        #[arg(long)]
        json: bool,
    },
    /// Delete a note by id
    Delete { id: Uuid },
    /// Dictate a note: each stdin line extends the transcript until EOF
    Dictate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = NotecardConfig::load(cli.config.as_deref()).context("loading config")?;
    if let Some(db) = cli.db {
        config.storage.db_path = db;
    }
    if let Some(dir) = config.logging.dir.as_ref() {
        init_logging(&config.logging.level, &dir.to_string_lossy())
            .map_err(anyhow::Error::msg)
            .context("initializing logging")?;
    }

    let conn = open_db(&config.storage.db_path).with_context(|| {
        format!(
            "opening note database `{}`",
            config.storage.db_path.display()
        )
    })?;
    let storage = SqliteKeyValueStore::try_new(&conn)?;
    let mut store = NoteStore::open_with_key(storage, config.storage.key.as_str());

    match cli.command {
        Commands::Add { text } => {
            match store.create_text(text.join(" ").as_str())? {
                Some(note) => println!("{}", note.id),
                None => println!("Nothing to save."),
            }
        }
        Commands::List { search, json } => {
            if json {
                let notes = store.list(search.as_deref());
                println!("{}", serde_json::to_string_pretty(&notes)?);
            } else {
                let mut board = Board::new();
                board.set_search(search.unwrap_or_default());
                for card in board.cards(&store, Utc::now()) {
                    println!("{}  {:>16}  {}", card.id, card.created_label, card.preview);
                }
            }
        }
        Commands::Delete { id } => {
            if store.delete(id)? {
                println!("Deleted {id}.");
            } else {
                println!("No note with id {id}.");
            }
        }
        Commands::Dictate => {
            let recognizer = StdinRecognizer::default();
            let mut capture = CaptureSession::new(
                Some(Box::new(recognizer)),
                config.speech.recognition(),
            );
            capture.open();
            if !capture.start_recording() {
                report_events(&mut capture);
                return Ok(());
            }
            eprintln!("Recording; type the transcript, end with Ctrl-D.");
            while capture.is_recording() {
                capture.pump_transcripts();
                std::thread::sleep(TRANSCRIPT_POLL_INTERVAL);
            }
            let saved = capture.save(&mut store)?;
            report_events(&mut capture);
            match saved {
                Some(note) => println!("{}", note.id),
                None => println!("Nothing to save."),
            }
        }
    }

    Ok(())
}

fn report_events(capture: &mut CaptureSession) {
    for event in capture.take_events() {
        match event {
            CaptureEvent::SpeechUnsupported => {
                eprintln!("Speech capture is not supported here.");
            }
            CaptureEvent::SpeechFailed(message) => {
                eprintln!("Speech capture failed: {message}");
            }
            CaptureEvent::NoteSaved { .. } => eprintln!("Note created."),
            CaptureEvent::StateChanged { .. } | CaptureEvent::TranscriptUpdated => {}
        }
    }
}

/// Treats stdin lines as final recognition results.
#[derive(Default)]
struct StdinRecognizer {
    cancelled: Option<Arc<AtomicBool>>,
}

impl SpeechRecognizer for StdinRecognizer {
    fn start(&mut self, config: &RecognitionConfig) -> Result<TranscriptStream, SpeechError> {
        if self.cancelled.is_some() {
            return Err(SpeechError::AlreadyActive);
        }
        log::info!(
            "event=stdin_recognizer_start module=cli language={}",
            config.language
        );
        let (tx, stream) = TranscriptStream::channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let thread_cancelled = Arc::clone(&cancelled);

        std::thread::Builder::new()
            .name("stdin-transcript".to_string())
            .spawn(move || {
                let mut results = Vec::new();
                for line in std::io::stdin().lock().lines() {
                    if thread_cancelled.load(Ordering::Relaxed) {
                        break;
                    }
                    let line = match line {
                        Ok(line) => line,
                        Err(err) => {
                            tx.send(TranscriptEvent::Error(err.to_string()));
                            break;
                        }
                    };
                    let segment = if results.is_empty() {
                        line
                    } else {
                        format!(" {line}")
                    };
                    results.push(RecognitionResult::final_result(segment));
                    if !tx.send(TranscriptEvent::Results(results.clone())) {
                        break;
                    }
                }
            })
            .map_err(|err| SpeechError::StartFailed(err.to_string()))?;

        self.cancelled = Some(cancelled);
        Ok(stream)
    }

    fn stop(&mut self) {
        if let Some(cancelled) = self.cancelled.take() {
            cancelled.store(true, Ordering::Relaxed);
        }
    }
}
