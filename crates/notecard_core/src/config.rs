//! Runtime configuration.
//!
//! # Responsibility
//! - Resolve storage, speech and logging settings from defaults, an optional
//!   TOML file and `NOTECARD_*` environment overrides, in that order.
//!
//! # Invariants
//! - Every field has a default; an empty environment yields a usable config.
//! - `logging.level` is validated with the same rules as `init_logging`.

use crate::logging::{default_log_level, normalize_level};
use crate::speech::RecognitionConfig;
use crate::store::note_store::DEFAULT_NOTES_KEY;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "NOTECARD";
const DEFAULT_DB_FILE_NAME: &str = "notecard.sqlite3";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotecardConfig {
    pub storage: StorageConfig,
    pub speech: SpeechConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite file holding the key-value slot.
    pub db_path: PathBuf,
    /// Key the note list is stored under.
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub language: String,
    pub continuous: bool,
    pub interim_results: bool,
    pub max_alternatives: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Absolute directory for rolling log files; logging stays off when unset.
    pub dir: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            key: DEFAULT_NOTES_KEY.to_string(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        let recognition = RecognitionConfig::default();
        Self {
            language: recognition.language,
            continuous: recognition.continuous,
            interim_results: recognition.interim_results,
            max_alternatives: recognition.max_alternatives,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            dir: None,
        }
    }
}

impl SpeechConfig {
    /// Recognition parameters handed to the speech engine.
    pub fn recognition(&self) -> RecognitionConfig {
        RecognitionConfig {
            language: self.language.clone(),
            continuous: self.continuous,
            interim_results: self.interim_results,
            max_alternatives: self.max_alternatives,
        }
    }
}

/// Configuration load/validation errors.
#[derive(Debug)]
pub enum ConfigError {
    Load(config::ConfigError),
    InvalidLogLevel(String),
    EmptyStorageKey,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(err) => write!(f, "failed to load configuration: {err}"),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::EmptyStorageKey => write!(f, "storage.key must not be empty"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Load(err) => Some(err),
            Self::InvalidLogLevel(_) | Self::EmptyStorageKey => None,
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(value: config::ConfigError) -> Self {
        Self::Load(value)
    }
}

impl NotecardConfig {
    /// Loads defaults, then `path` (required when given), then the process
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Same as [`NotecardConfig::load`] with an explicit environment map
    /// instead of the process environment.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()
    }

    fn validate(mut self) -> Result<Self, ConfigError> {
        self.logging.level = normalize_level(&self.logging.level)
            .map_err(ConfigError::InvalidLogLevel)?
            .to_string();
        if self.storage.key.is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, NotecardConfig};
    use std::collections::HashMap;
    use std::io::Write;

    fn no_env() -> Option<HashMap<String, String>> {
        Some(HashMap::new())
    }

    #[test]
    fn defaults_apply_without_sources() {
        let config = NotecardConfig::load_with_env(None, no_env()).unwrap();
        assert_eq!(config.storage.key, "notes");
        assert_eq!(config.speech.language, "pt-BR");
        assert!(config.speech.continuous);
        assert!(config.logging.dir.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[storage]\nkey = \"work\"\n\n[speech]\nlanguage = \"en-US\"\n\n[logging]\nlevel = \"WARNING\""
        )
        .unwrap();

        let config = NotecardConfig::load_with_env(Some(file.path()), no_env()).unwrap();
        assert_eq!(config.storage.key, "work");
        assert_eq!(config.speech.recognition().language, "en-US");
        assert_eq!(config.speech.max_alternatives, 1);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[storage]\nkey = \"work\"").unwrap();
        let env = HashMap::from([
            ("NOTECARD_STORAGE__KEY".to_string(), "home".to_string()),
            (
                "NOTECARD_SPEECH__INTERIM_RESULTS".to_string(),
                "false".to_string(),
            ),
        ]);

        let config = NotecardConfig::load_with_env(Some(file.path()), Some(env)).unwrap();
        assert_eq!(config.storage.key, "home");
        assert!(!config.speech.interim_results);
    }

    #[test]
    fn rejects_unknown_log_level() {
        let env = HashMap::from([("NOTECARD_LOGGING__LEVEL".to_string(), "loud".to_string())]);
        let err = NotecardConfig::load_with_env(None, Some(env)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));
    }
}
