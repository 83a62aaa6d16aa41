use std::time::Duration;

use crate::domain::TranscriptionOptions;
use crate::presentation::config::Environment;

const DEFAULT_MAX_FILE_MB: u64 = 500;
const DEFAULT_PIECE_SIZE_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
const DEFAULT_POLL_TIMEOUT_SECS: u64 = 120;
const DEFAULT_TARGET_SAMPLE_RATE: u32 = 16_000;

/// Runtime configuration, sourced from the environment with per-variable
/// fallback to the documented defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: Environment,
    pub server: ServerSettings,
    pub speech: SpeechSettings,
    pub audio: AudioSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct SpeechSettings {
    pub host: String,
    pub app_id: String,
    pub secret_key: String,
    pub max_file_bytes: u64,
    pub piece_size_bytes: usize,
    pub poll_interval: Duration,
    pub poll_timeout: Duration,
    pub default_options: TranscriptionOptions,
}

#[derive(Debug, Clone)]
pub struct AudioSettings {
    pub target_sample_rate: u32,
    /// When set, raw uploads are decoded and downsampled server-side
    /// before slicing.
    pub normalize_uploads: bool,
}

impl Settings {
    pub fn from_env() -> Self {
        let mut default_options = TranscriptionOptions::default();
        default_options.apply("language", &env_string("SPEECH_LANGUAGE"));
        default_options.apply("speaker_number", &env_string("SPEECH_SPEAKER_NUMBER"));
        default_options.apply("has_separate", &env_string("SPEECH_HAS_SEPARATE"));
        default_options.apply("hot_word", &env_string("SPEECH_HOT_WORD"));
        default_options.apply("pd", &env_string("SPEECH_PD"));

        Self {
            environment: std::env::var("APP_ENV")
                .ok()
                .and_then(|v| Environment::try_from(v).ok())
                .unwrap_or(Environment::Development),
            server: ServerSettings {
                host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env_parsed("SERVER_PORT", 3000),
            },
            speech: SpeechSettings {
                host: std::env::var("SPEECH_API_HOST")
                    .unwrap_or_else(|_| "https://api.lattice-asr.com/v1".to_string()),
                app_id: env_string("SPEECH_APP_ID"),
                secret_key: env_string("SPEECH_SECRET_KEY"),
                max_file_bytes: env_parsed("SPEECH_MAX_FILE_MB", DEFAULT_MAX_FILE_MB)
                    * 1024
                    * 1024,
                piece_size_bytes: env_parsed("SPEECH_PIECE_SIZE_BYTES", DEFAULT_PIECE_SIZE_BYTES),
                poll_interval: Duration::from_secs(env_parsed(
                    "SPEECH_POLL_INTERVAL_SECS",
                    DEFAULT_POLL_INTERVAL_SECS,
                )),
                poll_timeout: Duration::from_secs(env_parsed(
                    "SPEECH_POLL_TIMEOUT_SECS",
                    DEFAULT_POLL_TIMEOUT_SECS,
                )),
                default_options,
            },
            audio: AudioSettings {
                target_sample_rate: env_parsed(
                    "AUDIO_TARGET_SAMPLE_RATE",
                    DEFAULT_TARGET_SAMPLE_RATE,
                ),
                normalize_uploads: std::env::var("AUDIO_NORMALIZE_UPLOADS")
                    .map(|v| v.to_lowercase() == "true" || v == "1")
                    .unwrap_or(false),
            },
        }
    }
}

fn env_string(key: &str) -> String {
    std::env::var(key).unwrap_or_default()
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
