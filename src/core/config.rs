use once_cell::sync::Lazy;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::error::{AppError, AppResult};

/// Configuration constants for the bot

/// Path to the JSON secrets file
/// Read from CONFIG_PATH environment variable
/// Default: config.json
pub static CONFIG_PATH: Lazy<String> = Lazy::new(|| env::var("CONFIG_PATH").unwrap_or_else(|_| "config.json".to_string()));

/// Directory holding the persisted chat-id lists
/// Read from STATE_DIR environment variable
/// Default: current directory
pub static STATE_DIR: Lazy<String> = Lazy::new(|| env::var("STATE_DIR").unwrap_or_else(|_| ".".to_string()));

/// Base directory for video artifacts (raw/ and converted/ live under it)
/// Read from VIDEO_DIR environment variable
/// Default: videos
pub static VIDEO_DIR: Lazy<String> = Lazy::new(|| env::var("VIDEO_DIR").unwrap_or_else(|_| "videos".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: mealcam.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "mealcam.log".to_string()));

/// Capture tool binary
/// Read from CAPTURE_BIN environment variable
/// Default: libcamera-vid (rpicam-vid on newer Raspberry Pi OS images also works)
pub static CAPTURE_BIN: Lazy<String> =
    Lazy::new(|| env::var("CAPTURE_BIN").unwrap_or_else(|_| "libcamera-vid".to_string()));

/// Transcoder binary
/// Read from FFMPEG_BIN environment variable
/// Default: ffmpeg
pub static FFMPEG_BIN: Lazy<String> = Lazy::new(|| env::var("FFMPEG_BIN").unwrap_or_else(|_| "ffmpeg".to_string()));

/// Daily trigger times for scheduled broadcasts, "HH:MM" local time
pub const MEAL_TIMES: [&str; 6] = ["00:50", "09:00", "13:00", "17:00", "21:00", "23:00"];

/// Bot credentials and the shared authorization secret.
///
/// Loaded once at startup from the JSON config file and immutable thereafter.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bot_token: String,
    pub secret_key: String,
}

impl Config {
    /// Load the config from a JSON file.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the file is missing, unreadable, not
    /// valid JSON, or lacks a non-empty `bot_token`/`secret_key`.
    pub fn load<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read config file {}: {}", path.display(), e)))?;
        let config: Config = serde_json::from_str(&raw)
            .map_err(|e| AppError::Config(format!("invalid config file {}: {}", path.display(), e)))?;
        if config.bot_token.trim().is_empty() || config.secret_key.trim().is_empty() {
            return Err(AppError::Config(format!(
                "config file {} must contain non-empty 'bot_token' and 'secret_key'",
                path.display()
            )));
        }
        Ok(config)
    }
}

/// Path of the authorized chat-id list
pub fn authorized_users_path() -> PathBuf {
    Path::new(STATE_DIR.as_str()).join("authorized_users.json")
}

/// Path of the subscribed chat-id list
pub fn subscribed_users_path() -> PathBuf {
    Path::new(STATE_DIR.as_str()).join("subscribed_users.json")
}

/// Directory for raw capture output
pub fn raw_video_dir() -> PathBuf {
    Path::new(VIDEO_DIR.as_str()).join("raw")
}

/// Directory for converted, deliverable clips
pub fn converted_video_dir() -> PathBuf {
    Path::new(VIDEO_DIR.as_str()).join("converted")
}

/// Camera capture settings
pub mod camera {
    use super::Duration;

    /// Clip resolution
    pub const WIDTH: u32 = 1280;
    pub const HEIGHT: u32 = 720;

    /// Sensor rotation in degrees (the unit is mounted upside down)
    pub const ROTATION: u32 = 180;

    /// Length of recorded clips (in seconds)
    pub const CLIP_DURATION_SECS: u64 = 30;

    /// Clip duration
    pub fn clip_duration() -> Duration {
        Duration::from_secs(CLIP_DURATION_SECS)
    }
}

/// Artifact retention configuration
pub mod retention {
    use super::Duration;

    /// Converted clips older than this many days are deleted
    pub const RETENTION_DAYS: u64 = 2;

    /// Retention threshold duration
    pub fn threshold() -> Duration {
        Duration::from_secs(RETENTION_DAYS * 24 * 60 * 60)
    }
}

/// Timeouts for external tool invocations
pub mod timeouts {
    use super::Duration;

    /// Extra headroom on top of the requested capture duration (in seconds)
    pub const CAPTURE_MARGIN_SECS: u64 = 15;

    /// Timeout for the stream-copy conversion (in seconds)
    pub const CONVERT_TIMEOUT_SECS: u64 = 60;

    /// Timeout for a capture of the given length
    pub fn capture(duration: Duration) -> Duration {
        duration + Duration::from_secs(CAPTURE_MARGIN_SECS)
    }

    /// Conversion timeout duration
    pub fn convert() -> Duration {
        Duration::from_secs(CONVERT_TIMEOUT_SECS)
    }
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API calls (in seconds)
    /// Generous because a 30-second 720p clip uploads slowly on the Pi's uplink
    pub const REQUEST_TIMEOUT_SECS: u64 = 300;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn load_reads_both_fields() {
        let file = write_config(r#"{"bot_token": "123:abc", "secret_key": "hunter2"}"#);
        let config = Config::load(file.path()).expect("config should load");
        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.secret_key, "hunter2");
    }

    #[test]
    fn load_fails_on_missing_file() {
        let err = Config::load("definitely/not/here.json").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn load_fails_on_missing_field() {
        let file = write_config(r#"{"bot_token": "123:abc"}"#);
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn load_fails_on_empty_secret() {
        let file = write_config(r#"{"bot_token": "123:abc", "secret_key": ""}"#);
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn artifact_dirs_live_under_video_dir() {
        assert!(raw_video_dir().ends_with("raw"));
        assert!(converted_video_dir().ends_with("converted"));
    }
}
