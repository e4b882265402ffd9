use thiserror::Error;

use crate::media::MediaError;

/// Centralized error types for the application
///
/// Fatal startup errors (`Config`, `Store`) abort the process; everything else
/// is caught at the handler or scheduler boundary and reported.
#[derive(Error, Debug)]
pub enum AppError {
    /// Startup configuration problems (missing config file, missing fields)
    #[error("Config error: {0}")]
    Config(String),

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// Capture or conversion failures from the media pipeline
    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    /// Corrupt persisted state (fatal when surfaced at load time)
    #[error("State file error: {0}")]
    Store(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
