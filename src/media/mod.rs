//! Media pipeline — capture, conversion, retention cleanup.
//!
//! The camera produces a raw H.264 elementary stream which is repackaged into
//! an MP4 container with ffmpeg (stream copy, no re-encode). Raw artifacts are
//! deleted right after conversion; converted clips are kept on disk until the
//! retention cleanup removes them.

pub mod capture;
pub mod cleanup;
pub mod convert;

use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tokio::sync::Mutex;

use crate::core::config;

/// Errors that can occur in the media pipeline
#[derive(Error, Debug)]
pub enum MediaError {
    /// Capture tool exited non-zero
    #[error("capture failed: {0}")]
    CaptureFailed(String),

    /// Transcoder exited non-zero
    #[error("conversion failed: {0}")]
    ConversionFailed(String),

    #[error("input file not found: {0}")]
    InputNotFound(String),

    #[error("process timed out after {0}s")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MediaResult<T> = Result<T, MediaError>;

/// Run an async Command with a timeout.
///
/// Returns the process Output on completion, or a `MediaError` on timeout/IO
/// failure. Keeps a hung external tool from blocking the pipeline forever.
pub async fn run_with_timeout(cmd: &mut Command, timeout: Duration) -> MediaResult<Output> {
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(MediaError::Io(e)),
        Err(_) => Err(MediaError::Timeout(timeout.as_secs())),
    }
}

/// Timestamp component for artifact file names
pub fn artifact_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Check if the capture tool is available
pub async fn check_capture_tool() -> bool {
    Command::new(config::CAPTURE_BIN.as_str())
        .arg("--version")
        .output()
        .await
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Check if ffmpeg is available
pub async fn check_ffmpeg() -> bool {
    Command::new(config::FFMPEG_BIN.as_str())
        .arg("-version")
        .output()
        .await
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Logs external tool availability at application startup.
///
/// A missing tool is not fatal here — the board may still be booting camera
/// firmware — but every later capture will fail, so make the state obvious.
pub async fn log_external_tools() {
    if check_capture_tool().await {
        log::info!("Capture tool found: {}", config::CAPTURE_BIN.as_str());
    } else {
        log::warn!(
            "Capture tool '{}' not found or not runnable; /getvideo and scheduled broadcasts will fail",
            config::CAPTURE_BIN.as_str()
        );
    }

    if check_ffmpeg().await {
        log::info!("Transcoder found: {}", config::FFMPEG_BIN.as_str());
    } else {
        log::warn!(
            "Transcoder '{}' not found or not runnable; conversions will fail",
            config::FFMPEG_BIN.as_str()
        );
    }
}

/// Shared media pipeline: owns the artifact directories and serializes camera
/// access between the command path and the scheduler.
pub struct MediaPipeline {
    raw_dir: PathBuf,
    converted_dir: PathBuf,
    /// There is a single camera on the board; overlapping recordings would
    /// both exit non-zero.
    camera: Mutex<()>,
}

impl MediaPipeline {
    /// Create the pipeline, creating both artifact directories if absent.
    pub fn new(raw_dir: PathBuf, converted_dir: PathBuf) -> MediaResult<Self> {
        std::fs::create_dir_all(&raw_dir)?;
        std::fs::create_dir_all(&converted_dir)?;
        Ok(Self {
            raw_dir,
            converted_dir,
            camera: Mutex::new(()),
        })
    }

    /// Record a clip of the given length and convert it to a deliverable MP4.
    ///
    /// Holds the camera lock for the record+convert span, so a scheduled
    /// broadcast and an on-demand /getvideo can never fight over the sensor.
    ///
    /// # Errors
    /// `CaptureFailed` / `ConversionFailed` with the tool's stderr attached.
    pub async fn capture_clip(&self, duration: Duration) -> MediaResult<PathBuf> {
        let _camera = self.camera.lock().await;
        let raw_path = capture::record(&self.raw_dir, duration).await?;
        convert::convert(&raw_path, &self.converted_dir).await
    }

    /// Delete converted clips older than the retention threshold.
    ///
    /// Returns the number of files removed. An empty or missing directory is
    /// not an error.
    pub async fn cleanup(&self) -> MediaResult<usize> {
        cleanup::remove_stale(&self.converted_dir, config::retention::threshold()).await
    }
}
