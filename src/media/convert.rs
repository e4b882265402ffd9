//! Repackaging of the raw H.264 stream into an MP4 container.
//!
//! Stream copy only (`-c:v copy`) — the Pi cannot afford a re-encode, and the
//! raw stream is already in the codec Telegram players expect.

use std::path::{Path, PathBuf};
use tokio::process::Command;

use super::{artifact_timestamp, run_with_timeout, MediaError, MediaResult};
use crate::core::config;

/// Build the ffmpeg argument list that wraps `input` into `output`.
fn build_convert_args(input: &Path, output: &Path) -> Vec<String> {
    vec![
        "-hide_banner".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-y".to_string(),
        "-i".to_string(),
        input.display().to_string(),
        "-c:v".to_string(),
        "copy".to_string(),
        output.display().to_string(),
    ]
}

/// Convert a raw artifact into a deliverable MP4 in `converted_dir`.
///
/// The raw artifact is deleted after the transcoder returns, whether it
/// succeeded or not — a broken raw stream is useless and only eats SD card.
///
/// # Returns
/// Path of the converted clip.
///
/// # Errors
/// `MediaError::InputNotFound` if the raw file is gone,
/// `MediaError::ConversionFailed` with ffmpeg's stderr on non-zero exit.
pub async fn convert(raw_path: &Path, converted_dir: &Path) -> MediaResult<PathBuf> {
    if !raw_path.exists() {
        return Err(MediaError::InputNotFound(raw_path.display().to_string()));
    }

    let converted_path = converted_dir.join(format!("video_{}.mp4", artifact_timestamp()));

    let mut cmd = Command::new(config::FFMPEG_BIN.as_str());
    cmd.args(build_convert_args(raw_path, &converted_path));

    let result = run_with_timeout(&mut cmd, config::timeouts::convert()).await;

    // Guarded cleanup: drop the raw artifact regardless of the outcome.
    if let Err(e) = tokio::fs::remove_file(raw_path).await {
        log::warn!("Failed to delete raw video {}: {}", raw_path.display(), e);
    } else {
        log::info!("Deleted raw video: {}", raw_path.display());
    }

    let output = result?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::error!("FFmpeg conversion error: {}", stderr);
        return Err(MediaError::ConversionFailed(stderr.trim().to_string()));
    }

    log::info!("Video converted successfully: {}", converted_path.display());
    Ok(converted_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_args_use_overwrite_and_stream_copy() {
        let args = build_convert_args(Path::new("raw.h264"), Path::new("out.mp4"));
        let joined = args.join(" ");
        assert!(joined.contains("-y"));
        assert!(joined.contains("-c:v copy"));
        assert!(joined.starts_with("-hide_banner -loglevel error"));
    }

    #[test]
    fn convert_args_order_input_before_output() {
        let args = build_convert_args(Path::new("in.h264"), Path::new("out.mp4"));
        let input_pos = args.iter().position(|a| a == "in.h264").expect("input arg");
        let output_pos = args.iter().position(|a| a == "out.mp4").expect("output arg");
        assert!(input_pos < output_pos);
        assert_eq!(args[input_pos - 1], "-i");
    }

    #[tokio::test]
    async fn convert_rejects_missing_input() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = convert(&dir.path().join("nope.h264"), dir.path()).await.unwrap_err();
        assert!(matches!(err, MediaError::InputNotFound(_)));
    }
}
