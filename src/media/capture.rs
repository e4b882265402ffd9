//! Raw clip capture via the external camera tool (`libcamera-vid`).

use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

use super::{artifact_timestamp, run_with_timeout, MediaError, MediaResult};
use crate::core::config;

/// Build the capture tool argument list for a clip of `duration` written to
/// `output`. Duration is passed in milliseconds.
fn build_capture_args(duration: Duration, output: &Path) -> Vec<String> {
    vec![
        "-t".to_string(),
        duration.as_millis().to_string(),
        "--codec".to_string(),
        "h264".to_string(),
        "--width".to_string(),
        config::camera::WIDTH.to_string(),
        "--height".to_string(),
        config::camera::HEIGHT.to_string(),
        "--rotation".to_string(),
        config::camera::ROTATION.to_string(),
        "-o".to_string(),
        output.display().to_string(),
    ]
}

/// Record a raw H.264 clip of the given length into `raw_dir`.
///
/// The invocation is timeboxed to the requested duration plus a fixed margin,
/// so a wedged camera stack cannot hang the caller.
///
/// # Returns
/// Path of the raw artifact.
///
/// # Errors
/// `MediaError::CaptureFailed` with the tool's stderr on non-zero exit.
pub async fn record(raw_dir: &Path, duration: Duration) -> MediaResult<PathBuf> {
    let raw_path = raw_dir.join(format!("raw_video_{}.h264", artifact_timestamp()));

    let mut cmd = Command::new(config::CAPTURE_BIN.as_str());
    cmd.args(build_capture_args(duration, &raw_path));

    let output = run_with_timeout(&mut cmd, config::timeouts::capture(duration)).await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::error!("Capture tool error: {}", stderr);
        return Err(MediaError::CaptureFailed(stderr.trim().to_string()));
    }

    log::info!("Video recorded successfully: {}", raw_path.display());
    Ok(raw_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_args_carry_duration_in_milliseconds() {
        let args = build_capture_args(Duration::from_secs(30), Path::new("/tmp/raw_video_x.h264"));
        let t_pos = args.iter().position(|a| a == "-t").expect("-t flag");
        assert_eq!(args[t_pos + 1], "30000");
    }

    #[test]
    fn capture_args_fix_resolution_and_rotation() {
        let args = build_capture_args(Duration::from_secs(5), Path::new("out.h264"));
        let joined = args.join(" ");
        assert!(joined.contains("--codec h264"));
        assert!(joined.contains("--width 1280"));
        assert!(joined.contains("--height 720"));
        assert!(joined.contains("--rotation 180"));
    }

    #[test]
    fn capture_args_end_with_output_path() {
        let args = build_capture_args(Duration::from_secs(5), Path::new("clips/raw_video_1.h264"));
        assert_eq!(args[args.len() - 2], "-o");
        assert_eq!(args[args.len() - 1], "clips/raw_video_1.h264");
    }
}
