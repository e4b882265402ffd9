//! Age-based cleanup of converted clips.

use std::path::Path;
use std::time::{Duration, SystemTime};

use super::MediaResult;

/// Whether a file with the given modification time should be removed.
///
/// A file exactly at the retention threshold is retained; only strictly older
/// files go.
fn is_stale(modified: SystemTime, now: SystemTime, retention: Duration) -> bool {
    match now.duration_since(modified) {
        Ok(age) => age > retention,
        // Modified "in the future" (clock stepped back) — keep it.
        Err(_) => false,
    }
}

/// Delete regular files in `dir` whose modification time is older than
/// `retention`. Returns the number of files removed; a missing or empty
/// directory yields zero.
pub async fn remove_stale(dir: &Path, retention: Duration) -> MediaResult<usize> {
    if !dir.is_dir() {
        return Ok(0);
    }

    let now = SystemTime::now();
    let mut removed = 0usize;

    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let metadata = match entry.metadata().await {
            Ok(m) => m,
            Err(e) => {
                log::warn!("Skipping {} during cleanup: {}", path.display(), e);
                continue;
            }
        };
        if !metadata.is_file() {
            continue;
        }
        let modified = match metadata.modified() {
            Ok(m) => m,
            Err(e) => {
                log::warn!("No modification time for {}: {}", path.display(), e);
                continue;
            }
        };
        if is_stale(modified, now, retention) {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {
                    log::info!("Deleted old video: {}", path.display());
                    removed += 1;
                }
                Err(e) => log::warn!("Failed to delete old video {}: {}", path.display(), e),
            }
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_DAYS: Duration = Duration::from_secs(2 * 24 * 60 * 60);

    #[test]
    fn file_exactly_at_threshold_is_retained() {
        let now = SystemTime::now();
        let modified = now - TWO_DAYS;
        assert!(!is_stale(modified, now, TWO_DAYS));
    }

    #[test]
    fn file_strictly_older_than_threshold_is_removed() {
        let now = SystemTime::now();
        let modified = now - TWO_DAYS - Duration::from_secs(1);
        assert!(is_stale(modified, now, TWO_DAYS));
    }

    #[test]
    fn file_younger_than_threshold_is_retained() {
        let now = SystemTime::now();
        let modified = now - Duration::from_secs(24 * 60 * 60);
        assert!(!is_stale(modified, now, TWO_DAYS));
    }

    #[test]
    fn future_modification_time_is_retained() {
        let now = SystemTime::now();
        let modified = now + Duration::from_secs(60);
        assert!(!is_stale(modified, now, TWO_DAYS));
    }

    #[tokio::test]
    async fn missing_directory_is_not_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("gone");
        let removed = remove_stale(&missing, TWO_DAYS).await.expect("cleanup");
        assert_eq!(removed, 0);
    }

    #[tokio::test]
    async fn fresh_files_survive_cleanup() {
        let dir = tempfile::tempdir().expect("temp dir");
        let clip = dir.path().join("video_20260101_090000.mp4");
        tokio::fs::write(&clip, b"mp4").await.expect("write clip");

        let removed = remove_stale(dir.path(), TWO_DAYS).await.expect("cleanup");
        assert_eq!(removed, 0);
        assert!(clip.exists());
    }
}
