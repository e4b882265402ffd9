//! Integration tests for the media pipeline filesystem behavior.

use mealcam::media::MediaPipeline;

#[tokio::test]
async fn pipeline_creates_both_artifact_directories() {
    let dir = tempfile::tempdir().expect("temp dir");
    let raw = dir.path().join("videos/raw");
    let converted = dir.path().join("videos/converted");

    let _pipeline = MediaPipeline::new(raw.clone(), converted.clone()).expect("pipeline");

    assert!(raw.is_dir());
    assert!(converted.is_dir());
}

#[tokio::test]
async fn cleanup_of_an_empty_directory_removes_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let pipeline =
        MediaPipeline::new(dir.path().join("raw"), dir.path().join("converted")).expect("pipeline");

    let removed = pipeline.cleanup().await.expect("cleanup");
    assert_eq!(removed, 0);
}

#[tokio::test]
async fn cleanup_keeps_fresh_clips() {
    let dir = tempfile::tempdir().expect("temp dir");
    let converted = dir.path().join("converted");
    let pipeline = MediaPipeline::new(dir.path().join("raw"), converted.clone()).expect("pipeline");

    let clip = converted.join("video_20260806_090000.mp4");
    std::fs::write(&clip, b"mp4").expect("write clip");

    let removed = pipeline.cleanup().await.expect("cleanup");
    assert_eq!(removed, 0);
    assert!(clip.exists());
}
