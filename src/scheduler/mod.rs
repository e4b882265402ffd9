//! Meal-time broadcast scheduler.
//!
//! Runs as a `tokio::spawn`ed background task. Rather than polling the wall
//! clock once a second, it computes the next trigger instant from the fixed
//! schedule and sleeps until it, so each trigger fires exactly once and no
//! suppression delay is needed. Cycle failures are caught at the iteration
//! boundary and logged; the loop never terminates on its own.

pub mod schedule;

pub use schedule::TriggerSchedule;

use std::sync::Arc;
use std::time::Duration;
use teloxide::prelude::*;
use teloxide::types::InputFile;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::core::config;
use crate::core::error::AppResult;
use crate::media::MediaPipeline;
use crate::storage::UserStore;

/// Start the broadcast scheduler background task.
pub fn start_scheduler(
    bot: Bot,
    schedule: TriggerSchedule,
    pipeline: Arc<MediaPipeline>,
    subscribers: Arc<UserStore>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        log::info!("Scheduler started ({} trigger time(s) per day)", schedule.len());

        loop {
            let now = chrono::Local::now().naive_local();
            let next = schedule.next_after(now);
            let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
            log::info!("Next scheduled broadcast at {}", next.format("%Y-%m-%d %H:%M"));
            sleep(wait).await;

            log::info!("Sending video for meal time: {}", next.format("%H:%M"));
            match run_broadcast_cycle(&bot, &pipeline, &subscribers).await {
                Ok(delivered) => log::info!("Scheduled broadcast done ({} recipient(s))", delivered),
                Err(e) => log::error!("Error sending scheduled video: {}", e),
            }
        }
    })
}

/// Run one broadcast cycle: retention cleanup, capture, convert, deliver.
///
/// Per-recipient delivery failures are logged and skipped — one blocked chat
/// must not starve the rest of the subscribers. Returns the number of
/// successful deliveries.
pub async fn run_broadcast_cycle(
    bot: &Bot,
    pipeline: &MediaPipeline,
    subscribers: &UserStore,
) -> AppResult<usize> {
    if let Err(e) = pipeline.cleanup().await {
        log::warn!("Retention cleanup failed: {}", e);
    }

    let recipients = subscribers.snapshot().await;
    if recipients.is_empty() {
        log::info!("No subscribed chats, skipping capture");
        return Ok(0);
    }

    let clip = pipeline.capture_clip(config::camera::clip_duration()).await?;

    let mut delivered = 0usize;
    for chat_id in recipients {
        match bot.send_video(ChatId(chat_id), InputFile::file(clip.clone())).await {
            Ok(_) => {
                log::info!("Video sent to chat ID: {}", chat_id);
                delivered += 1;
            }
            Err(e) => log::warn!("Failed to send video to chat ID {}: {}", chat_id, e),
        }
    }

    Ok(delivered)
}
