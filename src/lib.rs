//! Mealcam - Telegram bot for a camera-equipped Raspberry Pi
//!
//! Records short clips with the on-board camera, repackages them with ffmpeg
//! and delivers them to Telegram chats, either on demand (/getvideo) or on a
//! fixed meal-time schedule.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, and logging
//! - `storage`: file-backed authorized/subscribed chat lists
//! - `media`: capture, conversion, and retention cleanup
//! - `scheduler`: meal-time broadcast loop
//! - `telegram`: bot integration and command handlers

pub mod cli;
pub mod core;
pub mod media;
pub mod scheduler;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use core::{config, AppError, AppResult, Config};
pub use media::{MediaError, MediaPipeline};
pub use scheduler::TriggerSchedule;
pub use storage::UserStore;
