//! Core utilities: configuration, error types, logging

pub mod config;
pub mod error;
pub mod logging;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use logging::init_logger;
