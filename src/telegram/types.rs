//! Handler types and shared dependencies

use std::sync::Arc;

use crate::core::Config;
use crate::media::MediaPipeline;
use crate::storage::UserStore;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies shared by every handler
#[derive(Clone)]
pub struct HandlerDeps {
    pub config: Arc<Config>,
    pub authorized: Arc<UserStore>,
    pub subscribed: Arc<UserStore>,
    pub pipeline: Arc<MediaPipeline>,
}

impl HandlerDeps {
    pub fn new(
        config: Arc<Config>,
        authorized: Arc<UserStore>,
        subscribed: Arc<UserStore>,
        pipeline: Arc<MediaPipeline>,
    ) -> Self {
        Self {
            config,
            authorized,
            subscribed,
            pipeline,
        }
    }
}
