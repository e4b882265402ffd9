use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::dispatching::Dispatcher;
use teloxide::error_handlers::LoggingErrorHandler;

use mealcam::cli::{Cli, Commands};
use mealcam::core::{config, init_logger, Config};
use mealcam::media::{self, MediaPipeline};
use mealcam::scheduler::{run_broadcast_cycle, start_scheduler, TriggerSchedule};
use mealcam::storage::UserStore;
use mealcam::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to the appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, config, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Log panics from spawned tasks instead of dying silently.
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    // Load environment variables from .env if present
    let _ = dotenv();

    match cli.command {
        Some(Commands::Run) | None => run_bot().await,
        Some(Commands::Broadcast) => run_broadcast_once().await,
    }
}

/// Run the Telegram bot: command dispatcher plus meal-time scheduler.
async fn run_bot() -> Result<()> {
    log::info!("Starting bot...");

    let app_config = Arc::new(Config::load(config::CONFIG_PATH.as_str())?);

    media::log_external_tools().await;

    let pipeline = Arc::new(MediaPipeline::new(config::raw_video_dir(), config::converted_video_dir())?);
    let authorized = Arc::new(UserStore::load(config::authorized_users_path())?);
    let subscribed = Arc::new(UserStore::load(config::subscribed_users_path())?);
    log::info!(
        "Loaded {} authorized and {} subscribed chat(s)",
        authorized.len().await,
        subscribed.len().await
    );

    let bot = create_bot(&app_config)?;
    setup_bot_commands(&bot).await?;

    // Stale clips should not have to wait for the first trigger of the day.
    if let Err(e) = pipeline.cleanup().await {
        log::warn!("Startup retention cleanup failed: {}", e);
    }

    let schedule = TriggerSchedule::parse(&config::MEAL_TIMES)?;
    let _scheduler = start_scheduler(bot.clone(), schedule, Arc::clone(&pipeline), Arc::clone(&subscribed));

    let deps = HandlerDeps::new(app_config, authorized, subscribed, pipeline);
    let handler = schema(deps);

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .default_handler(|upd| async move {
            log::warn!("Unhandled update: {:?}", upd);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("An error occurred in the dispatcher"))
        .build();

    log::info!("Bot is running. Waiting for commands...");

    // No graceful drain: in-flight capture/conversion/delivery is abandoned.
    tokio::select! {
        _ = dispatcher.dispatch() => {},
        _ = shutdown_signal() => {
            log::info!("Shutting down bot...");
        }
    }

    Ok(())
}

/// Run one capture→convert→broadcast cycle and exit.
async fn run_broadcast_once() -> Result<()> {
    let app_config = Config::load(config::CONFIG_PATH.as_str())?;
    let subscribed = UserStore::load(config::subscribed_users_path())?;

    if subscribed.is_empty().await {
        log::warn!("No subscribed chats found. Exiting.");
        return Ok(());
    }

    let pipeline = MediaPipeline::new(config::raw_video_dir(), config::converted_video_dir())?;
    let bot = create_bot(&app_config)?;

    let delivered = run_broadcast_cycle(&bot, &pipeline, &subscribed).await?;
    log::info!("Broadcast completed ({} recipient(s))", delivered);
    Ok(())
}

/// Resolves when SIGINT or SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
