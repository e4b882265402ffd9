//! Command handlers: welcome, authorization, on-demand capture,
//! subscription management.
//!
//! Every externally visible failure is caught here and turned into a reply;
//! nothing propagates past the handler boundary except Telegram send errors.

use teloxide::prelude::*;
use teloxide::types::InputFile;

use super::types::HandlerDeps;
use crate::core::config;

pub(super) const AUTHORIZE_USAGE: &str = "Usage: /authorize <password>";
const WELCOME_TEXT: &str = "Welcome! Use /authorize <password> to gain access.";
const UNAUTHORIZED_TEXT: &str = "Unauthorized. Use /authorize <password>.";

/// Handle /start — always allowed.
pub async fn handle_start(bot: &Bot, msg: &Message) -> ResponseResult<()> {
    bot.send_message(msg.chat.id, WELCOME_TEXT).await?;
    Ok(())
}

/// Handle /authorize <password>.
///
/// Exact match against the configured secret. The add is idempotent; both the
/// fresh and the already-authorized outcome get the command list, matching the
/// behavior users of the original bot expect.
pub async fn handle_authorize(bot: &Bot, msg: &Message, deps: &HandlerDeps, password: &str) -> ResponseResult<()> {
    let password = password.trim();
    if password.is_empty() {
        bot.send_message(msg.chat.id, AUTHORIZE_USAGE).await?;
        return Ok(());
    }

    if password != deps.config.secret_key {
        bot.send_message(msg.chat.id, "Incorrect password.").await?;
        return Ok(());
    }

    match deps.authorized.add(msg.chat.id.0).await {
        Ok(true) => {
            bot.send_message(msg.chat.id, "You are now authorized!").await?;
            send_available_commands(bot, msg.chat.id).await?;
            log::info!("User authorized: {}", msg.chat.id);
        }
        Ok(false) => {
            bot.send_message(msg.chat.id, "You are already authorized.").await?;
            send_available_commands(bot, msg.chat.id).await?;
        }
        Err(e) => {
            log::error!("Failed to persist authorized users: {}", e);
            bot.send_message(msg.chat.id, format!("Error: {}", e)).await?;
        }
    }
    Ok(())
}

/// Send the command overview to a chat.
async fn send_available_commands(bot: &Bot, chat_id: ChatId) -> ResponseResult<()> {
    let commands = [
        "/getvideo - Send a 30-second video",
        "/subscribe - Subscribe to meal-time videos",
        "/unsubscribe - Unsubscribe from meal-time videos",
        "/authorize <password> - Authorize yourself",
        "/start - See the welcome message",
    ];
    bot.send_message(
        chat_id,
        format!("Here are the available commands:\n{}", commands.join("\n")),
    )
    .await?;
    Ok(())
}

/// Handle /getvideo — authorized chats only.
///
/// Replies immediately, then offloads the record→convert→send sequence to a
/// spawned task: a 30-second capture must not stall the dispatcher for every
/// other chat. Pipeline failures come back to the requester as an error reply.
pub async fn handle_get_video(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> ResponseResult<()> {
    if !deps.authorized.contains(msg.chat.id.0).await {
        bot.send_message(msg.chat.id, UNAUTHORIZED_TEXT).await?;
        return Ok(());
    }

    bot.send_message(msg.chat.id, "Recording video. Please wait...").await?;

    let bot = bot.clone();
    let deps = deps.clone();
    let chat_id = msg.chat.id;
    tokio::spawn(async move {
        match deps.pipeline.capture_clip(config::camera::clip_duration()).await {
            Ok(clip) => match bot.send_video(chat_id, InputFile::file(clip)).await {
                Ok(_) => log::info!("Video sent to chat ID: {}", chat_id),
                Err(e) => {
                    log::error!("Failed to send video to chat ID {}: {}", chat_id, e);
                    let _ = bot.send_message(chat_id, format!("Error: {}", e)).await;
                }
            },
            Err(e) => {
                log::error!("Error handling /getvideo: {}", e);
                let _ = bot.send_message(chat_id, format!("Error: {}", e)).await;
            }
        }
    });

    Ok(())
}

/// Handle /subscribe — authorized chats only; idempotent.
pub async fn handle_subscribe(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> ResponseResult<()> {
    if !deps.authorized.contains(msg.chat.id.0).await {
        bot.send_message(msg.chat.id, UNAUTHORIZED_TEXT).await?;
        return Ok(());
    }

    match deps.subscribed.add(msg.chat.id.0).await {
        Ok(true) => {
            bot.send_message(msg.chat.id, "You have subscribed to scheduled videos!")
                .await?;
            log::info!("User subscribed: {}", msg.chat.id);
        }
        Ok(false) => {
            bot.send_message(msg.chat.id, "You are already subscribed.").await?;
        }
        Err(e) => {
            log::error!("Failed to persist subscribed users: {}", e);
            bot.send_message(msg.chat.id, format!("Error: {}", e)).await?;
        }
    }
    Ok(())
}

/// Handle /unsubscribe — idempotent.
///
/// Deliberately skips the authorization gate: any chat may always stop
/// receiving broadcasts, even one whose authorization state is unclear.
pub async fn handle_unsubscribe(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> ResponseResult<()> {
    match deps.subscribed.remove(msg.chat.id.0).await {
        Ok(true) => {
            bot.send_message(msg.chat.id, "You have unsubscribed from scheduled videos.")
                .await?;
            log::info!("User unsubscribed: {}", msg.chat.id);
        }
        Ok(false) => {
            bot.send_message(msg.chat.id, "You are not subscribed.").await?;
        }
        Err(e) => {
            log::error!("Failed to persist subscribed users: {}", e);
            bot.send_message(msg.chat.id, format!("Error: {}", e)).await?;
        }
    }
    Ok(())
}

/// Fallback for plain messages: surface the chat id so new users can find it,
/// and point them at /start.
pub async fn handle_plain_message(bot: &Bot, msg: &Message) -> ResponseResult<()> {
    bot.send_message(
        msg.chat.id,
        format!("Your chat ID is: {}. Use /start to see what I can do.", msg.chat.id),
    )
    .await?;
    Ok(())
}
