//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::bot::Command;
use super::commands::{
    handle_authorize, handle_get_video, handle_plain_message, handle_start, handle_subscribe, handle_unsubscribe,
    AUTHORIZE_USAGE,
};
use super::types::{HandlerDeps, HandlerError};

/// Creates the main dispatcher schema for the Telegram bot.
///
/// Returns a handler tree usable with teloxide's Dispatcher; the same schema
/// serves production and tests.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    dptree::entry()
        // Bare /authorize never reaches the Command parser, so catch it first
        .branch(authorize_usage_handler())
        .branch(command_handler(deps))
        .branch(plain_message_handler())
}

/// Handler for /authorize with the password argument missing
fn authorize_usage_handler() -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| {
            msg.text()
                .map(|text| {
                    let text = text.trim();
                    text == "/authorize" || (text.starts_with("/authorize@") && !text.contains(' '))
                })
                .unwrap_or(false)
        })
        .endpoint(|bot: Bot, msg: Message| async move {
            bot.send_message(msg.chat.id, AUTHORIZE_USAGE).await?;
            Ok(())
        })
}

/// Handler for bot commands (/start, /authorize, /getvideo, ...)
fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("Received command: {:?} from chat {}", cmd, msg.chat.id);

                match cmd {
                    Command::Start => handle_start(&bot, &msg).await?,
                    Command::Authorize(password) => handle_authorize(&bot, &msg, &deps, &password).await?,
                    Command::Getvideo => handle_get_video(&bot, &msg, &deps).await?,
                    Command::Subscribe => handle_subscribe(&bot, &msg, &deps).await?,
                    Command::Unsubscribe => handle_unsubscribe(&bot, &msg, &deps).await?,
                }
                Ok(())
            }
        },
    ))
}

/// Handler for anything that is not a recognized command
fn plain_message_handler() -> UpdateHandler<HandlerError> {
    Update::filter_message().endpoint(|bot: Bot, msg: Message| async move {
        if msg.text().is_some() {
            handle_plain_message(&bot, &msg).await?;
        }
        Ok(())
    })
}
