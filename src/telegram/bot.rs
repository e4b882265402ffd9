//! Bot initialization and command definitions

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::core::{config, Config};

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "start and see the welcome message")]
    Start,
    #[command(description = "authorize yourself")]
    Authorize(String),
    #[command(description = "send a 30-second video")]
    Getvideo,
    #[command(description = "subscribe to meal-time videos")]
    Subscribe,
    #[command(description = "unsubscribe from meal-time videos")]
    Unsubscribe,
}

/// Creates a Bot instance from the loaded config.
///
/// Honors a BOT_API_URL environment variable for a local Bot API server and
/// applies an explicit request timeout — video uploads from the Pi take a
/// while.
///
/// # Errors
/// Invalid BOT_API_URL or a client build failure.
pub fn create_bot(app_config: &Config) -> anyhow::Result<Bot> {
    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    let bot = Bot::with_client(app_config.bot_token.clone(), client);

    let bot = if let Ok(bot_api_url) = std::env::var("BOT_API_URL") {
        log::info!("Using custom Bot API URL: {}", bot_api_url);
        let url = url::Url::parse(&bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
        bot.set_api_url(url)
    } else {
        bot
    };

    Ok(bot)
}

/// Registers the command list with Telegram for discoverability.
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    use teloxide::types::BotCommand;

    bot.set_my_commands(vec![
        BotCommand::new("getvideo", "Send a 30-second video"),
        BotCommand::new("subscribe", "Subscribe to meal-time videos"),
        BotCommand::new("unsubscribe", "Unsubscribe from meal-time videos"),
        BotCommand::new("authorize", "Authorize yourself"),
        BotCommand::new("start", "Start and see the welcome message"),
    ])
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_with_lowercase_names() {
        let cmd = Command::parse("/getvideo", "mealcam_bot").expect("parses");
        assert_eq!(cmd, Command::Getvideo);

        let cmd = Command::parse("/subscribe", "mealcam_bot").expect("parses");
        assert_eq!(cmd, Command::Subscribe);
    }

    #[test]
    fn authorize_captures_the_password_argument() {
        let cmd = Command::parse("/authorize hunter2", "mealcam_bot").expect("parses");
        assert_eq!(cmd, Command::Authorize("hunter2".to_string()));
    }

    #[test]
    fn command_descriptions_list_every_command() {
        let descriptions = Command::descriptions().to_string();
        for name in ["start", "authorize", "getvideo", "subscribe", "unsubscribe"] {
            assert!(descriptions.contains(name), "missing {} in {}", name, descriptions);
        }
    }
}
