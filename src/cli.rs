use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mealcam")]
#[command(author, version, about = "Telegram bot for a Raspberry Pi camera", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (command dispatcher + meal-time scheduler)
    Run,

    /// Record one clip, convert it, send it to every subscribed chat and exit
    Broadcast,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
