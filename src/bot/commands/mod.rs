/// The /start flow entry point
pub mod start;

use teloxide::utils::command::BotCommands;

/// Commands the bot understands.
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Z1-Gray node console commands:")]
pub enum Command {
    /// Prints the command list.
    #[command(description = "Display this help message")]
    Help,
    /// Runs (or restarts) the diagnostic script for this chat.
    #[command(description = "Initiate the Z1-Gray node diagnostic")]
    Start,
}
