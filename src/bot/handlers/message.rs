use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::commands::Command;
use crate::bot::flow::FlowDialogue;
use crate::config::Config;

/// Routes a parsed command to its handler.
pub async fn command_handler(
    bot: Bot,
    dialogue: FlowDialogue,
    msg: Message,
    cmd: Command,
    config: Arc<Config>,
) -> ResponseResult<()> {
    match cmd {
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
        }
        Command::Start => {
            crate::bot::commands::start::handle_start(bot, dialogue, msg, config).await?;
        }
    }
    Ok(())
}
