use std::sync::Arc;

use teloxide::prelude::*;

use crate::config::{Config, FORWARD_KEYWORDS};
use crate::services::replies::{self, ReplyRecord};
use crate::utils::logging::{log_reply_captured, log_reply_store_error};

/// Handles every text message that is not a recognized command: the reply is
/// persisted to the capture files and, when it contains a support keyword
/// and an admin chat is configured, forwarded there. The user gets no
/// response; the script does not converse.
pub async fn handle_general_message(
    bot: Bot,
    msg: Message,
    config: Arc<Config>,
) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    if text.starts_with('/') {
        // A slash message that didn't parse as a known command.
        bot.send_message(msg.chat.id, "Unknown command. Use /help to see what I understand.")
            .await?;
        return Ok(());
    }

    let Some(user) = msg.from() else {
        return Ok(());
    };
    let record = ReplyRecord {
        user_id: user.id.0,
        username: user.username.as_deref().unwrap_or("N/A"),
        text,
    };

    log_reply_captured(record.username, record.user_id, record.text);
    if let Err(err) = replies::record_reply(&config.logs_dir, &record).await {
        log_reply_store_error(record.user_id, &format!("{err:#}"));
    }

    if let Some(admin_chat_id) = config.admin_chat_id {
        if replies::keyword_match(text, FORWARD_KEYWORDS) {
            replies::forward_to_admin(&bot, admin_chat_id, &record).await;
        }
    }

    Ok(())
}
