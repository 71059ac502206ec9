//! Telegram implementation of the sequencer's delivery channel.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatAction, InlineKeyboardButton, InlineKeyboardMarkup, ParseMode};
use teloxide::{ApiError, RequestError};

use crate::services::sequencer::{
    DeliveryChannel, DeliveryError, MessageFormat, MessageRef, TimedMessage,
};

/// [`DeliveryChannel`] backed by the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramChannel {
    bot: Bot,
}

impl TelegramChannel {
    /// Wraps a bot client. The channel holds no other state.
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

/// Maps a Bot API failure onto the sequencer's error taxonomy. Rate limits
/// and transport errors are worth noting but not fatal; a blocked bot or a
/// vanished chat means nothing further can be delivered there.
fn classify(err: RequestError) -> DeliveryError {
    match &err {
        RequestError::Api(api) => match api {
            ApiError::BotBlocked | ApiError::ChatNotFound | ApiError::UserDeactivated => {
                DeliveryError::TargetInvalid(err.to_string())
            }
            _ => DeliveryError::Unexpected(err.to_string()),
        },
        RequestError::RetryAfter(_) | RequestError::Network(_) | RequestError::Io(_) => {
            DeliveryError::Recoverable(err.to_string())
        }
        _ => DeliveryError::Unexpected(err.to_string()),
    }
}

#[async_trait]
impl DeliveryChannel for TelegramChannel {
    async fn send_typing(&self, target: ChatId) -> Result<(), DeliveryError> {
        self.bot
            .send_chat_action(target, ChatAction::Typing)
            .await
            .map(|_| ())
            .map_err(classify)
    }

    async fn send_message(
        &self,
        target: ChatId,
        message: &TimedMessage,
    ) -> Result<MessageRef, DeliveryError> {
        let mut request = self.bot.send_message(target, message.text.clone());
        if message.formatting == MessageFormat::Html {
            request = request.parse_mode(ParseMode::Html);
        }
        if let Some(action) = &message.action {
            let url = url::Url::parse(&action.url)
                .map_err(|e| DeliveryError::Unexpected(format!("bad action url: {e}")))?;
            let keyboard =
                InlineKeyboardMarkup::new([[InlineKeyboardButton::url(action.label.clone(), url)]]);
            request = request.reply_markup(keyboard);
        }

        let sent = request.await.map_err(classify)?;
        Ok(MessageRef(sent.id.0))
    }
}
