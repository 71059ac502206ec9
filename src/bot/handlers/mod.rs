/// Non-command text messages (reply capture)
pub mod general_message;
/// Command routing
pub mod message;

use std::sync::Arc;

use teloxide::{
    dispatching::{dialogue, UpdateHandler},
    prelude::*,
};

use crate::bot::flow::FlowState;
use crate::config::Config;

/// Builds the update-handler graph for the dispatcher.
pub struct BotHandler {
    /// Shared runtime configuration.
    pub config: Arc<Config>,
}

impl BotHandler {
    /// Creates the handler with its shared configuration.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// The dptree schema: dialogue entry, then the command branch, then the
    /// catch-all text branch for reply capture.
    pub fn schema(&self) -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
        use teloxide::dispatching::UpdateFilterExt;

        let config = self.config.clone();
        let config_text = self.config.clone();

        dialogue::enter::<Update, teloxide::dispatching::dialogue::InMemStorage<FlowState>, FlowState, _>()
            .branch(
                Update::filter_message()
                    .filter_command::<crate::bot::commands::Command>()
                    .endpoint(move |bot, dialogue, msg, cmd| {
                        let config = config.clone();
                        async move {
                            message::command_handler(bot, dialogue, msg, cmd, config)
                                .await
                                .map_err(Into::into)
                        }
                    }),
            )
            .branch(Update::filter_message().endpoint(move |bot, msg| {
                let config = config_text.clone();
                async move {
                    general_message::handle_general_message(bot, msg, config)
                        .await
                        .map_err(Into::into)
                }
            }))
    }
}
