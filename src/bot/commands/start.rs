//! `/start`: run the scripted diagnostic flow for one chat.

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::warn;

use crate::bot::channel::TelegramChannel;
use crate::bot::flow::{script, FlowDialogue, FlowEvent, FlowState};
use crate::config::Config;
use crate::utils::logging::{
    log_flow_aborted, log_flow_finished, log_flow_reset, log_flow_start,
};

/// Drives the whole script for the chat that sent `/start`. A `/start` while
/// a flow is in flight announces a reset and replays the script from the top
/// with fresh identifiers.
pub async fn handle_start(
    bot: Bot,
    dialogue: FlowDialogue,
    msg: Message,
    config: Arc<Config>,
) -> ResponseResult<()> {
    let chat_id = msg.chat.id;
    let Some(user) = msg.from() else {
        warn!("/start in chat {} without a sender, ignoring", chat_id.0);
        return Ok(());
    };
    let user_id = user.id.0;
    let username = user.username.as_deref().unwrap_or("unknown");

    let state = dialogue.get().await.ok().flatten().unwrap_or_default();
    if state.in_flight() {
        log_flow_reset(username, user_id, chat_id.0, state.name());
        bot.send_message(chat_id, "🔄 System reset. Re-initiating Z1-Gray protocol...")
            .await?;
    }

    log_flow_start(username, user_id, chat_id.0);
    let active = state.on(FlowEvent::ScriptStarted);
    update_state(&dialogue, active).await;

    let ids = script::ScriptIds::generate(user_id, &config.id_salt);
    let channel = TelegramChannel::new(bot);
    let report = script::run_script(&channel, chat_id, &ids, &config.unlock_url).await;

    if report.target_lost {
        log_flow_aborted(username, user_id, chat_id.0);
        update_state(&dialogue, FlowState::Idle).await;
        return Ok(());
    }

    log_flow_finished(username, user_id, chat_id.0, report.delivered, report.failed);
    update_state(&dialogue, active.on(FlowEvent::LinkPresented)).await;
    Ok(())
}

async fn update_state(dialogue: &FlowDialogue, state: FlowState) {
    if let Err(err) = dialogue.update(state).await {
        warn!("failed to persist flow state {}: {}", state.name(), err);
    }
}
