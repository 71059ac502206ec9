use tracing::{error, info, warn};

/// Logs the start of a scripted flow with consistent format
pub fn log_flow_start(user: &str, user_id: u64, chat_id: i64) {
    info!("FLOW_START: /start by {}({}) in chat {}", user, user_id, chat_id);
}

/// Logs a mid-flow reset triggered by a repeated /start
pub fn log_flow_reset(user: &str, user_id: u64, chat_id: i64, state: &str) {
    info!(
        "FLOW_RESET: {}({}) re-sent /start in chat {} while {}",
        user, user_id, chat_id, state
    );
}

/// Logs flow completion with delivery counts
pub fn log_flow_finished(user: &str, user_id: u64, chat_id: i64, delivered: usize, failed: usize) {
    info!(
        "FLOW_DONE: {}({}) in chat {} - {} delivered, {} failed",
        user, user_id, chat_id, delivered, failed
    );
}

/// Logs a flow abandoned because the chat became unreachable
pub fn log_flow_aborted(user: &str, user_id: u64, chat_id: i64) {
    warn!(
        "FLOW_ABORTED: chat {} for {}({}) became invalid mid-script",
        chat_id, user, user_id
    );
}

/// Logs a captured free-text reply with a short preview
pub fn log_reply_captured(user: &str, user_id: u64, text: &str) {
    let preview: String = text.chars().take(70).collect();
    info!("REPLY_LOGGED: {}({}) - '{}'", user, user_id, preview);
}

/// Logs reply persistence failures with consistent format
pub fn log_reply_store_error(user_id: u64, error: &str) {
    error!("REPLY_STORE_ERROR: user {} - {}", user_id, error);
}

/// Logs a keyword-triggered forward to the admin chat
pub fn log_admin_forward(user: &str, user_id: u64, admin_chat_id: i64) {
    info!(
        "ADMIN_FORWARD: reply from {}({}) forwarded to admin chat {}",
        user, user_id, admin_chat_id
    );
}
