/// Telegram-backed delivery channel
pub mod channel;
/// Bot command definitions and handlers
pub mod commands;
/// Per-chat flow state and the scripted narrative
pub mod flow;
/// Update routing
pub mod handlers;
