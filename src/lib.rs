//! # Z1-Gray Flow Bot
//!
//! A Telegram bot that performs a fixed, theatrically paced "system
//! diagnostic" script. `/start` triggers three timed message batches ending
//! in an unlock link; free-text replies are captured to disk and optionally
//! forwarded to an admin chat.
//!
//! ## Features
//! - Timed message sequencing with typing-indicator simulation
//! - Per-item failure containment (one dropped line never kills the script)
//! - Fabricated node/slot/key identifiers, stable per user where shown twice
//! - Reply capture to a log file and a CSV, keyword forwarding to an admin
//! - Webhook transport in production, polling in development

/// Telegram wiring: channel adapter, commands, flow, update routing
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// The message sequencer and reply capture
pub mod services;
/// Utility functions for identifiers, HTML escaping, and logging
pub mod utils;
