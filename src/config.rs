use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;

/// Default unlock link presented on the step C button.
pub const DEFAULT_UNLOCK_URL: &str = "https://syncprotocol.gumroad.com/l/ENTRY_SYNC_49";

/// Replies containing any of these (case-insensitive) are forwarded to the
/// admin chat when one is configured.
pub const FORWARD_KEYWORDS: &[&str] = &[
    "help",
    "issue",
    "stuck",
    "error",
    "question",
    "support",
    "bug",
    "feedback",
    "problem",
    "agent",
    "contact",
    "assistance",
    "trouble",
    "confused",
    "dont understand",
    "don't understand",
    "how to",
    "howto",
];

/// Deployment environment, selects webhook vs. polling transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    /// Local runs: long polling, webhook cleared on startup.
    Development,
    /// Hosted runs: webhook listener behind an HTTPS base URL.
    Production,
}

/// Runtime configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot API token.
    pub telegram_bot_token: String,
    /// Deployment environment.
    pub app_env: AppEnv,
    /// Public HTTPS base URL for the webhook (required in production).
    pub webhook_url: Option<String>,
    /// Local port the webhook listener binds to.
    pub webhook_port: u16,
    /// Salt mixed into the per-user node id.
    pub id_salt: String,
    /// Admin chat for keyword-triggered reply forwarding.
    pub admin_chat_id: Option<i64>,
    /// Unlock link presented on the step C button.
    pub unlock_url: String,
    /// Directory for reply capture files.
    pub logs_dir: PathBuf,
}

impl Config {
    /// Reads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let app_env = match env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_lowercase()
            .as_str()
        {
            "production" => AppEnv::Production,
            _ => AppEnv::Development,
        };

        let webhook_url = env::var("WEBHOOK_URL").ok().filter(|v| !v.trim().is_empty());
        if app_env == AppEnv::Production {
            match &webhook_url {
                None => return Err(anyhow!("WEBHOOK_URL must be set in production")),
                Some(url) if !url.starts_with("https://") => {
                    return Err(anyhow!("WEBHOOK_URL must be an HTTPS URL in production"));
                }
                Some(_) => {}
            }
        }

        let port_str = env::var("WEBHOOK_PORT").unwrap_or_else(|_| "8443".to_string());
        let webhook_port = port_str
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid WEBHOOK_PORT"))?;

        let id_salt = env::var("ID_SALT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "z1-gray-dev-salt".to_string());

        let admin_chat_id = match env::var("ADMIN_CHAT_ID") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse()
                    .map_err(|_| anyhow!("ADMIN_CHAT_ID must be a numeric chat id"))?,
            ),
            _ => None,
        };

        let unlock_url = env::var("UNLOCK_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_UNLOCK_URL.to_string());

        let logs_dir = env::var("LOGS_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from("./logs"), PathBuf::from);

        Ok(Config {
            telegram_bot_token: token,
            app_env,
            webhook_url,
            webhook_port,
            id_salt,
            admin_chat_id,
            unlock_url,
            logs_dir,
        })
    }
}
