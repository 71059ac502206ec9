//! Capture of free-text user replies.
//!
//! The script never reacts to what the user types back, but every reply is
//! appended to a line-oriented log and a CSV file, and replies containing a
//! support keyword are forwarded to the admin chat when one is configured.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::warn;

use crate::utils::html::escape_html;
use crate::utils::logging::log_admin_forward;

/// Line-oriented reply log file name inside the logs directory.
pub const REPLY_LOGFILE: &str = "user_messages.log";
/// CSV reply file name inside the logs directory.
pub const REPLY_CSVFILE: &str = "user_inputs.csv";

const CSV_HEADER: &str = "timestamp_iso,user_id,username,message_text";

/// One captured reply, borrowed from the incoming update.
#[derive(Debug, Clone, Copy)]
pub struct ReplyRecord<'a> {
    /// Telegram user id of the sender.
    pub user_id: u64,
    /// Username, or `"N/A"` when the account has none.
    pub username: &'a str,
    /// The message text.
    pub text: &'a str,
}

/// Quotes one CSV field: wrapped in double quotes when it contains a comma,
/// quote, or line break, with embedded quotes doubled.
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// True when `text` contains any of the keywords, case-insensitively.
pub fn keyword_match(text: &str, keywords: &[&str]) -> bool {
    let lowered = text.to_lowercase();
    keywords.iter().any(|k| lowered.contains(&k.to_lowercase()))
}

/// Appends the reply to both capture files, creating the directory and the
/// CSV header on first use.
pub async fn record_reply(logs_dir: &Path, record: &ReplyRecord<'_>) -> Result<()> {
    fs::create_dir_all(logs_dir)
        .await
        .with_context(|| format!("creating logs directory {}", logs_dir.display()))?;

    let now = Utc::now();

    let log_path = logs_dir.join(REPLY_LOGFILE);
    let log_line = format!(
        "{} | UserID: {} | @{} | Message: {}\n",
        now.format("%Y-%m-%d %H:%M:%S UTC"),
        record.user_id,
        record.username,
        record.text
    );
    let mut log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .await
        .with_context(|| format!("opening {}", log_path.display()))?;
    log_file.write_all(log_line.as_bytes()).await?;
    log_file.flush().await?;

    let csv_path = logs_dir.join(REPLY_CSVFILE);
    let needs_header = match fs::metadata(&csv_path).await {
        Ok(meta) => meta.len() == 0,
        Err(_) => true,
    };
    let mut csv_row = String::new();
    if needs_header {
        csv_row.push_str(CSV_HEADER);
        csv_row.push('\n');
    }
    csv_row.push_str(&format!(
        "{},{},{},{}\n",
        now.to_rfc3339(),
        record.user_id,
        csv_field(record.username),
        csv_field(record.text)
    ));
    let mut csv_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&csv_path)
        .await
        .with_context(|| format!("opening {}", csv_path.display()))?;
    csv_file.write_all(csv_row.as_bytes()).await?;
    csv_file.flush().await?;

    Ok(())
}

/// Forwards a keyword-matching reply to the admin chat. Failures are logged
/// and swallowed, the user never sees them.
pub async fn forward_to_admin(bot: &Bot, admin_chat_id: i64, record: &ReplyRecord<'_>) {
    let text = format!(
        "📥 <b>User Message Alert</b> (keyword triggered)\n\n\
         👤 <b>User:</b> @{} (ID: <code>{}</code>)\n\n\
         💬 <b>Message:</b>\n<pre>{}</pre>",
        escape_html(record.username),
        record.user_id,
        escape_html(record.text)
    );

    match bot
        .send_message(ChatId(admin_chat_id), text)
        .parse_mode(ParseMode::Html)
        .await
    {
        Ok(_) => log_admin_forward(record.username, record.user_id, admin_chat_id),
        Err(err) => warn!(
            "failed to forward reply from user {} to admin chat {}: {}",
            record.user_id, admin_chat_id, err
        ),
    }
}
