//! # Z1-Gray Flow Bot Main Entry Point
//!
//! Initializes logging, loads configuration, and runs the Telegram bot:
//! webhook transport in production, long polling in development.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use z1_gray_bot::bot::flow::FlowState;
use z1_gray_bot::bot::handlers::BotHandler;
use z1_gray_bot::config::{AppEnv, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "z1_gray_bot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Arc::new(Config::from_env()?);

    info!("Starting Z1-Gray flow bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - env: {:?}, admin forwarding: {}, logs dir: {}",
        config.app_env,
        config.admin_chat_id.is_some(),
        config.logs_dir.display()
    );

    let bot = Bot::new(&config.telegram_bot_token);
    let handler = BotHandler::new(config.clone());
    let storage = InMemStorage::<FlowState>::new();

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler.schema())
        .dependencies(dptree::deps![storage])
        .enable_ctrlc_handler()
        .build();

    match config.app_env {
        AppEnv::Production => {
            let base = config
                .webhook_url
                .clone()
                .ok_or_else(|| anyhow!("WEBHOOK_URL missing in production"))?;
            let url = format!("{}/webhook", base.trim_end_matches('/'))
                .parse()
                .map_err(|e| anyhow!("Invalid WEBHOOK_URL: {e}"))?;
            let addr = ([0, 0, 0, 0], config.webhook_port).into();

            info!("Production mode: webhook listener on port {}", config.webhook_port);
            let listener = webhooks::axum(bot, webhooks::Options::new(addr, url))
                .await
                .map_err(|e| anyhow!("Failed to set up webhook listener: {e}"))?;
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("Webhook listener error"),
                )
                .await;
        }
        AppEnv::Development => {
            info!("Development mode: clearing any webhook, then polling");
            if let Err(err) = bot.delete_webhook().drop_pending_updates(true).await {
                warn!("Could not delete webhook (often fine in dev): {}", err);
            }
            dispatcher.dispatch().await;
        }
    }

    info!("Application stopped");
    Ok(())
}
