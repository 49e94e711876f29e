use std::sync::Arc;

use teloxide::prelude::*;
use tracing_subscriber::EnvFilter;

mod audio;
mod bot;
mod config;
mod effects;
mod error;
mod token;

use config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("🎙 Starting voice effects bot...");

    // Load config; a missing bot token is fatal here.
    let config = AppConfig::from_env()?;
    tracing::info!(
        "Config loaded. ffmpeg: {}, transform timeout: {}s",
        config.ffmpeg_path,
        config.transform_timeout_secs
    );

    // Build shared application state
    let state = Arc::new(bot::AppState {
        transformer: audio::Transformer::new(&config),
        config,
    });

    // Create the Telegram bot
    let tg_bot = Bot::new(&state.config.telegram_bot_token);

    // Drop any stale webhook and the pending update backlog; old callback
    // presses may reference messages from a previous run.
    tg_bot.delete_webhook().drop_pending_updates(true).await?;

    // Build the dispatcher
    let handler = bot::build_handler();

    Dispatcher::builder(tg_bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
