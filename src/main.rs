mod commands;
mod config;
mod format;
mod platform;
mod posts;
mod router;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::router::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,postbot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Event handlers run on spawned tasks; a panicking handler kills only
    // its task, but route the report through tracing so it isn't lost.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        tracing::error!("Unhandled panic: {panic_info}");
        default_hook(panic_info);
    }));

    // Load configuration from the environment
    let config = Config::from_env()?;

    info!("Configuration loaded successfully");
    info!("  Posts API: {}", config.posts.api_url);
    match config.discord.guild_id {
        Some(id) => info!("  Command scope: guild {id}"),
        None => info!("  Command scope: global"),
    }

    // Run the Discord bot
    info!("Bot is starting...");
    let state = Arc::new(AppState::new(config));
    platform::discord::run(state).await?;

    Ok(())
}
