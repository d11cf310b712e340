use anyhow::Result;
use teloxide::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use boutique::bot::{self, Shop};
use boutique::catalog;
use boutique::config::BotConfig;
use boutique::localization::init_localization;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Boutique Telegram Bot");

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = BotConfig::from_env()?;
    init_localization()?;

    info!(path = %config.catalog_path.display(), "Loading catalog");
    let catalog = catalog::load(&config.catalog_path);
    if catalog.is_empty() {
        warn!("Catalog is empty, users will see an empty storefront");
    }
    if config.admin_id.is_none() {
        warn!("ADMIN_ID not set, orders will not be forwarded to an administrator");
    }

    let Some(token) = config.bot_token.clone() else {
        warn!("TELEGRAM_BOT_TOKEN not configured; running in dry mode (no Telegram)");
        tokio::signal::ctrl_c().await?;
        return Ok(());
    };

    let shop = Shop::new(catalog, config);
    bot::run(Bot::new(token), shop).await;

    Ok(())
}
