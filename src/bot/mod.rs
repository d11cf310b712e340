//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `message_handler`: Handles the main menu and text commands
//! - `callback_handler`: Handles inline keyboard callback queries
//! - `ui_builder`: Creates keyboards and formats messages

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::{info, warn};

use crate::cart::CartRegistry;
use crate::catalog::Catalog;
use crate::config::BotConfig;
use crate::navigator::SessionNavigator;

pub mod callback_handler;
pub mod message_handler;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::message_handler;

/// Shared shop state injected into every handler
#[derive(Clone)]
pub struct Shop {
    pub catalog: Catalog,
    pub carts: Arc<CartRegistry>,
    pub navigator: Arc<SessionNavigator>,
    pub config: Arc<BotConfig>,
}

impl Shop {
    pub fn new(catalog: Catalog, config: BotConfig) -> Self {
        Self {
            carts: Arc::new(CartRegistry::new(catalog.clone())),
            navigator: Arc::new(SessionNavigator::new(catalog.clone())),
            catalog,
            config: Arc::new(config),
        }
    }
}

/// Run the dispatcher until Ctrl-C
///
/// A single callback endpoint is registered so every callback query is
/// handled exactly once.
pub async fn run(bot: Bot, shop: Shop) {
    info!(products = shop.catalog.len(), "Bot initialized, starting dispatcher");

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(message_handler))
        .branch(Update::filter_callback_query().endpoint(callback_handler));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![shop])
        .default_handler(|upd| async move {
            warn!(update = ?upd.kind, "Unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
