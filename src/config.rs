//! # Bot Configuration Module
//!
//! Settings are read from the environment (optionally seeded from a `.env`
//! file). Only a malformed administrator id is fatal; everything else has a
//! usable default so the bot can start in dry-run mode for local previews.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use teloxide::types::ChatId;

pub const DEFAULT_CATALOG_PATH: &str = "data/products.json";
pub const DEFAULT_IMAGES_DIR: &str = "images";
pub const DEFAULT_CARD_NUMBER: &str = "не указан";
/// Token value shipped in sample configs; treated as "not configured"
pub const PLACEHOLDER_TOKEN: &str = "YOUR_BOT_TOKEN_HERE";

/// Runtime configuration for the storefront bot
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram token; `None` runs the bot in dry-run mode
    pub bot_token: Option<String>,
    /// Chat receiving order notifications
    pub admin_id: Option<ChatId>,
    /// Card number shown in payment instructions
    pub card_number: String,
    /// JSON or CSV catalog source
    pub catalog_path: PathBuf,
    /// Directory holding product photos
    pub images_dir: PathBuf,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            admin_id: None,
            card_number: DEFAULT_CARD_NUMBER.to_string(),
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
        }
    }
}

impl BotConfig {
    /// Build the configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bot_token = non_empty("TELEGRAM_BOT_TOKEN").filter(|token| token != PLACEHOLDER_TOKEN);

        let admin_id = non_empty("ADMIN_ID")
            .map(|raw| {
                raw.parse::<i64>()
                    .map(ChatId)
                    .with_context(|| format!("ADMIN_ID must be a numeric chat id, got {raw:?}"))
            })
            .transpose()?;

        Ok(Self {
            bot_token,
            admin_id,
            card_number: non_empty("CARD_NUMBER").unwrap_or(defaults.card_number),
            catalog_path: non_empty("CATALOG_PATH").map(PathBuf::from).unwrap_or(defaults.catalog_path),
            images_dir: non_empty("IMAGES_DIR").map(PathBuf::from).unwrap_or(defaults.images_dir),
        })
    }

    pub fn is_dry_run(&self) -> bool {
        self.bot_token.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = BotConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.is_dry_run());
        assert_eq!(config.admin_id, None);
        assert_eq!(config.catalog_path, PathBuf::from(DEFAULT_CATALOG_PATH));
        assert_eq!(config.card_number, DEFAULT_CARD_NUMBER);
    }

    #[test]
    fn test_placeholder_token_is_dry_run() {
        let config = BotConfig::from_lookup(lookup(&[("TELEGRAM_BOT_TOKEN", PLACEHOLDER_TOKEN)])).unwrap();
        assert!(config.is_dry_run());
    }

    #[test]
    fn test_reads_all_values() {
        let config = BotConfig::from_lookup(lookup(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("ADMIN_ID", "42"),
            ("CARD_NUMBER", "2200 0000 0000 0000"),
            ("CATALOG_PATH", "data/products.csv"),
        ]))
        .unwrap();
        assert_eq!(config.bot_token.as_deref(), Some("123:abc"));
        assert_eq!(config.admin_id, Some(ChatId(42)));
        assert_eq!(config.card_number, "2200 0000 0000 0000");
        assert_eq!(config.catalog_path, PathBuf::from("data/products.csv"));
    }

    #[test]
    fn test_malformed_admin_id_is_an_error() {
        assert!(BotConfig::from_lookup(lookup(&[("ADMIN_ID", "admin")])).is_err());
    }
}
