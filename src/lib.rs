//! # Boutique Telegram Bot
//!
//! A Telegram storefront for a perfume boutique: users browse a product
//! catalog, collect items in a cart and place orders that notify an
//! administrator.
//!
//! The shop core (catalog, navigation, carts, checkout) is plain data and
//! knows nothing about Telegram; the [`bot`] module is the transport layer.

pub mod bot;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod errors;
pub mod localization;
pub mod navigator;
pub mod pricing;

/// Identity of a shop user (the Telegram user id in the bot)
pub type UserKey = u64;

pub use cart::{CartEntry, CartRegistry};
pub use catalog::{Catalog, Product};
pub use checkout::{checkout, Buyer, OrderLine, OrderSummary};
pub use errors::{ShopError, ShopResult};
pub use navigator::SessionNavigator;
