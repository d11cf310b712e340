//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, ChatId, MessageId, User};
use tracing::{debug, error, info, warn};

// Import localization
use crate::localization::{t, t_args};

use crate::checkout::{checkout, Buyer, OrderSummary};
use crate::config::BotConfig;
use crate::errors::ShopError;
use crate::UserKey;

use super::message_handler::{send_cart, send_product};
use super::ui_builder::{format_admin_order, format_payment_request, main_menu_keyboard};
use super::Shop;

/// Decoded `callback_data` of the shop's inline buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    /// `add:<index>`: put a catalog product in the cart
    Add(usize),
    /// `nav:<index>`: open the product card at an index
    Jump(usize),
    Prev,
    Next,
    Menu,
    /// `del:<position>`: remove a cart entry
    Remove(usize),
    Clear,
    Checkout,
    Unknown,
}

impl CallbackAction {
    pub fn parse(data: &str) -> Self {
        let indexed = |prefix: &str| data.strip_prefix(prefix).and_then(|raw| raw.parse::<usize>().ok());

        if let Some(index) = indexed("add:") {
            CallbackAction::Add(index)
        } else if let Some(index) = indexed("nav:") {
            CallbackAction::Jump(index)
        } else if let Some(position) = indexed("del:") {
            CallbackAction::Remove(position)
        } else {
            match data {
                "prev" => CallbackAction::Prev,
                "next" => CallbackAction::Next,
                "menu" => CallbackAction::Menu,
                "clear" => CallbackAction::Clear,
                "checkout" => CallbackAction::Checkout,
                _ => CallbackAction::Unknown,
            }
        }
    }
}

/// Toast shown in reply to a callback query
#[derive(Debug, Default)]
struct Notice {
    text: Option<String>,
    alert: bool,
}

impl Notice {
    fn toast(text: String) -> Self {
        Self { text: Some(text), alert: false }
    }

    fn alert(text: String) -> Self {
        Self { text: Some(text), alert: true }
    }
}

/// Handle callback queries from inline keyboards
pub async fn callback_handler(bot: Bot, q: CallbackQuery, shop: Shop) -> Result<()> {
    let user = q.from.id.0;
    let action = CallbackAction::parse(q.data.as_deref().unwrap_or(""));
    debug!(user_id = user, action = ?action, "Received callback query from user");

    let notice = match &q.message {
        Some(msg) => {
            let origin = Origin {
                chat_id: msg.chat().id,
                message_id: msg.id(),
            };
            apply_action(&bot, &shop, buyer_from_user(&q.from), origin, action).await
        }
        // Buttons on messages we can no longer see: only stateless actions make sense
        None => match action {
            CallbackAction::Add(index) => match shop.carts.add(user, index) {
                Ok(_) => Notice::toast(t("added-to-cart")),
                Err(_) => Notice::toast(t("product-unavailable")),
            },
            _ => Notice::default(),
        },
    };

    // Answer the callback query to remove the loading state
    let mut answer = bot.answer_callback_query(q.id);
    if let Some(text) = notice.text {
        answer = answer.text(text);
    }
    if notice.alert {
        answer = answer.show_alert(true);
    }
    answer.await?;

    Ok(())
}

/// Message carrying the pressed button
#[derive(Debug, Clone, Copy)]
struct Origin {
    chat_id: ChatId,
    message_id: MessageId,
}

/// Perform one callback action; send failures are logged so the query is always answered
async fn apply_action(bot: &Bot, shop: &Shop, buyer: Buyer, origin: Origin, action: CallbackAction) -> Notice {
    let user = buyer.id;
    let chat_id = origin.chat_id;

    match action {
        CallbackAction::Add(index) => match shop.carts.add(user, index) {
            Ok(_) => Notice::toast(t("added-to-cart")),
            Err(e) => {
                warn!(user_id = user, error = %e, "Rejected add to cart");
                Notice::toast(t("product-unavailable"))
            }
        },
        CallbackAction::Jump(index) => match shop.navigator.jump(user, index) {
            Ok(index) => {
                show_product(bot, shop, user, chat_id, index).await;
                Notice::default()
            }
            Err(_) => Notice::toast(t("product-unavailable")),
        },
        CallbackAction::Prev => match shop.navigator.retreat(user) {
            Ok(index) => {
                show_product(bot, shop, user, chat_id, index).await;
                Notice::default()
            }
            Err(_) => Notice::toast(t("at-start")),
        },
        CallbackAction::Next => match shop.navigator.advance(user) {
            Ok(index) => {
                show_product(bot, shop, user, chat_id, index).await;
                Notice::default()
            }
            Err(_) => Notice::toast(t("at-end")),
        },
        CallbackAction::Menu => {
            if let Err(e) = bot.delete_message(chat_id, origin.message_id).await {
                debug!(user_id = user, error = %e, "Could not delete product card");
            }
            if let Err(e) = bot
                .send_message(chat_id, t("back-to-menu"))
                .reply_markup(main_menu_keyboard())
                .await
            {
                error!(user_id = user, error = %e, "Failed to send main menu");
            }
            Notice::default()
        }
        CallbackAction::Remove(position) => {
            let notice = match shop.carts.remove(user, position) {
                Ok(removed) => Notice::toast(t_args(
                    "removed-from-cart",
                    &[("name", removed.product.name.as_str())],
                )),
                Err(e) => {
                    warn!(user_id = user, error = %e, "Rejected cart removal");
                    Notice::toast(t("invalid-position"))
                }
            };

            // Re-show the cart in place of the outdated one
            if let Err(e) = bot.delete_message(chat_id, origin.message_id).await {
                debug!(user_id = user, error = %e, "Could not delete outdated cart");
            }
            if let Err(e) = send_cart(bot, chat_id, shop, user).await {
                error!(user_id = user, error = %e, "Failed to send cart");
            }
            notice
        }
        CallbackAction::Clear => {
            shop.carts.clear(user);
            if let Err(e) = bot.edit_message_text(chat_id, origin.message_id, t("cart-cleared")).await {
                error!(user_id = user, error = %e, "Failed to edit message after clearing cart");
            }
            Notice::default()
        }
        CallbackAction::Checkout => match checkout(&shop.carts, buyer) {
            Ok(summary) => {
                deliver_order(bot, &summary, chat_id, &shop.config).await;
                Notice::toast(t("order-placed"))
            }
            Err(ShopError::EmptyCart) => Notice::alert(t("checkout-empty")),
            Err(e) => {
                error!(user_id = user, error = %e, "Checkout failed");
                Notice::alert(t("checkout-empty"))
            }
        },
        CallbackAction::Unknown => Notice::default(),
    }
}

async fn show_product(bot: &Bot, shop: &Shop, user: UserKey, chat_id: ChatId, index: usize) {
    if let Err(e) = send_product(bot, chat_id, shop, index).await {
        error!(user_id = user, index, error = %e, "Failed to send product card");
    }
}

fn buyer_from_user(user: &User) -> Buyer {
    Buyer {
        id: user.id.0,
        username: user.username.clone(),
        full_name: user.full_name(),
    }
}

/// Messages announcing a placed order, in send order
///
/// The administrator comes first: the cart is already settled, so the order
/// must reach the shop even if the buyer's chat cannot be written to.
pub fn order_deliveries(summary: &OrderSummary, buyer_chat: ChatId, config: &BotConfig) -> Vec<(ChatId, String)> {
    let mut deliveries = Vec::with_capacity(2);
    if let Some(admin_id) = config.admin_id {
        deliveries.push((admin_id, format_admin_order(summary)));
    }
    deliveries.push((buyer_chat, format_payment_request(summary, &config.card_number)));
    deliveries
}

/// Send every order message; failures are logged, not returned
async fn deliver_order(bot: &Bot, summary: &OrderSummary, buyer_chat: ChatId, config: &BotConfig) {
    if config.admin_id.is_none() {
        warn!(user_id = summary.buyer.id, "ADMIN_ID is not configured, order notification skipped");
    }

    for (chat_id, text) in order_deliveries(summary, buyer_chat, config) {
        match bot.send_message(chat_id, text).await {
            Ok(_) => info!(user_id = summary.buyer.id, chat_id = chat_id.0, "Order message delivered"),
            Err(e) => error!(
                user_id = summary.buyer.id,
                chat_id = chat_id.0,
                buyer = %summary.buyer.handle(),
                items = summary.lines.len(),
                total = %summary.formatted_total(),
                error = %e,
                "Failed to deliver order message"
            ),
        }
    }
}
