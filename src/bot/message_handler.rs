//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{InputFile, KeyboardRemove};
use tracing::{debug, info, warn};

// Import localization
use crate::localization::{t, t_args};

use super::Shop;
use crate::UserKey;

// Import UI builder functions
use super::ui_builder::{
    create_cart_keyboard, create_contact_keyboard, create_price_list_keyboard,
    create_product_keyboard, format_cart, format_price_list, format_product_caption,
    main_menu_keyboard, product_image_path, MenuAction,
};

/// Handle text messages: `/start` and the reply-keyboard main menu
pub async fn message_handler(bot: Bot, msg: Message, shop: Shop) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let Some(user) = msg.from.as_ref().map(|from| from.id.0) else {
        return Ok(());
    };
    let chat_id = msg.chat.id;

    debug!(user_id = user, text = %text, "Received message from user");

    if is_start_command(text) {
        shop.navigator.reset(user);
        bot.send_message(chat_id, t("welcome"))
            .reply_markup(main_menu_keyboard())
            .await?;
        return Ok(());
    }

    match MenuAction::from_text(text) {
        Some(MenuAction::Catalog) => {
            if shop.catalog.is_empty() {
                bot.send_message(chat_id, t("catalog-empty")).await?;
                return Ok(());
            }
            shop.navigator.reset(user);
            send_product(&bot, chat_id, &shop, shop.navigator.current(user)).await?;
        }
        Some(MenuAction::PriceList) => {
            if shop.catalog.is_empty() {
                bot.send_message(chat_id, t("price-list-empty")).await?;
                return Ok(());
            }
            bot.send_message(chat_id, format_price_list(&shop.catalog))
                .reply_markup(create_price_list_keyboard(&shop.catalog))
                .await?;
        }
        Some(MenuAction::Cart) => {
            send_cart(&bot, chat_id, &shop, user).await?;
        }
        Some(MenuAction::Payment) => {
            bot.send_message(
                chat_id,
                t_args("payment-info", &[("card", shop.config.card_number.as_str())]),
            )
            .await?;
        }
        Some(MenuAction::Contact) => match shop.config.admin_id {
            Some(admin_id) => {
                bot.send_message(chat_id, t("contact-title"))
                    .reply_markup(create_contact_keyboard(admin_id)?)
                    .await?;
            }
            None => {
                warn!(user_id = user, "Contact requested but ADMIN_ID is not configured");
                bot.send_message(chat_id, t("contact-unavailable")).await?;
            }
        },
        Some(MenuAction::Exit) => {
            bot.send_message(chat_id, t("exit"))
                .reply_markup(KeyboardRemove::new())
                .await?;
        }
        None => {
            bot.send_message(chat_id, t("unknown-command")).await?;
        }
    }

    Ok(())
}

/// Whether `text` is `/start`, optionally addressed as `/start@botname` or with a payload
pub fn is_start_command(text: &str) -> bool {
    text.split_whitespace()
        .next()
        .and_then(|command| command.split('@').next())
        .is_some_and(|command| command == "/start")
}

/// Show the product card at `index`, with its photo when one is available
pub async fn send_product(bot: &Bot, chat_id: ChatId, shop: &Shop, index: usize) -> Result<()> {
    let product = match shop.catalog.get(index) {
        Ok(product) => product,
        Err(e) => {
            warn!(chat_id = chat_id.0, error = %e, "Requested product is not in the catalog");
            bot.send_message(chat_id, t("product-unavailable")).await?;
            return Ok(());
        }
    };

    let caption = format_product_caption(product, shop.catalog.len());
    let keyboard = create_product_keyboard(index, shop.catalog.len());

    if let Some(path) = product_image_path(&shop.config.images_dir, product) {
        match bot
            .send_photo(chat_id, InputFile::file(&path))
            .caption(caption.clone())
            .reply_markup(keyboard.clone())
            .await
        {
            Ok(_) => return Ok(()),
            // Fall back to a text card below
            Err(e) => warn!(chat_id = chat_id.0, path = %path.display(), error = %e, "Failed to send product photo"),
        }
    }

    bot.send_message(chat_id, caption)
        .reply_markup(keyboard)
        .await?;
    Ok(())
}

/// Show the user's cart with per-entry delete buttons
pub async fn send_cart(bot: &Bot, chat_id: ChatId, shop: &Shop, user: UserKey) -> Result<()> {
    let entries = shop.carts.list(user);
    if entries.is_empty() {
        bot.send_message(chat_id, t("cart-empty")).await?;
        return Ok(());
    }

    let total = shop.carts.total(user);
    info!(user_id = user, items = entries.len(), "Showing cart");
    bot.send_message(chat_id, format_cart(&entries, total))
        .reply_markup(create_cart_keyboard(&entries))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_command_variants() {
        assert!(is_start_command("/start"));
        assert!(is_start_command("/start@boutique_bot"));
        assert!(is_start_command("/start promo"));
        assert!(!is_start_command("/started"));
        assert!(!is_start_command("start"));
        assert!(!is_start_command(""));
    }
}
