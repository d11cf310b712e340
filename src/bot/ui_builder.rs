//! UI Builder module for creating keyboards and formatting messages

use std::path::{Path, PathBuf};

use anyhow::Result;
use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

// Import localization
use crate::localization::{t, t_args};

use crate::cart::CartEntry;
use crate::catalog::{Catalog, Product};
use crate::checkout::OrderSummary;
use crate::pricing::format_amount;
use rust_decimal::Decimal;

/// Entries of the reply keyboard main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Catalog,
    PriceList,
    Cart,
    Payment,
    Contact,
    Exit,
}

impl MenuAction {
    const ALL: [MenuAction; 6] = [
        MenuAction::Catalog,
        MenuAction::PriceList,
        MenuAction::Cart,
        MenuAction::Payment,
        MenuAction::Contact,
        MenuAction::Exit,
    ];

    fn message_key(self) -> &'static str {
        match self {
            MenuAction::Catalog => "menu-catalog",
            MenuAction::PriceList => "menu-price-list",
            MenuAction::Cart => "menu-cart",
            MenuAction::Payment => "menu-payment",
            MenuAction::Contact => "menu-contact",
            MenuAction::Exit => "menu-exit",
        }
    }

    pub fn label(self) -> String {
        t(self.message_key())
    }

    /// Match the text of a pressed reply-keyboard button
    pub fn from_text(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL.into_iter().find(|action| action.label() == text)
    }
}

/// Create the two-column main menu reply keyboard
pub fn main_menu_keyboard() -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = MenuAction::ALL
        .chunks(2)
        .map(|pair| pair.iter().map(|action| KeyboardButton::new(action.label())).collect())
        .collect();

    KeyboardMarkup::new(rows).resize_keyboard()
}

/// Caption shown under a product photo
pub fn format_product_caption(product: &Product, catalog_len: usize) -> String {
    format!(
        "🌸 {}\n{}\n\n{}",
        product.name,
        t_args("product-price", &[("price", product.price.to_string().as_str())]),
        t_args(
            "product-position",
            &[
                ("position", (product.index + 1).to_string().as_str()),
                ("count", catalog_len.to_string().as_str()),
            ]
        )
    )
}

/// Inline keyboard under a product card: add to cart, then navigation
///
/// Previous/next buttons are only offered where a move is possible.
pub fn create_product_keyboard(index: usize, catalog_len: usize) -> InlineKeyboardMarkup {
    let mut navigation = Vec::new();
    if index > 0 {
        navigation.push(InlineKeyboardButton::callback(t("button-prev"), "prev"));
    }
    navigation.push(InlineKeyboardButton::callback(t("button-back-to-menu"), "menu"));
    if index + 1 < catalog_len {
        navigation.push(InlineKeyboardButton::callback(t("button-next"), "next"));
    }

    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            t("button-add-to-cart"),
            format!("add:{}", index),
        )],
        navigation,
    ])
}

/// Local photo for a product, if the catalog names one that exists on disk
pub fn product_image_path(images_dir: &Path, product: &Product) -> Option<PathBuf> {
    let image = product.image.as_deref()?;
    let path = images_dir.join(image);
    path.is_file().then_some(path)
}

/// Numbered price list of the whole catalog
pub fn format_price_list(catalog: &Catalog) -> String {
    let lines: Vec<String> = catalog
        .products()
        .iter()
        .map(|product| format!("{}. {} — {} ₽", product.index + 1, product.name, product.price))
        .collect();

    format!("{}\n{}", t("price-list-title"), lines.join("\n"))
}

/// One button per product opening its card
pub fn create_price_list_keyboard(catalog: &Catalog) -> InlineKeyboardMarkup {
    let buttons = catalog
        .products()
        .iter()
        .map(|product| {
            vec![InlineKeyboardButton::callback(
                format!("{}. {}", product.index + 1, truncate_label(&product.name)),
                format!("nav:{}", product.index),
            )]
        })
        .collect::<Vec<_>>();

    InlineKeyboardMarkup::new(buttons)
}

/// Format the cart as a numbered list followed by its total
pub fn format_cart(entries: &[CartEntry], total: Decimal) -> String {
    let lines: Vec<String> = entries
        .iter()
        .map(|entry| {
            format!(
                "{}. {} — {} ₽",
                entry.position + 1,
                entry.product.name,
                entry.product.price
            )
        })
        .collect();

    format!(
        "{}\n{}\n\n{}",
        t("cart-title"),
        lines.join("\n"),
        t_args("cart-total", &[("total", format_amount(total).as_str())])
    )
}

/// Create inline keyboard for the cart: a delete button per entry, then checkout and clear
pub fn create_cart_keyboard(entries: &[CartEntry]) -> InlineKeyboardMarkup {
    let mut buttons: Vec<Vec<InlineKeyboardButton>> = entries
        .iter()
        .map(|entry| {
            let position = (entry.position + 1).to_string();
            vec![InlineKeyboardButton::callback(
                t_args("button-remove", &[("position", position.as_str())]),
                format!("del:{}", entry.position),
            )]
        })
        .collect();

    buttons.push(vec![InlineKeyboardButton::callback(t("button-checkout"), "checkout")]);
    buttons.push(vec![InlineKeyboardButton::callback(t("button-clear"), "clear")]);

    InlineKeyboardMarkup::new(buttons)
}

/// Payment instructions sent to the buyer after checkout
pub fn format_payment_request(summary: &OrderSummary, card_number: &str) -> String {
    t_args(
        "payment-request",
        &[("total", summary.formatted_total().as_str()), ("card", card_number)],
    )
}

/// Order notification sent to the administrator
pub fn format_admin_order(summary: &OrderSummary) -> String {
    let lines: Vec<String> = summary
        .lines
        .iter()
        .map(|line| format!(" - {} — {} ₽", line.name, line.price))
        .collect();

    format!(
        "{}\n{}\n{}",
        t_args("admin-new-order", &[("buyer", summary.buyer.handle().as_str())]),
        lines.join("\n"),
        t_args("cart-total", &[("total", summary.formatted_total().as_str())])
    )
}

/// Inline URL button opening a private chat with the administrator
pub fn create_contact_keyboard(admin_id: ChatId) -> Result<InlineKeyboardMarkup> {
    let link = format!("tg://user?id={}", admin_id.0);
    Ok(InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::url(
        t("contact-button"),
        link.parse()?,
    )]]))
}

fn truncate_label(label: &str) -> String {
    // Truncate if too long for button
    if label.chars().count() > 30 {
        format!("{}...", label.chars().take(27).collect::<String>())
    } else {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_label_counts_characters() {
        let long = "Я".repeat(40);
        let truncated = truncate_label(&long);
        assert_eq!(truncated.chars().count(), 30);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_label("Oud"), "Oud");
    }
}
