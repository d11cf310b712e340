//! # Checkout Flow Module
//!
//! Turns a user's cart into an [`OrderSummary`] and resets the cart. The
//! summary is plain data; the bot layer formats it into the payment message
//! for the buyer and the notification for the administrator.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::cart::{cart_total, CartRegistry};
use crate::errors::{ShopError, ShopResult};
use crate::pricing::{format_amount, Price};
use crate::UserKey;

/// The person placing an order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Buyer {
    pub id: UserKey,
    pub username: Option<String>,
    pub full_name: String,
}

impl Buyer {
    /// `@username` when the buyer has one, otherwise the full name
    pub fn handle(&self) -> String {
        match &self.username {
            Some(username) => format!("@{username}"),
            None => self.full_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub name: String,
    pub price: Price,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub lines: Vec<OrderLine>,
    pub total: Decimal,
    pub buyer: Buyer,
    pub placed_at: DateTime<Utc>,
}

impl OrderSummary {
    pub fn formatted_total(&self) -> String {
        format_amount(self.total)
    }
}

/// Finalize the buyer's cart into an order
///
/// Fails with [`ShopError::EmptyCart`] when there is nothing to order, in
/// which case the cart is left untouched. The cart is cleared only after the
/// summary has been built.
pub fn checkout(carts: &CartRegistry, buyer: Buyer) -> ShopResult<OrderSummary> {
    let summary = carts.settle(buyer.id, |entries| {
        if entries.is_empty() {
            return Err(ShopError::EmptyCart);
        }

        let total = cart_total(entries);
        let lines = entries
            .iter()
            .map(|entry| OrderLine {
                name: entry.product.name.clone(),
                price: entry.product.price.clone(),
            })
            .collect();

        Ok(OrderSummary {
            lines,
            total,
            buyer,
            placed_at: Utc::now(),
        })
    })?;

    info!(
        user_id = summary.buyer.id,
        items = summary.lines.len(),
        total = %summary.formatted_total(),
        "Order placed"
    );
    Ok(summary)
}
