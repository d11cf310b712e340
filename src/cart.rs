//! # Cart Registry Module
//!
//! Per-user shopping carts kept in memory for the lifetime of the process.
//!
//! A cart is an ordered list of product copies. Quantity is modelled as
//! repetition: adding the same product twice yields two entries. A user who
//! never added anything has an empty cart, never a missing one.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::catalog::{Catalog, Product};
use crate::errors::{ShopError, ShopResult};
use crate::UserKey;

/// A product in a user's cart together with its position in that cart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartEntry {
    pub position: usize,
    pub product: Product,
}

/// Store of all carts, keyed by user
///
/// The registry exclusively owns cart contents; the catalog it copies
/// products from is shared and read-only.
#[derive(Debug)]
pub struct CartRegistry {
    catalog: Catalog,
    carts: Mutex<HashMap<UserKey, Vec<Product>>>,
}

impl CartRegistry {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            carts: Mutex::new(HashMap::new()),
        }
    }

    /// Append a copy of `catalog[product_index]` to the user's cart
    pub fn add(&self, user: UserKey, product_index: usize) -> ShopResult<CartEntry> {
        let product = self
            .catalog
            .get(product_index)
            .map_err(|_| ShopError::InvalidProduct { index: product_index })?
            .clone();

        let mut carts = self.carts();
        let cart = carts.entry(user).or_default();
        cart.push(product.clone());
        debug!(user_id = user, product_index, cart_size = cart.len(), "Added product to cart");

        Ok(CartEntry {
            position: cart.len() - 1,
            product,
        })
    }

    /// Remove the entry at `position` and return it
    pub fn remove(&self, user: UserKey, position: usize) -> ShopResult<CartEntry> {
        let mut carts = self.carts();
        let len = carts.get(&user).map_or(0, Vec::len);
        match carts.get_mut(&user) {
            Some(cart) if position < cart.len() => {
                let product = cart.remove(position);
                debug!(user_id = user, position, cart_size = cart.len(), "Removed product from cart");
                Ok(CartEntry { position, product })
            }
            _ => Err(ShopError::InvalidPosition { position, len }),
        }
    }

    /// Empty the user's cart; succeeds even when it is already empty
    pub fn clear(&self, user: UserKey) {
        if let Some(cart) = self.carts().get_mut(&user) {
            cart.clear();
        }
        debug!(user_id = user, "Cleared cart");
    }

    /// Snapshot of the user's cart in insertion order
    pub fn list(&self, user: UserKey) -> Vec<CartEntry> {
        self.carts()
            .get(&user)
            .map(|cart| entries(cart))
            .unwrap_or_default()
    }

    pub fn len(&self, user: UserKey) -> usize {
        self.carts().get(&user).map_or(0, Vec::len)
    }

    pub fn is_empty(&self, user: UserKey) -> bool {
        self.len(user) == 0
    }

    /// Sum of all readable prices in the user's cart
    pub fn total(&self, user: UserKey) -> Decimal {
        self.carts()
            .get(&user)
            .map(|cart| sum_prices(cart))
            .unwrap_or_default()
    }

    /// Run `order` on the cart under the registry lock and clear the cart
    /// only if `order` succeeds.
    pub(crate) fn settle<T>(
        &self,
        user: UserKey,
        order: impl FnOnce(&[CartEntry]) -> ShopResult<T>,
    ) -> ShopResult<T> {
        let mut carts = self.carts();
        let snapshot = carts.get(&user).map(|cart| entries(cart)).unwrap_or_default();
        let result = order(&snapshot)?;
        if let Some(cart) = carts.get_mut(&user) {
            cart.clear();
        }
        Ok(result)
    }

    fn carts(&self) -> MutexGuard<'_, HashMap<UserKey, Vec<Product>>> {
        self.carts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Sum the prices of cart entries
///
/// Prices that cannot be read contribute zero. Catalog files are authored
/// by hand and may hold text such as "ask" in a price cell; such entries
/// stay orderable and are priced by the administrator.
pub fn cart_total(entries: &[CartEntry]) -> Decimal {
    sum_prices(entries.iter().map(|entry| &entry.product))
}

fn sum_prices<'a>(products: impl IntoIterator<Item = &'a Product>) -> Decimal {
    products
        .into_iter()
        .map(|product| match product.price.amount() {
            Some(amount) => amount,
            None => {
                debug!(product = %product.name, price = %product.price, "Skipping unreadable price");
                Decimal::ZERO
            }
        })
        .sum()
}

fn entries(cart: &[Product]) -> Vec<CartEntry> {
    cart.iter()
        .enumerate()
        .map(|(position, product)| CartEntry {
            position,
            product: product.clone(),
        })
        .collect()
}
