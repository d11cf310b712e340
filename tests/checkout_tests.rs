//! # Checkout Flow Tests
//!
//! Tests for turning a cart into an order summary.

use boutique::cart::CartRegistry;
use boutique::catalog::{Catalog, Product};
use boutique::checkout::{checkout, Buyer};
use boutique::errors::ShopError;
use boutique::pricing::Price;
use rust_decimal::Decimal;

#[cfg(test)]
mod tests {
    use super::*;

    fn buyer(id: u64) -> Buyer {
        Buyer {
            id,
            username: Some("anna".to_string()),
            full_name: "Anna Petrova".to_string(),
        }
    }

    fn setup_registry() -> CartRegistry {
        CartRegistry::new(Catalog::new(vec![
            Product::new("Rose", "1000"),
            Product::new("Oud", "1500"),
            Product::new("Private blend", "ask"),
        ]))
    }

    /// Test the Rose + Oud scenario end to end
    #[test]
    fn test_checkout_two_products() {
        let registry = setup_registry();
        registry.add(1, 0).unwrap();
        registry.add(1, 1).unwrap();
        assert_eq!(registry.total(1), Decimal::from(2500));

        let summary = checkout(&registry, buyer(1)).unwrap();

        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.lines[0].name, "Rose");
        assert_eq!(summary.lines[0].price, Price::from("1000"));
        assert_eq!(summary.lines[1].name, "Oud");
        assert_eq!(summary.total, Decimal::from(2500));
        assert_eq!(summary.formatted_total(), "2500");
        assert_eq!(summary.buyer.id, 1);
        assert!(registry.list(1).is_empty());
    }

    /// Test that checkout of an empty cart fails
    #[test]
    fn test_checkout_new_user_is_empty_cart() {
        let registry = setup_registry();

        assert_eq!(checkout(&registry, buyer(42)), Err(ShopError::EmptyCart));
        assert!(registry.list(42).is_empty());
    }

    /// Test that a cleared cart cannot be checked out twice
    #[test]
    fn test_second_checkout_fails() {
        let registry = setup_registry();
        registry.add(1, 0).unwrap();

        checkout(&registry, buyer(1)).unwrap();
        assert_eq!(checkout(&registry, buyer(1)), Err(ShopError::EmptyCart));
    }

    /// Test that products without a readable price are still ordered
    #[test]
    fn test_checkout_keeps_unpriced_lines() {
        let registry = setup_registry();
        registry.add(1, 2).unwrap();
        registry.add(1, 0).unwrap();

        let summary = checkout(&registry, buyer(1)).unwrap();

        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.lines[0].price, Price::from("ask"));
        assert_eq!(summary.total, Decimal::from(1000));
    }

    /// Test that checkout only clears the buyer's own cart
    #[test]
    fn test_checkout_leaves_other_carts() {
        let registry = setup_registry();
        registry.add(1, 0).unwrap();
        registry.add(2, 1).unwrap();

        checkout(&registry, buyer(1)).unwrap();

        assert_eq!(registry.len(2), 1);
    }

    /// Test buyer handle formatting
    #[test]
    fn test_buyer_handle() {
        assert_eq!(buyer(1).handle(), "@anna");

        let anonymous = Buyer {
            id: 2,
            username: None,
            full_name: "Ivan Ivanov".to_string(),
        };
        assert_eq!(anonymous.handle(), "Ivan Ivanov");
    }
}
