//! # Session Navigator Tests
//!
//! Tests for the bounded per-user catalog cursor.

use boutique::catalog::{Catalog, Product};
use boutique::errors::ShopError;
use boutique::navigator::SessionNavigator;

#[cfg(test)]
mod tests {
    use super::*;

    const USER: u64 = 7;

    fn setup_navigator(len: usize) -> SessionNavigator {
        let products = (0..len)
            .map(|i| Product::new(format!("Perfume {}", i + 1), "1000"))
            .collect();
        SessionNavigator::new(Catalog::new(products))
    }

    /// Test that a new user starts at the first product
    #[test]
    fn test_new_user_starts_at_zero() {
        let navigator = setup_navigator(3);
        assert_eq!(navigator.current(USER), 0);
    }

    /// Test advancing through the catalog
    #[test]
    fn test_advance_increments() {
        let navigator = setup_navigator(3);

        assert_eq!(navigator.advance(USER), Ok(1));
        assert_eq!(navigator.advance(USER), Ok(2));
        assert_eq!(navigator.current(USER), 2);
    }

    /// Test that advancing past the last product fails without moving
    #[test]
    fn test_advance_at_end() {
        let navigator = setup_navigator(2);
        navigator.advance(USER).unwrap();

        assert_eq!(navigator.advance(USER), Err(ShopError::AtEnd));
        assert_eq!(navigator.current(USER), 1);
    }

    /// Test that a single-product catalog cannot advance
    #[test]
    fn test_advance_single_product() {
        let navigator = setup_navigator(1);
        assert_eq!(navigator.advance(USER), Err(ShopError::AtEnd));
        assert_eq!(navigator.current(USER), 0);
    }

    /// Test that an empty catalog cannot advance
    #[test]
    fn test_advance_empty_catalog() {
        let navigator = setup_navigator(0);
        assert_eq!(navigator.advance(USER), Err(ShopError::AtEnd));
    }

    /// Test that retreating from the first product fails
    #[test]
    fn test_retreat_at_start() {
        let navigator = setup_navigator(3);

        assert_eq!(navigator.retreat(USER), Err(ShopError::AtStart));
        assert_eq!(navigator.current(USER), 0);
    }

    /// Test advance followed by retreat
    #[test]
    fn test_retreat_decrements() {
        let navigator = setup_navigator(3);
        navigator.advance(USER).unwrap();
        navigator.advance(USER).unwrap();

        assert_eq!(navigator.retreat(USER), Ok(1));
        assert_eq!(navigator.current(USER), 1);
    }

    /// Test jumping to an explicit index
    #[test]
    fn test_jump_within_bounds() {
        let navigator = setup_navigator(5);

        assert_eq!(navigator.jump(USER, 4), Ok(4));
        assert_eq!(navigator.current(USER), 4);
        assert_eq!(navigator.advance(USER), Err(ShopError::AtEnd));
    }

    /// Test that jumping outside the catalog leaves the cursor alone
    #[test]
    fn test_jump_out_of_range() {
        let navigator = setup_navigator(2);
        navigator.advance(USER).unwrap();

        assert_eq!(
            navigator.jump(USER, 2),
            Err(ShopError::NotFound { index: 2, len: 2 })
        );
        assert_eq!(navigator.current(USER), 1);
    }

    /// Test that reset returns to the first product
    #[test]
    fn test_reset() {
        let navigator = setup_navigator(3);
        navigator.jump(USER, 2).unwrap();

        navigator.reset(USER);
        assert_eq!(navigator.current(USER), 0);
    }

    /// Test that cursors are tracked per user
    #[test]
    fn test_cursors_are_per_user() {
        let navigator = setup_navigator(3);
        navigator.advance(USER).unwrap();

        assert_eq!(navigator.current(USER), 1);
        assert_eq!(navigator.current(USER + 1), 0);
    }
}
