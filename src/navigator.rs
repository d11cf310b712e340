//! # Session Navigator Module
//!
//! Tracks which catalog product each user is looking at while browsing with
//! the previous/next buttons. The cursor is bounded to `[0, len-1]` and only
//! moves when a move succeeds.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::catalog::Catalog;
use crate::errors::{ShopError, ShopResult};
use crate::UserKey;

/// Bounded per-user cursor over a shared catalog
///
/// Users without a stored cursor are at index 0. The map itself sits behind a
/// mutex so events for different users may be handled in parallel.
#[derive(Debug)]
pub struct SessionNavigator {
    catalog: Catalog,
    cursors: Mutex<HashMap<UserKey, usize>>,
}

impl SessionNavigator {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            cursors: Mutex::new(HashMap::new()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Index the user is currently viewing
    pub fn current(&self, user: UserKey) -> usize {
        self.cursors().get(&user).copied().unwrap_or(0)
    }

    /// Move to the next product
    pub fn advance(&self, user: UserKey) -> ShopResult<usize> {
        let mut cursors = self.cursors();
        let index = cursors.get(&user).copied().unwrap_or(0);
        if index + 1 >= self.catalog.len() {
            return Err(ShopError::AtEnd);
        }

        let next = index + 1;
        cursors.insert(user, next);
        debug!(user_id = user, index = next, "Advanced catalog cursor");
        Ok(next)
    }

    /// Move to the previous product
    pub fn retreat(&self, user: UserKey) -> ShopResult<usize> {
        let mut cursors = self.cursors();
        let index = cursors.get(&user).copied().unwrap_or(0);
        if index == 0 {
            return Err(ShopError::AtStart);
        }

        let previous = index - 1;
        cursors.insert(user, previous);
        debug!(user_id = user, index = previous, "Retreated catalog cursor");
        Ok(previous)
    }

    /// Move straight to `index`, as carried by an inline navigation button
    pub fn jump(&self, user: UserKey, index: usize) -> ShopResult<usize> {
        self.catalog.get(index)?;
        self.cursors().insert(user, index);
        debug!(user_id = user, index, "Moved catalog cursor");
        Ok(index)
    }

    /// Go back to the first product
    pub fn reset(&self, user: UserKey) {
        self.cursors().remove(&user);
    }

    fn cursors(&self) -> MutexGuard<'_, HashMap<UserKey, usize>> {
        self.cursors.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
