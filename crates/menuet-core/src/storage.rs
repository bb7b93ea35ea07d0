//! Storage abstraction: a flat, durable map from string keys to encoded text.

use std::collections::HashMap;

use crate::error::Result;

/// Key holding the current available-menu collection.
pub const KEY_AVAILABLE_MENU: &str = "available-menu";
/// Key holding the current order-line collection.
pub const KEY_ORDERS: &str = "orders";
/// Key holding the current tip configuration.
pub const KEY_TIP_CONFIG: &str = "tip-config";
/// Key holding the `|`-joined list of saved-menu names.
pub const KEY_SAVED_MENU_INDEX: &str = "saved-menu-index";

/// Key holding one named saved-menu snapshot.
pub fn saved_menu_key(name: &str) -> String {
    format!("saved-menu:{name}")
}

/// A string-keyed store for encoded state, durable across restarts.
///
/// The three live session pieces plus saved-menu snapshots each live under
/// their own key; there is no single session object. Implementations only
/// move opaque strings around; all encoding and validation stays in the
/// [`codec`](crate::codec) and the store.
pub trait Storage {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes the value under `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory storage backend, used in tests and by embedders that manage
/// durability themselves.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
