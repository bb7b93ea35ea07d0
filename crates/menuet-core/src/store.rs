//! The state store owning the live menu, order, and tip state.
//!
//! Every mutator checks its preconditions and is a fail-closed no-op when
//! they do not hold: state is either fully updated or untouched, and a
//! rejected mutation is never an error. Successful mutations re-encode the
//! whole affected collection and write it through to storage, so persisted
//! state always matches in-memory state.

use tracing::debug;

use crate::codec;
use crate::error::Result;
use crate::model::{MenuItem, OrderLine, TipConfig, TipMode, is_valid_name};
use crate::storage::{
    KEY_AVAILABLE_MENU, KEY_ORDERS, KEY_SAVED_MENU_INDEX, KEY_TIP_CONFIG, Storage, saved_menu_key,
};

/// The central state manager for a Menuet session.
///
/// Owns the available menu, the consumed order lines, and the tip
/// configuration, plus the storage backend every mutation writes through to.
/// Single writer by construction; wrap the whole store in one mutex if it is
/// ever shared across threads.
pub struct MenuetStore<S: Storage> {
    pub(crate) storage: S,
    pub(crate) available: Vec<MenuItem>,
    pub(crate) orders: Vec<OrderLine>,
    pub(crate) tip: TipConfig,
}

impl<S: Storage> MenuetStore<S> {
    /// Creates a store with empty collections and the default tip
    /// configuration. Call [`resolve_startup`](crate::reconcile::resolve_startup)
    /// afterwards to seed it from persisted or inbound state.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            available: Vec::new(),
            orders: Vec::new(),
            tip: TipConfig::default(),
        }
    }

    /// The current available menu.
    pub fn available(&self) -> &[MenuItem] {
        &self.available
    }

    /// The current order lines.
    pub fn orders(&self) -> &[OrderLine] {
        &self.orders
    }

    /// The current tip configuration.
    pub fn tip_config(&self) -> &TipConfig {
        &self.tip
    }

    /// Consumes the store, returning the storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist_available(&mut self) -> Result<()> {
        let encoded = codec::encode_menu(&self.available);
        self.storage.set(KEY_AVAILABLE_MENU, &encoded)
    }

    fn persist_orders(&mut self) -> Result<()> {
        let encoded = codec::encode_orders(&self.orders);
        self.storage.set(KEY_ORDERS, &encoded)
    }

    fn persist_tip(&mut self) -> Result<()> {
        let encoded = codec::encode_tip(&self.tip);
        self.storage.set(KEY_TIP_CONFIG, &encoded)
    }

    // ------------------------------------------------------------------
    // Available menu
    // ------------------------------------------------------------------

    /// Appends a new item to the available menu.
    ///
    /// No-op if the name is empty, contains a reserved character or newline,
    /// the price is NaN, or an item with the same name already exists
    /// (case-sensitive).
    pub fn add_available_item(&mut self, name: &str, price: f64) -> Result<()> {
        if !is_valid_name(name) {
            debug!(name, "rejected menu item: invalid name");
            return Ok(());
        }
        if price.is_nan() {
            debug!(name, "rejected menu item: price is NaN");
            return Ok(());
        }
        if self.available.iter().any(|item| item.name == name) {
            debug!(name, "rejected menu item: name already on the menu");
            return Ok(());
        }
        self.available.push(MenuItem {
            name: name.to_string(),
            price,
        });
        self.persist_available()
    }

    /// Removes the named item from the available menu and cascades to any
    /// matching order line: the table cannot owe for an item that is no
    /// longer on the menu.
    pub fn remove_available_item(&mut self, name: &str) -> Result<()> {
        if !self.available.iter().any(|item| item.name == name) {
            return Ok(());
        }
        self.available.retain(|item| item.name != name);
        self.orders.retain(|line| line.name != name);
        self.persist_available()?;
        self.persist_orders()
    }

    /// Replaces the available menu wholesale, e.g. when loading a saved menu
    /// or adopting a shared payload. Items are expected to come from the
    /// codec or from validated mutations.
    pub fn set_available(&mut self, items: Vec<MenuItem>) -> Result<()> {
        self.available = items;
        self.persist_available()
    }

    /// The current menu encoded as an opaque shareable payload, suitable for
    /// a link parameter or QR code. Decoding it on the receiving side goes
    /// through the reconciler like any other inbound payload.
    pub fn share_payload(&self) -> String {
        codec::encode_menu(&self.available)
    }

    // ------------------------------------------------------------------
    // Order lines
    // ------------------------------------------------------------------

    /// Appends a fresh order line with amount 1, even when a line for the
    /// same name already exists. The scan-to-add flow depends on this
    /// duplicate-creating behavior; interactive callers that want merge
    /// semantics use [`increment_order_line`](Self::increment_order_line).
    pub fn add_order_line(&mut self, name: &str, price: f64) -> Result<()> {
        if !is_valid_name(name) {
            debug!(name, "rejected order line: invalid name");
            return Ok(());
        }
        if price.is_nan() {
            debug!(name, "rejected order line: price is NaN");
            return Ok(());
        }
        self.orders.push(OrderLine {
            name: name.to_string(),
            price,
            amount: 1,
        });
        self.persist_orders()
    }

    /// Bumps the amount of the named line by one, creating it with amount 1
    /// if it does not exist. No-op on invalid name or NaN price.
    pub fn increment_order_line(&mut self, name: &str, price: f64) -> Result<()> {
        if !is_valid_name(name) {
            debug!(name, "rejected order increment: invalid name");
            return Ok(());
        }
        if price.is_nan() {
            debug!(name, "rejected order increment: price is NaN");
            return Ok(());
        }
        match self.orders.iter_mut().find(|line| line.name == name) {
            Some(line) => line.amount += 1,
            None => self.orders.push(OrderLine {
                name: name.to_string(),
                price,
                amount: 1,
            }),
        }
        self.persist_orders()
    }

    /// Drops the amount of the named line by one, removing the line when its
    /// amount is 1. No-op if no matching line exists.
    pub fn decrement_order_line(&mut self, name: &str) -> Result<()> {
        let Some(index) = self.orders.iter().position(|line| line.name == name) else {
            return Ok(());
        };
        if self.orders[index].amount == 1 {
            self.orders.remove(index);
        } else {
            self.orders[index].amount -= 1;
        }
        self.persist_orders()
    }

    /// Removes the named line outright, whatever its amount.
    pub fn remove_order_line(&mut self, name: &str) -> Result<()> {
        let Some(index) = self.orders.iter().position(|line| line.name == name) else {
            return Ok(());
        };
        self.orders.remove(index);
        self.persist_orders()
    }

    /// Empties the order collection, e.g. when switching menus.
    pub fn clear_orders(&mut self) -> Result<()> {
        self.orders.clear();
        self.persist_orders()
    }

    // ------------------------------------------------------------------
    // Tip configuration
    // ------------------------------------------------------------------

    /// Overwrites the tip value.
    pub fn set_tip(&mut self, value: f64) -> Result<()> {
        self.tip.tip = value;
        self.persist_tip()
    }

    /// Overwrites the tip interpretation mode.
    pub fn set_tip_mode(&mut self, mode: TipMode) -> Result<()> {
        self.tip.mode = mode;
        self.persist_tip()
    }

    /// Overwrites the rounding unit. Non-positive or non-finite units clamp
    /// to 1 so the tip calculator never sees an unusable unit.
    pub fn set_rounding_unit(&mut self, unit: f64) -> Result<()> {
        self.tip.rounding_unit = if unit.is_finite() && unit > 0.0 {
            unit
        } else {
            1.0
        };
        self.persist_tip()
    }

    // ------------------------------------------------------------------
    // Saved menus
    // ------------------------------------------------------------------

    /// Names of all saved-menu snapshots, in the order they were saved.
    pub fn saved_menu_names(&self) -> Vec<String> {
        match self.storage.get(KEY_SAVED_MENU_INDEX) {
            Some(index) => index
                .split('|')
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Snapshots the current available menu under `name`, overwriting any
    /// snapshot with the same name. No-op if the name is empty or contains
    /// the index separator `|`.
    pub fn save_menu(&mut self, name: &str) -> Result<()> {
        if name.is_empty() || name.contains('|') {
            debug!(name, "rejected saved-menu name");
            return Ok(());
        }
        let mut names = self.saved_menu_names();
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_string());
            self.storage.set(KEY_SAVED_MENU_INDEX, &names.join("|"))?;
        }
        let encoded = codec::encode_menu(&self.available);
        self.storage.set(&saved_menu_key(name), &encoded)
    }

    /// Replaces the available menu with the named snapshot and clears the
    /// orders. No-op if no such snapshot exists.
    pub fn load_saved_menu(&mut self, name: &str) -> Result<()> {
        let Some(encoded) = self.storage.get(&saved_menu_key(name)) else {
            debug!(name, "no saved menu under that name");
            return Ok(());
        };
        self.set_available(codec::decode_menu(&encoded))?;
        self.clear_orders()
    }

    /// Removes the named snapshot and its index entry.
    pub fn delete_saved_menu(&mut self, name: &str) -> Result<()> {
        let names: Vec<String> = self
            .saved_menu_names()
            .into_iter()
            .filter(|existing| existing != name)
            .collect();
        self.storage.set(KEY_SAVED_MENU_INDEX, &names.join("|"))?;
        self.storage.remove(&saved_menu_key(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn store() -> MenuetStore<MemoryStorage> {
        MenuetStore::new(MemoryStorage::new())
    }

    #[test]
    fn test_add_available_item() {
        let mut store = store();
        store.add_available_item("Soup", 4.5).unwrap();
        assert_eq!(store.available().len(), 1);
        // Persisted on the spot.
        assert_eq!(
            store.storage.get(KEY_AVAILABLE_MENU),
            Some("Soup|4.5".to_string())
        );
    }

    #[test]
    fn test_add_available_item_rejects_invalid_input() {
        let mut store = store();
        store.add_available_item("", 1.0).unwrap();
        store.add_available_item("a|b", 1.0).unwrap();
        store.add_available_item("a~b", 1.0).unwrap();
        store.add_available_item("a\nb", 1.0).unwrap();
        store.add_available_item("ok", f64::NAN).unwrap();
        assert!(store.available().is_empty());
        // Rejected mutations never touch storage.
        assert_eq!(store.storage.get(KEY_AVAILABLE_MENU), None);
    }

    #[test]
    fn test_add_available_item_rejects_duplicate_name() {
        let mut store = store();
        store.add_available_item("Soup", 4.5).unwrap();
        store.add_available_item("Soup", 9.9).unwrap();
        assert_eq!(store.available().len(), 1);
        assert_eq!(store.available()[0].price, 4.5);
    }

    #[test]
    fn test_remove_available_item_cascades_to_orders() {
        let mut store = store();
        store.add_available_item("a", 1.0).unwrap();
        store.add_available_item("b", 2.0).unwrap();
        store.increment_order_line("a", 1.0).unwrap();
        store.increment_order_line("a", 1.0).unwrap();
        store.increment_order_line("a", 1.0).unwrap();

        store.remove_available_item("a").unwrap();

        assert_eq!(store.available().len(), 1);
        assert_eq!(store.available()[0].name, "b");
        assert!(store.orders().is_empty());
        assert_eq!(store.storage.get(KEY_ORDERS), Some(String::new()));
    }

    #[test]
    fn test_add_order_line_creates_duplicates() {
        let mut store = store();
        store.add_order_line("Beer", 3.5).unwrap();
        store.add_order_line("Beer", 3.5).unwrap();
        // Two independent lines, by design.
        assert_eq!(store.orders().len(), 2);
        assert!(store.orders().iter().all(|line| line.amount == 1));
    }

    #[test]
    fn test_increment_order_line_merges() {
        let mut store = store();
        store.increment_order_line("Beer", 3.5).unwrap();
        store.increment_order_line("Beer", 3.5).unwrap();
        assert_eq!(store.orders().len(), 1);
        assert_eq!(store.orders()[0].amount, 2);
    }

    #[test]
    fn test_decrement_removes_line_at_amount_one() {
        let mut store = store();
        store.increment_order_line("Beer", 3.5).unwrap();
        store.increment_order_line("Beer", 3.5).unwrap();

        store.decrement_order_line("Beer").unwrap();
        assert_eq!(store.orders()[0].amount, 1);

        store.decrement_order_line("Beer").unwrap();
        assert!(store.orders().is_empty());
    }

    #[test]
    fn test_decrement_missing_line_is_a_noop() {
        let mut store = store();
        store.decrement_order_line("ghost").unwrap();
        assert!(store.orders().is_empty());
        assert_eq!(store.storage.get(KEY_ORDERS), None);
    }

    #[test]
    fn test_remove_order_line() {
        let mut store = store();
        store.increment_order_line("Beer", 3.5).unwrap();
        store.increment_order_line("Beer", 3.5).unwrap();
        store.remove_order_line("Beer").unwrap();
        assert!(store.orders().is_empty());
    }

    #[test]
    fn test_tip_mutators_persist_whole_config() {
        let mut store = store();
        store.set_tip(15.0).unwrap();
        assert_eq!(store.storage.get(KEY_TIP_CONFIG), Some("15~1~p".to_string()));

        store.set_tip_mode(TipMode::Fixed).unwrap();
        assert_eq!(store.storage.get(KEY_TIP_CONFIG), Some("15~1~f".to_string()));

        store.set_rounding_unit(5.0).unwrap();
        assert_eq!(store.storage.get(KEY_TIP_CONFIG), Some("15~5~f".to_string()));
    }

    #[test]
    fn test_rounding_unit_clamps_to_one() {
        let mut store = store();
        store.set_rounding_unit(0.0).unwrap();
        assert_eq!(store.tip_config().rounding_unit, 1.0);
        store.set_rounding_unit(-2.0).unwrap();
        assert_eq!(store.tip_config().rounding_unit, 1.0);
        store.set_rounding_unit(f64::NAN).unwrap();
        assert_eq!(store.tip_config().rounding_unit, 1.0);
    }

    #[test]
    fn test_save_and_load_menu_snapshot() {
        let mut store = store();
        store.add_available_item("Soup", 4.5).unwrap();
        store.save_menu("usual place").unwrap();

        store.add_available_item("Bread", 2.0).unwrap();
        store.increment_order_line("Bread", 2.0).unwrap();

        store.load_saved_menu("usual place").unwrap();
        assert_eq!(store.available().len(), 1);
        assert_eq!(store.available()[0].name, "Soup");
        // Loading a menu clears the running order.
        assert!(store.orders().is_empty());
    }

    #[test]
    fn test_saved_menu_index_maintenance() {
        let mut store = store();
        store.add_available_item("Soup", 4.5).unwrap();
        store.save_menu("first").unwrap();
        store.save_menu("second").unwrap();
        assert_eq!(store.saved_menu_names(), vec!["first", "second"]);

        // Re-saving an existing name does not duplicate the index entry.
        store.save_menu("first").unwrap();
        assert_eq!(store.saved_menu_names(), vec!["first", "second"]);

        store.delete_saved_menu("first").unwrap();
        assert_eq!(store.saved_menu_names(), vec!["second"]);
        assert_eq!(store.storage.get(&saved_menu_key("first")), None);
    }

    #[test]
    fn test_save_menu_rejects_bad_names() {
        let mut store = store();
        store.save_menu("").unwrap();
        store.save_menu("a|b").unwrap();
        assert!(store.saved_menu_names().is_empty());
    }

    #[test]
    fn test_load_missing_snapshot_is_a_noop() {
        let mut store = store();
        store.add_available_item("Soup", 4.5).unwrap();
        store.increment_order_line("Soup", 4.5).unwrap();
        store.load_saved_menu("ghost").unwrap();
        assert_eq!(store.available().len(), 1);
        assert_eq!(store.orders().len(), 1);
    }

    #[test]
    fn test_share_payload_round_trips_through_codec() {
        let mut store = store();
        store.add_available_item("Pad Thai", 11.9).unwrap();
        store.add_available_item("Beer", 3.5).unwrap();
        let payload = store.share_payload();
        assert_eq!(crate::codec::decode_menu(&payload), store.available());
    }
}
