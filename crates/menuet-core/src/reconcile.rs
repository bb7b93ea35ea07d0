//! Startup source reconciliation.
//!
//! Exactly once per session start, decides which candidate source seeds the
//! store: an inbound shared-menu payload, the persisted session, or a fresh
//! start. The decision to discard an existing session in favor of an inbound
//! payload goes through an injected [`OverwriteGate`], so the core never
//! prompts anyone itself.

use tracing::debug;

use crate::codec;
use crate::error::Result;
use crate::storage::{KEY_AVAILABLE_MENU, KEY_ORDERS, KEY_TIP_CONFIG, Storage};
use crate::store::MenuetStore;

/// One-shot decision capability consulted before an inbound payload is
/// allowed to discard a persisted session.
///
/// Consulted at most once per startup resolution, and only when both an
/// inbound payload and a persisted session exist. Tip configuration is
/// never behind this gate.
pub trait OverwriteGate {
    /// Returns true to discard the persisted menu and orders in favor of
    /// the inbound payload, false to keep the persisted session.
    fn confirm_discard_session(&self) -> bool;
}

/// Seeds the store from the winning source.
///
/// 1. The persisted tip configuration is loaded first, independently of the
///    menu branch; a malformed record leaves the defaults in place.
/// 2. An inbound payload is adopted directly when no persisted session
///    exists, and otherwise only when the gate confirms; adoption replaces
///    the available menu and clears the orders, both persisted.
/// 3. Otherwise the persisted menu and orders are loaded independently;
///    either may be absent.
///
/// The inbound payload is consumed by this call; the caller must not offer
/// it again on the next startup (its transient channel is cleared by the
/// shell that delivered it).
pub fn resolve_startup<S: Storage>(
    store: &mut MenuetStore<S>,
    inbound: Option<&str>,
    gate: &dyn OverwriteGate,
) -> Result<()> {
    if let Some(encoded) = store.storage.get(KEY_TIP_CONFIG) {
        match codec::decode_tip(&encoded) {
            Some(tip) => store.tip = tip,
            None => debug!("ignoring malformed persisted tip configuration"),
        }
    }

    if let Some(payload) = inbound {
        // An empty persisted string counts as no session: there is nothing
        // worth confirming over.
        let has_session = [KEY_AVAILABLE_MENU, KEY_ORDERS]
            .into_iter()
            .any(|key| store.storage.get(key).is_some_and(|value| !value.is_empty()));
        if !has_session || gate.confirm_discard_session() {
            debug!("adopting inbound menu payload");
            store.set_available(codec::decode_menu(payload))?;
            return store.clear_orders();
        }
        debug!("inbound menu payload declined, keeping persisted session");
    }

    if let Some(encoded) = store.storage.get(KEY_AVAILABLE_MENU) {
        store.available = codec::decode_menu(&encoded);
    }
    if let Some(encoded) = store.storage.get(KEY_ORDERS) {
        store.orders = codec::decode_orders(&encoded);
    }
    Ok(())
}
