//! Core state layer for Menuet: a shared menu, the items a table has
//! consumed, and a tip configuration, serialized to compact delimited text
//! for persistence and for shareable payloads.
//!
//! The pieces, leaf first:
//!
//! - [`codec`] — encode/decode for the three record kinds.
//! - [`store`] — the [`MenuetStore`] owning the live collections, with
//!   precondition-checked mutators and write-through persistence.
//! - [`reconcile`] — startup resolution between an inbound shared payload,
//!   the persisted session, and a fresh start.
//! - [`tip`] — pure subtotal/tip/rounding computation.
//!
//! UI shells (CLI, web, desktop) sit on top and hold no state of their own.

pub mod codec;
pub mod error;
pub mod model;
pub mod reconcile;
pub mod storage;
pub mod store;
pub mod tip;

pub use error::{MenuetError, Result};
pub use model::{MenuItem, OrderLine, RESERVED_CHARACTERS, TipConfig, TipMode};
pub use reconcile::{OverwriteGate, resolve_startup};
pub use storage::{MemoryStorage, Storage};
pub use store::MenuetStore;
pub use tip::{TotalBreakdown, compute_total};
