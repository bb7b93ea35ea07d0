//! Domain models for the shared menu and order state.

use serde::{Deserialize, Serialize};

/// Characters that cannot appear in item or menu names because the wire
/// format does not escape them: `|` separates fields, `~` separates records.
pub const RESERVED_CHARACTERS: [char; 2] = ['|', '~'];

/// A named, priced entry available to be ordered.
///
/// Unique by `name` (case-sensitive) within the available-menu collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub name: String,
    pub price: f64,
}

/// A menu item plus the quantity consumed by the table.
///
/// Well-formed order state holds at most one line per name, and a line's
/// amount never reaches 0 (the line is removed instead).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub name: String,
    pub price: f64,
    pub amount: u32,
}

/// How the tip value is interpreted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TipMode {
    Percent,
    Fixed,
}

/// Tip amount, its interpretation mode, and the unit the final total is
/// rounded to. Created once at startup and mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TipConfig {
    pub tip: f64,
    pub rounding_unit: f64,
    pub mode: TipMode,
}

impl Default for TipConfig {
    fn default() -> Self {
        Self {
            tip: 10.0,
            rounding_unit: 1.0,
            mode: TipMode::Percent,
        }
    }
}

/// Returns true if `name` may enter a [`MenuItem`] or [`OrderLine`]:
/// non-empty and free of reserved characters and newlines.
///
/// The wire format has no escaping, so rejection here is what keeps the
/// encoded form injection-safe.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(RESERVED_CHARACTERS) && !name.contains('\n')
}
