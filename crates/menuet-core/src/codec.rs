//! Delimited-text codec for the three persisted record kinds.
//!
//! Menu and order collections are single-line strings: fields joined by `|`,
//! records joined by `~`. The tip configuration is a single record whose
//! fields are joined by `~`. Nothing is escaped, which is why reserved
//! characters are rejected before a name ever reaches an encoder.
//!
//! The two list codecs are permissive: a malformed record is dropped and the
//! rest of the batch survives, so one corrupt entry cannot erase an entire
//! menu. The tip codec is all-or-nothing, because a partially valid tip
//! configuration is meaningless. This asymmetry is deliberate.

use tracing::debug;

use crate::model::{MenuItem, OrderLine, TipConfig, TipMode};

const FIELD_SEPARATOR: char = '|';
const RECORD_SEPARATOR: char = '~';

/// Encodes a menu as `name|price` records joined by `~`.
///
/// An empty collection encodes to the empty string.
pub fn encode_menu(items: &[MenuItem]) -> String {
    items
        .iter()
        .map(|item| format!("{}{}{}", item.name, FIELD_SEPARATOR, item.price))
        .collect::<Vec<_>>()
        .join(&RECORD_SEPARATOR.to_string())
}

/// Decodes a menu, silently dropping malformed records.
///
/// A record survives only with exactly two fields, a non-empty name, and a
/// finite price. The empty string decodes to an empty collection.
pub fn decode_menu(text: &str) -> Vec<MenuItem> {
    text.split(RECORD_SEPARATOR)
        .filter_map(|chunk| {
            let item = decode_menu_record(chunk);
            if item.is_none() {
                debug!(record = chunk, "dropping malformed menu record");
            }
            item
        })
        .collect()
}

fn decode_menu_record(chunk: &str) -> Option<MenuItem> {
    let fields: Vec<&str> = chunk.split(FIELD_SEPARATOR).collect();
    if fields.len() != 2 || fields[0].is_empty() {
        return None;
    }
    let price: f64 = fields[1].parse().ok()?;
    if !price.is_finite() {
        return None;
    }
    Some(MenuItem {
        name: fields[0].to_string(),
        price,
    })
}

/// Encodes order lines as `name|price|amount` records joined by `~`.
pub fn encode_orders(lines: &[OrderLine]) -> String {
    lines
        .iter()
        .map(|line| {
            format!(
                "{}{sep}{}{sep}{}",
                line.name,
                line.price,
                line.amount,
                sep = FIELD_SEPARATOR
            )
        })
        .collect::<Vec<_>>()
        .join(&RECORD_SEPARATOR.to_string())
}

/// Decodes order lines, silently dropping malformed records.
///
/// A record survives only with exactly three fields, a non-empty name, a
/// finite price, and an integer amount of at least 1.
pub fn decode_orders(text: &str) -> Vec<OrderLine> {
    text.split(RECORD_SEPARATOR)
        .filter_map(|chunk| {
            let line = decode_order_record(chunk);
            if line.is_none() {
                debug!(record = chunk, "dropping malformed order record");
            }
            line
        })
        .collect()
}

fn decode_order_record(chunk: &str) -> Option<OrderLine> {
    let fields: Vec<&str> = chunk.split(FIELD_SEPARATOR).collect();
    if fields.len() != 3 || fields[0].is_empty() {
        return None;
    }
    let price: f64 = fields[1].parse().ok()?;
    if !price.is_finite() {
        return None;
    }
    let amount: u32 = fields[2].parse().ok()?;
    if amount == 0 {
        return None;
    }
    Some(OrderLine {
        name: fields[0].to_string(),
        price,
        amount,
    })
}

/// Encodes a tip configuration as `tip~roundingUnit~modeChar`.
///
/// The mode char is `p` for percent, `f` for fixed.
pub fn encode_tip(config: &TipConfig) -> String {
    let mode = match config.mode {
        TipMode::Percent => 'p',
        TipMode::Fixed => 'f',
    };
    format!(
        "{}{sep}{}{sep}{}",
        config.tip,
        config.rounding_unit,
        mode,
        sep = RECORD_SEPARATOR
    )
}

/// Decodes a tip configuration, all-or-nothing.
///
/// Returns `None` unless there are exactly three fields, both numbers are
/// finite, and the mode char is valid. Callers keep their prior or default
/// configuration on `None`; there is never a partially applied tip.
pub fn decode_tip(text: &str) -> Option<TipConfig> {
    let fields: Vec<&str> = text.split(RECORD_SEPARATOR).collect();
    if fields.len() != 3 {
        return None;
    }
    let tip: f64 = fields[0].parse().ok()?;
    let rounding_unit: f64 = fields[1].parse().ok()?;
    if !tip.is_finite() || !rounding_unit.is_finite() {
        return None;
    }
    let mode = match fields[2] {
        "p" => TipMode::Percent,
        "f" => TipMode::Fixed,
        _ => return None,
    };
    Some(TipConfig {
        tip,
        rounding_unit,
        mode,
    })
}
