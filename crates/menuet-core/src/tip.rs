//! Pure tip and total computation.

use serde::Serialize;

use crate::model::{OrderLine, TipConfig, TipMode};

/// Breakdown of a computed bill total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalBreakdown {
    /// Sum of `price * amount` over all order lines.
    pub subtotal: f64,
    /// Tip derived from the subtotal (percent mode) or taken as-is (fixed).
    pub tip_amount: f64,
    /// Rounding correction applied on top of subtotal + tip. Negative when
    /// rounding down under round-to-nearest.
    pub adjustment: f64,
    /// Final amount owed: `subtotal + tip_amount + adjustment`.
    pub total: f64,
}

/// Computes the bill total for the given order lines and tip configuration.
///
/// The pre-adjusted total (subtotal plus tip) is rounded to a multiple of
/// `config.rounding_unit`: always upward when `always_round_up` is set,
/// otherwise to the nearest multiple. The rounding unit must be positive;
/// the store clamps it upstream, this function never sees 0 or less.
///
/// `always_round_up` is a presentation toggle and is never persisted.
pub fn compute_total(
    lines: &[OrderLine],
    config: &TipConfig,
    always_round_up: bool,
) -> TotalBreakdown {
    let subtotal: f64 = lines
        .iter()
        .map(|line| line.price * f64::from(line.amount))
        .sum();
    let tip_amount = match config.mode {
        TipMode::Percent => subtotal * config.tip / 100.0,
        TipMode::Fixed => config.tip,
    };
    let pre_adjusted = subtotal + tip_amount;
    let factor = if always_round_up {
        (pre_adjusted / config.rounding_unit).ceil()
    } else {
        (pre_adjusted / config.rounding_unit).round()
    };
    let adjustment = factor * config.rounding_unit - pre_adjusted;
    TotalBreakdown {
        subtotal,
        tip_amount,
        adjustment,
        total: pre_adjusted + adjustment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, price: f64, amount: u32) -> OrderLine {
        OrderLine {
            name: name.to_string(),
            price,
            amount,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_percent_tip_with_unit_rounding() {
        // subtotal 100, 10% tip, unit 1, round up: nothing to adjust.
        let lines = vec![line("a", 25.0, 4)];
        let config = TipConfig {
            tip: 10.0,
            rounding_unit: 1.0,
            mode: TipMode::Percent,
        };
        let breakdown = compute_total(&lines, &config, true);
        assert_close(breakdown.subtotal, 100.0);
        assert_close(breakdown.tip_amount, 10.0);
        assert_close(breakdown.adjustment, 0.0);
        assert_close(breakdown.total, 110.0);
    }

    #[test]
    fn test_fixed_tip_rounds_up_to_unit() {
        // subtotal 99, fixed tip 10 -> 109; unit 5, round up -> 110.
        let lines = vec![line("a", 33.0, 3)];
        let config = TipConfig {
            tip: 10.0,
            rounding_unit: 5.0,
            mode: TipMode::Fixed,
        };
        let breakdown = compute_total(&lines, &config, true);
        assert_close(breakdown.subtotal, 99.0);
        assert_close(breakdown.tip_amount, 10.0);
        assert_close(breakdown.adjustment, 1.0);
        assert_close(breakdown.total, 110.0);
    }

    #[test]
    fn test_nearest_rounding_can_adjust_downward() {
        // 104 to the nearest 10 rounds down: adjustment is -4.
        let lines = vec![line("a", 104.0, 1)];
        let config = TipConfig {
            tip: 0.0,
            rounding_unit: 10.0,
            mode: TipMode::Fixed,
        };
        let breakdown = compute_total(&lines, &config, false);
        assert_close(breakdown.adjustment, -4.0);
        assert_close(breakdown.total, 100.0);
    }

    #[test]
    fn test_empty_order_totals_to_tip_only() {
        let config = TipConfig {
            tip: 10.0,
            rounding_unit: 1.0,
            mode: TipMode::Percent,
        };
        let breakdown = compute_total(&[], &config, true);
        assert_close(breakdown.subtotal, 0.0);
        assert_close(breakdown.tip_amount, 0.0);
        assert_close(breakdown.total, 0.0);
    }

    #[test]
    fn test_amounts_multiply_prices() {
        let lines = vec![line("a", 2.5, 2), line("b", 1.0, 3)];
        let config = TipConfig {
            tip: 0.0,
            rounding_unit: 1.0,
            mode: TipMode::Fixed,
        };
        let breakdown = compute_total(&lines, &config, true);
        assert_close(breakdown.subtotal, 8.0);
        assert_close(breakdown.total, 8.0);
    }
}
