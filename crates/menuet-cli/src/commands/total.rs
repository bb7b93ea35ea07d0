use anyhow::Result;

use menuet_core::{MenuetStore, Storage, compute_total};

pub fn run<S: Storage>(store: &MenuetStore<S>, round_up: bool, json: bool) -> Result<()> {
    let breakdown = compute_total(store.orders(), store.tip_config(), round_up);
    if json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }
    let sign = if breakdown.adjustment < 0.0 { '-' } else { '+' };
    println!(
        "{:.2} ({:.2} + {:.2} {sign} {:.2})",
        breakdown.total,
        breakdown.subtotal,
        breakdown.tip_amount,
        breakdown.adjustment.abs()
    );
    Ok(())
}
