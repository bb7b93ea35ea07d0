use anyhow::Result;

use menuet_core::{MenuetStore, Storage, TipMode};

pub fn show<S: Storage>(store: &MenuetStore<S>) -> Result<()> {
    let config = store.tip_config();
    let mode = match config.mode {
        TipMode::Percent => "%",
        TipMode::Fixed => "fixed",
    };
    println!(
        "Tip: {} ({mode}), rounding to the nearest {}",
        config.tip, config.rounding_unit
    );
    Ok(())
}

pub fn set<S: Storage>(store: &mut MenuetStore<S>, value: f64) -> Result<()> {
    // Mirror the input field: unparseable or NaN input becomes 0.
    let value = if value.is_nan() { 0.0 } else { value };
    store.set_tip(value)?;
    show(store)
}

pub fn mode<S: Storage>(store: &mut MenuetStore<S>, mode: TipMode) -> Result<()> {
    store.set_tip_mode(mode)?;
    show(store)
}

pub fn round<S: Storage>(store: &mut MenuetStore<S>, unit: f64) -> Result<()> {
    store.set_rounding_unit(unit)?;
    show(store)
}
