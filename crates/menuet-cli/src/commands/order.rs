use anyhow::{Context, Result};

use menuet_core::{MenuetStore, Storage};

/// Uses the explicit price when given, otherwise looks the item up on the
/// available menu, the way the interactive flow passes prices along.
fn price_for<S: Storage>(store: &MenuetStore<S>, name: &str, price: Option<f64>) -> Result<f64> {
    if let Some(price) = price {
        return Ok(price);
    }
    store
        .available()
        .iter()
        .find(|item| item.name == name)
        .map(|item| item.price)
        .with_context(|| format!("'{name}' is not on the menu; pass an explicit price"))
}

pub fn list<S: Storage>(store: &MenuetStore<S>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(store.orders())?);
        return Ok(());
    }
    if store.orders().is_empty() {
        println!("No items.");
        return Ok(());
    }
    for line in store.orders() {
        println!(
            "{:<28} {:>3} x {:>8.2} = {:>8.2}",
            line.name,
            line.amount,
            line.price,
            line.price * f64::from(line.amount)
        );
    }
    Ok(())
}

pub fn add<S: Storage>(store: &mut MenuetStore<S>, name: &str, price: Option<f64>) -> Result<()> {
    let price = price_for(store, name, price)?;
    store.add_order_line(name, price)?;
    Ok(())
}

pub fn plus<S: Storage>(store: &mut MenuetStore<S>, name: &str, price: Option<f64>) -> Result<()> {
    let price = price_for(store, name, price)?;
    store.increment_order_line(name, price)?;
    Ok(())
}

pub fn minus<S: Storage>(store: &mut MenuetStore<S>, name: &str) -> Result<()> {
    store.decrement_order_line(name)?;
    Ok(())
}

pub fn remove<S: Storage>(store: &mut MenuetStore<S>, name: &str) -> Result<()> {
    store.remove_order_line(name)?;
    Ok(())
}

pub fn clear<S: Storage>(store: &mut MenuetStore<S>) -> Result<()> {
    store.clear_orders()?;
    println!("Order cleared.");
    Ok(())
}
