use anyhow::Result;

use menuet_core::{MenuetStore, Storage};

pub fn list<S: Storage>(store: &MenuetStore<S>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(store.available())?);
        return Ok(());
    }
    if store.available().is_empty() {
        println!("The menu is empty.");
        return Ok(());
    }
    for item in store.available() {
        println!("{:<28} {:>8.2}", item.name, item.price);
    }
    Ok(())
}

pub fn add<S: Storage>(store: &mut MenuetStore<S>, name: &str, price: f64) -> Result<()> {
    let before = store.available().len();
    store.add_available_item(name, price)?;
    if store.available().len() == before {
        println!("Not added: names must be unique and free of '|', '~', and newlines.");
    } else {
        println!("Added {name} at {price:.2}.");
    }
    Ok(())
}

pub fn remove<S: Storage>(store: &mut MenuetStore<S>, name: &str) -> Result<()> {
    store.remove_available_item(name)?;
    println!("Removed {name} from the menu and the order.");
    Ok(())
}

pub fn share<S: Storage>(store: &MenuetStore<S>) -> Result<()> {
    println!("{}", store.share_payload());
    Ok(())
}
