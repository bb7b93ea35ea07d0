use anyhow::Result;

use menuet_core::{MenuetStore, Storage};

pub fn list<S: Storage>(store: &MenuetStore<S>) -> Result<()> {
    let names = store.saved_menu_names();
    if names.is_empty() {
        println!("No saved menus.");
        return Ok(());
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

pub fn save<S: Storage>(store: &mut MenuetStore<S>, name: &str) -> Result<()> {
    store.save_menu(name)?;
    if store.saved_menu_names().iter().any(|saved| saved == name) {
        println!("Saved the current menu as '{name}'.");
    } else {
        println!("Not saved: snapshot names must be non-empty and free of '|'.");
    }
    Ok(())
}

pub fn load<S: Storage>(store: &mut MenuetStore<S>, name: &str) -> Result<()> {
    store.load_saved_menu(name)?;
    println!(
        "Menu now has {} item(s); order cleared.",
        store.available().len()
    );
    Ok(())
}

pub fn delete<S: Storage>(store: &mut MenuetStore<S>, name: &str) -> Result<()> {
    store.delete_saved_menu(name)?;
    println!("Deleted '{name}'.");
    Ok(())
}
