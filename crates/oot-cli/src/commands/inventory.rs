use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use oot_crafting::{InventoryChange, ItemData, PartyInventory};

fn load(file: &Path) -> Result<PartyInventory, String> {
    PartyInventory::load(file).map_err(|e| format!("cannot read {}: {e}", file.display()))
}

fn save(inventory: &PartyInventory, file: &Path) -> Result<(), String> {
    inventory
        .save(file)
        .map_err(|e| format!("cannot write {}: {e}", file.display()))
}

fn report(change: &InventoryChange) {
    println!(
        "  {} {} x{} [{}]",
        change.action,
        change.item.name,
        change.item.quantity,
        change.item.id
    );
}

pub fn list(file: &Path, json: bool) -> Result<(), String> {
    let inventory = load(file)?;

    if json {
        let text = serde_json::to_string_pretty(inventory.items()).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    if inventory.is_empty() {
        println!("  Party inventory is empty.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Type", "Qty", "Added by"]);
    for item in inventory.items() {
        table.add_row(vec![
            item.id.clone(),
            item.name.clone(),
            item.kind.clone(),
            item.quantity.to_string(),
            item.added_by.clone(),
        ]);
    }
    println!("{table}");
    println!();
    println!("  {} stacks", inventory.len());

    Ok(())
}

pub fn add(
    file: &Path,
    name: &str,
    kind: &str,
    img: &str,
    quantity: u32,
    by: &str,
) -> Result<(), String> {
    if quantity == 0 {
        return Err("quantity must be at least 1".into());
    }
    let mut inventory = load(file)?;
    let change = inventory
        .add(ItemData::new(name, kind, img).with_quantity(quantity), by)
        .map_err(|e| e.to_string())?;
    save(&inventory, file)?;
    report(&change);
    Ok(())
}

pub fn remove(file: &Path, id: &str) -> Result<(), String> {
    let mut inventory = load(file)?;
    let change = inventory.remove(id).map_err(|e| e.to_string())?;
    save(&inventory, file)?;
    report(&change);
    Ok(())
}

pub fn take(file: &Path, id: &str, quantity: Option<u32>) -> Result<(), String> {
    let mut inventory = load(file)?;
    let (taken, change) = inventory.take(id, quantity).map_err(|e| e.to_string())?;
    save(&inventory, file)?;
    println!("  Took {} x{}", taken.name, taken.quantity());
    report(&change);
    Ok(())
}
