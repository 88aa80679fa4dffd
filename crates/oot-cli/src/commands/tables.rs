use comfy_table::{ContentArrangement, Table};
use oot_crafting::quirk::{MANUFACTURING_BOONS, MANUFACTURING_FLAWS, Quirk};
use oot_crafting::rarity::CRAFTING_ABILITIES;
use oot_crafting::{OUTCOME_THRESHOLDS, Rarity};

pub fn run(which: Option<&str>) -> Result<(), String> {
    match which.map(str::to_lowercase).as_deref() {
        None | Some("all") => {
            print_thresholds();
            print_quirks("Flaws", MANUFACTURING_FLAWS);
            print_quirks("Boons", MANUFACTURING_BOONS);
            print_rarities();
            print_abilities();
        }
        Some("thresholds" | "outcomes") => print_thresholds(),
        Some("flaws") => print_quirks("Flaws", MANUFACTURING_FLAWS),
        Some("boons") => print_quirks("Boons", MANUFACTURING_BOONS),
        Some("rarities" | "rarity") => print_rarities(),
        Some("abilities" | "skills") => print_abilities(),
        Some(other) => {
            return Err(format!(
                "unknown table '{other}' (expected flaws, boons, thresholds, rarities, abilities)"
            ));
        }
    }
    Ok(())
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn print_thresholds() {
    let mut table = new_table(vec!["Margin", "Flaws", "Boons", "Result"]);
    for row in OUTCOME_THRESHOLDS {
        let margin = match (row.min, row.max) {
            (None, Some(max)) => format!("<= {max}"),
            (Some(min), None) => format!(">= {min}"),
            (Some(min), Some(max)) => format!("{min} to {max}"),
            (None, None) => "any".to_string(),
        };
        table.add_row(vec![
            margin,
            row.flaws.to_string(),
            row.boons.to_string(),
            row.label.to_string(),
        ]);
    }
    println!("{table}");
}

fn print_quirks(title: &str, quirks: &[Quirk]) {
    println!("  {title}");
    let mut table = new_table(vec!["d20", "Id", "Name", "Applies to", "Modifiers"]);
    for q in quirks {
        let (start, end) = (q.d20_range.start(), q.d20_range.end());
        let faces = if start == end {
            start.to_string()
        } else {
            format!("{start}-{end}")
        };
        let mut modifiers = Vec::new();
        for (label, m) in [
            ("weight", q.weight_multiplier),
            ("value", q.value_multiplier),
            ("hp", q.hp_multiplier),
        ] {
            if let Some(m) = m {
                modifiers.push(format!("{label} x{m}"));
            }
        }
        table.add_row(vec![
            faces,
            q.id.to_string(),
            q.name.to_string(),
            q.item_types.to_string(),
            modifiers.join(", "),
        ]);
    }
    println!("{table}");
}

fn print_rarities() {
    let mut table = new_table(vec!["Rarity", "Base DC", "Max boons", "Essence"]);
    for r in Rarity::all() {
        table.add_row(vec![
            r.label().to_string(),
            r.base_dc().to_string(),
            r.max_enchanting_boons().to_string(),
            r.essence().to_string(),
        ]);
    }
    println!("{table}");
}

fn print_abilities() {
    let mut table = new_table(vec!["Id", "Name", "Kind"]);
    for a in CRAFTING_ABILITIES {
        table.add_row(vec![a.id.to_string(), a.name.to_string(), a.kind.to_string()]);
    }
    println!("{table}");
}
