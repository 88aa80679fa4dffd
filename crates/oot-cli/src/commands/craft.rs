use colored::Colorize;
use oot_crafting::effects::ItemStats;
use oot_crafting::{
    CheckKind, CraftingConfig, ItemBlueprint, ItemType, Rarity, Workshop, perform_check,
    render_report,
};

pub struct CraftArgs {
    pub name: String,
    pub category: String,
    pub subtype: Option<String>,
    pub thrown: bool,
    pub item_type: Option<String>,
    pub rarity: Option<String>,
    pub weight: f64,
    pub price: f64,
    pub hp: Option<u32>,
    pub description: String,
    pub creation: i32,
    pub enchanting: i32,
    pub creation_dc: Option<i32>,
    pub enchanting_dc: Option<i32>,
    pub seed: Option<u64>,
    pub rolls: Option<String>,
    pub json: bool,
}

pub fn run(config: &CraftingConfig, args: &CraftArgs) -> Result<(), String> {
    let mut workshop = Workshop::new(config).map_err(|e| e.to_string())?;

    workshop.select_item(ItemBlueprint {
        name: args.name.clone(),
        img: String::new(),
        category: args.category.clone(),
        subtype: args.subtype.clone(),
        thrown: args.thrown,
        stats: ItemStats {
            weight: args.weight,
            price: args.price,
            hp: args.hp,
        },
        description: args.description.clone(),
    });

    let rarity: Rarity = super::parse_or(args.rarity.as_deref(), config.rarity)?;
    workshop.set_rarity(rarity);
    if let Some(t) = &args.item_type {
        let item_type: ItemType = t.parse().map_err(|e| format!("{e}"))?;
        workshop.set_item_type(item_type);
    }
    if let Some(dc) = args.creation_dc {
        workshop.set_creation_dc(dc).map_err(|e| e.to_string())?;
    }
    if let Some(dc) = args.enchanting_dc {
        workshop.set_enchanting_dc(dc).map_err(|e| e.to_string())?;
    }

    let mut dice = super::dice(config, args.seed, args.rolls.as_deref())?;
    let mut source = dice.as_mut();

    for (kind, total) in [
        (CheckKind::Creation, args.creation),
        (CheckKind::Enchanting, args.enchanting),
    ] {
        let request = match kind {
            CheckKind::Creation => workshop.creation_request(),
            CheckKind::Enchanting => workshop.enchanting_request(),
        }
        .map_err(|e| e.to_string())?;

        let report = perform_check(&request, total, "Crafter", &mut source);
        if args.json && report.destroyed {
            let value = serde_json::json!({ "destroyed": true, "report": report });
            let text = serde_json::to_string_pretty(&value).map_err(|e| e.to_string())?;
            println!("{text}");
            return Ok(());
        }
        if !args.json {
            for line in render_report(&request, &report).lines() {
                println!("  {line}");
            }
            println!();
        }
        if report.destroyed {
            println!("  {}", "The item was destroyed.".red().bold());
            return Ok(());
        }
        workshop.record(report);
    }

    let crafted = workshop.finish().map_err(|e| e.to_string())?;

    if args.json {
        let text = serde_json::to_string_pretty(&crafted).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    for line in crafted.summary().lines() {
        println!("  {line}");
    }
    println!();
    println!(
        "  {} weight {}, price {}, hp {}",
        "Stats:".bold(),
        crafted.stats.weight,
        crafted.stats.price,
        crafted
            .stats
            .hp
            .map_or_else(|| "-".to_string(), |hp| hp.to_string())
    );
    println!("  {} effect(s) attached", crafted.effects.len());

    Ok(())
}
