use colored::Colorize;
use oot_crafting::check::CheckTone;
use oot_crafting::{
    CheckKind, CheckRequest, CraftingConfig, ItemType, Rarity, find_ability, perform_check,
    render_report, roll_check,
};

pub struct CheckArgs {
    pub kind: String,
    pub item_type: Option<String>,
    pub rarity: Option<String>,
    pub dc: Option<i32>,
    pub total: Option<i32>,
    pub modifier: i32,
    pub existing_boons: u32,
    pub ability: Option<String>,
    pub item: String,
    pub crafter: String,
    pub seed: Option<u64>,
    pub rolls: Option<String>,
    pub json: bool,
}

pub fn run(config: &CraftingConfig, args: &CheckArgs) -> Result<(), String> {
    let kind: CheckKind = args.kind.parse().map_err(|e| format!("{e}"))?;
    let rarity: Rarity = super::parse_or(args.rarity.as_deref(), config.rarity)?;
    let item_type: ItemType = super::parse_or(args.item_type.as_deref(), config.item_type)?;
    let dc = args.dc.unwrap_or_else(|| rarity.base_dc());
    if dc <= 0 {
        return Err(format!("invalid DC {dc}: must be positive"));
    }

    let ability_id = match (&args.ability, kind) {
        (Some(id), _) => id.as_str(),
        (None, CheckKind::Creation) => config.creation_ability.as_str(),
        (None, CheckKind::Enchanting) => config.enchanting_ability.as_str(),
    };
    let ability = find_ability(ability_id).map_err(|e| e.to_string())?;

    let request = CheckRequest {
        kind,
        ability,
        dc,
        existing_boons: args.existing_boons,
        item_name: args.item.clone(),
        item_type,
        rarity,
    };

    let mut dice = super::dice(config, args.seed, args.rolls.as_deref())?;
    let mut source = dice.as_mut();

    let (total, rolled) = match args.total {
        Some(total) => (total, None),
        None => {
            let roll = roll_check(&mut source, args.modifier);
            (roll.total, Some(roll))
        }
    };

    let report = perform_check(&request, total, &args.crafter, &mut source);

    if args.json {
        let text = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    if let Some(roll) = rolled {
        println!("  Rolled {roll}");
    }
    let card = render_report(&request, &report);
    for (i, line) in card.lines().enumerate() {
        if i == 0 {
            let title = match report.tone() {
                CheckTone::Destroyed => line.red().bold(),
                CheckTone::Success => line.green().bold(),
                CheckTone::Failure => line.yellow().bold(),
                CheckTone::Neutral => line.bold(),
            };
            println!("  {title}");
        } else {
            println!("  {line}");
        }
    }

    Ok(())
}
