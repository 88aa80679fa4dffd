use colored::Colorize;
use oot_crafting::{FlawCount, resolve_outcome};

pub fn run(check: i32, dc: i32, json: bool) -> Result<(), String> {
    let outcome = resolve_outcome(check, dc);

    if json {
        let text = serde_json::to_string_pretty(&outcome).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    let label = if outcome.destroyed {
        outcome.label.red().bold()
    } else if outcome.boons > 0 {
        outcome.label.green().bold()
    } else if outcome.flaws.to_draw() > 0 {
        outcome.label.yellow().bold()
    } else {
        outcome.label.bold()
    };

    println!("  {label}");
    println!("  Check {check} vs DC {dc}, margin {:+}", outcome.margin);
    match outcome.flaws {
        FlawCount::All => println!("  Flaws: all (item destroyed)"),
        FlawCount::Count(n) => println!("  Flaws: {n}"),
    }
    println!("  Boons: {}", outcome.boons);

    Ok(())
}
