use colored::Colorize;
use oot_crafting::validate_all;

pub fn run() -> Result<(), String> {
    let issues = validate_all();

    for issue in &issues {
        if issue.is_error {
            eprintln!("  {}", issue.to_string().red());
        } else {
            eprintln!("  {}", issue.to_string().yellow());
        }
    }

    let errors = issues.iter().filter(|i| i.is_error).count();
    if errors > 0 {
        return Err(format!(
            "{errors} error{} in built-in tables",
            if errors == 1 { "" } else { "s" }
        ));
    }

    println!("  All tables valid.");
    Ok(())
}
