pub mod check;
pub mod craft;
pub mod inventory;
pub mod outcome;
pub mod tables;
pub mod validate;

use std::path::Path;

use oot_crafting::{CraftingConfig, DieSource, FixedRolls};

/// Load the crafting config, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<CraftingConfig, String> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading crafting config");
            CraftingConfig::from_json_file(path)
                .map_err(|e| format!("cannot load config {}: {e}", path.display()))
        }
        None => Ok(CraftingConfig::default()),
    }
}

/// Pick the die source: fixed rolls if given, otherwise the (optionally
/// seeded) RNG.
fn dice(
    config: &CraftingConfig,
    seed: Option<u64>,
    rolls: Option<&str>,
) -> Result<Box<dyn DieSource>, String> {
    if let Some(rolls) = rolls {
        let fixed: FixedRolls = rolls.parse().map_err(|e| format!("{e}"))?;
        return Ok(Box::new(fixed));
    }
    let config = match seed {
        Some(seed) => config.clone().with_seed(seed),
        None => config.clone(),
    };
    Ok(Box::new(config.rng()))
}

/// Parse an optional value with `FromStr`, falling back to `default`.
fn parse_or<T>(value: Option<&str>, default: T) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(s) => s.parse().map_err(|e: T::Err| e.to_string()),
        None => Ok(default),
    }
}
