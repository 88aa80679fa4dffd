//! Configuration for a crafting workshop.

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::CraftResult;
use crate::item::ItemType;
use crate::rarity::{CraftingAbility, Rarity, find_ability};

/// Defaults applied when a workshop opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraftingConfig {
    /// RNG seed for reproducible quirk draws; OS entropy when absent.
    pub seed: Option<u64>,
    /// Starting rarity.
    pub rarity: Rarity,
    /// Starting item type.
    pub item_type: ItemType,
    /// Ability id used for the creation check.
    pub creation_ability: String,
    /// Ability id used for the enchanting check.
    pub enchanting_ability: String,
}

impl Default for CraftingConfig {
    fn default() -> Self {
        Self {
            seed: None,
            rarity: Rarity::Uncommon,
            item_type: ItemType::Weapon,
            creation_ability: "smith".to_string(),
            enchanting_ability: "arc".to_string(),
        }
    }
}

impl CraftingConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> CraftResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the starting rarity.
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Set the starting item type.
    pub fn with_item_type(mut self, item_type: ItemType) -> Self {
        self.item_type = item_type;
        self
    }

    /// Set the creation and enchanting ability ids.
    pub fn with_abilities(mut self, creation: &str, enchanting: &str) -> Self {
        self.creation_ability = creation.to_string();
        self.enchanting_ability = enchanting.to_string();
        self
    }

    /// Resolve the configured ability ids.
    pub fn abilities(&self) -> CraftResult<(&'static CraftingAbility, &'static CraftingAbility)> {
        Ok((
            find_ability(&self.creation_ability)?,
            find_ability(&self.enchanting_ability)?,
        ))
    }

    /// Build the RNG for quirk draws.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::DieSource;

    #[test]
    fn default_config() {
        let cfg = CraftingConfig::default();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.rarity, Rarity::Uncommon);
        assert_eq!(cfg.item_type, ItemType::Weapon);
        let (creation, enchanting) = cfg.abilities().unwrap();
        assert_eq!(creation.id, "smith");
        assert_eq!(enchanting.id, "arc");
    }

    #[test]
    fn builder_methods() {
        let cfg = CraftingConfig::default()
            .with_seed(7)
            .with_rarity(Rarity::Legendary)
            .with_item_type(ItemType::Shield)
            .with_abilities("carpenter", "rel");
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.rarity, Rarity::Legendary);
        assert_eq!(cfg.item_type, ItemType::Shield);
        assert_eq!(cfg.abilities().unwrap().0.name, "Carpenter's Tools");
    }

    #[test]
    fn unknown_ability_is_an_error() {
        let cfg = CraftingConfig::default().with_abilities("smith", "cooking");
        assert!(cfg.abilities().is_err());
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let cfg = CraftingConfig::default().with_seed(123);
        let mut a = cfg.rng();
        let mut b = cfg.rng();
        for _ in 0..10 {
            assert_eq!(a.roll_d20(), b.roll_d20());
        }
    }

    #[test]
    fn partial_json_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crafting.json");
        std::fs::write(&path, r#"{ "seed": 5, "rarity": "veryRare" }"#).unwrap();
        let cfg = CraftingConfig::from_json_file(&path).unwrap();
        assert_eq!(cfg.seed, Some(5));
        assert_eq!(cfg.rarity, Rarity::VeryRare);
        assert_eq!(cfg.item_type, ItemType::Weapon);
        assert_eq!(cfg.creation_ability, "smith");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = CraftingConfig::from_json_file(Path::new("/nonexistent/oot.json")).unwrap_err();
        assert!(matches!(err, crate::error::CraftError::Io(_)));
    }
}
