//! Item rarity tiers and the crafting abilities that can roll checks.

use serde::{Deserialize, Serialize};

use crate::error::CraftError;

/// Rarity tier of the item being crafted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rarity {
    /// DC 10, no enchanting boons.
    Common,
    /// DC 15, one boon.
    Uncommon,
    /// DC 18, two boons.
    Rare,
    /// DC 21, three boons.
    VeryRare,
    /// DC 25, three boons.
    Legendary,
    /// DC 30, three boons.
    Artifact,
}

impl Rarity {
    /// All rarities from least to most rare.
    pub fn all() -> &'static [Self] {
        &[
            Self::Common,
            Self::Uncommon,
            Self::Rare,
            Self::VeryRare,
            Self::Legendary,
            Self::Artifact,
        ]
    }

    /// Suggested DC for both crafting checks.
    pub fn base_dc(self) -> i32 {
        match self {
            Self::Common => 10,
            Self::Uncommon => 15,
            Self::Rare => 18,
            Self::VeryRare => 21,
            Self::Legendary => 25,
            Self::Artifact => 30,
        }
    }

    /// Maximum number of boons an item of this rarity can hold.
    pub fn max_enchanting_boons(self) -> u32 {
        match self {
            Self::Common => 0,
            Self::Uncommon => 1,
            Self::Rare => 2,
            Self::VeryRare | Self::Legendary | Self::Artifact => 3,
        }
    }

    /// Essence required for enchanting.
    pub fn essence(self) -> &'static str {
        match self {
            Self::Common => "None",
            Self::Uncommon => "Frail",
            Self::Rare => "Robust",
            Self::VeryRare => "Potent",
            Self::Legendary => "Mythic",
            Self::Artifact => "Deific",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::VeryRare => "Very Rare",
            Self::Legendary => "Legendary",
            Self::Artifact => "Artifact",
        }
    }

    /// The camelCase key stored on crafted items.
    pub fn key(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::VeryRare => "veryRare",
            Self::Legendary => "legendary",
            Self::Artifact => "artifact",
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Rarity {
    type Err = CraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "common" => Ok(Self::Common),
            "uncommon" => Ok(Self::Uncommon),
            "rare" => Ok(Self::Rare),
            "veryrare" => Ok(Self::VeryRare),
            "legendary" => Ok(Self::Legendary),
            "artifact" => Ok(Self::Artifact),
            _ => Err(CraftError::UnknownRarity(s.to_string())),
        }
    }
}

/// Whether an ability is a character skill or a tool proficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilityKind {
    /// Rolled as a skill check.
    Skill,
    /// Rolled with a tool the crafter must carry.
    Tool,
}

impl std::fmt::Display for AbilityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skill => write!(f, "skill"),
            Self::Tool => write!(f, "tool"),
        }
    }
}

/// A skill or tool that can be used for a crafting check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CraftingAbility {
    /// Short id (`"arc"`, `"smith"`, ...).
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Skill or tool.
    pub kind: AbilityKind,
}

impl CraftingAbility {
    /// The word used to find the matching tool in an inventory, e.g.
    /// `"smith"` for "Smith's Tools". `None` for skills.
    pub fn tool_search_term(&self) -> Option<String> {
        match self.kind {
            AbilityKind::Skill => None,
            AbilityKind::Tool => Some(
                self.name
                    .to_lowercase()
                    .replace("'s tools", "")
                    .replace("'s supplies", "")
                    .trim()
                    .to_string(),
            ),
        }
    }
}

/// Every ability that can roll a crafting check.
pub static CRAFTING_ABILITIES: &[CraftingAbility] = &[
    CraftingAbility {
        id: "arc",
        name: "Arcana",
        kind: AbilityKind::Skill,
    },
    CraftingAbility {
        id: "nat",
        name: "Nature",
        kind: AbilityKind::Skill,
    },
    CraftingAbility {
        id: "rel",
        name: "Religion",
        kind: AbilityKind::Skill,
    },
    CraftingAbility {
        id: "smith",
        name: "Smith's Tools",
        kind: AbilityKind::Tool,
    },
    CraftingAbility {
        id: "alchemist",
        name: "Alchemist's Supplies",
        kind: AbilityKind::Tool,
    },
    CraftingAbility {
        id: "jeweler",
        name: "Jeweler's Tools",
        kind: AbilityKind::Tool,
    },
    CraftingAbility {
        id: "leatherworker",
        name: "Leatherworker's Tools",
        kind: AbilityKind::Tool,
    },
    CraftingAbility {
        id: "tinker",
        name: "Tinker's Tools",
        kind: AbilityKind::Tool,
    },
    CraftingAbility {
        id: "weaver",
        name: "Weaver's Tools",
        kind: AbilityKind::Tool,
    },
    CraftingAbility {
        id: "woodcarver",
        name: "Woodcarver's Tools",
        kind: AbilityKind::Tool,
    },
    CraftingAbility {
        id: "carpenter",
        name: "Carpenter's Tools",
        kind: AbilityKind::Tool,
    },
];

/// Look up a crafting ability by id.
pub fn find_ability(id: &str) -> Result<&'static CraftingAbility, CraftError> {
    CRAFTING_ABILITIES
        .iter()
        .find(|a| a.id == id)
        .ok_or_else(|| CraftError::UnknownAbility(id.to_string()))
}
