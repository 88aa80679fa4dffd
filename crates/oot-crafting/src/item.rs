//! Item-type categories used to decide which quirks apply.

use serde::{Deserialize, Serialize};

use crate::error::CraftError;

/// The crafting category of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemType {
    /// A melee or ranged weapon.
    Weapon,
    /// Body armor.
    #[serde(alias = "armour")]
    Armor,
    /// A shield.
    Shield,
    /// Non-armor clothing.
    Clothing,
    /// Arrows, bolts, bullets.
    Ammunition,
    /// A weapon with the thrown property.
    ThrownWeapon,
    /// Anything else held or carried.
    HeldItem,
}

impl ItemType {
    /// All item types in display order.
    pub fn all() -> &'static [Self] {
        &[
            Self::Weapon,
            Self::Armor,
            Self::Shield,
            Self::Clothing,
            Self::Ammunition,
            Self::ThrownWeapon,
            Self::HeldItem,
        ]
    }

    /// The tag used in quirk tables (`"weapon"`, `"thrownWeapon"`, ...).
    pub fn tag(self) -> &'static str {
        match self {
            Self::Weapon => "weapon",
            Self::Armor => "armor",
            Self::Shield => "shield",
            Self::Clothing => "clothing",
            Self::Ammunition => "ammunition",
            Self::ThrownWeapon => "thrownWeapon",
            Self::HeldItem => "heldItem",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Weapon => "Weapon",
            Self::Armor => "Armour",
            Self::Shield => "Shield",
            Self::Clothing => "Clothing",
            Self::Ammunition => "Ammunition",
            Self::ThrownWeapon => "Thrown Weapon",
            Self::HeldItem => "Held Item",
        }
    }

    /// Classify a host item from its document category, its armor or
    /// consumable subtype, and whether it has the thrown property.
    ///
    /// Weapons are thrown weapons or weapons; equipment is a shield,
    /// armor (light/medium/heavy), clothing, or a held item; ammo
    /// consumables are ammunition; everything else is a held item.
    pub fn detect(category: &str, subtype: Option<&str>, thrown: bool) -> Self {
        match category {
            "weapon" if thrown => Self::ThrownWeapon,
            "weapon" => Self::Weapon,
            "equipment" => match subtype {
                Some("shield") => Self::Shield,
                Some("light" | "medium" | "heavy") => Self::Armor,
                Some("clothing") => Self::Clothing,
                _ => Self::HeldItem,
            },
            "consumable" if subtype == Some("ammo") => Self::Ammunition,
            _ => Self::HeldItem,
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl std::str::FromStr for ItemType {
    type Err = CraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "weapon" => Ok(Self::Weapon),
            "armor" | "armour" => Ok(Self::Armor),
            "shield" => Ok(Self::Shield),
            "clothing" => Ok(Self::Clothing),
            "ammunition" | "ammo" => Ok(Self::Ammunition),
            "thrownweapon" | "thrown" => Ok(Self::ThrownWeapon),
            "helditem" | "held" => Ok(Self::HeldItem),
            _ => Err(CraftError::UnknownItemType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tags_and_aliases() {
        assert_eq!("weapon".parse::<ItemType>().unwrap(), ItemType::Weapon);
        assert_eq!("armour".parse::<ItemType>().unwrap(), ItemType::Armor);
        assert_eq!("thrownWeapon".parse::<ItemType>().unwrap(), ItemType::ThrownWeapon);
        assert_eq!("held_item".parse::<ItemType>().unwrap(), ItemType::HeldItem);
        assert_eq!("Held Item".parse::<ItemType>().unwrap(), ItemType::HeldItem);
        assert!("wand".parse::<ItemType>().is_err());
    }

    #[test]
    fn tags_roundtrip_through_parse() {
        for t in ItemType::all() {
            assert_eq!(t.tag().parse::<ItemType>().unwrap(), *t);
        }
    }

    #[test]
    fn detect_weapons() {
        assert_eq!(ItemType::detect("weapon", None, false), ItemType::Weapon);
        assert_eq!(ItemType::detect("weapon", None, true), ItemType::ThrownWeapon);
    }

    #[test]
    fn detect_equipment() {
        assert_eq!(ItemType::detect("equipment", Some("shield"), false), ItemType::Shield);
        assert_eq!(ItemType::detect("equipment", Some("medium"), false), ItemType::Armor);
        assert_eq!(ItemType::detect("equipment", Some("clothing"), false), ItemType::Clothing);
        assert_eq!(ItemType::detect("equipment", Some("trinket"), false), ItemType::HeldItem);
        assert_eq!(ItemType::detect("equipment", None, false), ItemType::HeldItem);
    }

    #[test]
    fn detect_consumables_and_other() {
        assert_eq!(ItemType::detect("consumable", Some("ammo"), false), ItemType::Ammunition);
        assert_eq!(ItemType::detect("consumable", Some("potion"), false), ItemType::HeldItem);
        assert_eq!(ItemType::detect("tool", None, false), ItemType::HeldItem);
        assert_eq!(ItemType::detect("loot", None, true), ItemType::HeldItem);
    }

    #[test]
    fn serde_uses_camel_case_tags() {
        let json = serde_json::to_string(&ItemType::ThrownWeapon).unwrap();
        assert_eq!(json, "\"thrownWeapon\"");
        let t: ItemType = serde_json::from_str("\"armour\"").unwrap();
        assert_eq!(t, ItemType::Armor);
    }
}
