//! Aggregating resolved quirks into item modifiers.
//!
//! Multipliers are multiplied together in list order (absent = 1). Every
//! quirk also yields exactly one [`ItemEffect`] record, even when it has no
//! mechanical change, so downstream consumers always see one effect per
//! quirk.

use serde::{Deserialize, Serialize};

use crate::item::ItemType;
use crate::quirk::{EffectChange, EffectMode, EffectTarget, QuirkKind, ResolvedQuirk};

/// Priority assigned to every change generated from a quirk.
pub const QUIRK_EFFECT_PRIORITY: u32 = 20;

/// A concrete data change carried by an item effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedChange {
    /// Dotted path of the data field to modify.
    pub key: String,
    /// Combination mode.
    pub mode: EffectMode,
    /// Value as a string.
    pub value: String,
    /// Application priority.
    pub priority: u32,
}

impl From<&EffectChange> for AppliedChange {
    fn from(change: &EffectChange) -> Self {
        Self {
            key: change.key.to_string(),
            mode: change.mode,
            value: change.value.to_string(),
            priority: QUIRK_EFFECT_PRIORITY,
        }
    }
}

/// One effect record per quirk, ready to attach to the crafted item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEffect {
    /// "`<quirk name> (Flaw)`" or "`<quirk name> (Boon)`".
    pub name: String,
    /// Icon path.
    pub icon: String,
    /// Quirk rules text.
    pub description: String,
    /// Id of the quirk this effect came from.
    pub quirk_id: String,
    /// Flaw or boon.
    pub quirk_kind: QuirkKind,
    /// Whether the effect transfers to the actor holding the item.
    pub transfer: bool,
    /// Whether the effect starts disabled.
    pub disabled: bool,
    /// Data changes; empty for descriptive-only quirks.
    pub changes: Vec<AppliedChange>,
}

impl ItemEffect {
    /// Build the effect record for a quirk on an item of the given type.
    pub fn from_quirk(quirk: &ResolvedQuirk, item_type: ItemType) -> Self {
        Self {
            name: format!("{} ({})", quirk.name(), quirk.kind),
            icon: quirk.kind.icon().to_string(),
            description: quirk.quirk.description.to_string(),
            quirk_id: quirk.id().to_string(),
            quirk_kind: quirk.kind,
            transfer: true,
            disabled: false,
            changes: changes_for(quirk, item_type)
                .iter()
                .map(AppliedChange::from)
                .collect(),
        }
    }

    /// Returns true if this effect changes no data.
    pub fn is_placeholder(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Resolve a quirk's change list for an item type.
///
/// Lookup order: the list for `item_type`, then the list for all types,
/// then nothing.
pub fn changes_for(quirk: &ResolvedQuirk, item_type: ItemType) -> &'static [EffectChange] {
    let tiers = [EffectTarget::Type(item_type), EffectTarget::All];
    tiers
        .into_iter()
        .find_map(|target| quirk.quirk.effects_for(target))
        .unwrap_or(&[])
}

/// Physical and economic stats of an item before or after quirks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemStats {
    /// Weight.
    pub weight: f64,
    /// Price in the item's base currency.
    pub price: f64,
    /// Hit points, if the item tracks them.
    pub hp: Option<u32>,
}

/// The combined effect of a list of quirks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    /// Product of all weight multipliers.
    pub weight_multiplier: f64,
    /// Product of all value multipliers.
    pub value_multiplier: f64,
    /// Product of all hit-point multipliers.
    pub hp_multiplier: f64,
    /// One effect record per quirk, in input order.
    pub effects: Vec<ItemEffect>,
}

impl Aggregate {
    /// Apply the multipliers to base stats.
    ///
    /// Price and hit points are floored after multiplication.
    pub fn apply(&self, base: &ItemStats) -> ItemStats {
        ItemStats {
            weight: base.weight * self.weight_multiplier,
            price: (base.price * self.value_multiplier).floor(),
            hp: base
                .hp
                .map(|hp| (f64::from(hp) * self.hp_multiplier).floor() as u32),
        }
    }
}

/// Combine quirks (flaws first, then boons) into multipliers and effects.
pub fn aggregate(quirks: &[ResolvedQuirk], item_type: ItemType) -> Aggregate {
    let product = |field: fn(&ResolvedQuirk) -> Option<f64>| {
        quirks.iter().filter_map(field).fold(1.0, |acc, m| acc * m)
    };

    Aggregate {
        weight_multiplier: product(|q| q.quirk.weight_multiplier),
        value_multiplier: product(|q| q.quirk.value_multiplier),
        hp_multiplier: product(|q| q.quirk.hp_multiplier),
        effects: quirks
            .iter()
            .map(|q| ItemEffect::from_quirk(q, item_type))
            .collect(),
    }
}

/// Render the "Crafting Quirks" description block appended to an item.
pub fn describe_quirks(flaws: &[ResolvedQuirk], boons: &[ResolvedQuirk]) -> String {
    let mut out = String::from("### Crafting Quirks\n\n");

    if !flaws.is_empty() {
        out.push_str("**Flaws:**\n\n");
        for flaw in flaws {
            out.push_str(&format!("- **{}:** {}\n", flaw.name(), flaw.quirk.description));
        }
        out.push('\n');
    }

    if !boons.is_empty() {
        out.push_str("**Boons:**\n\n");
        for boon in boons {
            out.push_str(&format!("- **{}:** {}\n", boon.name(), boon.quirk.description));
        }
        out.push('\n');
    }

    if flaws.is_empty() && boons.is_empty() {
        out.push_str("No quirks.\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quirk::find_quirk;

    fn quirk(kind: QuirkKind, id: &str, roll: u32) -> ResolvedQuirk {
        ResolvedQuirk {
            quirk: find_quirk(kind, id).unwrap(),
            kind,
            roll,
        }
    }

    #[test]
    fn value_multipliers_cancel() {
        let quirks = [
            quirk(QuirkKind::Flaw, "mediocreFinish", 18),
            quirk(QuirkKind::Boon, "magnificentFinish", 7),
        ];
        let agg = aggregate(&quirks, ItemType::Weapon);
        assert_eq!(agg.value_multiplier, 1.0);
        let stats = agg.apply(&ItemStats {
            weight: 3.0,
            price: 100.0,
            hp: None,
        });
        assert_eq!(stats.price, 100.0);
    }

    #[test]
    fn heavy_doubles_weight() {
        let agg = aggregate(&[quirk(QuirkKind::Flaw, "heavy", 16)], ItemType::Armor);
        assert_eq!(agg.weight_multiplier, 2.0);
        let stats = agg.apply(&ItemStats {
            weight: 5.0,
            price: 0.0,
            hp: None,
        });
        assert_eq!(stats.weight, 10.0);
    }

    #[test]
    fn price_is_floored() {
        let agg = aggregate(&[quirk(QuirkKind::Flaw, "mediocreFinish", 18)], ItemType::Weapon);
        let stats = agg.apply(&ItemStats {
            weight: 1.0,
            price: 15.0,
            hp: Some(7),
        });
        assert_eq!(stats.price, 7.0);
        assert_eq!(stats.hp, Some(7));
    }

    #[test]
    fn durable_triples_hp() {
        let agg = aggregate(&[quirk(QuirkKind::Boon, "durable", 1)], ItemType::Shield);
        assert_eq!(agg.hp_multiplier, 3.0);
        let stats = agg.apply(&ItemStats {
            weight: 6.0,
            price: 10.0,
            hp: Some(5),
        });
        assert_eq!(stats.hp, Some(15));
    }

    #[test]
    fn empty_list_is_identity() {
        let agg = aggregate(&[], ItemType::Weapon);
        assert_eq!(agg.weight_multiplier, 1.0);
        assert_eq!(agg.value_multiplier, 1.0);
        assert_eq!(agg.hp_multiplier, 1.0);
        assert!(agg.effects.is_empty());
    }

    #[test]
    fn type_specific_effects_take_precedence() {
        let q = quirk(QuirkKind::Flaw, "poorHandiwork", 2);
        let weapon = ItemEffect::from_quirk(&q, ItemType::Weapon);
        assert_eq!(weapon.changes.len(), 1);
        assert_eq!(weapon.changes[0].key, "system.magicalBonus");
        assert_eq!(weapon.changes[0].mode, EffectMode::Add);
        assert_eq!(weapon.changes[0].value, "-1");
        assert_eq!(weapon.changes[0].priority, 20);

        let armor = ItemEffect::from_quirk(&q, ItemType::Armor);
        assert_eq!(armor.changes[0].key, "system.armor.magicalBonus");
    }

    #[test]
    fn all_list_is_the_fallback() {
        let q = quirk(QuirkKind::Flaw, "noisy", 13);
        let effect = ItemEffect::from_quirk(&q, ItemType::Clothing);
        assert_eq!(effect.changes.len(), 1);
        assert_eq!(effect.changes[0].key, "flags.midi-qol.disadvantage.skill.check.ste");
        assert_eq!(effect.changes[0].mode, EffectMode::Custom);
    }

    #[test]
    fn placeholder_when_no_list_applies() {
        let q = quirk(QuirkKind::Boon, "artisanalCraftsmanship", 20);
        let effect = ItemEffect::from_quirk(&q, ItemType::Shield);
        assert!(effect.is_placeholder());
        assert_eq!(effect.name, "Artisanal Craftsmanship (Boon)");
        assert_eq!(effect.icon, "icons/svg/upgrade.svg");
        assert_eq!(effect.quirk_id, "artisanalCraftsmanship");
        assert_eq!(effect.quirk_kind, QuirkKind::Boon);
        assert!(effect.transfer);
        assert!(!effect.disabled);
    }

    #[test]
    fn one_effect_per_quirk() {
        let quirks = [
            quirk(QuirkKind::Flaw, "fragile", 7),
            quirk(QuirkKind::Flaw, "dangerous", 20),
            quirk(QuirkKind::Boon, "flashy", 9),
        ];
        let agg = aggregate(&quirks, ItemType::Weapon);
        assert_eq!(agg.effects.len(), 3);
        assert_eq!(agg.effects[0].name, "Fragile (Flaw)");
        assert!(agg.effects[0].is_placeholder());
        assert_eq!(agg.effects[1].changes[0].key, "flags.midi-qol.fumbleThreshold");
        assert_eq!(agg.effects[2].name, "Flashy (Boon)");
    }

    #[test]
    fn aggregation_is_repeatable() {
        let quirks = [
            quirk(QuirkKind::Flaw, "heavy", 16),
            quirk(QuirkKind::Boon, "artisanalCraftsmanship", 20),
        ];
        let first = aggregate(&quirks, ItemType::Weapon);
        let second = aggregate(&quirks, ItemType::Weapon);
        assert_eq!(first, second);
        assert_eq!(
            find_quirk(QuirkKind::Flaw, "heavy").unwrap().weight_multiplier,
            Some(2.0)
        );
    }

    #[test]
    fn describe_lists_both_kinds() {
        let flaws = [quirk(QuirkKind::Flaw, "heavy", 16)];
        let boons = [quirk(QuirkKind::Boon, "durable", 2)];
        let text = describe_quirks(&flaws, &boons);
        assert!(text.starts_with("### Crafting Quirks"));
        assert!(text.contains("**Flaws:**"));
        assert!(text.contains("- **Heavy:** This item weighs twice as much as normal."));
        assert!(text.contains("**Boons:**"));
        assert!(text.contains("- **Durable:**"));
        assert!(!text.contains("No quirks."));
    }

    #[test]
    fn describe_without_quirks() {
        let text = describe_quirks(&[], &[]);
        assert!(text.contains("No quirks."));
        assert!(!text.contains("**Flaws:**"));
    }
}
