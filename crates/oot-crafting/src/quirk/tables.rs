//! The manufacturing flaw and boon catalogs.
//!
//! Each catalog partitions the d20 faces 1..=20 between its entries.

use super::{Applicability, EffectChange, EffectMode, EffectTarget, Quirk, QuirkKind};
use crate::item::ItemType;

/// Flaws, drawn when a check falls short of its DC.
pub static MANUFACTURING_FLAWS: &[Quirk] = &[
    Quirk {
        id: "poorHandiwork",
        name: "Poor/Shoddy/Abysmal Handiwork",
        description: "This item is not well made. If this item is a weapon, it has a -1 penalty to its attack and damage rolls. If it is armour, it has a -1 penalty to its base AC. If it is neither armour nor weapon, it gains the Fragile quirk instead.",
        d20_range: 1..=6,
        item_types: Applicability::Only(&[ItemType::Armor, ItemType::Weapon]),
        effects: &[
            (
                EffectTarget::Type(ItemType::Weapon),
                &[EffectChange {
                    key: "system.magicalBonus",
                    mode: EffectMode::Add,
                    value: "-1",
                }],
            ),
            (
                EffectTarget::Type(ItemType::Armor),
                &[EffectChange {
                    key: "system.armor.magicalBonus",
                    mode: EffectMode::Add,
                    value: "-1",
                }],
            ),
        ],
        weight_multiplier: None,
        value_multiplier: None,
        hp_multiplier: None,
    },
    Quirk {
        id: "fragile",
        name: "Fragile",
        description: "This item is prone to breaking. If the item is a weapon, when you roll a 1 on the d20 for an attack roll using the item, the weapon breaks. If the item isn't a weapon, whenever you suffer a critical hit, roll a d20 for each fragile item you wear, hold, or carry. On a 1, the item breaks and is no longer usable.",
        d20_range: 7..=8,
        item_types: Applicability::All,
        effects: &[],
        weight_multiplier: None,
        value_multiplier: None,
        hp_multiplier: None,
    },
    Quirk {
        id: "unwieldy",
        name: "Unwieldy",
        description: "This item is poorly balanced or interferes with your movement. Whenever you make an attack with this weapon, or make a Dexterity saving throw or Dexterity (Acrobatics) check while wearing or carrying it, and roll a 1 on the d20, there are consequences. If the item is a weapon, it flies 10 feet in a random direction. If the item isn't a weapon, you fall prone.",
        d20_range: 9..=10,
        item_types: Applicability::All,
        effects: &[],
        weight_multiplier: None,
        value_multiplier: None,
        hp_multiplier: None,
    },
    Quirk {
        id: "degradable",
        name: "Degradable",
        description: "Spending time in water or other reactive environments causes this item to degrade. Roll a d20 each time it emerges after being submerged in water, or each hour it spends in a corrosive environment. On a 1, the item breaks and is no longer usable.",
        d20_range: 11..=12,
        item_types: Applicability::All,
        effects: &[],
        weight_multiplier: None,
        value_multiplier: None,
        hp_multiplier: None,
    },
    Quirk {
        id: "noisy",
        name: "Noisy",
        description: "Something about this item squeaks or rustles. You have disadvantage on Dexterity (Stealth) checks while wearing or carrying the item, even if the item is stowed away.",
        d20_range: 13..=14,
        item_types: Applicability::All,
        effects: &[(
            EffectTarget::All,
            &[EffectChange {
                key: "flags.midi-qol.disadvantage.skill.check.ste",
                mode: EffectMode::Custom,
                value: "1",
            }],
        )],
        weight_multiplier: None,
        value_multiplier: None,
        hp_multiplier: None,
    },
    Quirk {
        id: "pungent",
        name: "Pungent",
        description: "This item has a distinctly off-putting odour. While wearing or carrying the item, you have disadvantage on Charisma checks against creatures that don't like bad smells, and creatures have advantage on Wisdom (Perception) checks made to detect you by smell.",
        d20_range: 15..=15,
        item_types: Applicability::All,
        effects: &[],
        weight_multiplier: None,
        value_multiplier: None,
        hp_multiplier: None,
    },
    Quirk {
        id: "heavy",
        name: "Heavy",
        description: "This item weighs twice as much as normal.",
        d20_range: 16..=16,
        item_types: Applicability::All,
        effects: &[],
        weight_multiplier: Some(2.0),
        value_multiplier: None,
        hp_multiplier: None,
    },
    Quirk {
        id: "garish",
        name: "Garish",
        description: "The designs and colours in this item are all wrong. While you wear or hold the item, you have disadvantage on Charisma (Intimidation) checks against creatures that can see the item.",
        d20_range: 17..=17,
        item_types: Applicability::All,
        effects: &[(
            EffectTarget::All,
            &[EffectChange {
                key: "flags.midi-qol.disadvantage.skill.check.itm",
                mode: EffectMode::Custom,
                value: "1",
            }],
        )],
        weight_multiplier: None,
        value_multiplier: None,
        hp_multiplier: None,
    },
    Quirk {
        id: "mediocreFinish",
        name: "Mediocre Finish",
        description: "This item looks like crap and is worth half its normal value.",
        d20_range: 18..=18,
        item_types: Applicability::All,
        effects: &[],
        weight_multiplier: None,
        value_multiplier: Some(0.5),
        hp_multiplier: None,
    },
    Quirk {
        id: "underInsulated",
        name: "Under Insulated",
        description: "Something about this item conducts heat or is under-insulated. While wearing or carrying the item, whenever you take cold or fire damage, you take an additional 1d8 damage of the same type.",
        d20_range: 19..=19,
        item_types: Applicability::All,
        effects: &[],
        weight_multiplier: None,
        value_multiplier: None,
        hp_multiplier: None,
    },
    Quirk {
        id: "dangerous",
        name: "Dangerous",
        description: "When you make an attack with this item, while wearing this clothing or armour, or while holding this held item, the range of values that result in a critical fail increases by 1 (e.g. from a result of 1, to a result of 1-2 on the d20).",
        d20_range: 20..=20,
        item_types: Applicability::All,
        effects: &[(
            EffectTarget::All,
            &[EffectChange {
                key: "flags.midi-qol.fumbleThreshold",
                mode: EffectMode::Add,
                value: "1",
            }],
        )],
        weight_multiplier: None,
        value_multiplier: None,
        hp_multiplier: None,
    },
];

/// Boons, drawn when a check beats its DC by five or more.
pub static MANUFACTURING_BOONS: &[Quirk] = &[
    Quirk {
        id: "durable",
        name: "Durable",
        description: "The hit points of this item are tripled.",
        d20_range: 1..=2,
        item_types: Applicability::All,
        effects: &[],
        weight_multiplier: None,
        value_multiplier: None,
        hp_multiplier: Some(3.0),
    },
    Quirk {
        id: "unreactive",
        name: "Unreactive",
        description: "This item resists corrosion and rot. If an environmental effect or creature would cause an item to become damaged (such as a gray ooze's Corrode Metal), roll a d20. On an 11 or higher, the item is unaffected.",
        d20_range: 3..=4,
        item_types: Applicability::All,
        effects: &[],
        weight_multiplier: None,
        value_multiplier: None,
        hp_multiplier: None,
    },
    Quirk {
        id: "lightweight",
        name: "Lightweight",
        description: "This item weighs half as much as normal at no detriment to its strength or potential to do damage. If it is a weapon with the heavy property, it loses this property. If it doesn't have the heavy property, it gains the light property.",
        d20_range: 5..=6,
        item_types: Applicability::All,
        effects: &[],
        weight_multiplier: Some(0.5),
        value_multiplier: None,
        hp_multiplier: None,
    },
    Quirk {
        id: "magnificentFinish",
        name: "Magnificent Finish",
        description: "This item's finish is on point and it is worth twice its normal value.",
        d20_range: 7..=8,
        item_types: Applicability::All,
        effects: &[],
        weight_multiplier: None,
        value_multiplier: Some(2.0),
        hp_multiplier: None,
    },
    Quirk {
        id: "flashy",
        name: "Flashy",
        description: "This item looks really cool. While you wear or hold the item, you have advantage on Charisma (Persuasion) checks against creatures that can see the item.",
        d20_range: 9..=10,
        item_types: Applicability::All,
        effects: &[(
            EffectTarget::All,
            &[EffectChange {
                key: "flags.midi-qol.advantage.skill.check.per",
                mode: EffectMode::Custom,
                value: "1",
            }],
        )],
        weight_multiplier: None,
        value_multiplier: None,
        hp_multiplier: None,
    },
    Quirk {
        id: "insulated",
        name: "Insulated",
        description: "If this item is clothing or armour, you have advantage on Constitution saving throws against environmental effects caused by cold weather. If it is a weapon or held item, you have advantage on saving throws against the heat metal spell while holding it.",
        d20_range: 11..=12,
        item_types: Applicability::Only(&[
            ItemType::Armor,
            ItemType::Clothing,
            ItemType::HeldItem,
            ItemType::Weapon,
        ]),
        effects: &[],
        weight_multiplier: None,
        value_multiplier: None,
        hp_multiplier: None,
    },
    Quirk {
        id: "grippy",
        name: "Grippy",
        description: "You have advantage on ability checks and saving throws made to resist being disarmed of this item, or having it taken from you against your will.",
        d20_range: 13..=14,
        item_types: Applicability::Only(&[ItemType::HeldItem, ItemType::Weapon]),
        effects: &[],
        weight_multiplier: None,
        value_multiplier: None,
        hp_multiplier: None,
    },
    Quirk {
        id: "quickRelease",
        name: "Quick Release",
        description: "If this item is armour or a shield, it is quick to equip or stow. The time to don or doff the item is ten times quicker (a shield takes either a bonus action or an action).",
        d20_range: 15..=16,
        item_types: Applicability::Only(&[ItemType::Armor, ItemType::Shield]),
        effects: &[],
        weight_multiplier: None,
        value_multiplier: None,
        hp_multiplier: None,
    },
    Quirk {
        id: "aerodynamic",
        name: "Aerodynamic",
        description: "If the item has the thrown property or is ammunition, its normal and long ranges increase by 50% (rounded down; if the item is ammunition it increases the range of the weapon that fires it by 50% instead).",
        d20_range: 17..=18,
        item_types: Applicability::Only(&[ItemType::Ammunition, ItemType::ThrownWeapon]),
        effects: &[],
        weight_multiplier: None,
        value_multiplier: None,
        hp_multiplier: None,
    },
    Quirk {
        id: "perfectBalance",
        name: "Perfect Balance",
        description: "If this item is a weapon, whenever you roll a 1 on the d20 when you make an attack roll with it, you can reroll the d20 and must use the new result. If this item is armour or clothing, whenever you roll a 1 on the d20 when you make a Dexterity (Acrobatics) check or Dexterity saving throw, you can reroll the d20 and must use the new result.",
        d20_range: 19..=19,
        item_types: Applicability::Only(&[ItemType::Armor, ItemType::Clothing, ItemType::Weapon]),
        effects: &[],
        weight_multiplier: None,
        value_multiplier: None,
        hp_multiplier: None,
    },
    Quirk {
        id: "artisanalCraftsmanship",
        name: "Artisanal Craftsmanship",
        description: "If this item is a weapon, it has a +1 bonus to its damage rolls. If it is armour, bludgeoning, piercing, and slashing damage that you take from nonmagical attacks is reduced by 1.",
        d20_range: 20..=20,
        item_types: Applicability::Only(&[ItemType::Armor, ItemType::Weapon]),
        effects: &[
            (
                EffectTarget::Type(ItemType::Weapon),
                &[EffectChange {
                    key: "system.damage.bonus",
                    mode: EffectMode::Add,
                    value: "1",
                }],
            ),
            (
                EffectTarget::Type(ItemType::Armor),
                &[EffectChange {
                    key: "system.traits.dm.amount.physical",
                    mode: EffectMode::Add,
                    value: "-1",
                }],
            ),
        ],
        weight_multiplier: None,
        value_multiplier: None,
        hp_multiplier: None,
    },
];

/// Look up a catalog entry by kind and id.
pub fn find_quirk(kind: QuirkKind, id: &str) -> Option<&'static Quirk> {
    kind.table().iter().find(|q| q.id == id)
}
