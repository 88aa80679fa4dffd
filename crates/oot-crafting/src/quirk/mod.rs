//! Quirks: the flaws and boons a crafted item can gain.
//!
//! Each catalog is a d20 table. A quirk claims an inclusive slice of die
//! faces, lists the item types it applies to, and optionally carries
//! structured effect changes and economic multipliers.

pub mod select;
pub mod tables;

pub use select::{draw_boons, draw_flaws, draw_quirk, reroll};
pub use tables::{MANUFACTURING_BOONS, MANUFACTURING_FLAWS, find_quirk};

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::CraftError;
use crate::item::ItemType;

/// Whether a quirk hurts or helps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuirkKind {
    /// A negative quirk.
    Flaw,
    /// A positive quirk.
    Boon,
}

impl QuirkKind {
    /// The catalog holding quirks of this kind.
    pub fn table(self) -> &'static [Quirk] {
        match self {
            Self::Flaw => MANUFACTURING_FLAWS,
            Self::Boon => MANUFACTURING_BOONS,
        }
    }

    /// Icon shown on the effect record.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Flaw => "icons/svg/downgrade.svg",
            Self::Boon => "icons/svg/upgrade.svg",
        }
    }
}

impl std::fmt::Display for QuirkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flaw => write!(f, "Flaw"),
            Self::Boon => write!(f, "Boon"),
        }
    }
}

/// The item types a quirk can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    /// Every item type.
    All,
    /// Only the listed types.
    Only(&'static [ItemType]),
}

impl Applicability {
    /// Returns true if a quirk with this applicability can affect `item_type`.
    pub fn applies_to(self, item_type: ItemType) -> bool {
        match self {
            Self::All => true,
            Self::Only(types) => types.contains(&item_type),
        }
    }
}

impl std::fmt::Display for Applicability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Only(types) => {
                let tags: Vec<&str> = types.iter().map(|t| t.tag()).collect();
                write!(f, "{}", tags.join(", "))
            }
        }
    }
}

/// How an effect change combines with the value it targets.
///
/// Discriminants match the host's active-effect modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum EffectMode {
    /// Handled by a module-specific hook.
    Custom = 0,
    /// Multiply the target.
    Multiply = 1,
    /// Add to the target.
    Add = 2,
    /// Keep the lower of target and value.
    Downgrade = 3,
    /// Keep the higher of target and value.
    Upgrade = 4,
    /// Replace the target.
    Override = 5,
}

impl From<EffectMode> for u8 {
    fn from(mode: EffectMode) -> Self {
        mode as u8
    }
}

impl TryFrom<u8> for EffectMode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Custom),
            1 => Ok(Self::Multiply),
            2 => Ok(Self::Add),
            3 => Ok(Self::Downgrade),
            4 => Ok(Self::Upgrade),
            5 => Ok(Self::Override),
            other => Err(format!("invalid effect mode: {other}")),
        }
    }
}

/// A single structured modifier applied by a quirk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EffectChange {
    /// Dotted path of the data field to modify.
    pub key: &'static str,
    /// Combination mode.
    pub mode: EffectMode,
    /// Value, as the host expects it (a string).
    pub value: &'static str,
}

/// Which item type an effect list is keyed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTarget {
    /// The fallback list used for any item type.
    All,
    /// A list specific to one item type.
    Type(ItemType),
}

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Quirk {
    /// Unique slug.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Rules text.
    pub description: &'static str,
    /// Die faces that select this quirk.
    pub d20_range: RangeInclusive<u32>,
    /// Item types this quirk applies to.
    pub item_types: Applicability,
    /// Effect lists keyed by item type or [`EffectTarget::All`].
    pub effects: &'static [(EffectTarget, &'static [EffectChange])],
    /// Weight multiplier, if any.
    pub weight_multiplier: Option<f64>,
    /// Value multiplier, if any.
    pub value_multiplier: Option<f64>,
    /// Hit-point multiplier, if any.
    pub hp_multiplier: Option<f64>,
}

impl Quirk {
    /// Returns true if `roll` selects this quirk.
    pub fn covers(&self, roll: u32) -> bool {
        self.d20_range.contains(&roll)
    }

    /// The effect list registered under exactly `target`, if any.
    pub fn effects_for(&self, target: EffectTarget) -> Option<&'static [EffectChange]> {
        self.effects
            .iter()
            .find(|(t, _)| *t == target)
            .map(|(_, changes)| *changes)
    }
}

/// A quirk assigned to an item by a specific die roll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "QuirkRecord", try_from = "QuirkRecord")]
pub struct ResolvedQuirk {
    /// The catalog entry.
    pub quirk: &'static Quirk,
    /// Flaw or boon.
    pub kind: QuirkKind,
    /// The d20 value that selected it.
    pub roll: u32,
}

impl ResolvedQuirk {
    /// The quirk id.
    pub fn id(&self) -> &'static str {
        self.quirk.id
    }

    /// The quirk display name.
    pub fn name(&self) -> &'static str {
        self.quirk.name
    }
}

impl std::fmt::Display for ResolvedQuirk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (d20: {})", self.quirk.name, self.roll)
    }
}

/// Serializable reference to a resolved quirk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuirkRecord {
    /// Quirk id.
    pub id: String,
    /// Quirk name at the time it was rolled.
    pub name: String,
    /// Flaw or boon.
    pub kind: QuirkKind,
    /// The d20 value that selected it.
    pub roll: u32,
}

impl From<ResolvedQuirk> for QuirkRecord {
    fn from(q: ResolvedQuirk) -> Self {
        Self {
            id: q.quirk.id.to_string(),
            name: q.quirk.name.to_string(),
            kind: q.kind,
            roll: q.roll,
        }
    }
}

impl TryFrom<QuirkRecord> for ResolvedQuirk {
    type Error = CraftError;

    fn try_from(record: QuirkRecord) -> Result<Self, Self::Error> {
        let quirk = find_quirk(record.kind, &record.id).ok_or_else(|| CraftError::UnknownQuirk {
            kind: record.kind.to_string().to_lowercase(),
            id: record.id.clone(),
        })?;
        Ok(Self {
            quirk,
            kind: record.kind,
            roll: record.roll,
        })
    }
}
