//! Crafting outcome engine for tabletop item manufacturing.
//!
//! A crafting check's margin over its DC selects a row of the outcome
//! table. That row decides how many flaws or boons the item gains, or
//! whether it is destroyed. Quirks are drawn from d20 catalogs and folded
//! into stat multipliers and one effect record per quirk.
//!
//! Around that core sit the crafting workshop (selection, DCs, the
//! creation and enchanting checks, flaw rerolls, the finished item), a
//! correlation table for checks rolled by other players, and a shared
//! party inventory ledger.

pub mod check;
pub mod config;
pub mod dice;
pub mod effects;
pub mod error;
pub mod inventory;
pub mod item;
pub mod outcome;
pub mod pending;
pub mod quirk;
pub mod rarity;
pub mod validate;
pub mod workshop;

pub use check::{CheckKind, CheckReport, CheckRequest, perform_check, render_report};
pub use config::CraftingConfig;
pub use dice::{CheckRoll, DieSource, FixedRolls, roll_check};
pub use effects::{Aggregate, ItemEffect, ItemStats, aggregate, describe_quirks};
pub use error::{CraftError, CraftResult};
pub use inventory::{ActorInventory, InventoryChange, ItemData, PartyInventory, PartyItem};
pub use item::ItemType;
pub use outcome::{FlawCount, OUTCOME_THRESHOLDS, Outcome, resolve_outcome};
pub use pending::{CheckId, PendingChecks};
pub use quirk::{Quirk, QuirkKind, ResolvedQuirk};
pub use rarity::{CraftingAbility, Rarity, find_ability};
pub use validate::{ValidationIssue, validate_all};
pub use workshop::{CraftedItem, ItemBlueprint, Workshop};
