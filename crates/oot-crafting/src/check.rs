//! Crafting checks: the request sent out and the report that comes back.
//!
//! A request carries everything a helper needs to roll the check. Once a
//! roll total is known, [`perform_check`] resolves the outcome and draws
//! the flaws and boons, capping boons by what the item's rarity still
//! allows.

use serde::{Deserialize, Serialize};

use crate::dice::DieSource;
use crate::error::CraftError;
use crate::item::ItemType;
use crate::outcome::{Outcome, resolve_outcome};
use crate::quirk::{ResolvedQuirk, draw_boons, draw_flaws};
use crate::rarity::{CraftingAbility, Rarity};

/// Which of the two crafting checks is being rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    /// Shapes the item. May destroy it.
    Creation,
    /// Imbues the item. Runs only after a surviving creation check.
    Enchanting,
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Creation => write!(f, "Creation Check"),
            Self::Enchanting => write!(f, "Enchanting Check"),
        }
    }
}

impl std::str::FromStr for CheckKind {
    type Err = CraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "creation" | "create" => Ok(Self::Creation),
            "enchanting" | "enchant" => Ok(Self::Enchanting),
            _ => Err(CraftError::UnknownCheckKind(s.to_string())),
        }
    }
}

/// Everything needed to roll one crafting check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckRequest {
    /// Creation or enchanting.
    pub kind: CheckKind,
    /// The skill or tool to roll.
    pub ability: &'static CraftingAbility,
    /// Target difficulty.
    pub dc: i32,
    /// Boons the item already has from earlier checks.
    pub existing_boons: u32,
    /// Name of the item being crafted.
    pub item_name: String,
    /// Item-type category.
    pub item_type: ItemType,
    /// Rarity tier.
    pub rarity: Rarity,
}

impl CheckRequest {
    /// How many more boons the item may gain.
    pub fn remaining_boons(&self) -> u32 {
        self.rarity
            .max_enchanting_boons()
            .saturating_sub(self.existing_boons)
    }
}

/// Broad classification of a check report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckTone {
    /// The item was destroyed.
    Destroyed,
    /// At least one boon.
    Success,
    /// At least one flaw and no boons.
    Failure,
    /// No quirks.
    Neutral,
}

impl std::fmt::Display for CheckTone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Destroyed => write!(f, "destroyed"),
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// The result of a rolled crafting check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckReport {
    /// Creation or enchanting.
    pub kind: CheckKind,
    /// The check total that was rolled.
    pub roll: i32,
    /// The DC it was rolled against.
    pub dc: i32,
    /// The resolved outcome row.
    pub outcome: Outcome,
    /// Flaws drawn.
    pub flaws: Vec<ResolvedQuirk>,
    /// Boons drawn.
    pub boons: Vec<ResolvedQuirk>,
    /// Whether the item was destroyed.
    pub destroyed: bool,
    /// Who rolled the check.
    pub crafter: String,
}

impl CheckReport {
    /// Classify the report.
    pub fn tone(&self) -> CheckTone {
        if self.destroyed {
            CheckTone::Destroyed
        } else if !self.boons.is_empty() {
            CheckTone::Success
        } else if !self.flaws.is_empty() {
            CheckTone::Failure
        } else {
            CheckTone::Neutral
        }
    }
}

/// Resolve a rolled check total into a report.
///
/// A destroyed item draws nothing. Otherwise flaws are drawn for the
/// outcome's flaw count, and boons for the smaller of the outcome's boon
/// count and the boons the rarity still allows.
pub fn perform_check(
    request: &CheckRequest,
    roll_total: i32,
    crafter: &str,
    source: &mut impl DieSource,
) -> CheckReport {
    let outcome = resolve_outcome(roll_total, request.dc);

    let mut flaws = Vec::new();
    let mut boons = Vec::new();

    if !outcome.destroyed {
        let flaw_count = outcome.flaws.to_draw();
        if flaw_count > 0 {
            flaws = draw_flaws(flaw_count, request.item_type, source);
        }
        if outcome.boons > 0 {
            let remaining = request.remaining_boons();
            boons = draw_boons(
                outcome.boons.min(remaining),
                request.item_type,
                remaining,
                source,
            );
        }
    }

    tracing::info!(
        check = %request.kind,
        roll = roll_total,
        dc = request.dc,
        outcome = %outcome.label,
        flaws = flaws.len(),
        boons = boons.len(),
        destroyed = outcome.destroyed,
        "crafting check resolved"
    );

    CheckReport {
        kind: request.kind,
        roll: roll_total,
        dc: request.dc,
        destroyed: outcome.destroyed,
        outcome,
        flaws,
        boons,
        crafter: crafter.to_string(),
    }
}

/// Render a report as the plain-text result card.
pub fn render_report(request: &CheckRequest, report: &CheckReport) -> String {
    let mut out = format!("{} - {}\n", report.kind, report.crafter);
    out.push_str(&format!(
        "Item: {} ({})\n",
        request.item_name,
        request.rarity.label()
    ));
    out.push_str(&format!("Skill: {}\n", request.ability.name));
    out.push_str(&format!("Roll: {} vs DC {}\n", report.roll, report.dc));
    out.push_str(&format!("Result: {}\n", report.outcome.label));

    if report.destroyed {
        out.push_str("Item destroyed!\n");
        return out;
    }

    for (label, quirks) in [("Flaws", &report.flaws), ("Boons", &report.boons)] {
        if quirks.is_empty() {
            continue;
        }
        out.push_str(&format!("{label}:\n"));
        for q in quirks {
            out.push_str(&format!(
                "  - {} (d20: {}): {}\n",
                q.name(),
                q.roll,
                q.quirk.description
            ));
        }
    }

    if report.flaws.is_empty() && report.boons.is_empty() {
        out.push_str("No quirks.\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::FixedRolls;
    use crate::outcome::FlawCount;
    use crate::rarity::find_ability;

    fn request(kind: CheckKind, rarity: Rarity, existing_boons: u32) -> CheckRequest {
        CheckRequest {
            kind,
            ability: find_ability("smith").unwrap(),
            dc: rarity.base_dc(),
            existing_boons,
            item_name: "Longsword".to_string(),
            item_type: ItemType::Weapon,
            rarity,
        }
    }

    #[test]
    fn destroyed_draws_nothing() {
        let req = request(CheckKind::Creation, Rarity::Rare, 0);
        let mut rolls = FixedRolls::new([16]);
        let report = perform_check(&req, 2, "Kael", &mut rolls);
        assert!(report.destroyed);
        assert_eq!(report.outcome.flaws, FlawCount::All);
        assert!(report.flaws.is_empty());
        assert!(report.boons.is_empty());
        assert_eq!(rolls.drawn(), 0);
        assert_eq!(report.tone(), CheckTone::Destroyed);
    }

    #[test]
    fn shortfall_draws_flaws() {
        let req = request(CheckKind::Creation, Rarity::Uncommon, 0);
        let mut rolls = FixedRolls::new([16, 18]);
        let report = perform_check(&req, 9, "Kael", &mut rolls);
        assert_eq!(report.outcome.margin, -6);
        let ids: Vec<&str> = report.flaws.iter().map(|f| f.id()).collect();
        assert_eq!(ids, vec!["heavy", "mediocreFinish"]);
        assert_eq!(report.tone(), CheckTone::Failure);
    }

    #[test]
    fn boons_capped_by_rarity() {
        // Uncommon allows a single boon even on a huge success.
        let req = request(CheckKind::Creation, Rarity::Uncommon, 0);
        let mut rolls = FixedRolls::new([1, 3, 5]);
        let report = perform_check(&req, 30, "Kael", &mut rolls);
        assert_eq!(report.outcome.boons, 3);
        assert_eq!(report.boons.len(), 1);
        assert_eq!(rolls.drawn(), 1);
        assert_eq!(report.tone(), CheckTone::Success);
    }

    #[test]
    fn existing_boons_reduce_the_cap() {
        let req = request(CheckKind::Enchanting, Rarity::Rare, 2);
        let mut rolls = FixedRolls::new([1]);
        let report = perform_check(&req, 40, "Mira", &mut rolls);
        assert!(report.boons.is_empty());
        assert_eq!(rolls.drawn(), 0);
        assert_eq!(report.tone(), CheckTone::Neutral);
    }

    #[test]
    fn remaining_boons_saturates() {
        let req = request(CheckKind::Enchanting, Rarity::Uncommon, 5);
        assert_eq!(req.remaining_boons(), 0);
        let req = request(CheckKind::Enchanting, Rarity::Legendary, 1);
        assert_eq!(req.remaining_boons(), 2);
    }

    #[test]
    fn common_items_never_gain_boons() {
        let req = request(CheckKind::Creation, Rarity::Common, 0);
        let mut rolls = FixedRolls::new([7]);
        let report = perform_check(&req, 25, "Kael", &mut rolls);
        assert!(report.boons.is_empty());
    }

    #[test]
    fn check_kind_parse_and_display() {
        assert_eq!("creation".parse::<CheckKind>().unwrap(), CheckKind::Creation);
        assert_eq!("Enchant".parse::<CheckKind>().unwrap(), CheckKind::Enchanting);
        assert!("forge".parse::<CheckKind>().is_err());
        assert_eq!(CheckKind::Enchanting.to_string(), "Enchanting Check");
    }

    #[test]
    fn report_serde_roundtrip() {
        let req = request(CheckKind::Creation, Rarity::VeryRare, 0);
        let mut rolls = FixedRolls::new([9, 20]);
        let report = perform_check(&req, 31, "Kael", &mut rolls);
        assert_eq!(report.boons.len(), 2);
        let json = serde_json::to_string(&report).unwrap();
        let back: CheckReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn render_lists_quirks() {
        let req = request(CheckKind::Creation, Rarity::Uncommon, 0);
        let mut rolls = FixedRolls::new([16]);
        let report = perform_check(&req, 12, "Kael", &mut rolls);
        let text = render_report(&req, &report);
        assert!(text.starts_with("Creation Check - Kael"));
        assert!(text.contains("Item: Longsword (Uncommon)"));
        assert!(text.contains("Skill: Smith's Tools"));
        assert!(text.contains("Roll: 12 vs DC 15"));
        assert!(text.contains("Result: One flaw"));
        assert!(text.contains("Heavy (d20: 16)"));
    }

    #[test]
    fn render_destroyed_and_empty() {
        let req = request(CheckKind::Creation, Rarity::Uncommon, 0);
        let mut rolls = FixedRolls::new([1]);
        let destroyed = perform_check(&req, 1, "Kael", &mut rolls);
        assert!(render_report(&req, &destroyed).contains("Item destroyed!"));
        let nothing = perform_check(&req, 15, "Kael", &mut rolls);
        assert!(render_report(&req, &nothing).contains("No quirks."));
    }
}
