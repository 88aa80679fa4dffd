//! The crafting workshop: one item taken through both checks.
//!
//! A workshop tracks the selected item, its rarity and type, the DCs and
//! abilities for the creation and enchanting checks, and the two check
//! reports as they arrive. Once both checks are in and the item survived,
//! [`Workshop::finish`] produces the crafted item.

use serde::{Deserialize, Serialize};

use crate::check::{CheckKind, CheckReport, CheckRequest};
use crate::config::CraftingConfig;
use crate::dice::DieSource;
use crate::effects::{ItemEffect, ItemStats, aggregate, describe_quirks};
use crate::error::{CraftError, CraftResult};
use crate::item::ItemType;
use crate::quirk::{QuirkRecord, ResolvedQuirk, reroll};
use crate::rarity::{CraftingAbility, Rarity};

/// The base item chosen for crafting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemBlueprint {
    /// Item name.
    pub name: String,
    /// Image path.
    pub img: String,
    /// Host document category (`weapon`, `equipment`, `consumable`, ...).
    pub category: String,
    /// Armor or consumable subtype, if any.
    pub subtype: Option<String>,
    /// Whether the item has the thrown property.
    pub thrown: bool,
    /// Base stats.
    pub stats: ItemStats,
    /// Existing description text.
    pub description: String,
}

impl ItemBlueprint {
    /// A blueprint with the given name and category and empty defaults.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            img: String::new(),
            category: category.into(),
            subtype: None,
            thrown: false,
            stats: ItemStats::default(),
            description: String::new(),
        }
    }

    /// The crafting category detected from the host classification.
    pub fn detect_type(&self) -> ItemType {
        ItemType::detect(&self.category, self.subtype.as_deref(), self.thrown)
    }
}

/// A flaw together with the check that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlawRef {
    /// The check whose report holds the flaw.
    pub source: CheckKind,
    /// Position within that report's flaw list.
    pub source_index: usize,
    /// The flaw itself.
    pub quirk: ResolvedQuirk,
}

/// Crafting bookkeeping stored on the finished item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraftedFlags {
    /// Always true for items produced by a workshop.
    pub crafted: bool,
    /// Flaws the item carries.
    pub flaws: Vec<QuirkRecord>,
    /// Boons the item carries.
    pub boons: Vec<QuirkRecord>,
    /// Creation check total.
    pub creation_roll: i32,
    /// Enchanting check total.
    pub enchanting_roll: i32,
    /// Rarity tier.
    pub rarity: Rarity,
}

/// The finished item, ready to hand to the item-creation collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraftedItem {
    /// "`<base name> (Crafted)`".
    pub name: String,
    /// Image path.
    pub img: String,
    /// Host document category.
    pub category: String,
    /// Crafting category.
    pub item_type: ItemType,
    /// Rarity tier.
    pub rarity: Rarity,
    /// Stats after quirk multipliers.
    pub stats: ItemStats,
    /// Description with the crafting quirks appended.
    pub description: String,
    /// One effect per quirk.
    pub effects: Vec<ItemEffect>,
    /// Crafting bookkeeping.
    pub flags: CraftedFlags,
    /// The creation check report.
    pub creation: CheckReport,
    /// The enchanting check report.
    pub enchanting: CheckReport,
}

impl CraftedItem {
    /// Plain-text announcement of the finished item.
    pub fn summary(&self) -> String {
        let mut out = format!("Crafting Complete!\n{}\n", self.name);
        out.push_str(&format!("Rarity: {}\n", self.rarity.label()));
        for report in [&self.creation, &self.enchanting] {
            let label = match report.kind {
                CheckKind::Creation => "Creation Roll",
                CheckKind::Enchanting => "Enchanting Roll",
            };
            out.push_str(&format!(
                "{label}: {} vs DC {} ({})\n",
                report.roll, report.dc, report.outcome.label
            ));
        }

        let flaws: Vec<&ResolvedQuirk> = self.all_quirks(|r| r.flaws.as_slice());
        let boons: Vec<&ResolvedQuirk> = self.all_quirks(|r| r.boons.as_slice());
        for (label, quirks) in [("Flaws", &flaws), ("Boons", &boons)] {
            if quirks.is_empty() {
                continue;
            }
            out.push_str(&format!("{label} ({}):\n", quirks.len()));
            for q in quirks.iter() {
                out.push_str(&format!("  - {q}\n"));
            }
        }
        if flaws.is_empty() && boons.is_empty() {
            out.push_str("No quirks rolled.\n");
        }
        out
    }

    fn all_quirks(&self, pick: fn(&CheckReport) -> &[ResolvedQuirk]) -> Vec<&ResolvedQuirk> {
        pick(&self.creation)
            .iter()
            .chain(pick(&self.enchanting).iter())
            .collect()
    }
}

/// State of one crafting session.
#[derive(Debug, Clone)]
pub struct Workshop {
    item: Option<ItemBlueprint>,
    rarity: Rarity,
    item_type: ItemType,
    creation_ability: &'static CraftingAbility,
    enchanting_ability: &'static CraftingAbility,
    creation_dc: i32,
    enchanting_dc: i32,
    creation: Option<CheckReport>,
    enchanting: Option<CheckReport>,
    complete: bool,
}

impl Workshop {
    /// Open a workshop with the given defaults.
    pub fn new(config: &CraftingConfig) -> CraftResult<Self> {
        let (creation_ability, enchanting_ability) = config.abilities()?;
        Ok(Self {
            item: None,
            rarity: config.rarity,
            item_type: config.item_type,
            creation_ability,
            enchanting_ability,
            creation_dc: config.rarity.base_dc(),
            enchanting_dc: config.rarity.base_dc(),
            creation: None,
            enchanting: None,
            complete: false,
        })
    }

    /// The selected item, if any.
    pub fn item(&self) -> Option<&ItemBlueprint> {
        self.item.as_ref()
    }

    /// Current rarity.
    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    /// Current item type.
    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    /// DC for the creation check.
    pub fn creation_dc(&self) -> i32 {
        self.creation_dc
    }

    /// DC for the enchanting check.
    pub fn enchanting_dc(&self) -> i32 {
        self.enchanting_dc
    }

    /// The creation report, once recorded.
    pub fn creation(&self) -> Option<&CheckReport> {
        self.creation.as_ref()
    }

    /// The enchanting report, once recorded.
    pub fn enchanting(&self) -> Option<&CheckReport> {
        self.enchanting.as_ref()
    }

    /// Whether both checks are in.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Select the item to craft and detect its type.
    pub fn select_item(&mut self, item: ItemBlueprint) {
        self.item_type = item.detect_type();
        self.item = Some(item);
    }

    /// Deselect the current item.
    pub fn clear_item(&mut self) {
        self.item = None;
    }

    /// Change the rarity, resetting both DCs to its base DC.
    pub fn set_rarity(&mut self, rarity: Rarity) {
        self.rarity = rarity;
        self.creation_dc = rarity.base_dc();
        self.enchanting_dc = rarity.base_dc();
    }

    /// Override the item type.
    pub fn set_item_type(&mut self, item_type: ItemType) {
        self.item_type = item_type;
    }

    /// Override the creation DC.
    pub fn set_creation_dc(&mut self, dc: i32) -> CraftResult<()> {
        self.creation_dc = positive_dc(dc)?;
        Ok(())
    }

    /// Override the enchanting DC.
    pub fn set_enchanting_dc(&mut self, dc: i32) -> CraftResult<()> {
        self.enchanting_dc = positive_dc(dc)?;
        Ok(())
    }

    /// Choose the ability rolled for the creation check.
    pub fn set_creation_ability(&mut self, ability: &'static CraftingAbility) {
        self.creation_ability = ability;
    }

    /// Choose the ability rolled for the enchanting check.
    pub fn set_enchanting_ability(&mut self, ability: &'static CraftingAbility) {
        self.enchanting_ability = ability;
    }

    /// Build the creation check request.
    pub fn creation_request(&self) -> CraftResult<CheckRequest> {
        let item = self.item.as_ref().ok_or(CraftError::NoItemSelected)?;
        Ok(CheckRequest {
            kind: CheckKind::Creation,
            ability: self.creation_ability,
            dc: self.creation_dc,
            existing_boons: 0,
            item_name: item.name.clone(),
            item_type: self.item_type,
            rarity: self.rarity,
        })
    }

    /// Build the enchanting check request. Requires a surviving creation
    /// check; boons from creation count against the rarity cap.
    pub fn enchanting_request(&self) -> CraftResult<CheckRequest> {
        let item = self.item.as_ref().ok_or(CraftError::NoItemSelected)?;
        let creation = self.creation.as_ref().ok_or(CraftError::CreationIncomplete)?;
        if creation.destroyed {
            return Err(CraftError::ItemDestroyed);
        }
        Ok(CheckRequest {
            kind: CheckKind::Enchanting,
            ability: self.enchanting_ability,
            dc: self.enchanting_dc,
            existing_boons: creation.boons.len() as u32,
            item_name: item.name.clone(),
            item_type: self.item_type,
            rarity: self.rarity,
        })
    }

    /// Store a check report. An enchanting report completes the session.
    pub fn record(&mut self, report: CheckReport) {
        match report.kind {
            CheckKind::Creation => self.creation = Some(report),
            CheckKind::Enchanting => {
                self.enchanting = Some(report);
                self.complete = true;
            }
        }
    }

    /// Every flaw from both checks, creation first.
    pub fn flaws(&self) -> Vec<FlawRef> {
        let mut out = Vec::new();
        for report in [&self.creation, &self.enchanting].into_iter().flatten() {
            for (source_index, quirk) in report.flaws.iter().enumerate() {
                out.push(FlawRef {
                    source: report.kind,
                    source_index,
                    quirk: *quirk,
                });
            }
        }
        out
    }

    /// Replace the flaw at `index` (as listed by [`Workshop::flaws`]) with
    /// a fresh draw. Returns the old and new flaw.
    ///
    /// The replacement never duplicates another flaw on the item. If the
    /// draw comes up empty the original stays and
    /// [`CraftError::NoReplacement`] is returned.
    pub fn reroll_flaw(
        &mut self,
        index: usize,
        is_gm: bool,
        source: &mut impl DieSource,
    ) -> CraftResult<(ResolvedQuirk, ResolvedQuirk)> {
        if !is_gm {
            return Err(CraftError::NotPermitted("reroll flaws"));
        }
        let flaws = self.flaws();
        let target = *flaws.get(index).ok_or(CraftError::FlawNotFound(index))?;
        let held: Vec<ResolvedQuirk> = flaws.iter().map(|f| f.quirk).collect();

        let replacement = reroll(&held, index, self.item_type, source)
            .ok_or_else(|| CraftError::NoReplacement(target.quirk.name().to_string()))?;

        let slot = self
            .report_mut(target.source)
            .and_then(|r| r.flaws.get_mut(target.source_index))
            .ok_or(CraftError::FlawNotFound(index))?;
        *slot = replacement;

        tracing::info!(old = target.quirk.id(), new = replacement.id(), roll = replacement.roll, "flaw rerolled");
        Ok((target.quirk, replacement))
    }

    /// Remove the flaw at `index` (as listed by [`Workshop::flaws`]).
    pub fn remove_flaw(&mut self, index: usize, is_gm: bool) -> CraftResult<ResolvedQuirk> {
        if !is_gm {
            return Err(CraftError::NotPermitted("remove flaws"));
        }
        let target = *self
            .flaws()
            .get(index)
            .ok_or(CraftError::FlawNotFound(index))?;
        let report = self
            .report_mut(target.source)
            .ok_or(CraftError::FlawNotFound(index))?;
        let removed = report.flaws.remove(target.source_index);
        tracing::info!(flaw = removed.id(), "flaw removed");
        Ok(removed)
    }

    /// Produce the crafted item and reset the workshop.
    pub fn finish(&mut self) -> CraftResult<CraftedItem> {
        let (Some(creation), Some(enchanting)) = (&self.creation, &self.enchanting) else {
            return Err(CraftError::CraftingIncomplete);
        };
        if !self.complete {
            return Err(CraftError::CraftingIncomplete);
        }
        if creation.destroyed || enchanting.destroyed {
            return Err(CraftError::ItemDestroyed);
        }
        let item = self.item.as_ref().ok_or(CraftError::NoItemSelected)?;

        let flaws: Vec<ResolvedQuirk> = creation
            .flaws
            .iter()
            .chain(&enchanting.flaws)
            .copied()
            .collect();
        let boons: Vec<ResolvedQuirk> = creation
            .boons
            .iter()
            .chain(&enchanting.boons)
            .copied()
            .collect();
        let quirks: Vec<ResolvedQuirk> = flaws.iter().chain(&boons).copied().collect();

        let agg = aggregate(&quirks, self.item_type);
        let quirk_text = describe_quirks(&flaws, &boons);
        let description = if item.description.is_empty() {
            quirk_text
        } else {
            format!("{}\n\n---\n\n{quirk_text}", item.description)
        };

        let crafted = CraftedItem {
            name: format!("{} (Crafted)", item.name),
            img: item.img.clone(),
            category: item.category.clone(),
            item_type: self.item_type,
            rarity: self.rarity,
            stats: agg.apply(&item.stats),
            description,
            effects: agg.effects,
            flags: CraftedFlags {
                crafted: true,
                flaws: flaws.iter().copied().map(QuirkRecord::from).collect(),
                boons: boons.iter().copied().map(QuirkRecord::from).collect(),
                creation_roll: creation.roll,
                enchanting_roll: enchanting.roll,
                rarity: self.rarity,
            },
            creation: creation.clone(),
            enchanting: enchanting.clone(),
        };

        tracing::info!(
            item = %crafted.name,
            flaws = flaws.len(),
            boons = boons.len(),
            "item crafted"
        );
        self.reset();
        Ok(crafted)
    }

    /// Clear the item and both reports.
    pub fn reset(&mut self) {
        self.item = None;
        self.creation = None;
        self.enchanting = None;
        self.complete = false;
    }

    fn report_mut(&mut self, kind: CheckKind) -> Option<&mut CheckReport> {
        match kind {
            CheckKind::Creation => self.creation.as_mut(),
            CheckKind::Enchanting => self.enchanting.as_mut(),
        }
    }
}

fn positive_dc(dc: i32) -> CraftResult<i32> {
    if dc > 0 {
        Ok(dc)
    } else {
        Err(CraftError::InvalidDc(dc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::perform_check;
    use crate::dice::FixedRolls;

    fn longsword() -> ItemBlueprint {
        ItemBlueprint {
            name: "Longsword".to_string(),
            img: "icons/weapons/longsword.webp".to_string(),
            category: "weapon".to_string(),
            subtype: None,
            thrown: false,
            stats: ItemStats {
                weight: 3.0,
                price: 15.0,
                hp: Some(10),
            },
            description: "A versatile blade.".to_string(),
        }
    }

    fn workshop() -> Workshop {
        let mut w = Workshop::new(&CraftingConfig::default()).unwrap();
        w.select_item(longsword());
        w
    }

    fn run_check(w: &mut Workshop, kind: CheckKind, total: i32, rolls: &[u32]) {
        let request = match kind {
            CheckKind::Creation => w.creation_request().unwrap(),
            CheckKind::Enchanting => w.enchanting_request().unwrap(),
        };
        let mut source = FixedRolls::new(rolls.to_vec());
        let report = perform_check(&request, total, "Kael", &mut source);
        w.record(report);
    }

    #[test]
    fn defaults_from_config() {
        let w = Workshop::new(&CraftingConfig::default().with_rarity(Rarity::Rare)).unwrap();
        assert_eq!(w.rarity(), Rarity::Rare);
        assert_eq!(w.creation_dc(), 18);
        assert_eq!(w.enchanting_dc(), 18);
        assert!(w.item().is_none());
    }

    #[test]
    fn select_detects_type() {
        let mut w = Workshop::new(&CraftingConfig::default()).unwrap();
        let mut shield = ItemBlueprint::new("Shield", "equipment");
        shield.subtype = Some("shield".to_string());
        w.select_item(shield);
        assert_eq!(w.item_type(), ItemType::Shield);
        w.set_item_type(ItemType::HeldItem);
        assert_eq!(w.item_type(), ItemType::HeldItem);
    }

    #[test]
    fn rarity_resets_dcs() {
        let mut w = workshop();
        w.set_creation_dc(12).unwrap();
        w.set_rarity(Rarity::Artifact);
        assert_eq!(w.creation_dc(), 30);
        assert_eq!(w.enchanting_dc(), 30);
    }

    #[test]
    fn dc_must_be_positive() {
        let mut w = workshop();
        assert!(matches!(w.set_creation_dc(0), Err(CraftError::InvalidDc(0))));
        assert!(w.set_enchanting_dc(-3).is_err());
        assert_eq!(w.creation_dc(), 15);
        w.set_enchanting_dc(17).unwrap();
        assert_eq!(w.enchanting_dc(), 17);
    }

    #[test]
    fn creation_requires_item() {
        let w = Workshop::new(&CraftingConfig::default()).unwrap();
        assert!(matches!(w.creation_request(), Err(CraftError::NoItemSelected)));
    }

    #[test]
    fn enchanting_requires_creation() {
        let w = workshop();
        assert!(matches!(
            w.enchanting_request(),
            Err(CraftError::CreationIncomplete)
        ));
    }

    #[test]
    fn enchanting_blocked_after_destruction() {
        let mut w = workshop();
        run_check(&mut w, CheckKind::Creation, 1, &[1]);
        assert!(w.creation().unwrap().destroyed);
        assert!(matches!(w.enchanting_request(), Err(CraftError::ItemDestroyed)));
    }

    #[test]
    fn enchanting_counts_creation_boons() {
        let mut w = workshop();
        w.set_rarity(Rarity::Rare);
        run_check(&mut w, CheckKind::Creation, 25, &[7]);
        assert_eq!(w.creation().unwrap().boons.len(), 1);
        let req = w.enchanting_request().unwrap();
        assert_eq!(req.existing_boons, 1);
        assert_eq!(req.remaining_boons(), 1);
        assert_eq!(req.ability.id, "arc");
    }

    #[test]
    fn flaws_list_both_sources() {
        let mut w = workshop();
        run_check(&mut w, CheckKind::Creation, 9, &[16, 18]);
        run_check(&mut w, CheckKind::Enchanting, 12, &[20]);
        let flaws = w.flaws();
        assert_eq!(flaws.len(), 3);
        assert_eq!(flaws[0].source, CheckKind::Creation);
        assert_eq!(flaws[1].source_index, 1);
        assert_eq!(flaws[2].source, CheckKind::Enchanting);
        assert_eq!(flaws[2].source_index, 0);
        assert_eq!(flaws[2].quirk.id(), "dangerous");
    }

    #[test]
    fn reroll_replaces_in_place() {
        let mut w = workshop();
        run_check(&mut w, CheckKind::Creation, 9, &[16, 18]);
        let mut rolls = FixedRolls::new([9]);
        let (old, new) = w.reroll_flaw(1, true, &mut rolls).unwrap();
        assert_eq!(old.id(), "mediocreFinish");
        assert_eq!(new.id(), "unwieldy");
        assert_eq!(w.creation().unwrap().flaws[1].id(), "unwieldy");
    }

    #[test]
    fn reroll_without_replacement_keeps_original() {
        let mut w = workshop();
        run_check(&mut w, CheckKind::Creation, 9, &[16, 18]);
        let mut rolls = FixedRolls::new([16]);
        let err = w.reroll_flaw(1, true, &mut rolls).unwrap_err();
        assert!(matches!(err, CraftError::NoReplacement(_)));
        assert_eq!(w.creation().unwrap().flaws[1].id(), "mediocreFinish");
    }

    #[test]
    fn reroll_and_remove_are_gm_only() {
        let mut w = workshop();
        run_check(&mut w, CheckKind::Creation, 12, &[16]);
        let mut rolls = FixedRolls::new([9]);
        assert!(matches!(
            w.reroll_flaw(0, false, &mut rolls),
            Err(CraftError::NotPermitted(_))
        ));
        assert!(matches!(w.remove_flaw(0, false), Err(CraftError::NotPermitted(_))));
        assert_eq!(rolls.drawn(), 0);
    }

    #[test]
    fn remove_flaw() {
        let mut w = workshop();
        run_check(&mut w, CheckKind::Creation, 9, &[16, 18]);
        run_check(&mut w, CheckKind::Enchanting, 12, &[20]);
        let removed = w.remove_flaw(2, true).unwrap();
        assert_eq!(removed.id(), "dangerous");
        assert!(w.enchanting().unwrap().flaws.is_empty());
        assert_eq!(w.flaws().len(), 2);
        assert!(matches!(w.remove_flaw(5, true), Err(CraftError::FlawNotFound(5))));
    }

    #[test]
    fn finish_requires_both_checks() {
        let mut w = workshop();
        run_check(&mut w, CheckKind::Creation, 15, &[]);
        assert!(matches!(w.finish(), Err(CraftError::CraftingIncomplete)));
    }

    #[test]
    fn finish_builds_crafted_item() {
        let mut w = workshop();
        // Creation: one flaw (heavy). Enchanting: one boon (magnificentFinish).
        run_check(&mut w, CheckKind::Creation, 12, &[16]);
        run_check(&mut w, CheckKind::Enchanting, 21, &[7]);
        assert!(w.is_complete());

        let item = w.finish().unwrap();
        assert_eq!(item.name, "Longsword (Crafted)");
        assert_eq!(item.rarity, Rarity::Uncommon);
        assert_eq!(item.stats.weight, 6.0);
        assert_eq!(item.stats.price, 30.0);
        assert_eq!(item.stats.hp, Some(10));
        assert_eq!(item.effects.len(), 2);
        assert_eq!(item.effects[0].name, "Heavy (Flaw)");
        assert_eq!(item.effects[1].name, "Magnificent Finish (Boon)");
        assert!(item.description.starts_with("A versatile blade."));
        assert!(item.description.contains("### Crafting Quirks"));
        assert!(item.flags.crafted);
        assert_eq!(item.flags.flaws[0].id, "heavy");
        assert_eq!(item.flags.boons[0].roll, 7);
        assert_eq!(item.flags.creation_roll, 12);
        assert_eq!(item.flags.enchanting_roll, 21);

        // The workshop resets after finishing.
        assert!(w.item().is_none());
        assert!(w.creation().is_none());
        assert!(!w.is_complete());
    }

    #[test]
    fn finish_summary() {
        let mut w = workshop();
        run_check(&mut w, CheckKind::Creation, 15, &[]);
        run_check(&mut w, CheckKind::Enchanting, 15, &[]);
        let item = w.finish().unwrap();
        let text = item.summary();
        assert!(text.contains("Crafting Complete!"));
        assert!(text.contains("Creation Roll: 15 vs DC 15 (Nothing)"));
        assert!(text.contains("No quirks rolled."));
    }

    #[test]
    fn finish_rejects_destroyed_enchanting() {
        let mut w = workshop();
        run_check(&mut w, CheckKind::Creation, 15, &[]);
        run_check(&mut w, CheckKind::Enchanting, 0, &[]);
        assert!(matches!(w.finish(), Err(CraftError::ItemDestroyed)));
    }

    #[test]
    fn reset_clears_state() {
        let mut w = workshop();
        run_check(&mut w, CheckKind::Creation, 15, &[]);
        w.reset();
        assert!(w.item().is_none());
        assert!(w.creation().is_none());
    }
}
