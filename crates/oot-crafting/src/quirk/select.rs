//! Drawing quirks from a catalog with a d20.
//!
//! A draw rolls one die and takes the first entry whose range contains the
//! roll and whose id is not excluded. If that entry does not apply to the
//! item type, the draw comes up empty: the die is spent and nothing is
//! retried. Batches therefore may return fewer quirks than requested.

use std::collections::HashSet;

use super::{Quirk, QuirkKind, ResolvedQuirk};
use crate::dice::DieSource;
use crate::item::ItemType;

/// Draw a single quirk from `table`.
///
/// Returns `None` when the roll lands on an excluded id (or on no entry at
/// all), or when the selected entry does not apply to `item_type`.
pub fn draw_quirk(
    table: &'static [Quirk],
    kind: QuirkKind,
    item_type: ItemType,
    exclude: &HashSet<&str>,
    source: &mut impl DieSource,
) -> Option<ResolvedQuirk> {
    let roll = source.roll_d20();

    let Some(quirk) = table
        .iter()
        .find(|q| q.covers(roll) && !exclude.contains(q.id))
    else {
        tracing::debug!(%kind, roll, "no eligible quirk for roll");
        return None;
    };

    if !quirk.item_types.applies_to(item_type) {
        tracing::debug!(%kind, roll, quirk = quirk.id, %item_type, "quirk does not apply to item type");
        return None;
    }

    tracing::debug!(%kind, roll, quirk = quirk.id, "drew quirk");
    Some(ResolvedQuirk { quirk, kind, roll })
}

/// Draw up to `count` distinct flaws for an item.
pub fn draw_flaws(
    count: u32,
    item_type: ItemType,
    source: &mut impl DieSource,
) -> Vec<ResolvedQuirk> {
    draw_batch(QuirkKind::Flaw, count, item_type, source)
}

/// Draw up to `min(count, max_allowed)` distinct boons for an item.
pub fn draw_boons(
    count: u32,
    item_type: ItemType,
    max_allowed: u32,
    source: &mut impl DieSource,
) -> Vec<ResolvedQuirk> {
    draw_batch(QuirkKind::Boon, count.min(max_allowed), item_type, source)
}

fn draw_batch(
    kind: QuirkKind,
    count: u32,
    item_type: ItemType,
    source: &mut impl DieSource,
) -> Vec<ResolvedQuirk> {
    let mut drawn: Vec<ResolvedQuirk> = Vec::new();
    let mut used: HashSet<&str> = HashSet::new();

    for _ in 0..count {
        if let Some(q) = draw_quirk(kind.table(), kind, item_type, &used, source) {
            used.insert(q.id());
            drawn.push(q);
        }
    }

    drawn
}

/// Draw a replacement for `held[index]`.
///
/// Every other id in `held` is excluded so the replacement never
/// duplicates a quirk the item already has. The replaced quirk itself
/// may come back. Returns `None` if `index` is out of range or the draw
/// is empty; the caller keeps the original in that case.
pub fn reroll(
    held: &[ResolvedQuirk],
    index: usize,
    item_type: ItemType,
    source: &mut impl DieSource,
) -> Option<ResolvedQuirk> {
    let target = held.get(index)?;
    let exclude: HashSet<&str> = held
        .iter()
        .map(ResolvedQuirk::id)
        .filter(|id| *id != target.id())
        .collect();
    draw_quirk(target.kind.table(), target.kind, item_type, &exclude, source)
}
