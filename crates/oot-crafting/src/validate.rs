//! Consistency checks for the outcome and quirk tables.
//!
//! The threshold table must cover every integer margin exactly once, in
//! ascending order, with open-ended first and last rows. Quirk catalogs
//! must stay inside the d20's faces with unique ids, and every face must be
//! claimed by exactly one entry.

use std::collections::HashSet;

use crate::dice::D20;
use crate::outcome::{FlawCount, OUTCOME_THRESHOLDS, OutcomeThreshold};
use crate::quirk::{Applicability, MANUFACTURING_BOONS, MANUFACTURING_FLAWS, Quirk};

/// A warning or error found during table validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// The table (and row) where the issue was found.
    pub location: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl ValidationIssue {
    fn error(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
            is_error: true,
        }
    }

    fn warning(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
            is_error: false,
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.location, self.message)
    }
}

/// Validate every shipped table.
pub fn validate_all() -> Vec<ValidationIssue> {
    let mut issues = validate_thresholds(OUTCOME_THRESHOLDS);
    issues.extend(validate_quirk_table("flaws", MANUFACTURING_FLAWS));
    issues.extend(validate_quirk_table("boons", MANUFACTURING_BOONS));
    issues
}

/// Validate a margin threshold table.
pub fn validate_thresholds(table: &[OutcomeThreshold]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let (Some(first), Some(last)) = (table.first(), table.last()) else {
        issues.push(ValidationIssue::error("thresholds", "table is empty"));
        return issues;
    };

    if first.min.is_some() {
        issues.push(ValidationIssue::error(
            "thresholds[0]",
            "first row must have no lower bound",
        ));
    }
    if last.max.is_some() {
        issues.push(ValidationIssue::error(
            format!("thresholds[{}]", table.len() - 1),
            "last row must have no upper bound",
        ));
    }

    for (i, row) in table.iter().enumerate() {
        let loc = format!("thresholds[{i}] '{}'", row.label);

        if let Some((min, max)) = row.min.zip(row.max).filter(|(min, max)| min > max) {
            issues.push(ValidationIssue::error(
                &loc,
                format!("min ({min}) > max ({max})"),
            ));
        }
        if row.destroyed && row.flaws != FlawCount::All {
            issues.push(ValidationIssue::warning(
                &loc,
                "destroyed row should impose all flaws",
            ));
        }
        if row.flaws.to_draw() > 0 && row.boons > 0 {
            issues.push(ValidationIssue::warning(&loc, "row grants both flaws and boons"));
        }

        if i == 0 {
            continue;
        }
        let prev = &table[i - 1];
        match (prev.max, row.min) {
            (Some(prev_max), Some(min)) if min > prev_max.saturating_add(1) => {
                issues.push(ValidationIssue::error(
                    &loc,
                    format!("gap: margins {} ..= {} are not covered", prev_max + 1, min - 1),
                ));
            }
            (Some(prev_max), Some(min)) if min <= prev_max => {
                issues.push(ValidationIssue::error(
                    &loc,
                    format!("overlaps previous row at margin {min}"),
                ));
            }
            (Some(_), Some(_)) => {}
            _ => issues.push(ValidationIssue::error(
                &loc,
                "only the first and last rows may be open-ended",
            )),
        }
    }

    issues
}

/// Validate a quirk catalog.
pub fn validate_quirk_table(name: &str, table: &[Quirk]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut ids = HashSet::new();
    let mut covered = [false; D20 as usize];

    for (i, quirk) in table.iter().enumerate() {
        let loc = format!("{name}[{i}] '{}'", quirk.id);
        let (start, end) = (*quirk.d20_range.start(), *quirk.d20_range.end());

        if !ids.insert(quirk.id) {
            issues.push(ValidationIssue::error(&loc, "duplicate id"));
        }
        if start > end {
            issues.push(ValidationIssue::error(
                &loc,
                format!("empty range {start}..={end}"),
            ));
        }
        if start < 1 || end > D20 {
            issues.push(ValidationIssue::error(
                &loc,
                format!("range {start}..={end} is outside 1..={D20}"),
            ));
        }
        if matches!(quirk.item_types, Applicability::Only(types) if types.is_empty()) {
            issues.push(ValidationIssue::warning(&loc, "applies to no item types"));
        }
        for (label, m) in [
            ("weight", quirk.weight_multiplier),
            ("value", quirk.value_multiplier),
            ("hp", quirk.hp_multiplier),
        ] {
            if m.is_some_and(|m| !(m.is_finite() && m > 0.0)) {
                issues.push(ValidationIssue::error(
                    &loc,
                    format!("{label} multiplier {m:?} must be positive"),
                ));
            }
        }

        for face in start.max(1)..=end.min(D20) {
            let slot = &mut covered[(face - 1) as usize];
            if *slot {
                issues.push(ValidationIssue::error(
                    &loc,
                    format!("face {face} is already claimed by an earlier entry"),
                ));
            }
            *slot = true;
        }
    }

    let missing: Vec<String> = covered
        .iter()
        .enumerate()
        .filter(|(_, hit)| !**hit)
        .map(|(i, _)| (i + 1).to_string())
        .collect();
    if !missing.is_empty() {
        issues.push(ValidationIssue::error(
            name,
            format!("faces not covered: {}", missing.join(", ")),
        ));
    }

    issues
}
