//! Outcome resolution for crafting checks.
//!
//! The margin of a check (`result - DC`) is looked up in an ordered
//! threshold table. Each row names how many flaws or boons the item gains,
//! and the lowest row destroys the item outright:
//!
//! | Margin      | Result                         |
//! |-------------|--------------------------------|
//! | ≤ -13       | Total failure, item destroyed  |
//! | -12 ..= -9  | Three flaws                    |
//! | -8 ..= -5   | Two flaws                      |
//! | -4 ..= -1   | One flaw                       |
//! | 0 ..= 4     | Nothing                        |
//! | 5 ..= 8     | One boon                       |
//! | 9 ..= 12    | Two boons                      |
//! | ≥ 13        | Three boons                    |

use serde::{Deserialize, Serialize};

/// How many flaws an outcome imposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlawCount {
    /// A fixed number of flaws.
    Count(u32),
    /// Every flaw at once. Only used by the destroyed row, which
    /// short-circuits quirk drawing.
    All,
}

impl FlawCount {
    /// The number of flaws to draw; zero for [`FlawCount::All`], since a
    /// destroyed item draws nothing.
    pub fn to_draw(self) -> u32 {
        match self {
            Self::Count(n) => n,
            Self::All => 0,
        }
    }
}

impl std::fmt::Display for FlawCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::All => write!(f, "all"),
        }
    }
}

/// One row of the threshold table. `None` bounds are open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeThreshold {
    /// Lowest margin in this row (inclusive), or unbounded.
    pub min: Option<i32>,
    /// Highest margin in this row (inclusive), or unbounded.
    pub max: Option<i32>,
    /// Flaws imposed.
    pub flaws: FlawCount,
    /// Boons granted.
    pub boons: u32,
    /// Whether the item is destroyed.
    pub destroyed: bool,
    /// Display label.
    pub label: &'static str,
}

impl OutcomeThreshold {
    /// Returns true if `margin` falls inside this row.
    pub fn contains(&self, margin: i32) -> bool {
        self.min.is_none_or(|min| margin >= min) && self.max.is_none_or(|max| margin <= max)
    }
}

/// The margin-to-quirk table, ordered ascending.
pub const OUTCOME_THRESHOLDS: &[OutcomeThreshold] = &[
    OutcomeThreshold {
        min: None,
        max: Some(-13),
        flaws: FlawCount::All,
        boons: 0,
        destroyed: true,
        label: "Total failure, item destroyed",
    },
    OutcomeThreshold {
        min: Some(-12),
        max: Some(-9),
        flaws: FlawCount::Count(3),
        boons: 0,
        destroyed: false,
        label: "Three flaws",
    },
    OutcomeThreshold {
        min: Some(-8),
        max: Some(-5),
        flaws: FlawCount::Count(2),
        boons: 0,
        destroyed: false,
        label: "Two flaws",
    },
    OutcomeThreshold {
        min: Some(-4),
        max: Some(-1),
        flaws: FlawCount::Count(1),
        boons: 0,
        destroyed: false,
        label: "One flaw",
    },
    OutcomeThreshold {
        min: Some(0),
        max: Some(4),
        flaws: FlawCount::Count(0),
        boons: 0,
        destroyed: false,
        label: "Nothing",
    },
    OutcomeThreshold {
        min: Some(5),
        max: Some(8),
        flaws: FlawCount::Count(0),
        boons: 1,
        destroyed: false,
        label: "One boon",
    },
    OutcomeThreshold {
        min: Some(9),
        max: Some(12),
        flaws: FlawCount::Count(0),
        boons: 2,
        destroyed: false,
        label: "Two boons",
    },
    OutcomeThreshold {
        min: Some(13),
        max: None,
        flaws: FlawCount::Count(0),
        boons: 3,
        destroyed: false,
        label: "Three boons",
    },
];

/// Label reported when no threshold row matches.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// The resolved outcome of a crafting check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Check result minus DC.
    pub margin: i32,
    /// Flaws imposed.
    pub flaws: FlawCount,
    /// Boons granted.
    pub boons: u32,
    /// Whether the item is destroyed.
    pub destroyed: bool,
    /// Display label.
    pub label: String,
}

impl Outcome {
    fn unknown(margin: i32) -> Self {
        Self {
            margin,
            flaws: FlawCount::Count(0),
            boons: 0,
            destroyed: false,
            label: UNKNOWN_LABEL.to_string(),
        }
    }

    /// Returns true if this is the fallback produced by a table gap.
    pub fn is_unknown(&self) -> bool {
        self.label == UNKNOWN_LABEL
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (margin {:+})", self.label, self.margin)
    }
}

/// Resolve a check result against a DC using [`OUTCOME_THRESHOLDS`].
pub fn resolve_outcome(check_result: i32, dc: i32) -> Outcome {
    resolve_outcome_in(OUTCOME_THRESHOLDS, check_result, dc)
}

/// Resolve a check result against a DC using an explicit table.
///
/// The first row containing the margin wins. If none does, the table is
/// malformed: a warning is logged and an "Unknown" outcome with no
/// quirks is returned.
pub fn resolve_outcome_in(table: &[OutcomeThreshold], check_result: i32, dc: i32) -> Outcome {
    let margin = check_result.saturating_sub(dc);

    match table.iter().find(|row| row.contains(margin)) {
        Some(row) => Outcome {
            margin,
            flaws: row.flaws,
            boons: row.boons,
            destroyed: row.destroyed,
            label: row.label.to_string(),
        },
        None => {
            tracing::warn!(margin, "no outcome threshold matches margin; table has a gap");
            Outcome::unknown(margin)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn destroyed_at_minus_thirteen() {
        let o = resolve_outcome(2, 15);
        assert_eq!(o.margin, -13);
        assert!(o.destroyed);
        assert_eq!(o.flaws, FlawCount::All);
        assert_eq!(o.boons, 0);
    }

    #[test]
    fn nothing_at_zero() {
        let o = resolve_outcome(15, 15);
        assert_eq!(o.margin, 0);
        assert_eq!(o.flaws, FlawCount::Count(0));
        assert_eq!(o.boons, 0);
        assert!(!o.destroyed);
        assert_eq!(o.label, "Nothing");
    }

    #[test]
    fn three_boons_at_thirteen() {
        let o = resolve_outcome(28, 15);
        assert_eq!(o.flaws, FlawCount::Count(0));
        assert_eq!(o.boons, 3);
        assert!(!o.destroyed);
        assert_eq!(o.label, "Three boons");
    }

    #[test]
    fn row_boundaries() {
        let cases = [
            (-12, "Three flaws"),
            (-9, "Three flaws"),
            (-8, "Two flaws"),
            (-5, "Two flaws"),
            (-4, "One flaw"),
            (-1, "One flaw"),
            (4, "Nothing"),
            (5, "One boon"),
            (8, "One boon"),
            (9, "Two boons"),
            (12, "Two boons"),
        ];
        for (margin, label) in cases {
            assert_eq!(resolve_outcome(margin, 0).label, label, "margin {margin}");
        }
    }

    #[test]
    fn every_margin_in_play_matches() {
        for m in -100..=100 {
            let o = resolve_outcome(m, 0);
            assert!(!o.is_unknown(), "margin {m} fell through");
            let matching = OUTCOME_THRESHOLDS.iter().filter(|r| r.contains(m)).count();
            assert_eq!(matching, 1, "margin {m} matched {matching} rows");
        }
    }

    #[test]
    fn extreme_inputs_saturate() {
        let o = resolve_outcome(i32::MIN, i32::MAX);
        assert_eq!(o.margin, i32::MIN);
        assert!(o.destroyed);
        let o = resolve_outcome(i32::MAX, i32::MIN);
        assert_eq!(o.boons, 3);
    }

    #[test]
    fn gap_falls_back_to_unknown() {
        let table = &OUTCOME_THRESHOLDS[1..];
        let o = resolve_outcome_in(table, -20, 0);
        assert!(o.is_unknown());
        assert_eq!(o.margin, -20);
        assert_eq!(o.flaws, FlawCount::Count(0));
        assert_eq!(o.boons, 0);
        assert!(!o.destroyed);
    }

    #[test]
    fn first_match_wins_on_overlap() {
        let mut table = OUTCOME_THRESHOLDS.to_vec();
        table.insert(
            0,
            OutcomeThreshold {
                min: Some(0),
                max: Some(0),
                flaws: FlawCount::Count(0),
                boons: 1,
                destroyed: false,
                label: "Override",
            },
        );
        assert_eq!(resolve_outcome_in(&table, 10, 10).label, "Override");
        assert_eq!(resolve_outcome_in(&table, 11, 10).label, "Nothing");
    }

    #[test]
    fn flaw_count_to_draw() {
        assert_eq!(FlawCount::Count(2).to_draw(), 2);
        assert_eq!(FlawCount::All.to_draw(), 0);
    }

    #[test]
    fn outcome_display() {
        assert_eq!(resolve_outcome(10, 15).to_string(), "Two flaws (margin -5)");
        assert_eq!(resolve_outcome(20, 15).to_string(), "One boon (margin +5)");
    }

    #[test]
    fn outcome_serde_roundtrip() {
        let o = resolve_outcome(0, 20);
        let json = serde_json::to_string(&o).unwrap();
        let back: Outcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, o);
    }

    proptest! {
        #[test]
        fn any_margin_matches_exactly_one_row(check in any::<i32>(), dc in any::<i32>()) {
            let o = resolve_outcome(check, dc);
            prop_assert!(!o.is_unknown());
            let matching = OUTCOME_THRESHOLDS.iter().filter(|r| r.contains(o.margin)).count();
            prop_assert_eq!(matching, 1);
        }

        #[test]
        fn destroyed_only_below_minus_twelve(m in -1000i32..1000) {
            let o = resolve_outcome(m, 0);
            prop_assert_eq!(o.destroyed, m <= -13);
        }
    }
}
