//! Check rolls: a d20 plus a flat modifier.

use serde::{Deserialize, Serialize};

use super::DieSource;

/// The result of a simulated skill or tool check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRoll {
    /// The natural d20 value.
    pub die: u32,
    /// The flat modifier added to the die.
    pub modifier: i32,
    /// Die plus modifier.
    pub total: i32,
}

impl std::fmt::Display for CheckRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.modifier >= 0 {
            write!(f, "[{}] + {} = {}", self.die, self.modifier, self.total)
        } else {
            write!(f, "[{}] - {} = {}", self.die, self.modifier.unsigned_abs(), self.total)
        }
    }
}

/// Roll a d20 check with a flat modifier. The total saturates at the
/// `i32` bounds.
pub fn roll_check(source: &mut impl DieSource, modifier: i32) -> CheckRoll {
    let die = source.roll_d20();
    CheckRoll {
        die,
        modifier,
        total: (die as i32).saturating_add(modifier),
    }
}
