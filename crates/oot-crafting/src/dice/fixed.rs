//! Deterministic die source replaying a fixed sequence.

use std::str::FromStr;

use super::{D20, DieSource};
use crate::error::CraftError;

/// Replays a fixed sequence of d20 values, cycling when exhausted.
///
/// Values are clamped into `1..=20`. An empty sequence behaves like a die
/// that always shows 1.
#[derive(Debug, Clone)]
pub struct FixedRolls {
    values: Vec<u32>,
    position: usize,
    drawn: usize,
}

impl FixedRolls {
    /// Create a source from the given values.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        let mut values: Vec<u32> = values.into_iter().map(|v| v.clamp(1, D20)).collect();
        if values.is_empty() {
            values.push(1);
        }
        Self {
            values,
            position: 0,
            drawn: 0,
        }
    }

    /// Total number of dice drawn so far.
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl DieSource for FixedRolls {
    fn roll_d20(&mut self) -> u32 {
        let value = self.values[self.position];
        self.position = (self.position + 1) % self.values.len();
        self.drawn += 1;
        value
    }
}

/// Parses a comma-separated list such as `"1,20,7"`.
impl FromStr for FixedRolls {
    type Err = CraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<u32>()
                    .ok()
                    .filter(|v| (1..=D20).contains(v))
                    .ok_or_else(|| CraftError::InvalidRolls(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if values.is_empty() {
            return Err(CraftError::InvalidRolls(s.to_string()));
        }
        Ok(Self::new(values))
    }
}
