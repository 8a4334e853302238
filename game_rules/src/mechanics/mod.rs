//! Game mechanics: damage ranges, rollers, combat presets, and the combat resolver.

mod combat;
mod roller;
mod rules;

pub use combat::*;
pub use roller::*;
pub use rules::*;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RulesError};

/// An inclusive range of rolled values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRange {
    pub min: i32,
    pub max: i32,
}

impl DamageRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Check that the range is non-empty and non-negative.
    pub fn validate(&self) -> Result<()> {
        if self.min < 0 || self.min > self.max {
            return Err(RulesError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Roll a value from this range.
    pub fn roll(&self, roller: &mut dyn DamageRoller) -> i32 {
        roller.roll(self.min, self.max)
    }
}

impl std::fmt::Display for DamageRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// One action a player can take in a combat round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatAction {
    Attack,
    Heal,
    /// Brace for a reduced hit instead of the normal retaliation.
    Defend,
    /// Try to flee the fight.
    Escape,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_validation() {
        assert!(DamageRange::new(10, 25).validate().is_ok());
        assert!(DamageRange::new(5, 5).validate().is_ok());
        assert!(DamageRange::new(30, 20).validate().is_err());
        assert!(DamageRange::new(-1, 4).validate().is_err());
    }

    #[test]
    fn test_range_display() {
        assert_eq!(DamageRange::new(20, 30).to_string(), "20-30");
    }
}
