//! Component definitions for the player.

use serde::{Deserialize, Serialize};

/// Result of a health mutation, inspected by the caller after the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Alive,
    Defeated,
}

impl HealthStatus {
    pub fn is_defeated(self) -> bool {
        matches!(self, HealthStatus::Defeated)
    }
}

/// Hit points clamped to `[0, max_hp]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    hp: i32,
    max_hp: i32,
}

impl Vitals {
    /// Full health with the given maximum. Negative maximums are treated as 0.
    pub fn new(max_hp: i32) -> Self {
        let max_hp = max_hp.max(0);
        Self { hp: max_hp, max_hp }
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    /// Subtract damage, clamping at zero.
    pub fn take_damage(&mut self, amount: i32) -> HealthStatus {
        self.hp = self.hp.saturating_sub(amount.max(0)).max(0);
        self.status()
    }

    /// Add hit points, clamping at the maximum. Returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount.max(0)).min(self.max_hp);
        self.hp - before
    }

    pub fn status(&self) -> HealthStatus {
        if self.hp == 0 {
            HealthStatus::Defeated
        } else {
            HealthStatus::Alive
        }
    }
}

impl Default for Vitals {
    fn default() -> Self {
        Self::new(100)
    }
}

/// A set of names that remembers acquisition order for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Holdings {
    entries: Vec<String>,
}

impl Holdings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a name. Returns `false` if it was already held.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.entries.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vitals_clamp_at_zero() {
        let mut vitals = Vitals::new(100);
        assert_eq!(vitals.take_damage(140), HealthStatus::Defeated);
        assert_eq!(vitals.hp(), 0);
    }

    #[test]
    fn test_vitals_clamp_at_max() {
        let mut vitals = Vitals::new(100);
        vitals.take_damage(10);
        assert_eq!(vitals.heal(30), 10);
        assert_eq!(vitals.hp(), 100);
    }

    #[test]
    fn test_negative_amounts_are_ignored() {
        let mut vitals = Vitals::new(100);
        vitals.take_damage(-20);
        assert_eq!(vitals.hp(), 100);

        vitals.take_damage(50);
        vitals.heal(-20);
        assert_eq!(vitals.hp(), 50);
    }

    #[test]
    fn test_holdings_preserve_order() {
        let mut holdings = Holdings::new();
        holdings.insert("Ancient Map");
        holdings.insert("Power Cell");
        holdings.insert("Ancient Map");

        let names: Vec<_> = holdings.iter().collect();
        assert_eq!(names, vec!["Ancient Map", "Power Cell"]);
    }
}
