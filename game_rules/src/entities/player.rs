//! The player's mutable state for one session.

use serde::{Deserialize, Serialize};

use super::{HealthStatus, Holdings, Vitals};

/// Item names the story and combat rules refer to.
pub mod items {
    pub const ANCIENT_MAP: &str = "Ancient Map";
    pub const POWER_CELL: &str = "Power Cell";
    pub const CRYSTALLINE_ARTIFACT: &str = "Crystalline Artifact";
    pub const CRYSTALLINE_KEY: &str = "Crystalline Key";
    pub const NAVIGATION_CHIP: &str = "Navigation Chip";
    pub const ALIEN_SLUDGE: &str = "Alien Sludge (Trophy)";
}

/// Crew member names.
pub mod crew {
    pub const DR_CHEN: &str = "Dr. Chen";
    pub const KEEPER_GUIDE: &str = "Keeper Guide";
}

pub const STARTING_HP: i32 = 100;
pub const STARTING_ENERGY: i32 = 50;

/// Boolean capabilities derived from what the player holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// The BLUE KEYCARD opens the bridge safe.
    BlueKeycard,
    /// A Navigation Chip lets the escape pod launch without risk.
    Navigation,
    /// Either crystalline item opens the signal-source station.
    StationKey,
}

/// Hit points, energy, inventory, and crew.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    vitals: Vitals,
    /// Unbounded; may go negative.
    pub energy: i32,
    inventory: Holdings,
    crew: Holdings,
    keycard: bool,
}

impl PlayerState {
    /// A fresh player at full health with the starting energy.
    pub fn new() -> Self {
        Self {
            vitals: Vitals::new(STARTING_HP),
            energy: STARTING_ENERGY,
            inventory: Holdings::new(),
            crew: Holdings::new(),
            keycard: false,
        }
    }

    pub fn hp(&self) -> i32 {
        self.vitals.hp()
    }

    pub fn max_hp(&self) -> i32 {
        self.vitals.max_hp()
    }

    pub fn is_alive(&self) -> bool {
        self.vitals.status() == HealthStatus::Alive
    }

    /// Reduce HP, clamping at zero. The caller inspects the returned status.
    pub fn take_damage(&mut self, amount: i32) -> HealthStatus {
        self.vitals.take_damage(amount)
    }

    /// Restore HP up to the maximum. Returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        self.vitals.heal(amount)
    }

    pub fn adjust_energy(&mut self, delta: i32) {
        self.energy = self.energy.saturating_add(delta);
    }

    /// Grant an item. Returns `false` if it was already acquired.
    pub fn add_item(&mut self, name: impl Into<String>) -> bool {
        self.inventory.insert(name)
    }

    /// Recruit a crew member. Returns `false` if already aboard.
    pub fn add_crew(&mut self, name: impl Into<String>) -> bool {
        self.crew.insert(name)
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.inventory.contains(name)
    }

    pub fn has_crew(&self, name: &str) -> bool {
        self.crew.contains(name)
    }

    pub fn inventory(&self) -> &Holdings {
        &self.inventory
    }

    pub fn crew(&self) -> &Holdings {
        &self.crew
    }

    pub fn grant_keycard(&mut self) {
        self.keycard = true;
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        match capability {
            Capability::BlueKeycard => self.keycard,
            Capability::Navigation => self.has_item(items::NAVIGATION_CHIP),
            Capability::StationKey => {
                self.has_item(items::CRYSTALLINE_KEY) || self.has_item(items::CRYSTALLINE_ARTIFACT)
            }
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}
