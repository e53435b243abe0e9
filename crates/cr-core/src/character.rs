use std::fmt;

use serde::{Deserialize, Serialize};

/// Current and maximum hit points.
///
/// The standing invariant `0 <= current <= max` is enforced by the mutation
/// validator, not here — `HitPoints` only reports its state, it never clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPoints {
    /// Current hit points.
    pub current: i32,
    /// Maximum hit points.
    pub max: i32,
}

impl HitPoints {
    /// Create hit points starting at full health.
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Create hit points with an explicit current value.
    pub fn with_current(current: i32, max: i32) -> Self {
        Self { current, max }
    }

    /// Returns true if the character is at zero hit points.
    pub fn is_down(&self) -> bool {
        self.current <= 0
    }

    /// Returns true if the character is at full health.
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }
}

impl fmt::Display for HitPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}

/// A stack of identical items in a character's inventory.
///
/// Stacks are merged by name; a persisted stack always has `quantity >= 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item name, unique within one inventory.
    pub name: String,
    /// How many of the item the character carries.
    pub quantity: u32,
}

impl ItemStack {
    /// Create a new stack.
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// A player character (or notable NPC) owned by a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Identifier, unique within the owning campaign.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Gold carried. Never negative after a successful mutation.
    #[serde(default)]
    pub gold: i64,
    /// Current and maximum hit points.
    pub hp: HitPoints,
    /// Experience points. Monotonically non-decreasing.
    #[serde(default)]
    pub xp: u64,
    /// Carried items, in acquisition order.
    #[serde(default)]
    pub inventory: Vec<ItemStack>,
    /// Free-text notes, in append order.
    #[serde(default)]
    pub notes: Vec<String>,
}

impl Character {
    /// Create a new character at full health with empty pockets.
    pub fn new(id: impl Into<String>, name: impl Into<String>, hp_max: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gold: 0,
            hp: HitPoints::new(hp_max),
            xp: 0,
            inventory: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Find an inventory stack by item name.
    pub fn item(&self, name: &str) -> Option<&ItemStack> {
        self.inventory.iter().find(|s| s.name == name)
    }
}
