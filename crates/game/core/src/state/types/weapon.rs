use super::timers::sanitize;

/// Ranged tools an actor can carry. Each one only affects a single archetype.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum WeaponKind {
    /// Slows leapers; enough hits freeze them solid.
    Freezer,
    /// Stuns shockers; enough hits short them out.
    Stunner,
    /// Douses flamers for a while.
    Extinguisher,
}

/// A weapon held by an actor together with its own cooldown.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub kind: WeaponKind,
    cooldown: f32,
}

impl Weapon {
    pub fn new(kind: WeaponKind) -> Self {
        Self {
            kind,
            cooldown: 0.0,
        }
    }

    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown <= 0.0
    }

    pub fn restart(&mut self, seconds: f32) {
        self.cooldown = sanitize(seconds);
    }

    pub fn tick(&mut self, dt: f32) {
        self.cooldown = (self.cooldown - sanitize(dt)).max(0.0);
    }
}
