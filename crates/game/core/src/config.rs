//! Simulation tuning and compile-time capacities.
//!
//! [`SimConfig`] is injected into every simulation step; nothing in the crate
//! reads global state. All distances are world units, all durations seconds and
//! all angles radians.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Archetype, WeaponKind};

/// Root tuning table for one simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SimConfig {
    /// Base seed for per-agent random streams.
    pub seed: u64,
    /// Emit per-tick `trace!` output (paths, cone checks, timers).
    pub debug_trace: bool,
    /// Distance at which a pursuing agent gives up and returns to Patrol.
    pub abandon_distance: f32,
    /// Distance at which a waypoint or alert location counts as reached.
    pub arrival_tolerance: f32,
    pub patrol: PatrolTuning,
    pub actor: ActorTuning,
    pub leaper: LeaperProfile,
    pub shocker: ShockerProfile,
    pub flamer: FlamerProfile,
    pub weapons: WeaponTable,
}

impl SimConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of actors tracked by a single burst or cone.
    pub const MAX_ACTORS: usize = 8;
    /// Maximum number of agents in one world.
    pub const MAX_AGENTS: usize = 256;

    pub fn new() -> Self {
        Self {
            seed: 0,
            debug_trace: false,
            abandon_distance: 384.0,
            arrival_tolerance: 4.0,
            patrol: PatrolTuning::default(),
            actor: ActorTuning::default(),
            leaper: LeaperProfile::default(),
            shocker: ShockerProfile::default(),
            flamer: FlamerProfile::default(),
            weapons: WeaponTable::default(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Shared profile for an archetype.
    pub fn profile(&self, archetype: Archetype) -> &AgentProfile {
        match archetype {
            Archetype::Leaper => &self.leaper.base,
            Archetype::Shocker => &self.shocker.base,
            Archetype::Flamer => &self.flamer.base,
        }
    }

    pub fn weapon(&self, kind: WeaponKind) -> &WeaponProfile {
        match kind {
            WeaponKind::Freezer => &self.weapons.freezer,
            WeaponKind::Stunner => &self.weapons.stunner,
            WeaponKind::Extinguisher => &self.weapons.extinguisher,
        }
    }

    /// Checks every tunable for sign, range and cross-field consistency.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("abandon_distance", self.abandon_distance)?;
        positive("arrival_tolerance", self.arrival_tolerance)?;
        self.patrol.validate()?;
        nonnegative("actor.invulnerability_secs", self.actor.invulnerability_secs)?;
        if self.actor.max_health == 0 {
            return Err(ConfigError::Inconsistent {
                field: "actor.max_health",
                reason: "actors need at least one point of health",
            });
        }

        for archetype in [Archetype::Leaper, Archetype::Shocker, Archetype::Flamer] {
            self.profile(archetype).validate()?;
        }
        self.leaper.validate()?;
        self.shocker.validate()?;
        self.flamer.validate()?;

        for kind in [WeaponKind::Freezer, WeaponKind::Stunner, WeaponKind::Extinguisher] {
            let weapon = self.weapon(kind);
            positive("weapons.range", weapon.range)?;
            positive("weapons.cooldown", weapon.cooldown)?;
            angle("weapons.arc_half_angle", weapon.arc_half_angle)?;
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Cone used by sensing. A zero radius or angle disables sensing entirely.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SensingProfile {
    pub radius: f32,
    /// Half of the full cone angle.
    pub half_angle: f32,
}

impl SensingProfile {
    pub const DISABLED: Self = Self {
        radius: 0.0,
        half_angle: 0.0,
    };

    pub const fn new(radius: f32, half_angle: f32) -> Self {
        Self { radius, half_angle }
    }

    pub fn is_enabled(&self) -> bool {
        self.radius > 0.0 && self.half_angle > 0.0
    }
}

impl Default for SensingProfile {
    fn default() -> Self {
        Self::new(192.0, 0.6)
    }
}

/// Speeds and smoothing rates for agent motion.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MotionTuning {
    pub patrol_speed: f32,
    pub chase_speed: f32,
    /// Rate (units/s²) at which velocity grows toward a faster target velocity.
    pub acceleration: f32,
    /// Rate (units/s²) at which velocity sheds speed or turns away.
    pub deceleration: f32,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            patrol_speed: 35.0,
            chase_speed: 90.0,
            acceleration: 200.0,
            deceleration: 400.0,
        }
    }
}

/// Behavior shared by all archetypes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AgentProfile {
    pub sensing: SensingProfile,
    pub motion: MotionTuning,
    /// Distance at which Alert hands over to Attacking.
    pub attack_range: f32,
    /// Distance beyond which an in-progress attack is abandoned for Alert.
    pub disengage_range: f32,
    pub attack_cooldown: f32,
    /// Status-effect hits that kill the agent. `None` means the agent cannot die.
    pub kill_threshold: Option<u32>,
}

impl Default for AgentProfile {
    fn default() -> Self {
        Self {
            sensing: SensingProfile::default(),
            motion: MotionTuning::default(),
            attack_range: 64.0,
            disengage_range: 128.0,
            attack_cooldown: 1.5,
            kill_threshold: None,
        }
    }
}

impl AgentProfile {
    fn validate(&self) -> Result<(), ConfigError> {
        nonnegative("sensing.radius", self.sensing.radius)?;
        if self.sensing.is_enabled() {
            angle("sensing.half_angle", self.sensing.half_angle)?;
        }
        positive("motion.patrol_speed", self.motion.patrol_speed)?;
        positive("motion.chase_speed", self.motion.chase_speed)?;
        positive("motion.acceleration", self.motion.acceleration)?;
        positive("motion.deceleration", self.motion.deceleration)?;
        positive("attack_range", self.attack_range)?;
        positive("attack_cooldown", self.attack_cooldown)?;
        if self.disengage_range < self.attack_range {
            return Err(ConfigError::Inconsistent {
                field: "disengage_range",
                reason: "must not be shorter than attack_range",
            });
        }
        if self.kill_threshold == Some(0) {
            return Err(ConfigError::Inconsistent {
                field: "kill_threshold",
                reason: "use None for agents that cannot die",
            });
        }
        Ok(())
    }
}

/// Fast-melee archetype: leap, strike once, recuperate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct LeaperProfile {
    pub base: AgentProfile,
    /// Total distance covered by one leap.
    pub leap_distance: f32,
    pub leap_speed: f32,
    /// Distance to the live target at which the leap lands its hit.
    pub contact_distance: f32,
    pub recuperate_secs: f32,
    pub damage: u32,
    /// Lowest fraction of base speed that stacked slow hits can reach.
    pub min_speed_factor: f32,
}

impl LeaperProfile {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("leaper.leap_distance", self.leap_distance)?;
        positive("leaper.leap_speed", self.leap_speed)?;
        positive("leaper.contact_distance", self.contact_distance)?;
        positive("leaper.recuperate_secs", self.recuperate_secs)?;
        if self.contact_distance >= self.leap_distance {
            return Err(ConfigError::Inconsistent {
                field: "leaper.contact_distance",
                reason: "must be shorter than leap_distance",
            });
        }
        if !(0.0..=1.0).contains(&self.min_speed_factor) {
            return Err(ConfigError::Inconsistent {
                field: "leaper.min_speed_factor",
                reason: "must lie in [0, 1]",
            });
        }
        Ok(())
    }
}

impl Default for LeaperProfile {
    fn default() -> Self {
        Self {
            base: AgentProfile {
                sensing: SensingProfile::new(224.0, 0.6),
                motion: MotionTuning {
                    patrol_speed: 40.0,
                    chase_speed: 110.0,
                    acceleration: 240.0,
                    deceleration: 480.0,
                },
                attack_range: 96.0,
                disengage_range: 176.0,
                attack_cooldown: 1.2,
                kill_threshold: Some(3),
            },
            leap_distance: 112.0,
            leap_speed: 420.0,
            contact_distance: 16.0,
            recuperate_secs: 0.6,
            damage: 1,
            min_speed_factor: 0.15,
        }
    }
}

/// Charge-then-burst archetype.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ShockerProfile {
    pub base: AgentProfile,
    pub charge_secs: f32,
    pub burst_secs: f32,
    /// Radius reached at the end of the burst.
    pub burst_radius: f32,
    pub damage: u32,
    /// Length of the full stun caused by a disabling hit.
    pub stun_secs: f32,
    /// Fade-out announced with the death signal.
    pub fade_secs: f32,
}

impl ShockerProfile {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("shocker.charge_secs", self.charge_secs)?;
        positive("shocker.burst_secs", self.burst_secs)?;
        positive("shocker.burst_radius", self.burst_radius)?;
        positive("shocker.stun_secs", self.stun_secs)?;
        nonnegative("shocker.fade_secs", self.fade_secs)
    }
}

impl Default for ShockerProfile {
    fn default() -> Self {
        Self {
            base: AgentProfile {
                sensing: SensingProfile::new(192.0, 0.8),
                motion: MotionTuning {
                    patrol_speed: 30.0,
                    chase_speed: 70.0,
                    acceleration: 160.0,
                    deceleration: 320.0,
                },
                attack_range: 64.0,
                disengage_range: 128.0,
                attack_cooldown: 2.0,
                kill_threshold: Some(4),
            },
            charge_secs: 1.0,
            burst_secs: 0.4,
            burst_radius: 80.0,
            damage: 1,
            stun_secs: 2.5,
            fade_secs: 1.5,
        }
    }
}

/// Continuous-cone archetype.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FlamerProfile {
    pub base: AgentProfile,
    /// Cone length reached at the end of the expansion window.
    pub cone_length: f32,
    pub cone_half_angle: f32,
    pub expansion_secs: f32,
    /// Minimum time an actor must stay in the cone between two hits.
    pub rehit_secs: f32,
    pub damage: u32,
    /// Inert period after a disabling hit.
    pub douse_secs: f32,
    /// Recovery period that follows the inert period.
    pub reignite_secs: f32,
}

impl FlamerProfile {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("flamer.cone_length", self.cone_length)?;
        angle("flamer.cone_half_angle", self.cone_half_angle)?;
        positive("flamer.expansion_secs", self.expansion_secs)?;
        positive("flamer.rehit_secs", self.rehit_secs)?;
        positive("flamer.douse_secs", self.douse_secs)?;
        nonnegative("flamer.reignite_secs", self.reignite_secs)
    }
}

impl Default for FlamerProfile {
    fn default() -> Self {
        Self {
            base: AgentProfile {
                sensing: SensingProfile::new(208.0, 0.5),
                motion: MotionTuning {
                    patrol_speed: 35.0,
                    chase_speed: 80.0,
                    acceleration: 200.0,
                    deceleration: 400.0,
                },
                attack_range: 80.0,
                disengage_range: 120.0,
                attack_cooldown: 3.0,
                kill_threshold: None,
            },
            cone_length: 96.0,
            cone_half_angle: 0.35,
            expansion_secs: 0.5,
            rehit_secs: 1.0,
            damage: 1,
            douse_secs: 3.0,
            reignite_secs: 1.0,
        }
    }
}

/// Random-duration window `[min, max)` in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DurationWindow {
    pub min: f32,
    pub max: f32,
}

impl DurationWindow {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

impl Default for DurationWindow {
    fn default() -> Self {
        Self::new(1.0, 2.0)
    }
}

/// Weights and duration windows for the Patrol sub-behaviors.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PatrolTuning {
    pub moving_weight: u32,
    pub looking_weight: u32,
    pub resting_weight: u32,
    pub moving_secs: DurationWindow,
    pub looking_secs: DurationWindow,
    pub resting_secs: DurationWindow,
    /// Turn rate (radians/s) while looking around.
    pub look_turn_rate: f32,
}

impl PatrolTuning {
    /// Sum of the sub-behavior weights, widened so large values cannot overflow.
    pub fn total_weight(&self) -> u64 {
        [self.moving_weight, self.looking_weight, self.resting_weight]
            .iter()
            .map(|&weight| u64::from(weight))
            .sum()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.total_weight() == 0 {
            return Err(ConfigError::Inconsistent {
                field: "patrol",
                reason: "at least one sub-behavior weight must be non-zero",
            });
        }
        for (field, window) in [
            ("patrol.moving_secs", self.moving_secs),
            ("patrol.looking_secs", self.looking_secs),
            ("patrol.resting_secs", self.resting_secs),
        ] {
            positive(field, window.min)?;
            if window.max < window.min {
                return Err(ConfigError::InvalidWindow { field });
            }
        }
        positive("patrol.look_turn_rate", self.look_turn_rate)
    }
}

impl Default for PatrolTuning {
    fn default() -> Self {
        Self {
            moving_weight: 60,
            looking_weight: 20,
            resting_weight: 20,
            moving_secs: DurationWindow::new(1.0, 2.5),
            looking_secs: DurationWindow::new(1.0, 2.0),
            resting_secs: DurationWindow::new(0.5, 1.5),
            look_turn_rate: 2.5,
        }
    }
}

/// Player-side tuning used by the damage intake.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ActorTuning {
    pub max_health: u32,
    /// Window after a hit during which further damage is refused.
    pub invulnerability_secs: f32,
}

impl Default for ActorTuning {
    fn default() -> Self {
        Self {
            max_health: 3,
            invulnerability_secs: 0.5,
        }
    }
}

/// Range, aim arc and cooldown of a weapon kind.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct WeaponProfile {
    pub range: f32,
    /// Half of the forward aim arc.
    pub arc_half_angle: f32,
    pub cooldown: f32,
}

impl Default for WeaponProfile {
    fn default() -> Self {
        Self {
            range: 128.0,
            arc_half_angle: 0.5,
            cooldown: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct WeaponTable {
    pub freezer: WeaponProfile,
    pub stunner: WeaponProfile,
    pub extinguisher: WeaponProfile,
}

impl Default for WeaponTable {
    fn default() -> Self {
        Self {
            freezer: WeaponProfile {
                range: 160.0,
                arc_half_angle: 0.4,
                cooldown: 0.8,
            },
            stunner: WeaponProfile {
                range: 128.0,
                arc_half_angle: 0.5,
                cooldown: 1.0,
            },
            extinguisher: WeaponProfile {
                range: 96.0,
                arc_half_angle: 0.6,
                cooldown: 1.5,
            },
        }
    }
}

/// Errors reported by [`SimConfig::validate`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must lie in (0, π], got {value}")]
    InvalidAngle { field: &'static str, value: f32 },

    #[error("{field}: max is smaller than min")]
    InvalidWindow { field: &'static str },

    #[error("{field}: {reason}")]
    Inconsistent {
        field: &'static str,
        reason: &'static str,
    },
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::NonPositive { .. } => "CONFIG_NON_POSITIVE",
            ConfigError::InvalidAngle { .. } => "CONFIG_INVALID_ANGLE",
            ConfigError::InvalidWindow { .. } => "CONFIG_INVALID_WINDOW",
            ConfigError::Inconsistent { .. } => "CONFIG_INCONSISTENT",
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn nonnegative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn angle(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 && value <= core::f32::consts::PI {
        Ok(())
    } else {
        Err(ConfigError::InvalidAngle { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        SimConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_contact_longer_than_leap() {
        let mut config = SimConfig::default();
        config.leaper.contact_distance = config.leaper.leap_distance;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Inconsistent {
                field: "leaper.contact_distance",
                ..
            })
        ));
    }

    #[test]
    fn rejects_disengage_inside_attack_range() {
        let mut config = SimConfig::default();
        config.shocker.base.disengage_range = 10.0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_INCONSISTENT");
    }

    #[test]
    fn zero_sensing_is_allowed_and_disabled() {
        let mut config = SimConfig::default();
        config.flamer.base.sensing = SensingProfile::DISABLED;
        config.validate().unwrap();
        assert!(!config.flamer.base.sensing.is_enabled());
    }

    #[test]
    fn invulnerability_may_be_zero_but_not_negative() {
        let mut config = SimConfig::default();
        config.actor.invulnerability_secs = 0.0;
        config.validate().unwrap();

        config.actor.invulnerability_secs = -0.001;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "actor.invulnerability_secs",
                ..
            })
        ));
    }

    #[test]
    fn huge_patrol_weights_do_not_overflow() {
        let mut patrol = PatrolTuning::default();
        patrol.moving_weight = u32::MAX;
        patrol.looking_weight = u32::MAX;
        assert_eq!(patrol.total_weight(), 2 * u64::from(u32::MAX) + 20);
        patrol.validate().unwrap();
    }

    #[test]
    fn rejects_bad_weapon_arc() {
        let mut config = SimConfig::default();
        config.weapons.stunner.arc_half_angle = 4.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidAngle { .. })
        ));
    }
}
