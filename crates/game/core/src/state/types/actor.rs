use glam::Vec2;

use super::common::{ActorId, ResourceMeter};
use super::timers::sanitize;
use super::weapon::{Weapon, WeaponKind};

/// Player-like entity that agents hunt and that can fire back.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: ActorId,
    pub position: Vec2,
    /// Unit facing vector. Combat snaps it toward whatever the actor fires at.
    pub facing: Vec2,
    pub health: ResourceMeter,
    downed: bool,
    invulnerable: f32,
    pub weapon: Option<Weapon>,
}

impl Actor {
    pub fn new(id: ActorId, position: Vec2, max_health: u32) -> Self {
        Self {
            id,
            position,
            facing: Vec2::X,
            health: ResourceMeter::full(max_health),
            downed: false,
            invulnerable: 0.0,
            weapon: None,
        }
    }

    pub fn with_facing(mut self, facing: Vec2) -> Self {
        self.set_facing(facing);
        self
    }

    /// Points the actor along `facing`; a zero vector is ignored.
    pub fn set_facing(&mut self, facing: Vec2) {
        let facing = facing.normalize_or_zero();
        if facing != Vec2::ZERO {
            self.facing = facing;
        }
    }

    pub fn with_weapon(mut self, kind: WeaponKind) -> Self {
        self.weapon = Some(Weapon::new(kind));
        self
    }

    pub fn is_downed(&self) -> bool {
        self.downed
    }

    /// Knocks the actor out regardless of health (host-side scripted events).
    pub fn set_downed(&mut self, downed: bool) {
        self.downed = downed;
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0.0
    }

    /// Applies `amount` damage unless the actor is downed or still invulnerable
    /// from a previous hit. A successful hit opens a new invulnerability window
    /// and downs the actor when health runs out.
    ///
    /// Returns `true` if the damage was applied.
    pub fn take_damage(&mut self, amount: u32, invulnerability: f32) -> bool {
        if self.downed || self.is_invulnerable() {
            return false;
        }
        self.health.drain(amount);
        self.invulnerable = sanitize(invulnerability);
        if self.health.is_depleted() {
            self.downed = true;
        }
        true
    }

    /// Advances the invulnerability window and weapon cooldown.
    pub fn tick(&mut self, dt: f32) {
        let dt = sanitize(dt);
        self.invulnerable = (self.invulnerable - dt).max(0.0);
        if let Some(weapon) = self.weapon.as_mut() {
            weapon.tick(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invulnerability_blocks_follow_up_hits() {
        let mut actor = Actor::new(ActorId(1), Vec2::ZERO, 3);
        assert!(actor.take_damage(1, 0.5));
        assert!(!actor.take_damage(1, 0.5));
        assert_eq!(actor.health.current, 2);

        actor.tick(0.5);
        assert!(actor.take_damage(1, 0.5));
        assert_eq!(actor.health.current, 1);
    }

    #[test]
    fn depleted_actor_is_downed_and_refuses_damage() {
        let mut actor = Actor::new(ActorId(1), Vec2::ZERO, 1);
        assert!(actor.take_damage(5, 0.0));
        assert!(actor.is_downed());
        assert!(!actor.take_damage(1, 0.0));
    }

    #[test]
    fn facing_ignores_zero_vector() {
        let actor = Actor::new(ActorId(1), Vec2::ZERO, 1).with_facing(Vec2::ZERO);
        assert_eq!(actor.facing, Vec2::X);
        let actor = actor.with_facing(Vec2::new(0.0, -3.0));
        assert_eq!(actor.facing, Vec2::NEG_Y);
    }
}
