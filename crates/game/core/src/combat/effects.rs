use crate::config::SimConfig;
use crate::engine::{DeathMarker, SimEvent};
use crate::state::{Agent, AgentState, Archetype, Countdown, DisabledPhase, WeaponKind};

/// Status change a weapon hit applies to an agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum WeaponEffect {
    /// Stacks a hit that lowers movement speed.
    Slow,
    /// Stacks a hit and suspends the agent for a fixed time.
    Stun,
    /// Puts the agent out for a while, then lets it reignite.
    Douse,
    /// Wrong tool for this archetype.
    NoEffect,
}

/// Looks up what `weapon` does to `archetype`.
pub const fn effect_for(weapon: WeaponKind, archetype: Archetype) -> WeaponEffect {
    match (weapon, archetype) {
        (WeaponKind::Freezer, Archetype::Leaper) => WeaponEffect::Slow,
        (WeaponKind::Stunner, Archetype::Shocker) => WeaponEffect::Stun,
        (WeaponKind::Extinguisher, Archetype::Flamer) => WeaponEffect::Douse,
        _ => WeaponEffect::NoEffect,
    }
}

impl Agent {
    /// Applies a weapon effect.
    ///
    /// Every effect other than [`WeaponEffect::NoEffect`] counts one status hit;
    /// reaching the archetype's kill threshold kills the agent instead of
    /// applying the effect. Dead agents ignore everything.
    ///
    /// Returns the `AgentDied` event when this hit was the lethal one.
    pub fn apply_effect(&mut self, effect: WeaponEffect, config: &SimConfig) -> Option<SimEvent> {
        if self.is_dead() || effect == WeaponEffect::NoEffect {
            return None;
        }

        self.status_hits += 1;
        let profile = config.profile(self.archetype());
        if profile
            .kill_threshold
            .is_some_and(|threshold| self.status_hits >= threshold)
        {
            return Some(self.die(config));
        }

        match effect {
            WeaponEffect::Slow => {
                // kill_threshold is Some here unless the archetype cannot die
                let threshold = profile.kill_threshold.unwrap_or(u32::MAX) as f32;
                let factor = 1.0 - self.status_hits as f32 / threshold;
                self.speed_factor = factor.max(config.leaper.min_speed_factor);
                tracing::debug!(agent = %self.id(), factor = self.speed_factor, "slowed");
            }
            WeaponEffect::Stun => {
                self.disable(DisabledPhase::Stunned, config.shocker.stun_secs);
            }
            WeaponEffect::Douse => {
                self.disable(DisabledPhase::Doused, config.flamer.douse_secs);
            }
            WeaponEffect::NoEffect => {}
        }
        None
    }

    /// Aborts whatever the agent was doing and suspends it for `seconds`.
    fn disable(&mut self, phase: DisabledPhase, seconds: f32) {
        tracing::debug!(agent = %self.id(), %phase, seconds, "disabled");
        self.target = None;
        self.alert_target = None;
        self.transition(AgentState::Disabled(phase));
        self.timers.set(Countdown::Phase, seconds);
    }

    fn die(&mut self, config: &SimConfig) -> SimEvent {
        let marker = match self.archetype() {
            Archetype::Leaper => DeathMarker::Persistent,
            Archetype::Shocker => DeathMarker::FadeOut {
                seconds: config.shocker.fade_secs,
            },
            Archetype::Flamer => DeathMarker::FadeOut { seconds: 0.0 },
        };
        tracing::debug!(agent = %self.id(), archetype = %self.archetype(), "killed");

        self.target = None;
        self.alert_target = None;
        self.transition(AgentState::Dead);
        self.timers = Default::default();

        SimEvent::AgentDied {
            agent: self.id(),
            position: self.position(),
            archetype: self.archetype(),
            marker,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;
    use crate::state::{AgentId, StateKind};

    fn agent(archetype: Archetype) -> Agent {
        Agent::new(AgentId(1), archetype, Vec2::new(10.0, 10.0), 5)
    }

    #[rstest]
    #[case(WeaponKind::Freezer, Archetype::Leaper, WeaponEffect::Slow)]
    #[case(WeaponKind::Stunner, Archetype::Shocker, WeaponEffect::Stun)]
    #[case(WeaponKind::Extinguisher, Archetype::Flamer, WeaponEffect::Douse)]
    fn matching_pairs(
        #[case] weapon: WeaponKind,
        #[case] archetype: Archetype,
        #[case] expected: WeaponEffect,
    ) {
        assert_eq!(effect_for(weapon, archetype), expected);
    }

    #[test]
    fn mismatched_pairs_are_safe_no_ops() {
        let config = SimConfig::default();
        for weapon in WeaponKind::iter() {
            for archetype in Archetype::iter() {
                let effect = effect_for(weapon, archetype);
                if effect != WeaponEffect::NoEffect {
                    continue;
                }
                let mut target = agent(archetype);
                let before = target.clone();
                assert_eq!(target.apply_effect(effect, &config), None);
                assert_eq!(target, before, "{weapon} changed a {archetype}");
            }
        }
    }

    #[test]
    fn slow_hits_scale_speed_then_kill_once() {
        let config = SimConfig::default();
        let threshold = config.leaper.base.kill_threshold.unwrap();
        let mut leaper = agent(Archetype::Leaper);

        let mut deaths = 0;
        let mut last_factor = leaper.speed_factor();
        for _ in 0..threshold + 3 {
            if let Some(event) = leaper.apply_effect(WeaponEffect::Slow, &config) {
                deaths += 1;
                assert!(matches!(
                    event,
                    SimEvent::AgentDied {
                        marker: DeathMarker::Persistent,
                        ..
                    }
                ));
            } else if !leaper.is_dead() {
                assert!(leaper.speed_factor() < last_factor);
                last_factor = leaper.speed_factor();
            }
        }

        assert_eq!(deaths, 1);
        assert_eq!(leaper.kind(), StateKind::Dead);
        assert_eq!(leaper.status_hits(), threshold);
    }

    #[test]
    fn stun_aborts_attack_and_disables() {
        let config = SimConfig::default();
        let mut shocker = agent(Archetype::Shocker);
        shocker.state = AgentState::Attacking(crate::state::AttackPhase::Shock(
            crate::state::ShockPhase::Charging,
        ));
        shocker.timers.set(Countdown::Phase, 0.3);

        assert_eq!(shocker.apply_effect(WeaponEffect::Stun, &config), None);
        assert_eq!(
            shocker.state(),
            &AgentState::Disabled(DisabledPhase::Stunned)
        );
        assert_eq!(shocker.countdown(Countdown::Phase), config.shocker.stun_secs);
    }

    #[test]
    fn stun_threshold_kills_with_fade() {
        let config = SimConfig::default();
        let mut shocker = agent(Archetype::Shocker);
        let threshold = config.shocker.base.kill_threshold.unwrap();
        let mut last = None;
        for _ in 0..threshold {
            last = shocker.apply_effect(WeaponEffect::Stun, &config);
        }
        assert_eq!(
            last,
            Some(SimEvent::AgentDied {
                agent: AgentId(1),
                position: Vec2::new(10.0, 10.0),
                archetype: Archetype::Shocker,
                marker: DeathMarker::FadeOut {
                    seconds: config.shocker.fade_secs
                },
            })
        );
    }

    #[test]
    fn douse_never_kills_a_flamer() {
        let config = SimConfig::default();
        let mut flamer = agent(Archetype::Flamer);
        for _ in 0..50 {
            assert_eq!(flamer.apply_effect(WeaponEffect::Douse, &config), None);
        }
        assert_eq!(flamer.state(), &AgentState::Disabled(DisabledPhase::Doused));
    }
}
