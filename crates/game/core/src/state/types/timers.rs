/// Named countdowns carried by every agent.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Countdown {
    /// Gate between two attacks. Also the hot window of a cone attack.
    AttackCooldown,
    /// Remaining time of the current Patrol sub-behavior.
    Behavior,
    /// Remaining time of the current attack or disabled phase.
    Phase,
}

impl Countdown {
    const COUNT: usize = 3;

    const fn index(self) -> usize {
        match self {
            Countdown::AttackCooldown => 0,
            Countdown::Behavior => 1,
            Countdown::Phase => 2,
        }
    }
}

/// Table of countdowns decremented together once per tick.
///
/// Values are seconds and never negative: setting a negative or non-finite
/// value stores zero, and [`Countdowns::tick`] clamps at zero.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Countdowns {
    remaining: [f32; Countdown::COUNT],
}

impl Countdowns {
    pub fn get(&self, countdown: Countdown) -> f32 {
        self.remaining[countdown.index()]
    }

    pub fn set(&mut self, countdown: Countdown, seconds: f32) {
        self.remaining[countdown.index()] = sanitize(seconds);
    }

    pub fn clear(&mut self, countdown: Countdown) {
        self.set(countdown, 0.0);
    }

    pub fn is_elapsed(&self, countdown: Countdown) -> bool {
        self.get(countdown) <= 0.0
    }

    pub fn tick(&mut self, dt: f32) {
        let dt = sanitize(dt);
        for slot in &mut self.remaining {
            *slot = (*slot - dt).max(0.0);
        }
    }
}

/// Maps negative and non-finite durations to zero.
pub(crate) fn sanitize(seconds: f32) -> f32 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn tick_clamps_every_slot_at_zero() {
        let mut timers = Countdowns::default();
        timers.set(Countdown::AttackCooldown, 0.3);
        timers.set(Countdown::Phase, 1.0);

        timers.tick(0.5);

        assert_eq!(timers.get(Countdown::AttackCooldown), 0.0);
        assert_eq!(timers.get(Countdown::Phase), 0.5);
        assert_eq!(timers.get(Countdown::Behavior), 0.0);
        for countdown in Countdown::iter() {
            assert!(timers.get(countdown) >= 0.0, "{countdown} went negative");
        }
    }

    #[test]
    fn garbage_inputs_become_zero() {
        let mut timers = Countdowns::default();
        timers.set(Countdown::Behavior, -4.0);
        assert!(timers.is_elapsed(Countdown::Behavior));
        timers.set(Countdown::Behavior, f32::NAN);
        assert_eq!(timers.get(Countdown::Behavior), 0.0);

        timers.set(Countdown::Phase, 1.0);
        timers.tick(f32::INFINITY);
        assert_eq!(timers.get(Countdown::Phase), 1.0);
    }
}
