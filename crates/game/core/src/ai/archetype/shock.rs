//! Ready → Charging → Bursting. The burst is an expanding ring that hits each
//! actor at most once.

use glam::Vec2;

use super::{AttackContext, AttackStep};
use crate::ai::motion::halt_facing;
use crate::combat::apply_damage;
use crate::geometry::distance;
use crate::state::{Agent, AttackPhase, Countdown, ShockPhase, StruckActors};

pub(super) fn update(agent: &mut Agent, phase: ShockPhase, ctx: &mut AttackContext<'_>) -> AttackStep {
    let config = ctx.config;
    let tuning = &config.shocker;
    let target = ctx.target_position();

    match phase {
        ShockPhase::Ready => {
            halt_facing(agent, target);
            if distance(agent.position, target) > tuning.base.attack_range {
                return AttackStep::Pursue;
            }
            if !agent.timers.is_elapsed(Countdown::AttackCooldown) {
                return AttackStep::Hold(AttackPhase::Shock(ShockPhase::Ready));
            }
            AttackStep::Enter(AttackPhase::Shock(ShockPhase::Charging), tuning.charge_secs)
        }

        ShockPhase::Charging => {
            halt_facing(agent, target);
            if agent.timers.is_elapsed(Countdown::Phase) {
                AttackStep::Enter(
                    AttackPhase::Shock(ShockPhase::Bursting {
                        struck: StruckActors::new(),
                    }),
                    tuning.burst_secs,
                )
            } else {
                AttackStep::Hold(AttackPhase::Shock(ShockPhase::Charging))
            }
        }

        ShockPhase::Bursting { mut struck } => {
            agent.velocity = Vec2::ZERO;
            let radius = burst_radius(agent, tuning.burst_radius, tuning.burst_secs);

            for actor in ctx.actors.iter_mut() {
                if actor.is_downed() || struck.contains(&actor.id) {
                    continue;
                }
                if distance(agent.position, actor.position) > radius {
                    continue;
                }
                // a full table only means every actor has been hit already
                if struck.try_push(actor.id).is_err() {
                    break;
                }
                apply_damage(actor, agent.id(), tuning.damage, &config.actor, ctx.events);
            }

            if agent.timers.is_elapsed(Countdown::Phase) {
                AttackStep::Finish {
                    restart_cooldown: true,
                }
            } else {
                AttackStep::Hold(AttackPhase::Shock(ShockPhase::Bursting { struck }))
            }
        }
    }
}

/// Ring radius grows linearly from zero to `max_radius` over the burst.
fn burst_radius(agent: &Agent, max_radius: f32, burst_secs: f32) -> f32 {
    if burst_secs <= 0.0 {
        return max_radius;
    }
    let remaining = agent.timers.get(Countdown::Phase);
    max_radius * (1.0 - remaining / burst_secs).clamp(0.0, 1.0)
}
