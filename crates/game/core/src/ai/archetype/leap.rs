//! Ready → Leaping → Recuperating, then back to Alert.

use glam::Vec2;

use super::{AttackContext, AttackStep};
use crate::ai::motion::halt_facing;
use crate::combat::apply_damage;
use crate::geometry::distance;
use crate::state::{Agent, AttackPhase, Countdown, LeapPhase};

pub(super) fn update(agent: &mut Agent, phase: LeapPhase, ctx: &mut AttackContext<'_>) -> AttackStep {
    let tuning = &ctx.config.leaper;
    let target = ctx.target_position();

    match phase {
        LeapPhase::Ready => {
            halt_facing(agent, target);
            if distance(agent.position, target) > tuning.base.attack_range {
                return AttackStep::Pursue;
            }
            if !agent.timers.is_elapsed(Countdown::AttackCooldown) {
                return AttackStep::Hold(AttackPhase::Leap(LeapPhase::Ready));
            }
            // heading is fixed here; the leap does not re-aim mid-flight
            let heading = agent.facing;
            AttackStep::Enter(
                AttackPhase::Leap(LeapPhase::Leaping {
                    heading,
                    remaining: tuning.leap_distance,
                    struck: false,
                }),
                0.0,
            )
        }

        LeapPhase::Leaping {
            heading,
            remaining,
            mut struck,
        } => {
            let step = (tuning.leap_speed * agent.speed_factor * ctx.dt).min(remaining);
            let next = agent.position + heading * step;
            let blocked = !ctx.grid.is_walkable_at(next);
            let remaining = if blocked {
                0.0
            } else {
                agent.position = next;
                remaining - step
            };
            agent.facing = heading;
            agent.velocity = Vec2::ZERO;

            if !struck && distance(agent.position, ctx.target_position()) <= tuning.contact_distance {
                struck = true;
                let actor = &mut ctx.actors[ctx.target];
                apply_damage(actor, agent.id(), tuning.damage, &ctx.config.actor, ctx.events);
            }

            if remaining <= 0.0 {
                if blocked {
                    tracing::debug!(agent = %agent.id(), "leap stopped by wall");
                }
                AttackStep::Enter(
                    AttackPhase::Leap(LeapPhase::Recuperating),
                    tuning.recuperate_secs,
                )
            } else {
                AttackStep::Hold(AttackPhase::Leap(LeapPhase::Leaping {
                    heading,
                    remaining,
                    struck,
                }))
            }
        }

        LeapPhase::Recuperating => {
            agent.velocity = Vec2::ZERO;
            if agent.timers.is_elapsed(Countdown::Phase) {
                AttackStep::Finish {
                    restart_cooldown: true,
                }
            } else {
                AttackStep::Hold(AttackPhase::Leap(LeapPhase::Recuperating))
            }
        }
    }
}
