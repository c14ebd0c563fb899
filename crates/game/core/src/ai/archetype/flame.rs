//! Ready → Burning. The cone stays hot until the attack cooldown lapses and
//! damages every actor inside it on a per-actor re-hit interval. A lapse with
//! the target still in attack range re-arms the cooldown without closing the
//! cone, so exposure carries over for as long as the engagement lasts.

use super::{AttackContext, AttackStep};
use crate::ai::motion::halt_facing;
use crate::combat::apply_damage;
use crate::config::FlamerProfile;
use crate::env::TileGrid;
use crate::geometry::{distance, in_cone, line_of_sight};
use crate::state::{Actor, Agent, AttackPhase, Countdown, Exposure, ExposureTable, FlamePhase};

pub(super) fn update(agent: &mut Agent, phase: FlamePhase, ctx: &mut AttackContext<'_>) -> AttackStep {
    let config = ctx.config;
    let tuning = &config.flamer;
    let target = ctx.target_position();

    match phase {
        FlamePhase::Ready => {
            halt_facing(agent, target);
            if distance(agent.position, target) > tuning.base.attack_range {
                return AttackStep::Pursue;
            }
            if !agent.timers.is_elapsed(Countdown::AttackCooldown) {
                return AttackStep::Hold(AttackPhase::Flame(FlamePhase::Ready));
            }
            // the cooldown doubles as the burn duration
            agent
                .timers
                .set(Countdown::AttackCooldown, tuning.base.attack_cooldown);
            AttackStep::Enter(
                AttackPhase::Flame(FlamePhase::Burning {
                    elapsed: 0.0,
                    exposure: ExposureTable::new(),
                }),
                0.0,
            )
        }

        FlamePhase::Burning {
            elapsed,
            mut exposure,
        } => {
            if agent.timers.is_elapsed(Countdown::AttackCooldown) {
                if distance(agent.position, target) > tuning.base.attack_range {
                    return AttackStep::Finish {
                        restart_cooldown: false,
                    };
                }
                agent
                    .timers
                    .set(Countdown::AttackCooldown, tuning.base.attack_cooldown);
            }

            halt_facing(agent, target);
            let elapsed = elapsed + ctx.dt;
            let length = cone_length(tuning, elapsed);

            for actor in ctx.actors.iter_mut() {
                if actor.is_downed() || !in_flame(agent, actor, length, tuning, ctx.grid) {
                    exposure.retain(|entry| entry.actor != actor.id);
                    continue;
                }
                if expose(&mut exposure, actor, ctx.dt, tuning.rehit_secs) {
                    apply_damage(actor, agent.id(), tuning.damage, &config.actor, ctx.events);
                }
            }

            AttackStep::Hold(AttackPhase::Flame(FlamePhase::Burning { elapsed, exposure }))
        }
    }
}

/// Cone length ramps linearly to its maximum over the expansion window.
fn cone_length(tuning: &FlamerProfile, elapsed: f32) -> f32 {
    if tuning.expansion_secs <= 0.0 {
        return tuning.cone_length;
    }
    tuning.cone_length * (elapsed / tuning.expansion_secs).min(1.0)
}

fn in_flame(agent: &Agent, actor: &Actor, length: f32, tuning: &FlamerProfile, grid: &TileGrid) -> bool {
    in_cone(
        agent.position,
        agent.facing,
        actor.position,
        length,
        tuning.cone_half_angle,
    ) && line_of_sight(grid, agent.position, actor.position)
}

/// Accumulates exposure for `actor` and reports whether a re-hit is due.
fn expose(table: &mut ExposureTable, actor: &Actor, dt: f32, rehit_secs: f32) -> bool {
    let index = match table.iter().position(|entry| entry.actor == actor.id) {
        Some(index) => index,
        None => {
            if table
                .try_push(Exposure {
                    actor: actor.id,
                    seconds: 0.0,
                })
                .is_err()
            {
                return false;
            }
            table.len() - 1
        }
    };

    let entry = &mut table[index];
    entry.seconds += dt;
    if entry.seconds >= rehit_secs {
        entry.seconds -= rehit_secs;
        true
    } else {
        false
    }
}
