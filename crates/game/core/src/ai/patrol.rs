//! Idle wandering: move to a neighboring tile, look around, or rest.

use core::f32::consts::PI;

use glam::Vec2;

use super::motion;
use crate::config::{DurationWindow, SimConfig};
use crate::env::TileGrid;
use crate::geometry::turn_toward;
use crate::state::{Agent, AgentState, Countdown, Wander};

pub(super) fn update(agent: &mut Agent, dt: f32, grid: &TileGrid, config: &SimConfig) {
    if agent.timers.is_elapsed(Countdown::Behavior) {
        reroll(agent, grid, config);
    }

    let AgentState::Patrol(wander) = agent.state else {
        return;
    };
    let profile = config.profile(agent.archetype());
    match wander {
        Wander::Moving { destination } => {
            motion::seek(
                agent,
                grid.tile_center(destination),
                profile.motion.patrol_speed,
                config.arrival_tolerance,
                &profile.motion,
                grid,
                dt,
            );
        }
        Wander::Looking { heading } => {
            motion::drive(agent, Vec2::ZERO, &profile.motion, grid, dt);
            agent.facing = turn_toward(agent.facing, heading, config.patrol.look_turn_rate * dt);
        }
        Wander::Resting => motion::drive(agent, Vec2::ZERO, &profile.motion, grid, dt),
    }
}

/// Picks the next sub-behavior by weight and arms the behavior countdown.
fn reroll(agent: &mut Agent, grid: &TileGrid, config: &SimConfig) {
    let tuning = &config.patrol;
    let weights = [
        tuning.moving_weight,
        tuning.looking_weight,
        tuning.resting_weight,
    ];

    let (wander, window) = match agent.rng.weighted(&weights) {
        Some(0) => {
            let here = grid.world_to_tile(agent.position);
            let options = grid.walkable_neighbors(here);
            if options.is_empty() {
                (Wander::Resting, tuning.resting_secs)
            } else {
                let destination = options[agent.rng.index(options.len())];
                (Wander::Moving { destination }, tuning.moving_secs)
            }
        }
        Some(1) => {
            let heading = Vec2::from_angle(agent.rng.range_f32(-PI, PI));
            (Wander::Looking { heading }, tuning.looking_secs)
        }
        _ => (Wander::Resting, tuning.resting_secs),
    };

    let seconds = roll_duration(agent, window);
    if config.debug_trace {
        tracing::trace!(agent = %agent.id(), ?wander, seconds, "patrol reroll");
    }
    agent.state = AgentState::Patrol(wander);
    agent.timers.set(Countdown::Behavior, seconds);
}

fn roll_duration(agent: &mut Agent, window: DurationWindow) -> f32 {
    agent.rng.range_f32(window.min, window.max)
}
