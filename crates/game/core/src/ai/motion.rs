//! Velocity smoothing and wall-aware integration.

use glam::Vec2;

use crate::config::MotionTuning;
use crate::env::TileGrid;
use crate::state::Agent;

/// Below this speed an agent keeps its previous facing.
const FACING_EPSILON: f32 = 1.0;

/// Moves `velocity` toward `desired`.
///
/// Speeding up along the current heading uses `acceleration`; slowing down or
/// turning away uses `deceleration`, so reversals bleed speed first instead
/// of snapping.
pub fn approach(velocity: Vec2, desired: Vec2, tuning: &MotionTuning, dt: f32) -> Vec2 {
    let speeding_up = desired.length_squared() >= velocity.length_squared()
        && desired.dot(velocity) >= 0.0;
    let rate = if speeding_up {
        tuning.acceleration
    } else {
        tuning.deceleration
    };
    let delta = desired - velocity;
    velocity + delta.clamp_length_max(rate * dt)
}

/// Steers toward `point` at `speed` (before the agent's speed factor) and moves.
///
/// Stops steering once within `tolerance` of the point. Returns `true` when
/// the agent is within tolerance after moving.
pub(crate) fn seek(
    agent: &mut Agent,
    point: Vec2,
    speed: f32,
    tolerance: f32,
    tuning: &MotionTuning,
    grid: &TileGrid,
    dt: f32,
) -> bool {
    let offset = point - agent.position;
    let desired = if offset.length() <= tolerance {
        Vec2::ZERO
    } else {
        offset.normalize_or_zero() * speed * agent.speed_factor
    };
    drive(agent, desired, tuning, grid, dt);
    agent.position.distance(point) <= tolerance
}

/// Smooths the agent's velocity toward `desired` and integrates it.
pub(crate) fn drive(
    agent: &mut Agent,
    desired: Vec2,
    tuning: &MotionTuning,
    grid: &TileGrid,
    dt: f32,
) {
    agent.velocity = approach(agent.velocity, desired, tuning, dt);
    integrate(agent, grid, dt);
}

/// Moves by `velocity * dt`, sliding along walls one axis at a time.
///
/// A blocked axis loses its velocity component. The agent never ends up on a
/// wall or outside the grid.
pub(crate) fn integrate(agent: &mut Agent, grid: &TileGrid, dt: f32) {
    let step = agent.velocity * dt;
    if step == Vec2::ZERO {
        return;
    }

    let along_x = agent.position + Vec2::new(step.x, 0.0);
    if grid.is_walkable_at(along_x) {
        agent.position = along_x;
    } else {
        agent.velocity.x = 0.0;
    }
    let along_y = agent.position + Vec2::new(0.0, step.y);
    if grid.is_walkable_at(along_y) {
        agent.position = along_y;
    } else {
        agent.velocity.y = 0.0;
    }

    if agent.velocity.length() > FACING_EPSILON {
        agent.facing = agent.velocity.normalize();
    }
}

/// Zeroes velocity and points the agent at `point`.
pub(crate) fn halt_facing(agent: &mut Agent, point: Vec2) {
    agent.velocity = Vec2::ZERO;
    agent.set_facing(point - agent.position);
}
