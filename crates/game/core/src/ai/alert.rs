//! Pursuit: re-acquire, abandon, engage or close in along a grid route.

use glam::Vec2;

use super::archetype::ready_phase;
use super::motion;
use crate::config::SimConfig;
use crate::env::TileGrid;
use crate::geometry::distance;
use crate::nav::{PathPlan, plan_path};
use crate::state::{Actor, Agent, AgentState};

/// Nearest actor that is not downed. Ties keep the earlier actor.
pub(crate) fn nearest_live_actor(position: Vec2, actors: &[Actor]) -> Option<&Actor> {
    actors
        .iter()
        .filter(|actor| !actor.is_downed())
        .fold(None, |best: Option<(&Actor, f32)>, actor| {
            let range = distance(position, actor.position);
            match best {
                Some((_, best_range)) if best_range <= range => best,
                _ => Some((actor, range)),
            }
        })
        .map(|(actor, _)| actor)
}

pub(super) fn update(
    agent: &mut Agent,
    dt: f32,
    actors: &[Actor],
    grid: &TileGrid,
    config: &SimConfig,
) {
    let profile = *config.profile(agent.archetype());

    let Some(actor) = nearest_live_actor(agent.position, actors) else {
        let lost_actor = agent.target.take().is_some();
        match agent.alert_target {
            Some(point) if !lost_actor => investigate(agent, point, dt, grid, config),
            _ => {
                tracing::debug!(agent = %agent.id(), "no live actor, back to patrol");
                agent.revert_to_patrol();
            }
        }
        return;
    };

    agent.target = Some(actor.id);
    agent.alert_target = Some(actor.position);
    let range = distance(agent.position, actor.position);

    if range >= config.abandon_distance {
        tracing::debug!(agent = %agent.id(), actor = %actor.id, range, "abandoned pursuit");
        agent.revert_to_patrol();
        return;
    }

    if range <= profile.attack_range {
        tracing::debug!(agent = %agent.id(), actor = %actor.id, "engaging");
        agent.transition(AgentState::Attacking(ready_phase(agent.archetype())));
        agent.set_facing(actor.position - agent.position);
        return;
    }

    let reachable = follow_route(agent, actor.position, profile.motion.chase_speed, dt, grid, config);
    if config.debug_trace {
        tracing::trace!(agent = %agent.id(), reachable, path = ?agent.path, "chase route");
    }
}

/// Travels to a location given by an external alert, then resumes Patrol.
fn investigate(agent: &mut Agent, point: Vec2, dt: f32, grid: &TileGrid, config: &SimConfig) {
    if agent.position.distance(point) <= config.arrival_tolerance {
        tracing::debug!(agent = %agent.id(), "reached alert location");
        agent.revert_to_patrol();
        return;
    }
    let speed = config.profile(agent.archetype()).motion.chase_speed;
    if !follow_route(agent, point, speed, dt, grid, config) {
        tracing::debug!(agent = %agent.id(), ?point, "alert location unreachable");
        agent.revert_to_patrol();
    }
}

/// Plans a fresh route to `point` and steers toward its first waypoint.
///
/// Without a route the agent steers straight at `point`. The planned tiles are
/// kept on the agent; returns `false` when `point` is unreachable.
fn follow_route(
    agent: &mut Agent,
    point: Vec2,
    speed: f32,
    dt: f32,
    grid: &TileGrid,
    config: &SimConfig,
) -> bool {
    let start = grid.world_to_tile(agent.position);
    let goal = grid.world_to_tile(point);
    let plan = plan_path(grid, start, goal);
    let reachable = plan.is_reachable();

    let waypoint = match &plan {
        PathPlan::Route(tiles) => tiles.first().map_or(point, |&tile| grid.tile_center(tile)),
        PathPlan::Arrived | PathPlan::Unreachable => point,
    };
    agent.path = plan.into_tiles();

    let tuning = config.profile(agent.archetype()).motion;
    motion::seek(
        agent,
        waypoint,
        speed,
        config.arrival_tolerance,
        &tuning,
        grid,
        dt,
    );
    reachable
}
