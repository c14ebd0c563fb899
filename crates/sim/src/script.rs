//! Scripted actor movement standing in for player input.

use glam::Vec2;
use prowl_content::ActorRoute;
use prowl_core::{ActorId, World};

/// Walks each routed actor through its waypoints in a loop.
#[derive(Debug)]
pub struct ScriptedActors {
    walkers: Vec<Walker>,
    speed: f32,
}

#[derive(Debug)]
struct Walker {
    actor: ActorId,
    waypoints: Vec<Vec2>,
    next: usize,
}

impl ScriptedActors {
    pub fn new(routes: Vec<ActorRoute>, speed: f32) -> Self {
        let walkers = routes
            .into_iter()
            .filter(|route| !route.waypoints.is_empty())
            .map(|route| Walker {
                actor: route.actor,
                waypoints: route.waypoints,
                next: 0,
            })
            .collect();
        Self { walkers, speed }
    }

    /// Moves every live, scripted actor up to `speed * dt` toward its next waypoint.
    ///
    /// Downed or removed actors stay where they are.
    pub fn advance(&mut self, world: &mut World, dt: f32) {
        for walker in &mut self.walkers {
            let Some(actor) = world.actor_mut(walker.actor) else {
                continue;
            };
            if actor.is_downed() {
                continue;
            }

            let mut budget = self.speed * dt;
            // a budget can span several short legs
            for _ in 0..walker.waypoints.len() {
                let goal = walker.waypoints[walker.next];
                let offset = goal - actor.position;
                let length = offset.length();
                if length > budget {
                    actor.position += offset / length * budget;
                    actor.set_facing(offset);
                    break;
                }
                actor.position = goal;
                budget -= length;
                walker.next = (walker.next + 1) % walker.waypoints.len();
                if budget <= 0.0 {
                    break;
                }
            }
        }
    }
}
