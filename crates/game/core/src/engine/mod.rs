//! Fixed-order tick driver.
//!
//! [`SimEngine`] is the only entry point that advances a [`World`]. Each step
//! runs, in order: actor timers, sensing, agent state machines, then combat
//! resolution. Every phase reads positions written earlier in the same tick
//! and no field has more than one writer.

mod events;

pub use events::{DeathMarker, SimEvent, TickReport};

use glam::Vec2;

use crate::combat::resolve_weapons;
use crate::env::SimEnv;
use crate::sensing::run_sensing;
use crate::state::{AgentId, Tick, World};
use crate::state::types::timers::sanitize;

/// Drives a borrowed [`World`] forward one tick at a time.
pub struct SimEngine<'a> {
    world: &'a mut World,
}

impl<'a> SimEngine<'a> {
    pub fn new(world: &'a mut World) -> Self {
        Self { world }
    }

    pub fn world(&self) -> &World {
        self.world
    }

    pub fn tick(&self) -> Tick {
        self.world.tick
    }

    /// Advances the world by `dt` seconds.
    ///
    /// Negative or non-finite `dt` is treated as zero; the tick counter still
    /// advances.
    pub fn step(&mut self, env: &SimEnv<'_>, dt: f32) -> TickReport {
        let dt = sanitize(dt);
        self.world.tick = self.world.tick.next();
        let tick = self.world.tick;
        let mut events = Vec::new();

        let (agents, actors) = self.world.parts_mut();

        for actor in actors.iter_mut() {
            actor.tick(dt);
        }

        run_sensing(agents, actors, env, &mut events);

        for agent in agents.iter_mut() {
            agent.advance(dt, actors, env, &mut events);
        }

        resolve_weapons(actors, agents, env, &mut events);

        if env.tracing_enabled() {
            tracing::trace!(%tick, events = events.len(), "tick complete");
        }
        TickReport { tick, events }
    }

    /// Forces an agent into Alert toward `position` (noise, alarms, scripted triggers).
    ///
    /// Returns the emitted event, or `None` if the agent is unknown or busy
    /// attacking, disabled or dead.
    pub fn alert_agent(&mut self, id: AgentId, position: Vec2) -> Option<SimEvent> {
        let agent = self.world.agent_mut(id)?;
        agent.alert(position).then_some(SimEvent::AgentAlerted {
            agent: id,
            actor: None,
            position,
        })
    }
}
