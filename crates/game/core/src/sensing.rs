//! Vision-cone detection that promotes patrolling agents to Alert.

use crate::engine::SimEvent;
use crate::env::SimEnv;
use crate::geometry::{in_cone, line_of_sight};
use crate::state::{Actor, ActorId, Agent, AgentState};

/// Returns the first actor, in list order, that `agent` can see.
///
/// An actor is seen when it is not downed, lies inside the agent's sensing
/// cone and has an unobstructed line of sight. Agents with a zero sensing
/// radius or angle never see anything, and nothing is visible without a grid.
pub fn detect<'a>(agent: &Agent, actors: &'a [Actor], env: &SimEnv<'_>) -> Option<&'a Actor> {
    let sensing = env.config().profile(agent.archetype()).sensing;
    if !sensing.is_enabled() {
        return None;
    }
    let grid = env.grid().ok()?;

    actors.iter().filter(|actor| !actor.is_downed()).find(|actor| {
        let visible = in_cone(
            agent.position(),
            agent.facing(),
            actor.position,
            sensing.radius,
            sensing.half_angle,
        ) && line_of_sight(grid, agent.position(), actor.position);
        if env.tracing_enabled() {
            tracing::trace!(agent = %agent.id(), actor = %actor.id, visible, "cone check");
        }
        visible
    })
}

/// Scans every patrolling agent and promotes those that see an actor.
///
/// Returns the number of agents promoted this tick.
pub fn run_sensing(
    agents: &mut [Agent],
    actors: &[Actor],
    env: &SimEnv<'_>,
    events: &mut Vec<SimEvent>,
) -> usize {
    let mut promoted = 0;
    for agent in agents.iter_mut() {
        if !matches!(agent.state, AgentState::Patrol(_)) {
            continue;
        }
        let Some(actor) = detect(agent, actors, env) else {
            continue;
        };
        promote(agent, actor.id, actor);
        events.push(SimEvent::AgentAlerted {
            agent: agent.id(),
            actor: Some(actor.id),
            position: actor.position,
        });
        promoted += 1;
    }
    promoted
}

fn promote(agent: &mut Agent, id: ActorId, actor: &Actor) {
    tracing::debug!(agent = %agent.id(), actor = %id, "spotted actor");
    agent.target = Some(id);
    agent.alert_target = Some(actor.position);
    agent.transition(AgentState::Alert);
}
