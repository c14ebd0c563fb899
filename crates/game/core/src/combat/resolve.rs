use crate::config::WeaponProfile;
use crate::engine::SimEvent;
use crate::env::{SimEnv, TileGrid};
use crate::geometry::{angle_between, distance, line_of_sight, normalize_or_zero};
use crate::state::{Actor, Agent};

use super::effects::effect_for;

/// Index of the nearest living agent `actor` can hit with `weapon`.
///
/// A candidate must be within range, within the forward aim arc around the
/// actor's facing, and in line of sight. Ties keep the earlier agent.
pub fn acquire_target(
    actor: &Actor,
    agents: &[Agent],
    weapon: &WeaponProfile,
    grid: &TileGrid,
) -> Option<usize> {
    agents
        .iter()
        .enumerate()
        .filter(|(_, agent)| !agent.is_dead())
        .map(|(index, agent)| (index, distance(actor.position, agent.position())))
        .filter(|&(index, range)| {
            let agent = &agents[index];
            range <= weapon.range
                && angle_between(actor.facing, agent.position() - actor.position)
                    <= weapon.arc_half_angle
                && line_of_sight(grid, actor.position, agent.position())
        })
        .fold(None, |best: Option<(usize, f32)>, candidate| match best {
            Some((_, best_range)) if best_range <= candidate.1 => best,
            _ => Some(candidate),
        })
        .map(|(index, _)| index)
}

/// Fires every ready weapon at its best target.
///
/// Downed actors and weapons still cooling down are skipped. A shot snaps the
/// actor's facing to the target, restarts the cooldown and applies the
/// weapon × archetype effect. No grid means no line of sight and no shots.
pub fn resolve_weapons(
    actors: &mut [Actor],
    agents: &mut [Agent],
    env: &SimEnv<'_>,
    events: &mut Vec<SimEvent>,
) {
    let Ok(grid) = env.grid() else {
        return;
    };
    let config = env.config();

    for actor in actors.iter_mut() {
        if actor.is_downed() {
            continue;
        }
        let Some(weapon) = actor.weapon else {
            continue;
        };
        if !weapon.is_ready() {
            continue;
        }
        let profile = config.weapon(weapon.kind);
        let Some(index) = acquire_target(actor, agents, profile, grid) else {
            continue;
        };

        let agent = &mut agents[index];
        let aim = normalize_or_zero(agent.position() - actor.position);
        if aim != glam::Vec2::ZERO {
            actor.facing = aim;
        }
        if let Some(held) = actor.weapon.as_mut() {
            held.restart(profile.cooldown);
        }

        let effect = effect_for(weapon.kind, agent.archetype());
        tracing::debug!(actor = %actor.id, agent = %agent.id(), weapon = %weapon.kind, %effect, "weapon fired");
        events.push(SimEvent::WeaponDischarged {
            actor: actor.id,
            agent: agent.id(),
            weapon: weapon.kind,
            effect,
            from: actor.position,
            to: agent.position(),
        });
        if let Some(death) = agent.apply_effect(effect, config) {
            events.push(death);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::combat::WeaponEffect;
    use crate::config::SimConfig;
    use crate::state::{ActorId, AgentId, AgentState, Archetype, WeaponKind};

    fn grid() -> TileGrid {
        let rows: Vec<Vec<u8>> = (0..6)
            .map(|y| (0..12).map(|x| u8::from(x == 6 && y < 3)).collect())
            .collect();
        TileGrid::from_rows(&rows, 32.0, Vec2::ZERO).unwrap()
    }

    fn gunner(position: Vec2, kind: WeaponKind) -> Actor {
        Actor::new(ActorId(0), position, 3)
            .with_facing(Vec2::X)
            .with_weapon(kind)
    }

    fn weapon() -> WeaponProfile {
        WeaponProfile {
            range: 150.0,
            arc_half_angle: 0.5,
            cooldown: 1.0,
        }
    }

    #[test]
    fn picks_nearest_visible_agent_in_arc() {
        let grid = grid();
        let actor = gunner(Vec2::new(48.0, 144.0), WeaponKind::Freezer);
        let agents = [
            Agent::new(AgentId(0), Archetype::Leaper, Vec2::new(176.0, 144.0), 0),
            Agent::new(AgentId(1), Archetype::Leaper, Vec2::new(112.0, 144.0), 0),
            // behind the actor
            Agent::new(AgentId(2), Archetype::Leaper, Vec2::new(20.0, 144.0), 0),
        ];
        assert_eq!(acquire_target(&actor, &agents, &weapon(), &grid), Some(1));
    }

    #[test]
    fn skips_dead_occluded_and_out_of_range_agents() {
        let grid = grid();
        let actor = gunner(Vec2::new(144.0, 48.0), WeaponKind::Freezer);
        let mut dead = Agent::new(AgentId(0), Archetype::Leaper, Vec2::new(176.0, 48.0), 0);
        dead.state = AgentState::Dead;
        let agents = [
            dead,
            // wall column at x = 6 sits between them
            Agent::new(AgentId(1), Archetype::Leaper, Vec2::new(240.0, 48.0), 0),
            Agent::new(AgentId(2), Archetype::Leaper, Vec2::new(144.0 + 200.0, 48.0), 0),
        ];
        assert_eq!(acquire_target(&actor, &agents, &weapon(), &grid), None);
    }

    #[test]
    fn firing_snaps_facing_and_gates_on_cooldown() {
        let grid = grid();
        let config = SimConfig::default();
        let env = SimEnv::with_grid(&grid, &config);
        let mut actors = [gunner(Vec2::new(48.0, 144.0), WeaponKind::Stunner)];
        let mut agents = [Agent::new(
            AgentId(3),
            Archetype::Leaper,
            Vec2::new(128.0, 160.0),
            0,
        )];
        let mut events = Vec::new();

        resolve_weapons(&mut actors, &mut agents, &env, &mut events);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            SimEvent::WeaponDischarged {
                effect: WeaponEffect::NoEffect,
                ..
            }
        ));
        let expected = (Vec2::new(128.0, 160.0) - Vec2::new(48.0, 144.0)).normalize();
        assert!(actors[0].facing.abs_diff_eq(expected, 1e-6));
        assert_eq!(agents[0].status_hits(), 0);

        resolve_weapons(&mut actors, &mut agents, &env, &mut events);
        assert_eq!(events.len(), 1, "weapon fired during cooldown");
    }

    #[test]
    fn nothing_fires_without_a_grid() {
        let config = SimConfig::default();
        let env = SimEnv::without_grid(&config);
        let mut actors = [gunner(Vec2::new(48.0, 144.0), WeaponKind::Freezer)];
        let mut agents = [Agent::new(
            AgentId(0),
            Archetype::Leaper,
            Vec2::new(96.0, 144.0),
            0,
        )];
        let mut events = Vec::new();
        resolve_weapons(&mut actors, &mut agents, &env, &mut events);
        assert!(events.is_empty());
    }
}
