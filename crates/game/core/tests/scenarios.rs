use glam::Vec2;
use prowl_core::{
    ActorId, Archetype, Countdown, DeathMarker, SimConfig, SimEngine, SimEnv, SimEvent,
    StateKind, TickReport, TileGrid, Weapon, WeaponKind, World,
};

fn open_grid(width: usize, height: usize) -> TileGrid {
    let rows = vec![vec![0u8; width]; height];
    TileGrid::from_rows(&rows, 32.0, Vec2::ZERO).unwrap()
}

fn step(world: &mut World, env: &SimEnv<'_>, dt: f32) -> TickReport {
    SimEngine::new(world).step(env, dt)
}

#[test]
fn leaper_spots_engages_and_lands_a_single_hit() {
    let grid = open_grid(9, 9);
    let config = SimConfig::default();
    let env = SimEnv::with_grid(&grid, &config);
    let mut world = World::new(7);
    let agent = world
        .spawn_agent(Archetype::Leaper, Vec2::new(144.0, 48.0), Some(&grid))
        .unwrap();
    let actor = world
        .spawn_actor(Vec2::new(144.0, 128.0), 3, Some(&grid))
        .unwrap();

    let first = step(&mut world, &env, 0.05);
    assert!(first.events.contains(&SimEvent::AgentAlerted {
        agent,
        actor: Some(actor),
        position: Vec2::new(144.0, 128.0),
    }));
    assert_eq!(world.agent(agent).unwrap().kind(), StateKind::Attacking);

    let mut damage = 0;
    for _ in 0..19 {
        let report = step(&mut world, &env, 0.05);
        damage += report.damage_to(actor);
        assert!(world.agent(agent).unwrap().countdown(Countdown::AttackCooldown) >= 0.0);
    }

    assert_eq!(damage, 1);
    assert_eq!(world.actor(actor).unwrap().health.current, 2);
}

#[test]
fn abandon_distance_wins_over_an_attack_in_progress() {
    let grid = open_grid(16, 9);
    let config = SimConfig::default();
    let env = SimEnv::with_grid(&grid, &config);
    let mut world = World::new(7);
    let agent = world
        .spawn_agent(Archetype::Leaper, Vec2::new(144.0, 48.0), Some(&grid))
        .unwrap();
    let actor = world
        .spawn_actor(Vec2::new(144.0, 128.0), 3, Some(&grid))
        .unwrap();

    for _ in 0..4 {
        step(&mut world, &env, 0.05);
    }
    assert_eq!(world.agent(agent).unwrap().kind(), StateKind::Attacking);

    world.actor_mut(actor).unwrap().position = Vec2::new(496.0, 272.0);
    step(&mut world, &env, 0.05);

    let agent = world.agent(agent).unwrap();
    assert_eq!(agent.kind(), StateKind::Patrol);
    assert_eq!(agent.target(), None);
    assert_eq!(agent.alert_target(), None);
}

#[test]
fn flame_hits_three_times_in_three_and_a_half_seconds() {
    let grid = open_grid(9, 9);
    let config = SimConfig::default();
    let env = SimEnv::with_grid(&grid, &config);
    let mut world = World::new(3);
    world
        .spawn_agent(Archetype::Flamer, Vec2::new(144.0, 48.0), Some(&grid))
        .unwrap();
    let actor = world
        .spawn_actor(Vec2::new(144.0, 108.0), 10, Some(&grid))
        .unwrap();

    // one tick to spot, one to open the cone, then 3.5 seconds of burning
    let damage: u32 = (0..30)
        .map(|_| step(&mut world, &env, 0.125).damage_to(actor))
        .sum();
    assert_eq!(damage, 3);

    // the cooldown lapses at 3 s; the cone stays open and the cadence holds
    let damage: u32 = (0..24)
        .map(|_| step(&mut world, &env, 0.125).damage_to(actor))
        .sum();
    assert_eq!(damage, 3);
    assert_eq!(world.actor(actor).unwrap().health.current, 4);
}

#[test]
fn stun_hits_kill_a_shocker_exactly_once() {
    let grid = open_grid(9, 9);
    let config = SimConfig::default();
    let env = SimEnv::with_grid(&grid, &config);
    let mut world = World::new(11);
    let agent = world
        .spawn_agent(Archetype::Shocker, Vec2::new(144.0, 48.0), Some(&grid))
        .unwrap();
    let actor = world
        .spawn_actor(Vec2::new(144.0, 148.0), 20, Some(&grid))
        .unwrap();
    {
        let gunner = world.actor_mut(actor).unwrap();
        gunner.facing = Vec2::NEG_Y;
        gunner.weapon = Some(Weapon::new(WeaponKind::Stunner));
    }

    let mut deaths = Vec::new();
    let mut shots_after_death = 0;
    for _ in 0..100 {
        let report = step(&mut world, &env, 0.05);
        if !deaths.is_empty() {
            shots_after_death += report
                .events
                .iter()
                .filter(|e| matches!(e, SimEvent::WeaponDischarged { .. }))
                .count();
        }
        deaths.extend(report.deaths().cloned());
    }

    assert_eq!(deaths.len(), 1);
    let SimEvent::AgentDied { agent: dead, marker, .. } = &deaths[0] else {
        panic!("expected AgentDied, got {:?}", deaths[0]);
    };
    assert_eq!(*dead, agent);
    assert_eq!(
        *marker,
        DeathMarker::FadeOut {
            seconds: config.shocker.fade_secs
        }
    );
    assert_eq!(shots_after_death, 0);
    assert_eq!(world.dead_count(), 1);
    assert_eq!(world.agent(agent).unwrap().status_hits(), 4);
}

#[test]
fn without_a_grid_agents_hold_position_in_patrol() {
    let config = SimConfig::default();
    let env = SimEnv::without_grid(&config);
    let mut world = World::new(5);
    let start = Vec2::new(100.0, 100.0);
    for archetype in [Archetype::Leaper, Archetype::Shocker, Archetype::Flamer] {
        world.spawn_agent(archetype, start, None).unwrap();
    }
    let actor = world.spawn_actor(start + Vec2::new(0.0, 20.0), 3, None).unwrap();
    world.actor_mut(actor).unwrap().weapon = Some(Weapon::new(WeaponKind::Freezer));

    for _ in 0..50 {
        let report = step(&mut world, &env, 0.1);
        assert!(report.events.is_empty());
    }

    for agent in world.agents() {
        assert_eq!(agent.kind(), StateKind::Patrol);
        assert_eq!(agent.position(), start);
    }
}

#[test]
fn external_alert_sends_agent_to_location() {
    let grid = open_grid(12, 3);
    let config = SimConfig::default();
    let env = SimEnv::with_grid(&grid, &config);
    let mut world = World::new(9);
    let agent = world
        .spawn_agent(Archetype::Shocker, Vec2::new(48.0, 48.0), Some(&grid))
        .unwrap();
    let noise = Vec2::new(336.0, 48.0);

    let event = SimEngine::new(&mut world).alert_agent(agent, noise);
    assert_eq!(
        event,
        Some(SimEvent::AgentAlerted {
            agent,
            actor: None,
            position: noise,
        })
    );

    let start = world.agent(agent).unwrap().position();
    for _ in 0..10 {
        step(&mut world, &env, 0.1);
    }
    let moved = world.agent(agent).unwrap();
    assert_eq!(moved.kind(), StateKind::Alert);
    assert!(moved.position().x > start.x);
}

#[test]
fn removed_actor_is_dropped_by_its_pursuer() {
    let grid = open_grid(9, 9);
    let config = SimConfig::default();
    let env = SimEnv::with_grid(&grid, &config);
    let mut world = World::new(1);
    let agent = world
        .spawn_agent(Archetype::Shocker, Vec2::new(144.0, 48.0), Some(&grid))
        .unwrap();
    let actor: ActorId = world
        .spawn_actor(Vec2::new(144.0, 200.0), 3, Some(&grid))
        .unwrap();

    step(&mut world, &env, 0.05);
    assert_eq!(world.agent(agent).unwrap().target(), Some(actor));

    world.remove_actor(actor);
    step(&mut world, &env, 0.05);

    let agent = world.agent(agent).unwrap();
    assert_eq!(agent.target(), None);
    assert_eq!(agent.kind(), StateKind::Patrol);
}
