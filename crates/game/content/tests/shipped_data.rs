use std::path::PathBuf;

use prowl_content::ContentFactory;
use prowl_core::{SimEngine, SimEnv};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../../data")
}

#[test]
fn shipped_skirmish_loads_and_runs() {
    let factory = ContentFactory::new(data_dir());
    let config = factory.load_config().unwrap();
    assert_eq!(config.seed, 1337);

    let mut level = factory.build_world("skirmish", &config).unwrap();
    assert_eq!(level.world.agents().len(), 4);
    assert_eq!(level.world.actors().len(), 2);
    assert_eq!(level.routes.len(), 2);

    let env = SimEnv::with_grid(&level.grid, &config);
    for _ in 0..300 {
        SimEngine::new(&mut level.world).step(&env, 1.0 / 30.0);
    }
    assert_eq!(level.world.tick.0, 300);
}
