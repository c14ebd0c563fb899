//! Host-level run settings: CLI flags with environment fallbacks.
use std::env;
use std::path::PathBuf;

/// Fixed-step driver settings for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimSettings {
    pub data_dir: PathBuf,
    pub scenario: String,
    /// Simulation steps per simulated second.
    pub tick_hz: u32,
    /// Number of steps to run.
    pub ticks: u64,
    /// Overrides both the tuning and the scenario seed.
    pub seed: Option<u64>,
    /// Walking speed for scripted actor routes (world units per second).
    pub actor_speed: f32,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            scenario: "skirmish".to_string(),
            tick_hz: 30,
            ticks: 900,
            seed: None,
            actor_speed: 90.0,
        }
    }
}

impl SimSettings {
    /// Fills unset values from the process environment.
    ///
    /// Environment variables:
    /// - `PROWL_DATA_DIR` - Content directory (default: `data`)
    /// - `PROWL_TICK_HZ` - Steps per second (default: 30, minimum 1)
    /// - `PROWL_TICKS` - Steps to run (default: 900)
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        if let Ok(dir) = env::var("PROWL_DATA_DIR") {
            settings.data_dir = PathBuf::from(dir);
        }
        if let Some(hz) = read_env::<u32>("PROWL_TICK_HZ") {
            settings.tick_hz = hz.max(1);
        }
        if let Some(ticks) = read_env::<u64>("PROWL_TICKS") {
            settings.ticks = ticks;
        }

        settings
    }

    /// Seconds advanced per step.
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_hz.max(1) as f32
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
