//! Simulation tuning loader.

use std::path::Path;

use prowl_core::SimConfig;
use toml::{Table, Value};

use crate::loaders::{LoadResult, read_file};

/// Loader for simulation tuning from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load tuning from a TOML file.
    ///
    /// Missing tables and fields fall back to [`SimConfig::default`]. The
    /// result is validated before it is returned.
    pub fn load(path: &Path) -> LoadResult<SimConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
    }

    /// Parse and validate tuning from TOML text.
    ///
    /// The file is layered over the serialized defaults table by table, so a
    /// partial `[leaper.base]` keeps the leaper's own defaults for the keys it
    /// leaves out.
    pub fn parse(content: &str) -> LoadResult<SimConfig> {
        let overrides: Table = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        let mut merged = match Value::try_from(SimConfig::default())? {
            Value::Table(table) => table,
            other => anyhow::bail!("default config serialized to {}", other.type_str()),
        };
        merge_tables(&mut merged, overrides);

        let config: SimConfig = Value::Table(merged)
            .try_into()
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}

/// Overlays `overrides` onto `base`, recursing into tables present in both.
fn merge_tables(base: &mut Table, overrides: Table) {
    for (key, value) in overrides {
        match (base.get_mut(&key), value) {
            (Some(Value::Table(existing)), Value::Table(nested)) => merge_tables(existing, nested),
            (Some(slot), value) => *slot = value,
            (None, value) => {
                base.insert(key, value);
            }
        }
    }
}
