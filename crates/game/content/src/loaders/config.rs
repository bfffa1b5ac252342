//! Engine configuration loader.

use std::path::Path;

use tactics_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine tunables from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Keys left out keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.critical_health_percent > 100 {
            anyhow::bail!(
                "critical_health_percent must be at most 100, got {}",
                config.critical_health_percent
            );
        }
        if config.xp_thresholds.windows(2).any(|pair| pair[0] >= pair[1]) {
            anyhow::bail!("xp_thresholds must be strictly increasing");
        }

        Ok(config)
    }
}
