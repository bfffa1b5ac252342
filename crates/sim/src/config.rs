//! Driver configuration.
use std::env;
use std::path::PathBuf;

/// Where content lives and how far past the script to keep resolving.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub data_dir: PathBuf,
    /// Passes with no orders resolved after the script runs out.
    pub idle_passes: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("crates/game/content/data"),
            idle_passes: 0,
        }
    }
}

impl SimConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SKIRMISH_DATA_DIR` - Content data directory (default: crates/game/content/data)
    /// - `SKIRMISH_IDLE_PASSES` - Order-free passes after the script (default: 0)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("SKIRMISH_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(passes) = read_env::<usize>("SKIRMISH_IDLE_PASSES") {
            config.idle_passes = passes;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
