//! Content factory for building a match from data files.

use std::path::{Path, PathBuf};

use tactics_core::{GameConfig, Roster, TerrainGrid};

use crate::loaders::{
    ConfigLoader, LoadResult, MapLoader, RosterLoader, Scenario, ScenarioLoader, Skirmish,
};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── roster.ron
/// ├── maps/
/// │   └── ossuary.ron
/// └── scenarios/
///     └── opening.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine tunables from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load and validate the unit roster from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<Roster> {
        let path = self.data_dir.join("roster.ron");
        RosterLoader::load(&path)
    }

    /// Load a map from `maps/{map_name}.ron`.
    pub fn load_map(&self, map_name: &str) -> LoadResult<TerrainGrid> {
        let path = self.data_dir.join("maps").join(format!("{}.ron", map_name));
        MapLoader::load(&path)
    }

    /// Load a scenario from `scenarios/{scenario_name}.ron`.
    pub fn load_scenario(&self, scenario_name: &str) -> LoadResult<Scenario> {
        let path = self
            .data_dir
            .join("scenarios")
            .join(format!("{}.ron", scenario_name));
        ScenarioLoader::load(&path)
    }

    /// Loads everything `scenario_name` needs and places its units.
    pub fn load_skirmish(&self, scenario_name: &str) -> LoadResult<(GameConfig, Scenario, Skirmish)> {
        let config = self.load_config()?;
        let roster = self.load_roster()?;
        let scenario = self.load_scenario(scenario_name)?;
        let terrain = self.load_map(&scenario.map)?;
        let skirmish = scenario.setup(&roster, &config, terrain)?;

        Ok((config, scenario, skirmish))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
