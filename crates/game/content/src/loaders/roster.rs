//! Unit roster loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{Archetype, Roster};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Roster structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterRon {
    pub archetypes: Vec<Archetype>,
}

/// Loader for the unit roster from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load and validate a roster from a RON file.
    ///
    /// Every unit type must appear exactly once with a usable kit; anything
    /// else is a hard error.
    pub fn load(path: &Path) -> LoadResult<Roster> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid roster {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Roster> {
        let data: RosterRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        let roster = Roster::new(data.archetypes);
        roster.validate()?;
        debug!(archetypes = roster.archetypes().len(), "roster loaded");

        Ok(roster)
    }
}
