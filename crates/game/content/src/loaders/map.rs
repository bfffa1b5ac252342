//! Map data loader.
//!
//! Loads terrain only. Unit placement lives in scenario files.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{MapDimensions, Position, TerrainGrid, TerrainKind, TerrainOracle};

use crate::loaders::{LoadResult, read_file};

/// Map data structure for RON files. Unlisted tiles are `Empty`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapDataRon {
    dimensions: (u32, u32),
    tiles: Vec<(i32, i32, TerrainKind)>, // (row, col, terrain)
    /// Pinned cosmic values; unlisted furniture is valued from the match seed.
    #[serde(default)]
    appraisals: Vec<(i32, i32, u8)>, // (row, col, value)
}

/// Loader for map data from RON files.
pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<TerrainGrid> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<TerrainGrid> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let (width, height) = data.dimensions;
        if width == 0 || height == 0 {
            anyhow::bail!("Map dimensions must be non-zero, got {}x{}", width, height);
        }

        let tiles = data
            .tiles
            .into_iter()
            .map(|(row, col, terrain)| (Position::new(row, col), terrain));
        let mut grid = TerrainGrid::with_tiles(MapDimensions::new(width, height), tiles)
            .map_err(|e| anyhow::anyhow!("Invalid map tile: {}", e))?;

        for (row, col, value) in data.appraisals {
            let position = Position::new(row, col);
            if grid.terrain_at(position) != Some(TerrainKind::Furniture) {
                anyhow::bail!("Appraisal at {} is not on furniture", position);
            }
            grid.appraise(position, value)
                .map_err(|e| anyhow::anyhow!("Invalid appraisal: {}", e))?;
        }
        Ok(grid)
    }
}
