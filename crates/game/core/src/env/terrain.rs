use bitflags::bitflags;

use crate::error::{ErrorSeverity, GameError};
use crate::state::Position;

/// Terrain query interface consumed by the engine.
///
/// The engine never inspects tiles directly; every passability, sight and
/// placement decision goes through this trait so map generation stays an
/// external concern.
pub trait TerrainOracle {
    fn dimensions(&self) -> MapDimensions;

    /// Terrain at `position`, or `None` when out of bounds.
    fn terrain_at(&self, position: Position) -> Option<TerrainKind>;

    fn set_terrain(&mut self, position: Position, kind: TerrainKind) -> Result<(), TerrainError>;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }

    fn is_passable(&self, position: Position) -> bool {
        self.terrain_at(position)
            .is_some_and(|kind| kind.traits().contains(TerrainTraits::PASSABLE))
    }

    /// Out-of-bounds tiles block sight.
    fn blocks_line_of_sight(&self, position: Position) -> bool {
        self.terrain_at(position)
            .is_none_or(|kind| kind.traits().contains(TerrainTraits::BLOCKS_SIGHT))
    }

    /// Whether a unit may be placed (spawned, teleported, leapt) onto this tile.
    fn can_place(&self, position: Position) -> bool {
        self.terrain_at(position)
            .is_some_and(|kind| kind.traits().contains(TerrainTraits::PLACEABLE))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row >= 0
            && position.col >= 0
            && position.row < self.height as i32
            && position.col < self.width as i32
    }

    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

bitflags! {
    /// Gameplay properties derived from a terrain kind.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TerrainTraits: u8 {
        const PASSABLE = 1 << 0;
        const BLOCKS_SIGHT = 1 << 1;
        const PLACEABLE = 1 << 2;
    }
}

/// Canonical terrain classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    #[default]
    Empty,
    Dust,
    /// Blocks movement but not sight.
    Furniture,
    Limestone,
    Pillar,
    /// Destructible dike wall raised by a Marrow Condenser.
    MarrowWall,
}

impl TerrainKind {
    pub const fn traits(self) -> TerrainTraits {
        match self {
            TerrainKind::Empty | TerrainKind::Dust => {
                TerrainTraits::PASSABLE.union(TerrainTraits::PLACEABLE)
            }
            TerrainKind::Furniture => TerrainTraits::empty(),
            TerrainKind::Limestone | TerrainKind::Pillar | TerrainKind::MarrowWall => {
                TerrainTraits::BLOCKS_SIGHT
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TerrainError {
    #[error("position {position} is outside the {width}x{height} board")]
    OutOfBounds {
        position: Position,
        width: u32,
        height: u32,
    },
}

impl GameError for TerrainError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "TERRAIN_OUT_OF_BOUNDS",
        }
    }
}

/// Owned, row-major terrain grid kept inside the game state.
///
/// Living in the state means dike walls raised mid-match are covered by the
/// state checksum.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainGrid {
    dimensions: MapDimensions,
    tiles: Vec<TerrainKind>,
    /// Cosmic values pinned by the map. Unpinned furniture is valued from the match seed.
    #[cfg_attr(feature = "serde", serde(default))]
    appraisals: Vec<(Position, u8)>,
}

impl TerrainGrid {
    pub const MIN_COSMIC_VALUE: u8 = 1;
    pub const MAX_COSMIC_VALUE: u8 = 9;

    /// An all-[`TerrainKind::Empty`] board.
    pub fn new(dimensions: MapDimensions) -> Self {
        Self {
            dimensions,
            tiles: vec![TerrainKind::Empty; dimensions.area()],
            appraisals: Vec::new(),
        }
    }

    /// Pins the cosmic value of the tile at `position`, clamped to 1..=9.
    pub fn appraise(&mut self, position: Position, value: u8) -> Result<(), TerrainError> {
        if !self.dimensions.contains(position) {
            return Err(TerrainError::OutOfBounds {
                position,
                width: self.dimensions.width,
                height: self.dimensions.height,
            });
        }
        let value = value.clamp(Self::MIN_COSMIC_VALUE, Self::MAX_COSMIC_VALUE);
        match self.appraisals.iter_mut().find(|(at, _)| *at == position) {
            Some(entry) => entry.1 = value,
            None => self.appraisals.push((position, value)),
        }
        Ok(())
    }

    /// Pinned cosmic value at `position`, if the map set one.
    pub fn appraisal(&self, position: Position) -> Option<u8> {
        self.appraisals
            .iter()
            .find(|(at, _)| *at == position)
            .map(|(_, value)| *value)
    }

    /// Builds a board from a sparse list of non-empty tiles.
    pub fn with_tiles(
        dimensions: MapDimensions,
        tiles: impl IntoIterator<Item = (Position, TerrainKind)>,
    ) -> Result<Self, TerrainError> {
        let mut grid = Self::new(dimensions);
        for (position, kind) in tiles {
            grid.set_terrain(position, kind)?;
        }
        Ok(grid)
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.dimensions.contains(position).then(|| {
            position.row as usize * self.dimensions.width as usize + position.col as usize
        })
    }
}

impl TerrainOracle for TerrainGrid {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn terrain_at(&self, position: Position) -> Option<TerrainKind> {
        self.index(position).map(|index| self.tiles[index])
    }

    fn set_terrain(&mut self, position: Position, kind: TerrainKind) -> Result<(), TerrainError> {
        let index = self.index(position).ok_or(TerrainError::OutOfBounds {
            position,
            width: self.dimensions.width,
            height: self.dimensions.height,
        })?;
        self.tiles[index] = kind;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walls_block_movement_and_sight() {
        let grid = TerrainGrid::with_tiles(
            MapDimensions::new(4, 4),
            [
                (Position::new(1, 1), TerrainKind::Limestone),
                (Position::new(2, 2), TerrainKind::Furniture),
            ],
        )
        .unwrap();

        assert!(!grid.is_passable(Position::new(1, 1)));
        assert!(grid.blocks_line_of_sight(Position::new(1, 1)));
        assert!(!grid.is_passable(Position::new(2, 2)));
        assert!(!grid.blocks_line_of_sight(Position::new(2, 2)));
        assert!(grid.can_place(Position::new(0, 0)));
    }

    #[test]
    fn appraisals_are_clamped_and_replaced() {
        let mut grid = TerrainGrid::new(MapDimensions::new(4, 4));
        let desk = Position::new(1, 2);

        assert_eq!(grid.appraisal(desk), None);
        grid.appraise(desk, 12).unwrap();
        assert_eq!(grid.appraisal(desk), Some(9));
        grid.appraise(desk, 0).unwrap();
        assert_eq!(grid.appraisal(desk), Some(1));
        assert!(grid.appraise(Position::new(4, 0), 5).is_err());
    }

    #[test]
    fn out_of_bounds_is_impassable_and_opaque() {
        let mut grid = TerrainGrid::new(MapDimensions::new(3, 2));
        let outside = Position::new(2, 0);

        assert_eq!(grid.terrain_at(outside), None);
        assert!(!grid.is_passable(outside));
        assert!(grid.blocks_line_of_sight(outside));
        assert!(grid.set_terrain(outside, TerrainKind::Dust).is_err());
    }
}
