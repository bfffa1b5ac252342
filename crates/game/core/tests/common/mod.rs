#![allow(dead_code)]

use tactics_core::{
    GameConfig, GameEnv, GameState, MapDimensions, PcgRng, Player, Position, ResolvedEvent,
    Roster, TerrainGrid, TerrainKind, TurnEngine, TurnReport, Unit, UnitId, UnitType,
};

/// A board plus the collaborators needed to resolve turns on it.
pub struct Match {
    pub state: GameState,
    pub config: GameConfig,
    roster: Roster,
}

impl Match {
    pub fn new(seed: u64) -> Self {
        Self::with_terrain(seed, &[])
    }

    /// 10x10 board with the given non-empty tiles.
    pub fn with_terrain(seed: u64, tiles: &[((i32, i32), TerrainKind)]) -> Self {
        let terrain = TerrainGrid::with_tiles(
            MapDimensions::new(10, 10),
            tiles
                .iter()
                .map(|&((row, col), kind)| (Position::new(row, col), kind)),
        )
        .expect("tiles inside the board");
        Self {
            state: GameState::new(seed, terrain),
            config: GameConfig {
                max_units_per_player: 6,
                ..GameConfig::new()
            },
            roster: Roster::standard(),
        }
    }

    pub fn place(&mut self, kind: UnitType, owner: Player, (row, col): (i32, i32)) -> UnitId {
        self.state
            .spawn(&self.roster, &self.config, kind, owner, Position::new(row, col))
            .expect("placement succeeds")
    }

    pub fn resolve(&mut self) -> TurnReport {
        let rng = PcgRng;
        let env = GameEnv::new(&self.config, &rng);
        TurnEngine::new(&mut self.state, env).execute_turn()
    }

    pub fn unit(&self, id: UnitId) -> &Unit {
        self.state.unit(id).expect("unit still in the arena")
    }

    pub fn unit_mut(&mut self, id: UnitId) -> &mut Unit {
        self.state.units.get_mut(id).expect("unit still in the arena")
    }
}

pub fn at(row: i32, col: i32) -> Position {
    Position::new(row, col)
}

/// Index of the first event matching `predicate`.
pub fn position_of(report: &TurnReport, predicate: impl Fn(&ResolvedEvent) -> bool) -> Option<usize> {
    report.events.iter().position(predicate)
}
