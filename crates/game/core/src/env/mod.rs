//! Read-only collaborators consulted by the engine.
//!
//! Oracles answer terrain, roster and randomness questions. The [`GameEnv`]
//! aggregate bundles the per-turn ones (config and RNG) so the engine can be
//! driven by any implementation without coupling to concrete types.
mod rng;
mod roster;
mod terrain;

pub use rng::{PcgRng, RngOracle, compute_seed, context};
pub use roster::{Archetype, Roster, RosterOracle};
pub use terrain::{MapDimensions, TerrainError, TerrainGrid, TerrainKind, TerrainOracle, TerrainTraits};

use crate::config::GameConfig;

/// Configuration and randomness used during turn resolution.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    config: &'a GameConfig,
    rng: &'a dyn RngOracle,
}

impl<'a> GameEnv<'a> {
    pub fn new(config: &'a GameConfig, rng: &'a dyn RngOracle) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }
}

impl core::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
