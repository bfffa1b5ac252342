//! Data-driven content definitions and loaders.
//!
//! This crate reads the startup data a match needs from RON/TOML files:
//! - Engine tunables (TOML)
//! - Unit roster: stats, passive and active kit per unit type (RON)
//! - Map layouts (RON)
//! - Scenarios: map, seed, placements and scripted orders (RON)
//!
//! Content only seeds a [`tactics_core::GameState`]; it never appears in it.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, LoadResult, MapLoader, Order, Placement, RosterLoader, Scenario,
    ScenarioLoader, Skirmish,
};
