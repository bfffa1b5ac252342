//! Deterministic turn resolution for a two-player grid tactics game.
//!
//! `tactics-core` owns the rules: units and their skills, the status ledger,
//! area hazards, and the engine that resolves a turn's queued orders. It does
//! no I/O. Planning code (UI, AI, scripted scenarios) fills each unit's pending
//! action through [`action::planning`]; [`engine::TurnEngine::execute_turn`]
//! then resolves the whole pass and reports what happened as a
//! [`engine::TurnReport`].
//!
//! Randomness comes only from [`env::RngOracle`] keyed by the match seed, so
//! two instances given the same setup and orders reach byte-identical states
//! (see [`state::GameState::checksum`] with the `serde` feature).
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod hazard;
pub mod skill;
pub mod state;
pub mod status;

pub use action::{
    ActionError, ActionSlot, AttackTarget, Passage, queue_attack, queue_move, queue_skill,
};
pub use config::GameConfig;
pub use engine::{DamageCause, PresentationSink, ResolvedEvent, TurnEngine, TurnReport};
pub use env::{
    Archetype, GameEnv, MapDimensions, PcgRng, RngOracle, Roster, RosterOracle, TerrainError,
    TerrainGrid, TerrainKind, TerrainOracle,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use hazard::{HazardKind, HazardRegistry, VaporKind};
pub use skill::{ActiveSkill, ActiveSkillKind, PassiveKind, PassiveSkill, SkillInfo, SkillKit};
pub use state::{
    BaseStats, DisplayId, GameState, PendingAction, Player, Position, SetupError, StatDelta,
    StateChecksum, TurnState, Unit, UnitArena, UnitId, UnitType,
};
pub use status::{StatusEffect, StatusError, StatusKind, StatusLedger};
