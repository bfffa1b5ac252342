//! Authoritative board state.
//!
//! [`GameState`] owns everything the engine mutates: units, the terrain
//! grid and the hazard registry. Between engine calls, outside code may read it
//! or write a single unit's pending action through the planning writers in
//! [`crate::action`].
mod arena;
mod common;
mod turn;
mod unit;

pub use arena::UnitArena;
pub use common::{Direction, DisplayId, Player, Position, UnitId};
pub use turn::TurnState;
pub use unit::{BaseStats, EchoLink, PendingAction, QueuedSkill, StatDelta, Unit, UnitType};

use crate::action::ActionError;
use crate::config::GameConfig;
use crate::env::{RosterOracle, TerrainGrid, TerrainOracle};
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::hazard::HazardRegistry;
use crate::skill::ActiveSkillKind;

/// Problems detected while setting up a match. All of them are fatal content
/// or placement errors; none can occur during turn resolution.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("no archetype defined for {0}")]
    MissingArchetype(UnitType),

    #[error("archetype {0} is defined more than once")]
    DuplicateArchetype(UnitType),

    #[error("archetype {kind} has {actives} active skills")]
    InvalidKit { kind: UnitType, actives: usize },

    #[error("archetype {0} has zero max HP")]
    InvalidStats(UnitType),

    #[error("cannot place unit at {position}")]
    InvalidPlacement {
        position: Position,
        context: ErrorContext,
    },

    #[error("{player} already fields {limit} units")]
    TooManyUnits { player: Player, limit: usize },
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidPlacement { .. } | Self::TooManyUnits { .. } => ErrorSeverity::Validation,
            _ => ErrorSeverity::Fatal,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::InvalidPlacement { context, .. } => Some(context),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingArchetype(_) => "SETUP_MISSING_ARCHETYPE",
            Self::DuplicateArchetype(_) => "SETUP_DUPLICATE_ARCHETYPE",
            Self::InvalidKit { .. } => "SETUP_INVALID_KIT",
            Self::InvalidStats(_) => "SETUP_INVALID_STATS",
            Self::InvalidPlacement { .. } => "SETUP_INVALID_PLACEMENT",
            Self::TooManyUnits { .. } => "SETUP_TOO_MANY_UNITS",
        }
    }
}

/// Echo stats: fragile, hits lightly, lasts two owner turns.
pub(crate) const ECHO_HP: u32 = 5;
pub(crate) const ECHO_ATTACK: i32 = 3;
pub(crate) const ECHO_LIFESPAN: u32 = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Match seed mixed into every random draw.
    pub seed: u64,
    pub turn: TurnState,
    pub terrain: TerrainGrid,
    pub units: UnitArena,
    pub hazards: HazardRegistry,
}

impl GameState {
    pub fn new(seed: u64, terrain: TerrainGrid) -> Self {
        Self {
            seed,
            turn: TurnState::new(),
            terrain,
            units: UnitArena::new(),
            hazards: HazardRegistry::default(),
        }
    }

    /// Places a fresh unit of `kind` for `owner`.
    pub fn spawn(
        &mut self,
        roster: &dyn RosterOracle,
        config: &GameConfig,
        kind: UnitType,
        owner: Player,
        position: Position,
    ) -> Result<UnitId, SetupError> {
        let archetype = roster
            .archetype(kind)
            .ok_or(SetupError::MissingArchetype(kind))?;

        let fielded = self
            .units
            .iter()
            .filter(|(_, unit)| unit.owner == owner && !unit.is_echo())
            .count();
        if fielded >= config.max_units_per_player {
            return Err(SetupError::TooManyUnits {
                player: owner,
                limit: config.max_units_per_player,
            });
        }
        if !self.is_open(position) {
            return Err(SetupError::InvalidPlacement {
                position,
                context: ErrorContext::new(self.turn.turn_number)
                    .with_position(position)
                    .with_player(owner)
                    .with_message("tile is blocked or occupied"),
            });
        }

        let display_id = DisplayId {
            owner,
            ordinal: u8::try_from(fielded + 1).unwrap_or(u8::MAX),
        };
        Ok(self
            .units
            .insert(Unit::from_archetype(archetype, owner, display_id, position)))
    }

    /// Creates an echo of `original` at `position`.
    pub(crate) fn spawn_echo(&mut self, original: UnitId, position: Position) -> Option<UnitId> {
        let source = self.living(original)?;
        let mut echo = source.clone();
        echo.position = position;
        echo.hp = ECHO_HP;
        echo.max_hp = ECHO_HP;
        echo.base.max_hp = ECHO_HP;
        echo.base.attack = ECHO_ATTACK;
        echo.bonuses = StatDelta::ZERO;
        echo.status = Default::default();
        echo.pending = PendingAction::NONE;
        echo.trapped_by = None;
        echo.xp = 0;
        echo.echo = Some(EchoLink {
            original,
            remaining_turns: ECHO_LIFESPAN,
        });
        Some(self.units.insert(echo))
    }

    /// Any unit still in the arena, dead or alive.
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id)
    }

    pub fn living(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id).filter(|unit| unit.is_alive())
    }

    pub fn living_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(id).filter(|unit| unit.is_alive())
    }

    pub fn living_units(&self) -> impl Iterator<Item = (UnitId, &Unit)> {
        self.units.iter().filter(|(_, unit)| unit.is_alive())
    }

    /// Living unit standing on `position`.
    pub fn unit_at(&self, position: Position) -> Option<UnitId> {
        self.living_units()
            .find(|(_, unit)| unit.position == position)
            .map(|(id, _)| id)
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.unit_at(position).is_some()
    }

    /// Placeable terrain with nobody on it.
    pub fn is_open(&self, position: Position) -> bool {
        self.terrain.can_place(position) && !self.is_occupied(position)
    }

    /// Living units of `owner`'s enemies within `radius` of `center`, arena order.
    pub fn enemies_near(&self, owner: Player, center: Position, radius: u32) -> Vec<UnitId> {
        self.living_units()
            .filter(|(_, unit)| unit.owner != owner && unit.position.distance(center) <= radius)
            .map(|(id, _)| id)
            .collect()
    }

    /// Living units of `owner` within `radius` of `center`, arena order.
    pub fn allies_near(&self, owner: Player, center: Position, radius: u32) -> Vec<UnitId> {
        self.living_units()
            .filter(|(_, unit)| unit.owner == owner && unit.position.distance(center) <= radius)
            .map(|(id, _)| id)
            .collect()
    }

    /// Living units currently held by `captor`.
    pub fn captives_of(&self, captor: UnitId) -> Vec<UnitId> {
        self.living_units()
            .filter(|(_, unit)| unit.trapped_by == Some(captor))
            .map(|(id, _)| id)
            .collect()
    }

    /// True while `player` still has a living unit that is not an echo.
    pub fn has_forces(&self, player: Player) -> bool {
        self.living_units()
            .any(|(_, unit)| unit.owner == player && !unit.is_echo())
    }

    /// Records a queued skill and spends its cooldown.
    pub(crate) fn commit_skill(
        &mut self,
        user: UnitId,
        slot: usize,
        kind: ActiveSkillKind,
        target: Position,
    ) -> Result<(), ActionError> {
        let timestamp = self.turn.action_counter + 1;
        let unit = self.units.get_mut(user).ok_or(ActionError::UnitMissing)?;
        let skill = unit.skill_mut(slot).ok_or(ActionError::UnknownSkill)?;
        skill.spend();

        let mut pending = unit.pending;
        pending.skill = Some(QueuedSkill {
            slot: u8::try_from(slot).map_err(|_| ActionError::UnknownSkill)?,
            kind,
            target,
        });
        unit.set_pending(pending, timestamp);
        self.turn.action_counter = timestamp;
        Ok(())
    }

    /// SHA-256 over the bincode encoding of the full state.
    ///
    /// Two instances that resolved the same orders from the same seed produce
    /// the same checksum.
    #[cfg(feature = "serde")]
    pub fn checksum(&self) -> StateChecksum {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        match bincode::serialize(self) {
            Ok(bytes) => hasher.update(&bytes),
            Err(err) => {
                debug_assert!(false, "state encoding failed: {err}");
                tracing::warn!(%err, "state encoding failed; checksum covers nothing");
            }
        }
        StateChecksum(hasher.finalize().into())
    }
}

/// Content hash of a [`GameState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateChecksum(pub [u8; 32]);

impl core::fmt::Display for StateChecksum {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
