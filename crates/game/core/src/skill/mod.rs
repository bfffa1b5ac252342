//! Skill kinds, per-unit skill state and the validate → queue → resolve protocol.
//!
//! Active skills are a closed enum ([`ActiveSkillKind`]); each variant has a
//! zero-sized behavior type implementing [`SkillBehavior`], and
//! [`dispatch_skill!`] maps a kind to its behavior with an exhaustive match.
//! Passives ([`PassiveKind`]) have no protocol; the engine calls their hooks
//! at fixed points (see `passive`).

mod appraiser;
mod fowl;
mod gas;
mod glaiveman;
mod grayman;
mod mandible;
mod marrow;
pub(crate) mod passive;

pub use appraiser::{AuctionCurse, DivineDepreciation, MarketFutures};
pub use fowl::{EmeticFlange, Flap, MurmurationDusk};
pub use gas::{BroachingGas, Diverge, SaftEGas};
pub use glaiveman::{Judgement, Pry, Vault};
pub use grayman::{DeltaConfig, Estrange, GraeExchange};
pub use mandible::{Expedite, Jawline, SiteInspection};
pub use marrow::{BoneTithe, MarrowDike, Ossify};

use arrayvec::ArrayVec;

use crate::action::{ActionError, rules};
use crate::config::GameConfig;
use crate::engine::TurnEngine;
use crate::state::{GameState, Player, Position, UnitId};

/// Closed set of active skills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActiveSkillKind {
    Pry,
    Vault,
    Judgement,
    Expedite,
    SiteInspection,
    Jawline,
    DeltaConfig,
    Estrange,
    GraeExchange,
    Ossify,
    MarrowDike,
    BoneTithe,
    MurmurationDusk,
    Flap,
    EmeticFlange,
    BroachingGas,
    SaftEGas,
    Diverge,
    MarketFutures,
    AuctionCurse,
    DivineDepreciation,
}

/// Closed set of passive skills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassiveKind {
    Autoclave,
    Viseroy,
    Stasiality,
    Dominion,
    WretchedDecension,
    EffluviumLathe,
    ValuationOracle,
}

/// What an active skill may be aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetKind {
    SelfOnly,
    Ally,
    Enemy,
    Area,
    Tile,
}

/// Static description of an active skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillInfo {
    pub name: &'static str,
    pub key: char,
    pub cooldown: u32,
    pub range: u32,
    pub target: TargetKind,
}

const fn info(
    name: &'static str,
    key: char,
    cooldown: u32,
    range: u32,
    target: TargetKind,
) -> SkillInfo {
    SkillInfo {
        name,
        key,
        cooldown,
        range,
        target,
    }
}

impl ActiveSkillKind {
    pub const fn info(self) -> SkillInfo {
        use TargetKind::*;
        match self {
            Self::Pry => info("Pry", 'p', 3, 1, Enemy),
            Self::Vault => info("Vault", 'v', 4, 2, Tile),
            Self::Judgement => info("Judgement", 'j', 4, 4, Enemy),
            Self::Expedite => info("Expedite", 'e', 3, 4, Tile),
            Self::SiteInspection => info("Site Inspection", 's', 3, 3, Area),
            Self::Jawline => info("Jawline", 'j', 5, 0, SelfOnly),
            Self::DeltaConfig => info("Delta Config", 'd', 12, 99, Tile),
            Self::Estrange => info("Estrange", 'e', 3, 5, Enemy),
            Self::GraeExchange => info("Græ Exchange", 'g', 4, 3, Tile),
            Self::Ossify => info("Ossify", 'o', 3, 0, SelfOnly),
            Self::MarrowDike => info("Marrow Dike", 'm', 4, 0, SelfOnly),
            Self::BoneTithe => info("Bone Tithe", 'b', 1, 0, SelfOnly),
            Self::MurmurationDusk => info("Murmuration Dusk", 'm', 3, 3, Area),
            Self::Flap => info("Flap", 'f', 2, 4, Enemy),
            Self::EmeticFlange => info("Emetic Flange", 'e', 3, 0, SelfOnly),
            Self::BroachingGas => info("Broaching Gas", 'b', 2, 3, Tile),
            Self::SaftEGas => info("Saft-E-Gas", 's', 3, 3, Tile),
            Self::Diverge => info("Diverge", 'd', 4, 5, Tile),
            Self::MarketFutures => info("Market Futures", 'm', 3, 4, Area),
            Self::AuctionCurse => info("Auction Curse", 'a', 2, 3, Enemy),
            Self::DivineDepreciation => info("Divine Depreciation", 'd', 4, 3, Area),
        }
    }
}

/// One active skill slot on a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveSkill {
    pub kind: ActiveSkillKind,
    pub cooldown: u32,
    pub current_cooldown: u32,
    /// Set by Dominion kill upgrades.
    pub upgraded: bool,
}

impl ActiveSkill {
    pub const fn new(kind: ActiveSkillKind) -> Self {
        Self {
            kind,
            cooldown: kind.info().cooldown,
            current_cooldown: 0,
            upgraded: false,
        }
    }

    pub const fn is_ready(&self) -> bool {
        self.current_cooldown == 0
    }

    /// Commits the cooldown. Called at queue time, not at resolution.
    pub fn spend(&mut self) {
        self.current_cooldown = self.cooldown;
    }

    pub fn tick(&mut self) {
        self.current_cooldown = self.current_cooldown.saturating_sub(1);
    }
}

/// Passive skill plus the small amount of state passives carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveSkill {
    pub kind: PassiveKind,
    /// One-shot effects that already fired this life.
    pub activated: bool,
    /// Trigger precondition met this step; consumed by the next hook call.
    pub armed: bool,
    pub charges: u8,
    pub kills: u32,
}

impl PassiveSkill {
    pub const fn new(kind: PassiveKind) -> Self {
        Self {
            kind,
            activated: false,
            armed: false,
            charges: 0,
            kills: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillKit {
    pub passive: PassiveSkill,
    pub actives: ArrayVec<ActiveSkill, { GameConfig::MAX_ACTIVE_SKILLS }>,
}

impl SkillKit {
    /// Builds a kit, ignoring actives beyond the slot capacity.
    pub fn new(passive: PassiveKind, actives: &[ActiveSkillKind]) -> Self {
        Self {
            passive: PassiveSkill::new(passive),
            actives: actives
                .iter()
                .take(GameConfig::MAX_ACTIVE_SKILLS)
                .map(|kind| ActiveSkill::new(*kind))
                .collect(),
        }
    }

    pub fn tick_cooldowns(&mut self) {
        for skill in &mut self.actives {
            skill.tick();
        }
    }

    pub fn upgrade(&mut self, kind: ActiveSkillKind) -> bool {
        match self.actives.iter_mut().find(|skill| skill.kind == kind) {
            Some(skill) if !skill.upgraded => {
                skill.upgraded = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_upgraded(&self, kind: ActiveSkillKind) -> bool {
        self.actives
            .iter()
            .any(|skill| skill.kind == kind && skill.upgraded)
    }
}

/// Two-phase skill contract.
///
/// `validate` runs twice: once at queue time from the unit's planned
/// position, and again at resolution from wherever the unit actually stands.
/// Cooldowns are not checked here; the cooldown is already spent by then.
/// `resolve` applies the effect and must not mutate anything before it is
/// certain to succeed.
pub trait SkillBehavior {
    const KIND: ActiveSkillKind;

    fn validate(
        state: &GameState,
        user: UnitId,
        origin: Position,
        target: Position,
    ) -> Result<(), ActionError>;

    fn resolve(
        engine: &mut TurnEngine<'_>,
        user: UnitId,
        target: Position,
    ) -> Result<(), ActionError>;

    /// Validates, then commits the pending skill and spends its cooldown.
    fn queue(
        state: &mut GameState,
        user: UnitId,
        slot: usize,
        origin: Position,
        target: Position,
    ) -> Result<(), ActionError> {
        Self::validate(state, user, origin, target)?;
        state.commit_skill(user, slot, Self::KIND, target)
    }
}

/// Living enemy on `target`, within `range` of `origin` and not shielded from it.
pub(crate) fn enemy_within(
    state: &GameState,
    user: UnitId,
    origin: Position,
    target: Position,
    range: u32,
) -> Result<UnitId, ActionError> {
    let unit = rules::actor(state, user)?;
    rules::in_bounds(state, target)?;
    rules::in_range(origin, target, range)?;
    rules::enemy_target(state, unit, origin, target)
}

/// Empty placeable tile other than `origin`, within `range` of it.
pub(crate) fn open_tile_within(
    state: &GameState,
    user: UnitId,
    origin: Position,
    target: Position,
    range: u32,
) -> Result<(), ActionError> {
    rules::actor(state, user)?;
    if target == origin {
        return Err(ActionError::InvalidTarget);
    }
    rules::in_range(origin, target, range)?;
    rules::open_tile(state, target, user)
}

/// In-bounds tile within `range` of `origin`; used by area skills.
pub(crate) fn area_within(
    state: &GameState,
    user: UnitId,
    origin: Position,
    target: Position,
    range: u32,
) -> Result<(), ActionError> {
    rules::actor(state, user)?;
    rules::in_bounds(state, target)?;
    rules::in_range(origin, target, range)
}

/// Where `user` stands and which side it plays for.
pub(crate) fn caster(state: &GameState, user: UnitId) -> Result<(Position, Player), ActionError> {
    rules::actor(state, user).map(|unit| (unit.position, unit.owner))
}

/// Binds `$skill` to the behavior type of `$kind` and evaluates `$body`.
macro_rules! dispatch_skill {
    ($kind:expr, $skill:ident => $body:expr) => {{
        use $crate::skill::ActiveSkillKind as K;
        match $kind {
            K::Pry => {
                type $skill = $crate::skill::Pry;
                $body
            }
            K::Vault => {
                type $skill = $crate::skill::Vault;
                $body
            }
            K::Judgement => {
                type $skill = $crate::skill::Judgement;
                $body
            }
            K::Expedite => {
                type $skill = $crate::skill::Expedite;
                $body
            }
            K::SiteInspection => {
                type $skill = $crate::skill::SiteInspection;
                $body
            }
            K::Jawline => {
                type $skill = $crate::skill::Jawline;
                $body
            }
            K::DeltaConfig => {
                type $skill = $crate::skill::DeltaConfig;
                $body
            }
            K::Estrange => {
                type $skill = $crate::skill::Estrange;
                $body
            }
            K::GraeExchange => {
                type $skill = $crate::skill::GraeExchange;
                $body
            }
            K::Ossify => {
                type $skill = $crate::skill::Ossify;
                $body
            }
            K::MarrowDike => {
                type $skill = $crate::skill::MarrowDike;
                $body
            }
            K::BoneTithe => {
                type $skill = $crate::skill::BoneTithe;
                $body
            }
            K::MurmurationDusk => {
                type $skill = $crate::skill::MurmurationDusk;
                $body
            }
            K::Flap => {
                type $skill = $crate::skill::Flap;
                $body
            }
            K::EmeticFlange => {
                type $skill = $crate::skill::EmeticFlange;
                $body
            }
            K::BroachingGas => {
                type $skill = $crate::skill::BroachingGas;
                $body
            }
            K::SaftEGas => {
                type $skill = $crate::skill::SaftEGas;
                $body
            }
            K::Diverge => {
                type $skill = $crate::skill::Diverge;
                $body
            }
            K::MarketFutures => {
                type $skill = $crate::skill::MarketFutures;
                $body
            }
            K::AuctionCurse => {
                type $skill = $crate::skill::AuctionCurse;
                $body
            }
            K::DivineDepreciation => {
                type $skill = $crate::skill::DivineDepreciation;
                $body
            }
        }
    }};
}

pub(crate) use dispatch_skill;
