use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::config::GameConfig;
use crate::env::Archetype;
use crate::skill::{ActiveSkill, ActiveSkillKind, PassiveKind, SkillKit};
use crate::state::{DisplayId, Player, Position, UnitId};
use crate::status::StatusLedger;

/// Closed set of unit archetypes.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitType {
    Glaiveman,
    MandibleForeman,
    Grayman,
    MarrowCondenser,
    FowlContrivance,
    GasMachinist,
    DelphicAppraiser,
}

impl UnitType {
    /// Basic attacks from this archetype ignore defense.
    pub const fn pierces_defense(self) -> bool {
        matches!(self, UnitType::Grayman)
    }
}

/// Unmodified stats of an archetype.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub max_hp: u32,
    pub attack: i32,
    pub defense: i32,
    pub move_range: i32,
    pub attack_range: i32,
}

/// Signed additive modifier over the four combat stats.
///
/// Every effect that touches stats records the exact delta it added so expiry
/// can subtract the same value back out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatDelta {
    pub attack: i32,
    pub defense: i32,
    pub move_range: i32,
    pub attack_range: i32,
}

impl StatDelta {
    pub const ZERO: Self = Self {
        attack: 0,
        defense: 0,
        move_range: 0,
        attack_range: 0,
    };

    pub const fn attack(value: i32) -> Self {
        Self {
            attack: value,
            ..Self::ZERO
        }
    }

    pub const fn defense(value: i32) -> Self {
        Self {
            defense: value,
            ..Self::ZERO
        }
    }

    pub const fn move_range(value: i32) -> Self {
        Self {
            move_range: value,
            ..Self::ZERO
        }
    }

    pub const fn attack_range(value: i32) -> Self {
        Self {
            attack_range: value,
            ..Self::ZERO
        }
    }

    /// The same `value` on every stat.
    pub const fn uniform(value: i32) -> Self {
        Self {
            attack: value,
            defense: value,
            move_range: value,
            attack_range: value,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Add for StatDelta {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            attack: self.attack + rhs.attack,
            defense: self.defense + rhs.defense,
            move_range: self.move_range + rhs.move_range,
            attack_range: self.attack_range + rhs.attack_range,
        }
    }
}

impl Sub for StatDelta {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Neg for StatDelta {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            attack: -self.attack,
            defense: -self.defense,
            move_range: -self.move_range,
            attack_range: -self.attack_range,
        }
    }
}

impl AddAssign for StatDelta {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for StatDelta {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

/// Skill committed during planning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueuedSkill {
    pub slot: u8,
    pub kind: ActiveSkillKind,
    pub target: Position,
}

/// A unit's orders for the current turn.
///
/// Move may accompany either an attack or a skill. Attack and skill exclude
/// each other; the planning writers enforce that.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingAction {
    pub move_to: Option<Position>,
    pub attack: Option<Position>,
    pub skill: Option<QueuedSkill>,
}

impl PendingAction {
    pub const NONE: Self = Self {
        move_to: None,
        attack: None,
        skill: None,
    };

    pub fn is_empty(&self) -> bool {
        self.move_to.is_none() && self.attack.is_none() && self.skill.is_none()
    }
}

/// Marks a unit as a temporary echo of another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EchoLink {
    pub original: UnitId,
    /// Owner turns left before the echo collapses.
    pub remaining_turns: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub kind: UnitType,
    pub owner: Player,
    pub display_id: DisplayId,
    pub position: Position,
    pub hp: u32,
    pub max_hp: u32,
    pub base: BaseStats,
    /// Net of every live modifier. Only the status ledger writes here.
    pub bonuses: StatDelta,
    pub level: u8,
    pub xp: u32,
    pub kit: SkillKit,
    pub pending: PendingAction,
    pub action_timestamp: u64,
    pub status: StatusLedger,
    pub trapped_by: Option<UnitId>,
    pub echo: Option<EchoLink>,
}

impl Unit {
    pub fn from_archetype(
        archetype: &Archetype,
        owner: Player,
        display_id: DisplayId,
        position: Position,
    ) -> Self {
        Self {
            kind: archetype.kind,
            owner,
            display_id,
            position,
            hp: archetype.stats.max_hp,
            max_hp: archetype.stats.max_hp,
            base: archetype.stats,
            bonuses: StatDelta::ZERO,
            level: 1,
            xp: 0,
            kit: SkillKit::new(archetype.passive, &archetype.actives),
            pending: PendingAction::NONE,
            action_timestamp: 0,
            status: StatusLedger::default(),
            trapped_by: None,
            echo: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_echo(&self) -> bool {
        self.echo.is_some()
    }

    pub fn is_trapped(&self) -> bool {
        self.trapped_by.is_some()
    }

    pub fn has_passive(&self, kind: PassiveKind) -> bool {
        self.kit.passive.kind == kind
    }

    pub fn attack(&self) -> i32 {
        (self.base.attack + self.bonuses.attack).max(0)
    }

    pub fn defense(&self) -> i32 {
        (self.base.defense + self.bonuses.defense).max(0)
    }

    /// Tiles this unit may move this turn. Trapped units cannot move at all.
    pub fn move_range(&self) -> u32 {
        if self.is_trapped() {
            return 0;
        }
        (self.base.move_range + self.bonuses.move_range).max(0) as u32
    }

    pub fn attack_range(&self) -> u32 {
        (self.base.attack_range + self.bonuses.attack_range).max(1) as u32
    }

    /// Position this unit will act from once its queued move (if any) lands.
    pub fn planned_position(&self) -> Position {
        self.pending.move_to.unwrap_or(self.position)
    }

    /// Raw pending-action writer. Validation is the caller's responsibility.
    pub fn set_pending(&mut self, action: PendingAction, timestamp: u64) {
        self.pending = action;
        self.action_timestamp = timestamp;
    }

    pub fn clear_pending(&mut self) {
        self.pending = PendingAction::NONE;
    }

    /// Removes up to `amount` HP, never below zero. Returns HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Restores up to `amount` HP, never above max. Returns HP actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max_hp - self.hp);
        self.hp += gained;
        gained
    }

    /// Raises max HP and current HP together.
    pub fn grow(&mut self, amount: u32) {
        self.max_hp += amount;
        self.hp += amount;
    }

    pub fn skill(&self, slot: usize) -> Option<&ActiveSkill> {
        self.kit.actives.get(slot)
    }

    pub fn skill_mut(&mut self, slot: usize) -> Option<&mut ActiveSkill> {
        self.kit.actives.get_mut(slot)
    }

    pub fn skill_of(&self, kind: ActiveSkillKind) -> Option<&ActiveSkill> {
        self.kit.actives.iter().find(|skill| skill.kind == kind)
    }

    /// Adds experience and applies any level-ups. Returns the new level if it changed.
    pub fn gain_xp(&mut self, amount: u32, config: &GameConfig) -> Option<u8> {
        self.xp = self.xp.saturating_add(amount);
        let target = config.level_for(self.xp);
        if target <= self.level {
            return None;
        }
        while self.level < target {
            self.level += 1;
            self.max_hp += 2;
            self.base.attack += 1;
        }
        self.hp = self.max_hp;
        Some(self.level)
    }
}
