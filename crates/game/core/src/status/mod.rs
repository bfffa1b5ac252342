//! Status effect ledger.
//!
//! Each unit carries a [`StatusLedger`] of named, duration-bearing modifiers.
//! Every entry stores the exact [`StatDelta`] it added to the unit's bonuses;
//! expiry or cleansing subtracts that same delta, so the net bonus is always
//! the sum of the live entries no matter the order they came and went.
//!
//! # Duration
//!
//! `remaining` counts turn boundaries of the *affected unit's* owner, not the
//! caster's. [`decay_owner_turn`] is the only place durations tick.
//!
//! Aura entries belong to a passive: they never tick and leave only through
//! [`lift`], when the passive's condition stops holding.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::skill::PassiveKind;
use crate::state::{Player, StatDelta, Unit, UnitArena, UnitId};

/// Named status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    /// Pry aftermath: −1 move.
    Slowed,
    /// Site Inspection: +1 attack, +1 move.
    Inspected,
    /// Jawline tether: −1 move.
    Jawline,
    /// Estrange: −1 attack, −1 defense.
    Estranged,
    /// Ossify: extra defense at the cost of mobility.
    Ossified,
    /// Inside an upgraded Marrow Dike: −1 move.
    Mired,
    /// Valuation Oracle aura beside furniture: +1 defense, +1 attack range.
    Valued,
    /// High-value Market Futures jump: +1 to every stat.
    Futures,
    /// Auction Curse on the enemy; the penalty grows with the furniture's value.
    Cursed,
    /// Auction Curse winnings for the ally; mirrors the curse.
    Bid,
    /// Divine Depreciation on an enemy: −1 attack range.
    Depreciated,
    /// Divine Depreciation on an ally: +1 attack range.
    Appreciated,
}

/// How a second application of the same kind combines with the first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackRule {
    /// Replace the existing entry; its delta is reversed first.
    Refresh,
    /// Keep both entries, each with its own reversal.
    Stack,
}

impl StatusKind {
    pub const fn stack_rule(self) -> StackRule {
        match self {
            StatusKind::Inspected => StackRule::Stack,
            _ => StackRule::Refresh,
        }
    }

    pub const fn is_debuff(self) -> bool {
        matches!(
            self,
            StatusKind::Slowed
                | StatusKind::Jawline
                | StatusKind::Estranged
                | StatusKind::Mired
                | StatusKind::Cursed
                | StatusKind::Depreciated
        )
    }

    pub const fn is_aura(self) -> bool {
        matches!(self, StatusKind::Valued)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Owner turn boundaries left.
    pub remaining: u32,
    /// Exactly what this entry added to the unit's bonuses.
    pub delta: StatDelta,
    pub source: Option<UnitId>,
}

impl StatusEffect {
    pub const fn new(kind: StatusKind, remaining: u32, delta: StatDelta) -> Self {
        Self {
            kind,
            remaining,
            delta,
            source: None,
        }
    }

    #[must_use]
    pub const fn from_source(mut self, source: UnitId) -> Self {
        self.source = Some(source);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusLedger {
    entries: ArrayVec<StatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusLedger {
    pub fn has(&self, kind: StatusKind) -> bool {
        self.entries.iter().any(|entry| entry.kind == kind)
    }

    pub fn remaining(&self, kind: StatusKind) -> Option<u32> {
        self.entries
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| entry.remaining)
            .max()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every live delta. Always equals the unit's bonuses.
    pub fn net_delta(&self) -> StatDelta {
        self.entries
            .iter()
            .fold(StatDelta::ZERO, |acc, entry| acc + entry.delta)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusError {
    #[error("unit is immune to status effects")]
    Immune,

    #[error("status effect has no duration")]
    ZeroDuration,

    #[error("status ledger is full")]
    Full,
}

impl GameError for StatusError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Immune => ErrorSeverity::Recoverable,
            Self::ZeroDuration => ErrorSeverity::Validation,
            Self::Full => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Immune => "STATUS_IMMUNE",
            Self::ZeroDuration => "STATUS_ZERO_DURATION",
            Self::Full => "STATUS_LEDGER_FULL",
        }
    }
}

/// Outcome of a successful [`apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    Added,
    Refreshed,
}

/// Immunity is a hard override for stat and position effects. Raw damage is
/// never gated by it.
pub fn is_immune(unit: &Unit) -> bool {
    unit.has_passive(PassiveKind::Stasiality)
}

/// Adds `effect` to `unit`, folding its delta into the unit's bonuses.
pub fn apply(unit: &mut Unit, effect: StatusEffect) -> Result<Applied, StatusError> {
    if is_immune(unit) {
        return Err(StatusError::Immune);
    }
    if effect.remaining == 0 {
        return Err(StatusError::ZeroDuration);
    }

    let mut outcome = Applied::Added;
    match effect.kind.stack_rule() {
        StackRule::Refresh => {
            if let Some(index) = unit
                .status
                .entries
                .iter()
                .position(|entry| entry.kind == effect.kind)
            {
                let previous = unit.status.entries.remove(index);
                unit.bonuses -= previous.delta;
                outcome = Applied::Refreshed;
            }
        }
        StackRule::Stack => {}
    }

    if unit.status.entries.is_full() {
        return Err(StatusError::Full);
    }
    unit.bonuses += effect.delta;
    unit.status.entries.push(effect);

    debug_assert_eq!(unit.bonuses, unit.status.net_delta());
    Ok(outcome)
}

/// Removes every entry matching `predicate`, reversing each. Returns the
/// removed kinds in ledger order.
fn remove_where(unit: &mut Unit, mut predicate: impl FnMut(&StatusEffect) -> bool) -> Vec<StatusKind> {
    let mut removed = Vec::new();
    let mut index = 0;
    while index < unit.status.entries.len() {
        if predicate(&unit.status.entries[index]) {
            let entry = unit.status.entries.remove(index);
            unit.bonuses -= entry.delta;
            removed.push(entry.kind);
        } else {
            index += 1;
        }
    }
    removed
}

/// Ticks every timed entry on `unit` once, expiring those that reach zero.
pub fn decay(unit: &mut Unit) -> Vec<StatusKind> {
    for entry in unit.status.entries.iter_mut() {
        if !entry.kind.is_aura() {
            entry.remaining = entry.remaining.saturating_sub(1);
        }
    }
    let expired = remove_where(unit, |entry| entry.remaining == 0);
    debug_assert_eq!(unit.bonuses, unit.status.net_delta());
    expired
}

/// Ticks the ledgers of all living units owned by `player`, in arena order.
pub fn decay_owner_turn(units: &mut UnitArena, player: Player) -> Vec<(UnitId, StatusKind)> {
    let mut expired = Vec::new();
    for (id, unit) in units.iter_mut() {
        if unit.owner != player || !unit.is_alive() {
            continue;
        }
        expired.extend(decay(unit).into_iter().map(|kind| (id, kind)));
    }
    expired
}

/// Strips every debuff from `unit`, reversing each.
pub fn cleanse_debuffs(unit: &mut Unit) -> Vec<StatusKind> {
    remove_where(unit, |entry| entry.kind.is_debuff())
}

/// Removes every `kind` entry regardless of duration. Returns whether any was held.
pub fn lift(unit: &mut Unit, kind: StatusKind) -> bool {
    let removed = remove_where(unit, |entry| entry.kind == kind);
    debug_assert_eq!(unit.bonuses, unit.status.net_delta());
    !removed.is_empty()
}
