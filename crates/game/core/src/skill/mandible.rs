//! Mandible Foreman actives: Expedite, Site Inspection, Jawline.

use crate::action::ActionError;
use crate::action::rules::{self, mitigated};
use crate::engine::{DamageCause, TurnEngine};
use crate::env::TerrainOracle;
use crate::skill::{ActiveSkillKind, SkillBehavior, area_within, caster};
use crate::state::{Direction, GameState, Player, Position, StatDelta, UnitId};
use crate::status::{StatusEffect, StatusKind};

const EXPEDITE_POWER: i32 = 6;
const JAWLINE_POWER: i32 = 4;
const JAWLINE_TURNS: u32 = 3;
const INSPECTED_TURNS: u32 = 2;

/// Straight-line rush that bites and grips the first enemy in the way.
pub struct Expedite;

/// How a rush along a line ends.
#[derive(Debug, PartialEq, Eq)]
struct Rush {
    stop: Position,
    struck: Option<UnitId>,
}

impl Expedite {
    fn heading(origin: Position, target: Position) -> Result<Direction, ActionError> {
        origin.direction_to(target).ok_or(ActionError::InvalidTarget)
    }

    fn rush(state: &GameState, owner: Player, origin: Position, target: Position) -> Rush {
        let mut rush = Rush {
            stop: origin,
            struck: None,
        };
        let Ok(direction) = Self::heading(origin, target) else {
            return rush;
        };
        for _ in 0..origin.distance(target) {
            let next = rush.stop.step(direction);
            if !state.terrain.is_passable(next) {
                break;
            }
            if let Some(other) = state.unit_at(next) {
                if state.living(other).is_some_and(|unit| unit.owner != owner) {
                    rush.struck = Some(other);
                }
                break;
            }
            rush.stop = next;
        }
        rush
    }
}

impl SkillBehavior for Expedite {
    const KIND: ActiveSkillKind = ActiveSkillKind::Expedite;

    fn validate(
        state: &GameState,
        user: UnitId,
        origin: Position,
        target: Position,
    ) -> Result<(), ActionError> {
        let unit = rules::actor(state, user)?;
        if unit.is_trapped() {
            return Err(ActionError::Trapped);
        }
        rules::in_bounds(state, target)?;
        rules::in_range(origin, target, Self::KIND.info().range)?;
        let first = origin.step(Self::heading(origin, target)?);
        if !state.terrain.is_passable(first) {
            return Err(ActionError::PathBlocked);
        }
        let ally_in_way = state
            .unit_at(first)
            .filter(|other| *other != user)
            .and_then(|other| state.living(other))
            .is_some_and(|other| other.owner == unit.owner);
        if ally_in_way {
            return Err(ActionError::PathBlocked);
        }
        Ok(())
    }

    fn resolve(
        engine: &mut TurnEngine<'_>,
        user: UnitId,
        target: Position,
    ) -> Result<(), ActionError> {
        let (origin, owner) = caster(engine.state, user)?;
        let rush = Self::rush(engine.state, owner, origin, target);
        if rush.stop == origin && rush.struck.is_none() {
            return Err(ActionError::PathBlocked);
        }

        if rush.stop != origin {
            engine.walk(user, rush.stop);
        }
        if let Some(enemy) = rush.struck {
            let defense = rules::actor(engine.state, enemy)?.defense();
            engine.hit(
                Some(user),
                enemy,
                mitigated(EXPEDITE_POWER, defense, 1),
                DamageCause::Skill(Self::KIND),
            );
            if engine.state.living(enemy).is_some() {
                engine.trap(user, enemy);
            }
        }
        Ok(())
    }
}

/// Marks a 3x3 area; allies inside hit harder and move farther.
pub struct SiteInspection;

impl SkillBehavior for SiteInspection {
    const KIND: ActiveSkillKind = ActiveSkillKind::SiteInspection;

    fn validate(
        state: &GameState,
        user: UnitId,
        origin: Position,
        target: Position,
    ) -> Result<(), ActionError> {
        area_within(state, user, origin, target, Self::KIND.info().range)
    }

    fn resolve(
        engine: &mut TurnEngine<'_>,
        user: UnitId,
        target: Position,
    ) -> Result<(), ActionError> {
        let (_, owner) = caster(engine.state, user)?;
        let boost = StatDelta {
            attack: 1,
            move_range: 1,
            ..StatDelta::ZERO
        };
        for ally in engine.state.allies_near(owner, target, 1) {
            engine.afflict(
                ally,
                StatusEffect::new(StatusKind::Inspected, INSPECTED_TURNS, boost).from_source(user),
            );
        }
        Ok(())
    }
}

/// Snaps at everything adjacent and hobbles it.
pub struct Jawline;

impl SkillBehavior for Jawline {
    const KIND: ActiveSkillKind = ActiveSkillKind::Jawline;

    fn validate(
        state: &GameState,
        user: UnitId,
        _origin: Position,
        _target: Position,
    ) -> Result<(), ActionError> {
        rules::actor(state, user).map(|_| ())
    }

    fn resolve(
        engine: &mut TurnEngine<'_>,
        user: UnitId,
        _target: Position,
    ) -> Result<(), ActionError> {
        let (origin, owner) = caster(engine.state, user)?;
        for enemy in engine.state.enemies_near(owner, origin, 1) {
            let Some(defense) = engine.state.living(enemy).map(|unit| unit.defense()) else {
                continue;
            };
            engine.hit(
                Some(user),
                enemy,
                mitigated(JAWLINE_POWER, defense, 1),
                DamageCause::Skill(Self::KIND),
            );
            engine.afflict(
                enemy,
                StatusEffect::new(StatusKind::Jawline, JAWLINE_TURNS, StatDelta::move_range(-1))
                    .from_source(user),
            );
        }
        Ok(())
    }
}
