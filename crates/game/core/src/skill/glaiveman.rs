//! Glaiveman actives: Pry, Vault, Judgement.

use crate::action::ActionError;
use crate::action::rules::{self, mitigated};
use crate::engine::{DamageCause, TurnEngine};
use crate::env::TerrainOracle;
use crate::skill::{ActiveSkillKind, SkillBehavior, enemy_within, open_tile_within};
use crate::state::{GameState, Position, StatDelta, UnitId};
use crate::status::{StatusEffect, StatusKind};

const PRY_POWER: i32 = 6;
const PRY_FLOOR: i32 = 3;
const PRY_KNOCKBACK: u32 = 3;
const PRY_SPLASH: i32 = 3;
const SLOWED_TURNS: u32 = 2;
const JUDGEMENT_DAMAGE: u32 = 4;

/// Levers an adjacent enemy off its feet and flings it away.
pub struct Pry;

impl Pry {
    /// Last free tile on the straight line away from `from`, at most
    /// `PRY_KNOCKBACK` steps past `start`.
    fn landing(state: &GameState, from: Position, start: Position) -> Position {
        let Some(direction) = from.heading_to(start) else {
            return start;
        };
        let mut landing = start;
        for _ in 0..PRY_KNOCKBACK {
            let next = landing.step(direction);
            if !state.terrain.is_passable(next) || state.is_occupied(next) {
                break;
            }
            landing = next;
        }
        landing
    }
}

impl SkillBehavior for Pry {
    const KIND: ActiveSkillKind = ActiveSkillKind::Pry;

    fn validate(
        state: &GameState,
        user: UnitId,
        origin: Position,
        target: Position,
    ) -> Result<(), ActionError> {
        enemy_within(state, user, origin, target, Self::KIND.info().range).map(|_| ())
    }

    fn resolve(
        engine: &mut TurnEngine<'_>,
        user: UnitId,
        target: Position,
    ) -> Result<(), ActionError> {
        let caster = rules::actor(engine.state, user)?;
        let origin = caster.position;
        let victim = rules::enemy_target(engine.state, caster, origin, target)?;
        let owner = caster.owner;
        let defense = rules::actor(engine.state, victim)?.defense();

        let cause = DamageCause::Skill(Self::KIND);
        engine.hit(Some(user), victim, mitigated(PRY_POWER, defense, PRY_FLOOR), cause);
        if engine.state.living(victim).is_none() {
            return Ok(());
        }

        let landing = Self::landing(engine.state, origin, target);
        if landing != target {
            engine.displace(victim, landing);
        }
        engine.afflict(
            victim,
            StatusEffect::new(StatusKind::Slowed, SLOWED_TURNS, StatDelta::move_range(-1))
                .from_source(user),
        );

        let center = engine.state.living(victim).map_or(target, |unit| unit.position);
        for bystander in engine.state.enemies_near(owner, center, 1) {
            if bystander == victim {
                continue;
            }
            let Some(defense) = engine.state.living(bystander).map(|unit| unit.defense()) else {
                continue;
            };
            engine.hit(Some(user), bystander, mitigated(PRY_SPLASH, defense, 1), cause);
        }
        Ok(())
    }
}

/// Leaps to a nearby empty tile, ignoring whatever lies between.
pub struct Vault;

impl SkillBehavior for Vault {
    const KIND: ActiveSkillKind = ActiveSkillKind::Vault;

    fn validate(
        state: &GameState,
        user: UnitId,
        origin: Position,
        target: Position,
    ) -> Result<(), ActionError> {
        open_tile_within(state, user, origin, target, Self::KIND.info().range)
    }

    fn resolve(
        engine: &mut TurnEngine<'_>,
        user: UnitId,
        target: Position,
    ) -> Result<(), ActionError> {
        engine.teleport(user, target);
        Ok(())
    }
}

/// Ranged strike that ignores defense. Needs line of sight.
pub struct Judgement;

impl SkillBehavior for Judgement {
    const KIND: ActiveSkillKind = ActiveSkillKind::Judgement;

    fn validate(
        state: &GameState,
        user: UnitId,
        origin: Position,
        target: Position,
    ) -> Result<(), ActionError> {
        enemy_within(state, user, origin, target, Self::KIND.info().range)?;
        rules::line_of_sight(state, origin, target)
    }

    fn resolve(
        engine: &mut TurnEngine<'_>,
        user: UnitId,
        target: Position,
    ) -> Result<(), ActionError> {
        let victim = engine.state.unit_at(target).ok_or(ActionError::NoTarget)?;
        engine.hit(
            Some(user),
            victim,
            JUDGEMENT_DAMAGE,
            DamageCause::Skill(Self::KIND),
        );
        Ok(())
    }
}
