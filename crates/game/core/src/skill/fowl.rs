//! Fowl Contrivance actives: Murmuration Dusk, Flap, Emetic Flange.

use crate::action::ActionError;
use crate::action::rules::{self, mitigated};
use crate::engine::{DamageCause, TurnEngine};
use crate::env::TerrainOracle;
use crate::skill::{ActiveSkillKind, SkillBehavior, area_within, caster, enemy_within};
use crate::state::{GameState, Position, UnitId};

const DUSK_POWER: i32 = 6;
const FLAP_POWER: i32 = 9;
const FLANGE_POWER: i32 = 4;

/// Hits `victims` for `max(1, power - defense)` each.
fn batter(
    engine: &mut TurnEngine<'_>,
    user: UnitId,
    victims: &[UnitId],
    power: i32,
    kind: ActiveSkillKind,
) {
    for &victim in victims {
        let Some(defense) = engine.state.living(victim).map(|unit| unit.defense()) else {
            continue;
        };
        engine.hit(
            Some(user),
            victim,
            mitigated(power, defense, 1),
            DamageCause::Skill(kind),
        );
    }
}

/// A swarm over a 3x3 area.
pub struct MurmurationDusk;

impl SkillBehavior for MurmurationDusk {
    const KIND: ActiveSkillKind = ActiveSkillKind::MurmurationDusk;

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
        let victims = engine.state.enemies_near(owner, target, 1);
        batter(engine, user, &victims, DUSK_POWER, Self::KIND);
        Ok(())
    }
}

/// Heavy single-target strike at range.
pub struct Flap;

impl SkillBehavior for Flap {
    const KIND: ActiveSkillKind = ActiveSkillKind::Flap;

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
        let victim = engine.state.unit_at(target).ok_or(ActionError::NoTarget)?;
        batter(engine, user, &[victim], FLAP_POWER, Self::KIND);
        Ok(())
    }
}

/// Retches over every adjacent enemy and shoves them back a tile.
pub struct EmeticFlange;

impl SkillBehavior for EmeticFlange {
    const KIND: ActiveSkillKind = ActiveSkillKind::EmeticFlange;

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
        let victims = engine.state.enemies_near(owner, origin, 1);
        batter(engine, user, &victims, FLANGE_POWER, Self::KIND);

        for victim in victims {
            let Some(position) = engine.state.living(victim).map(|unit| unit.position) else {
                continue;
            };
            let Some(heading) = origin.heading_to(position) else {
                continue;
            };
            let pushed = position.step(heading);
            if engine.state.terrain.is_passable(pushed) && !engine.state.is_occupied(pushed) {
                engine.displace(victim, pushed);
            }
        }
        Ok(())
    }
}
