//! Grayman actives: Delta Config, Estrange, Græ Exchange.

use tracing::debug;

use crate::action::ActionError;
use crate::action::rules;
use crate::engine::{DamageCause, ResolvedEvent, TurnEngine};
use crate::skill::{ActiveSkillKind, SkillBehavior, caster, enemy_within, open_tile_within};
use crate::state::{GameState, Position, StatDelta, UnitId};
use crate::status::{StatusEffect, StatusKind};

const ESTRANGE_DAMAGE: u32 = 3;
const ESTRANGED_TURNS: u32 = 3;

/// Relocates anywhere on the board.
pub struct DeltaConfig;

impl SkillBehavior for DeltaConfig {
    const KIND: ActiveSkillKind = ActiveSkillKind::DeltaConfig;

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

/// Piercing bolt that also saps attack and defense. Needs an unobstructed path.
pub struct Estrange;

impl SkillBehavior for Estrange {
    const KIND: ActiveSkillKind = ActiveSkillKind::Estrange;

    fn validate(
        state: &GameState,
        user: UnitId,
        origin: Position,
        target: Position,
    ) -> Result<(), ActionError> {
        enemy_within(state, user, origin, target, Self::KIND.info().range)?;
        rules::clear_path(state, origin, target)
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
            ESTRANGE_DAMAGE,
            DamageCause::Skill(Self::KIND),
        );
        let sap = StatDelta {
            attack: -1,
            defense: -1,
            ..StatDelta::ZERO
        };
        engine.afflict(
            victim,
            StatusEffect::new(StatusKind::Estranged, ESTRANGED_TURNS, sap).from_source(user),
        );
        Ok(())
    }
}

/// Leaves an echo behind and steps out to a nearby tile.
pub struct GraeExchange;

impl SkillBehavior for GraeExchange {
    const KIND: ActiveSkillKind = ActiveSkillKind::GraeExchange;

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
        let (origin, _) = caster(engine.state, user)?;
        engine.teleport(user, target);

        let echo = engine
            .state
            .spawn_echo(user, origin)
            .ok_or(ActionError::UnitMissing)?;
        debug!(%echo, original = %user, position = %origin, "echo spawned");
        engine.emit(ResolvedEvent::EchoCreated {
            echo,
            original: user,
            position: origin,
        });
        Ok(())
    }
}
