//! Gas Machinist actives: Broaching Gas, Saft-E-Gas, Diverge.
//!
//! Vapors are hazards owned by the casting unit. Each cast drains the
//! Effluvium Lathe: a cloud lasts one owner turn plus one per charge spent.

use tracing::debug;

use crate::action::ActionError;
use crate::action::rules;
use crate::engine::{ResolvedEvent, TurnEngine};
use crate::env::TerrainOracle;
use crate::hazard::{HazardKind, Vapor, VaporKind};
use crate::skill::{ActiveSkillKind, PassiveKind, SkillBehavior, caster};
use crate::state::{GameState, Position, UnitId};

const DIVERGED_TURNS: u32 = 2;

/// Empty passable tile within `range`.
fn cloud_site(
    state: &GameState,
    user: UnitId,
    origin: Position,
    target: Position,
    range: u32,
) -> Result<(), ActionError> {
    rules::actor(state, user)?;
    rules::in_bounds(state, target)?;
    rules::in_range(origin, target, range)?;
    if !state.terrain.is_passable(target) {
        return Err(ActionError::Impassable);
    }
    if state.is_occupied(target) {
        return Err(ActionError::Occupied);
    }
    Ok(())
}

/// Spends every Lathe charge on `user`, returning how many there were.
fn drain_lathe(engine: &mut TurnEngine<'_>, user: UnitId) -> u32 {
    let Some(unit) = engine.state.living_mut(user) else {
        return 0;
    };
    let passive = &mut unit.kit.passive;
    if passive.kind != PassiveKind::EffluviumLathe {
        return 0;
    }
    u32::from(core::mem::take(&mut passive.charges))
}

fn release(
    engine: &mut TurnEngine<'_>,
    user: UnitId,
    kind: VaporKind,
    center: Position,
    remaining: u32,
) -> Result<(), ActionError> {
    let (_, owner_player) = caster(engine.state, user)?;
    debug!(unit = %user, %kind, %center, remaining, "vapor released");
    engine.state.hazards.add_vapor(Vapor {
        kind,
        owner: user,
        owner_player,
        center,
        remaining,
    });
    engine.emit(ResolvedEvent::HazardCreated {
        owner: user,
        hazard: HazardKind::Vapor(kind),
        center,
    });
    Ok(())
}

/// Caustic cloud: wears enemies down, scrubs allies clean.
pub struct BroachingGas;

impl SkillBehavior for BroachingGas {
    const KIND: ActiveSkillKind = ActiveSkillKind::BroachingGas;

    fn validate(
        state: &GameState,
        user: UnitId,
        origin: Position,
        target: Position,
    ) -> Result<(), ActionError> {
        cloud_site(state, user, origin, target, Self::KIND.info().range)
    }

    fn resolve(
        engine: &mut TurnEngine<'_>,
        user: UnitId,
        target: Position,
    ) -> Result<(), ActionError> {
        let charges = drain_lathe(engine, user);
        release(engine, user, VaporKind::Broaching, target, 1 + charges)
    }
}

/// Protective cloud: shields allies from outside attackers and mends them.
pub struct SaftEGas;

impl SkillBehavior for SaftEGas {
    const KIND: ActiveSkillKind = ActiveSkillKind::SaftEGas;

    fn validate(
        state: &GameState,
        user: UnitId,
        origin: Position,
        target: Position,
    ) -> Result<(), ActionError> {
        cloud_site(state, user, origin, target, Self::KIND.info().range)
    }

    fn resolve(
        engine: &mut TurnEngine<'_>,
        user: UnitId,
        target: Position,
    ) -> Result<(), ActionError> {
        let charges = drain_lathe(engine, user);
        release(engine, user, VaporKind::SaftE, target, 1 + charges)
    }
}

/// Splits one of the caster's clouds into a coolant and a cutting vapor.
pub struct Diverge;

impl Diverge {
    /// Tile beside `center` at column offset `dc`, or `center` itself when
    /// that tile cannot hold a cloud.
    fn flank(state: &GameState, center: Position, dc: i32) -> Position {
        let side = center.offset(0, dc);
        if state.terrain.is_passable(side) {
            side
        } else {
            center
        }
    }
}

impl SkillBehavior for Diverge {
    const KIND: ActiveSkillKind = ActiveSkillKind::Diverge;

    fn validate(
        state: &GameState,
        user: UnitId,
        origin: Position,
        target: Position,
    ) -> Result<(), ActionError> {
        rules::actor(state, user)?;
        rules::in_bounds(state, target)?;
        rules::in_range(origin, target, Self::KIND.info().range)?;
        state
            .hazards
            .vapor_index(user, target)
            .map(|_| ())
            .ok_or(ActionError::NoTarget)
    }

    fn resolve(
        engine: &mut TurnEngine<'_>,
        user: UnitId,
        target: Position,
    ) -> Result<(), ActionError> {
        let index = engine
            .state
            .hazards
            .vapor_index(user, target)
            .ok_or(ActionError::NoTarget)?;
        let old = engine.state.hazards.remove_vapor(index);
        engine.emit(ResolvedEvent::HazardExpired {
            owner: user,
            hazard: HazardKind::Vapor(old.kind),
            center: old.center,
        });

        let left = Self::flank(engine.state, target, -1);
        let right = Self::flank(engine.state, target, 1);
        release(engine, user, VaporKind::Coolant, left, DIVERGED_TURNS)?;
        release(engine, user, VaporKind::Cutting, right, DIVERGED_TURNS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{MapDimensions, TerrainGrid, TerrainKind};

    #[test]
    fn flanks_fall_back_to_the_center() {
        let terrain = TerrainGrid::with_tiles(
            MapDimensions::new(6, 6),
            [(Position::new(2, 3), TerrainKind::Pillar)],
        )
        .unwrap();
        let state = GameState::new(0, terrain);

        assert_eq!(Diverge::flank(&state, Position::new(2, 2), -1), Position::new(2, 1));
        assert_eq!(Diverge::flank(&state, Position::new(2, 2), 1), Position::new(2, 2));
        assert_eq!(Diverge::flank(&state, Position::new(4, 0), -1), Position::new(4, 0));
    }
}
