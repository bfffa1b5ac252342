//! Board rules shared by planning writers, the engine and skills.
//!
//! Every check takes the board as it is *now*. Planning calls them against the
//! board at queue time; the engine calls them again at resolution, which is
//! what turns a changed board into a skipped action.

use crate::action::ActionError;
use crate::env::TerrainOracle;
use crate::state::{GameState, Position, Unit, UnitId};

/// What a basic attack would hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackTarget {
    Unit(UnitId),
    Wall,
}

pub fn actor(state: &GameState, id: UnitId) -> Result<&Unit, ActionError> {
    state.living(id).ok_or(ActionError::UnitMissing)
}

pub fn in_bounds(state: &GameState, position: Position) -> Result<(), ActionError> {
    if state.terrain.contains(position) {
        Ok(())
    } else {
        Err(ActionError::OutOfBounds)
    }
}

pub fn in_range(origin: Position, target: Position, range: u32) -> Result<(), ActionError> {
    if origin.distance(target) <= range {
        Ok(())
    } else {
        Err(ActionError::OutOfRange)
    }
}

/// Nothing between `from` and `to` blocks sight. Endpoints are not checked.
pub fn line_of_sight(state: &GameState, from: Position, to: Position) -> Result<(), ActionError> {
    if from
        .between(to)
        .into_iter()
        .any(|tile| state.terrain.blocks_line_of_sight(tile))
    {
        return Err(ActionError::NoLineOfSight);
    }
    Ok(())
}

/// Nothing between `from` and `to` blocks passage: no impassable terrain and no units.
pub fn clear_path(state: &GameState, from: Position, to: Position) -> Result<(), ActionError> {
    if from
        .between(to)
        .into_iter()
        .any(|tile| !state.terrain.is_passable(tile) || state.is_occupied(tile))
    {
        return Err(ActionError::PathBlocked);
    }
    Ok(())
}

/// Placeable tile with nobody on it, `ignore` excepted.
pub fn open_tile(state: &GameState, position: Position, ignore: UnitId) -> Result<(), ActionError> {
    in_bounds(state, position)?;
    if !state.terrain.can_place(position) {
        return Err(ActionError::Impassable);
    }
    match state.unit_at(position) {
        Some(occupant) if occupant != ignore => Err(ActionError::Occupied),
        _ => Ok(()),
    }
}

/// Living enemy of `attacker` on `target` that `origin` is allowed to single out.
pub fn enemy_target(
    state: &GameState,
    attacker: &Unit,
    origin: Position,
    target: Position,
) -> Result<UnitId, ActionError> {
    let victim = state.unit_at(target).ok_or(ActionError::NoTarget)?;
    let unit = actor(state, victim)?;
    if unit.owner == attacker.owner {
        return Err(ActionError::FriendlyTarget);
    }
    if state.hazards.is_shielded(target, unit.owner, origin) {
        return Err(ActionError::Protected);
    }
    Ok(victim)
}

/// How a legal move gets a unit to its destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Passage {
    Walk,
    /// Jump through the Market Futures anchor on this furniture tile.
    Anchor(Position),
}

/// Legality of moving `id` from its current tile to `dest`.
///
/// A destination out of walking reach is still legal when an allied anchor
/// beside the unit reaches it.
pub fn check_move(state: &GameState, id: UnitId, dest: Position) -> Result<Passage, ActionError> {
    let unit = actor(state, id)?;
    if unit.is_echo() {
        return Err(ActionError::EchoRestricted);
    }
    if unit.is_trapped() {
        return Err(ActionError::Trapped);
    }
    if dest == unit.position {
        return Err(ActionError::InvalidTarget);
    }
    in_bounds(state, dest)?;

    match walk(state, unit, dest) {
        Ok(()) => Ok(Passage::Walk),
        Err(reason) => state
            .hazards
            .anchor_route(unit.owner, unit.position, dest)
            .filter(|_| state.terrain.can_place(dest) && !state.is_occupied(dest))
            .map(|anchor| Passage::Anchor(anchor.position))
            .ok_or(reason),
    }
}

fn walk(state: &GameState, unit: &Unit, dest: Position) -> Result<(), ActionError> {
    let from = unit.position;
    in_range(from, dest, unit.move_range())?;
    if !state.terrain.is_passable(dest) {
        return Err(ActionError::Impassable);
    }
    if state.is_occupied(dest) {
        return Err(ActionError::Occupied);
    }

    // Allies can be walked past; enemies and terrain cannot.
    for tile in from.between(dest) {
        if !state.terrain.is_passable(tile) {
            return Err(ActionError::PathBlocked);
        }
        let hostile = state
            .unit_at(tile)
            .and_then(|other| state.unit(other))
            .is_some_and(|other| other.owner != unit.owner);
        if hostile {
            return Err(ActionError::PathBlocked);
        }
    }
    Ok(())
}

/// Legality of a basic attack by `id`, standing on `origin`, at `target`.
pub fn check_attack(
    state: &GameState,
    id: UnitId,
    origin: Position,
    target: Position,
) -> Result<AttackTarget, ActionError> {
    let unit = actor(state, id)?;
    in_bounds(state, target)?;
    if target == origin {
        return Err(ActionError::InvalidTarget);
    }
    in_range(origin, target, unit.attack_range())?;
    line_of_sight(state, origin, target)?;

    if let Some(victim) = state.unit_at(target) {
        if victim == id {
            return Err(ActionError::InvalidTarget);
        }
        return enemy_target(state, unit, origin, target).map(AttackTarget::Unit);
    }
    if state.hazards.wall_at(target).is_some() {
        return Ok(AttackTarget::Wall);
    }
    Err(ActionError::NoTarget)
}

/// `max(floor, power - defense)`, never negative.
pub fn mitigated(power: i32, defense: i32, floor: i32) -> u32 {
    (power - defense).max(floor).max(0) as u32
}
