//! Planning writers.
//!
//! UI and AI code fill a unit's pending-action slot only through these
//! functions. Each validates against the current board, commits the order and
//! stamps the unit with the next `action_timestamp`.

use crate::action::ActionError;
use crate::action::rules::{self, actor};
use crate::skill::{SkillBehavior, dispatch_skill};
use crate::state::{GameState, Position, Unit, UnitId};

fn planner(state: &GameState, id: UnitId) -> Result<&Unit, ActionError> {
    if state.turn.is_over() {
        return Err(ActionError::MatchOver);
    }
    let unit = actor(state, id)?;
    if unit.owner != state.turn.current_player {
        return Err(ActionError::NotYourTurn);
    }
    Ok(unit)
}

fn stamp(state: &mut GameState, id: UnitId, edit: impl FnOnce(&mut Unit)) -> Result<(), ActionError> {
    let timestamp = state.turn.action_counter + 1;
    let unit = state.units.get_mut(id).ok_or(ActionError::UnitMissing)?;
    edit(unit);
    unit.action_timestamp = timestamp;
    state.turn.action_counter = timestamp;
    Ok(())
}

/// Queues a move to `dest`. Must come before any attack or skill.
pub fn queue_move(state: &mut GameState, id: UnitId, dest: Position) -> Result<(), ActionError> {
    let unit = planner(state, id)?;
    if unit.pending.attack.is_some() || unit.pending.skill.is_some() {
        return Err(ActionError::ActionConflict);
    }
    rules::check_move(state, id, dest)?;
    stamp(state, id, |unit| unit.pending.move_to = Some(dest))
}

/// Queues a basic attack on `target`, measured from the planned position.
pub fn queue_attack(state: &mut GameState, id: UnitId, target: Position) -> Result<(), ActionError> {
    let unit = planner(state, id)?;
    if unit.pending.skill.is_some() {
        return Err(ActionError::ActionConflict);
    }
    let origin = unit.planned_position();
    rules::check_attack(state, id, origin, target)?;
    stamp(state, id, |unit| unit.pending.attack = Some(target))
}

/// Queues the skill in `slot` at `target` and spends its cooldown immediately.
///
/// Self-targeted skills ignore `target`; pass the unit's planned position.
pub fn queue_skill(
    state: &mut GameState,
    id: UnitId,
    slot: usize,
    target: Position,
) -> Result<(), ActionError> {
    let unit = planner(state, id)?;
    if unit.is_echo() {
        return Err(ActionError::EchoRestricted);
    }
    if unit.is_trapped() {
        return Err(ActionError::Trapped);
    }
    if unit.pending.attack.is_some() || unit.pending.skill.is_some() {
        return Err(ActionError::ActionConflict);
    }
    let skill = unit.skill(slot).ok_or(ActionError::UnknownSkill)?;
    if !skill.is_ready() {
        return Err(ActionError::OnCooldown);
    }
    let kind = skill.kind;
    let origin = unit.planned_position();

    dispatch_skill!(kind, S => S::queue(state, id, slot, origin, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{MapDimensions, Roster, TerrainGrid, TerrainKind};
    use crate::state::{Player, UnitType};

    struct Board {
        state: GameState,
        ally: UnitId,
        enemy: UnitId,
    }

    fn board() -> Board {
        let terrain = TerrainGrid::with_tiles(
            MapDimensions::new(10, 8),
            [(Position::new(3, 5), TerrainKind::Limestone)],
        )
        .unwrap();
        let mut state = GameState::new(1, terrain);
        let roster = Roster::standard();
        let config = GameConfig::new();
        let ally = state
            .spawn(&roster, &config, UnitType::Glaiveman, Player::One, Position::new(3, 3))
            .unwrap();
        let enemy = state
            .spawn(&roster, &config, UnitType::MarrowCondenser, Player::Two, Position::new(3, 7))
            .unwrap();
        Board { state, ally, enemy }
    }

    #[test]
    fn timestamps_increase_with_each_order() {
        let Board {
            mut state, ally, ..
        } = board();

        queue_move(&mut state, ally, Position::new(4, 4)).unwrap();
        assert_eq!(state.unit(ally).unwrap().action_timestamp, 1);
        queue_attack(&mut state, ally, Position::new(4, 6)).unwrap_err();
        queue_skill(&mut state, ally, 1, Position::new(5, 5)).unwrap();
        assert_eq!(state.unit(ally).unwrap().action_timestamp, 2);
    }

    #[test]
    fn only_the_active_player_plans() {
        let Board {
            mut state, enemy, ..
        } = board();
        assert_eq!(
            queue_move(&mut state, enemy, Position::new(2, 7)),
            Err(ActionError::NotYourTurn)
        );
    }

    #[test]
    fn move_respects_range_and_terrain() {
        let Board {
            mut state, ally, ..
        } = board();
        assert_eq!(
            queue_move(&mut state, ally, Position::new(3, 6)),
            Err(ActionError::OutOfRange)
        );
        assert_eq!(
            queue_move(&mut state, ally, Position::new(3, 5)),
            Err(ActionError::Impassable)
        );
    }

    #[test]
    fn attack_and_skill_are_exclusive() {
        let Board {
            mut state, ally, ..
        } = board();
        queue_skill(&mut state, ally, 1, Position::new(3, 1)).unwrap();
        assert_eq!(
            queue_attack(&mut state, ally, Position::new(3, 4)),
            Err(ActionError::ActionConflict)
        );
    }

    #[test]
    fn queued_skill_spends_cooldown_even_before_resolution() {
        let Board {
            mut state, ally, ..
        } = board();
        queue_skill(&mut state, ally, 1, Position::new(3, 1)).unwrap();

        let unit = state.unit(ally).unwrap();
        assert!(!unit.skill(1).unwrap().is_ready());
        assert!(unit.pending.skill.is_some());
    }

    #[test]
    fn attack_range_is_measured_from_planned_move() {
        let Board {
            mut state, ally, ..
        } = board();
        assert_eq!(
            queue_attack(&mut state, ally, Position::new(3, 7)),
            Err(ActionError::OutOfRange)
        );
        queue_move(&mut state, ally, Position::new(4, 5)).unwrap();
        assert_eq!(
            queue_attack(&mut state, ally, Position::new(3, 7)),
            Ok(())
        );
    }
}
