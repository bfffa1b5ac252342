//! Marrow Condenser actives: Ossify, Marrow Dike, Bone Tithe.

use tracing::debug;

use crate::action::ActionError;
use crate::action::rules::{self, mitigated};
use crate::engine::{DamageCause, ResolvedEvent, TurnEngine};
use crate::env::{TerrainKind, TerrainOracle};
use crate::hazard::{self, DikeWall, HazardKind};
use crate::skill::{ActiveSkillKind, SkillBehavior, caster};
use crate::state::{GameState, Position, StatDelta, UnitId};
use crate::status::{self, StatusEffect, StatusKind};

const OSSIFIED_TURNS: u32 = 2;
const DIKE_RADIUS: i32 = 2;
const DIKE_TURNS: u32 = 3;
const WALL_HP: u32 = 2;
const UPGRADED_WALL_HP: u32 = 3;

fn self_cast(state: &GameState, user: UnitId) -> Result<(), ActionError> {
    rules::actor(state, user).map(|_| ())
}

fn is_upgraded(engine: &TurnEngine<'_>, user: UnitId, kind: ActiveSkillKind) -> bool {
    engine
        .state
        .living(user)
        .is_some_and(|unit| unit.kit.is_upgraded(kind))
}

/// Hardens bone: more defense, less mobility.
pub struct Ossify;

impl SkillBehavior for Ossify {
    const KIND: ActiveSkillKind = ActiveSkillKind::Ossify;

    fn validate(
        state: &GameState,
        user: UnitId,
        _origin: Position,
        _target: Position,
    ) -> Result<(), ActionError> {
        self_cast(state, user)
    }

    fn resolve(
        engine: &mut TurnEngine<'_>,
        user: UnitId,
        _target: Position,
    ) -> Result<(), ActionError> {
        let armor = if is_upgraded(engine, user, Self::KIND) { 3 } else { 2 };
        let delta = StatDelta {
            defense: armor,
            move_range: -1,
            ..StatDelta::ZERO
        };
        engine.afflict(
            user,
            StatusEffect::new(StatusKind::Ossified, OSSIFIED_TURNS, delta).from_source(user),
        );
        Ok(())
    }
}

/// Raises a ring of bone walls two tiles out and claims the inside.
pub struct MarrowDike;

impl MarrowDike {
    /// Tears down `user`'s standing dike, restoring the terrain under it.
    fn collapse_previous(engine: &mut TurnEngine<'_>, user: UnitId) {
        let Some(old) = engine.state.hazards.take_dike_of(user) else {
            return;
        };
        for wall in &old.walls {
            engine.put_terrain(wall.position, wall.original);
        }
        engine.emit(ResolvedEvent::HazardExpired {
            owner: user,
            hazard: HazardKind::Dike,
            center: old.center,
        });
    }

    /// Pulls units standing on the perimeter one step toward the center.
    fn gather(engine: &mut TurnEngine<'_>, user: UnitId, center: Position) {
        for tile in center.ring(DIKE_RADIUS) {
            let Some(id) = engine.state.unit_at(tile) else {
                continue;
            };
            if id == user || engine.state.living(id).is_some_and(status::is_immune) {
                continue;
            }
            let Some(heading) = tile.heading_to(center) else {
                continue;
            };
            let inward = tile.step(heading);
            if engine.state.terrain.is_passable(inward) && !engine.state.is_occupied(inward) {
                engine.displace(id, inward);
            }
        }
    }
}

impl SkillBehavior for MarrowDike {
    const KIND: ActiveSkillKind = ActiveSkillKind::MarrowDike;

    fn validate(
        state: &GameState,
        user: UnitId,
        _origin: Position,
        _target: Position,
    ) -> Result<(), ActionError> {
        self_cast(state, user)
    }

    fn resolve(
        engine: &mut TurnEngine<'_>,
        user: UnitId,
        _target: Position,
    ) -> Result<(), ActionError> {
        let (center, owner) = caster(engine.state, user)?;
        let upgraded = is_upgraded(engine, user, Self::KIND);

        Self::collapse_previous(engine, user);
        Self::gather(engine, user, center);

        let wall_hp = if upgraded { UPGRADED_WALL_HP } else { WALL_HP };
        let mut walls = Vec::new();
        for tile in center.ring(DIKE_RADIUS) {
            if !engine.state.terrain.is_passable(tile) || engine.state.is_occupied(tile) {
                continue;
            }
            let Some(original) = engine.state.terrain.terrain_at(tile) else {
                continue;
            };
            engine.put_terrain(tile, TerrainKind::MarrowWall);
            walls.push(DikeWall {
                position: tile,
                hp: wall_hp,
                original,
            });
        }
        let interior: Vec<Position> = center
            .square(DIKE_RADIUS - 1)
            .filter(|tile| engine.state.terrain.contains(*tile))
            .collect();

        debug!(unit = %user, %center, walls = walls.len(), upgraded, "dike raised");
        engine.state.hazards.add_dike(hazard::MarrowDike {
            owner: user,
            owner_player: owner,
            center,
            walls,
            interior: interior.clone(),
            remaining: DIKE_TURNS,
            upgraded,
        });
        engine.emit(ResolvedEvent::HazardCreated {
            owner: user,
            hazard: HazardKind::Dike,
            center,
        });

        if upgraded {
            let intruders: Vec<UnitId> = interior
                .iter()
                .filter_map(|tile| engine.state.unit_at(*tile))
                .filter(|id| engine.state.living(*id).is_some_and(|unit| unit.owner != owner))
                .collect();
            for enemy in intruders {
                engine.mire(enemy, user);
            }
        }
        Ok(())
    }
}

/// Takes a toll from every adjacent enemy and grows from it.
pub struct BoneTithe;

impl SkillBehavior for BoneTithe {
    const KIND: ActiveSkillKind = ActiveSkillKind::BoneTithe;

    fn validate(
        state: &GameState,
        user: UnitId,
        _origin: Position,
        _target: Position,
    ) -> Result<(), ActionError> {
        self_cast(state, user)
    }

    fn resolve(
        engine: &mut TurnEngine<'_>,
        user: UnitId,
        _target: Position,
    ) -> Result<(), ActionError> {
        let (origin, owner) = caster(engine.state, user)?;
        let upgraded = is_upgraded(engine, user, Self::KIND);
        let kills = engine
            .state
            .living(user)
            .map_or(0, |unit| unit.kit.passive.kills);
        let power = if upgraded {
            i32::try_from(kills).map_or(i32::MAX, |kills| kills.saturating_add(1))
        } else {
            1
        };
        let growth = if upgraded { 2 } else { 1 };

        let mut tithed = 0;
        for enemy in engine.state.enemies_near(owner, origin, 1) {
            let Some(defense) = engine.state.living(enemy).map(|unit| unit.defense()) else {
                continue;
            };
            engine.hit(
                Some(user),
                enemy,
                mitigated(power, defense, 1),
                DamageCause::Skill(Self::KIND),
            );
            tithed += 1;
        }
        engine.grow(user, tithed * growth);
        Ok(())
    }
}
