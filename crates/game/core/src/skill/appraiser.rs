//! Delphic Appraiser: Valuation Oracle, Market Futures, Auction Curse,
//! Divine Depreciation.
//!
//! Every furniture tile carries a cosmic value from 1 to 9. Maps may pin it;
//! otherwise it is drawn once per tile from the match seed and never changes.

use tracing::debug;

use crate::action::ActionError;
use crate::action::rules;
use crate::engine::{DamageCause, ResolvedEvent, TurnEngine};
use crate::env::{TerrainGrid, TerrainKind, TerrainOracle, compute_seed, context};
use crate::hazard::{Anchor, HazardKind};
use crate::skill::{ActiveSkillKind, PassiveKind, SkillBehavior, caster, enemy_within};
use crate::state::{GameState, Position, StatDelta, UnitId};
use crate::status::{self, StatusEffect, StatusKind};

const ORACLE_BONUS: StatDelta = StatDelta {
    attack: 0,
    defense: 1,
    move_range: 0,
    attack_range: 1,
};
const FUTURES_THRESHOLD: u32 = 7;
const FUTURES_TURNS: u32 = 2;
const AUCTION_REACH: i32 = 2;
const AUCTION_ALLY_RANGE: u32 = 3;
const AUCTION_TURNS: u32 = 2;
const DEPRECIATION_BASE: u32 = 2;
const DEPRECIATION_TURNS: u32 = 2;

fn is_furniture(state: &GameState, position: Position) -> bool {
    state.terrain.terrain_at(position) == Some(TerrainKind::Furniture)
}

/// Furniture tile within `range` of `origin`.
fn furniture_within(
    state: &GameState,
    user: UnitId,
    origin: Position,
    target: Position,
    range: u32,
) -> Result<(), ActionError> {
    rules::actor(state, user)?;
    rules::in_bounds(state, target)?;
    rules::in_range(origin, target, range)?;
    if !is_furniture(state, target) {
        return Err(ActionError::InvalidTarget);
    }
    Ok(())
}

impl TurnEngine<'_> {
    /// Cosmic value of the furniture at `position`; `None` for any other tile.
    pub(crate) fn cosmic_value(&self, position: Position) -> Option<u32> {
        if !is_furniture(self.state, position) {
            return None;
        }
        if let Some(value) = self.state.terrain.appraisal(position) {
            return Some(u32::from(value));
        }
        let tile = (position.row.unsigned_abs() << 16) | position.col.unsigned_abs();
        let seed = compute_seed(self.state.seed, 0, tile, context::COSMIC_VALUE);
        Some(self.env.rng().range(
            seed,
            u32::from(TerrainGrid::MIN_COSMIC_VALUE),
            u32::from(TerrainGrid::MAX_COSMIC_VALUE),
        ))
    }

    /// Grants the Valuation Oracle aura to appraisers beside furniture and
    /// withdraws it from those that left.
    pub(crate) fn appraise_furniture(&mut self) {
        let state = &*self.state;
        let appraisers: Vec<(UnitId, bool, bool)> = state
            .living_units()
            .filter(|(_, unit)| unit.has_passive(PassiveKind::ValuationOracle) && !unit.is_echo())
            .map(|(id, unit)| {
                let beside = unit.position.neighbors().any(|tile| is_furniture(state, tile));
                (id, beside, unit.status.has(StatusKind::Valued))
            })
            .collect();

        for (id, beside, valued) in appraisers {
            if beside && !valued {
                self.emit(ResolvedEvent::PassiveTriggered {
                    unit: id,
                    passive: PassiveKind::ValuationOracle,
                });
                self.afflict(
                    id,
                    StatusEffect::new(StatusKind::Valued, 1, ORACLE_BONUS).from_source(id),
                );
            } else if !beside && valued {
                let lifted = self
                    .state
                    .living_mut(id)
                    .is_some_and(|unit| status::lift(unit, StatusKind::Valued));
                if lifted {
                    self.emit(ResolvedEvent::EffectExpired {
                        unit: id,
                        kind: StatusKind::Valued,
                    });
                }
            }
        }
    }

    /// Jumps `unit` through the anchor on `anchor` to `dest`, spending the anchor.
    pub(crate) fn ride_anchor(&mut self, unit: UnitId, anchor: Position, dest: Position) {
        let Some(spent) = self.state.hazards.take_anchor(anchor) else {
            return;
        };
        debug!(%unit, %anchor, %dest, value = spent.value, "anchor ridden");
        self.teleport(unit, dest);
        self.emit(ResolvedEvent::HazardExpired {
            owner: spent.owner,
            hazard: HazardKind::Anchor,
            center: anchor,
        });
        if spent.value >= FUTURES_THRESHOLD {
            self.afflict(
                unit,
                StatusEffect::new(StatusKind::Futures, FUTURES_TURNS, StatDelta::uniform(1))
                    .from_source(spent.owner),
            );
        }
    }
}

/// Sinks a teleport anchor into furniture. An ally next to it may later move
/// anywhere within the furniture's value of it.
pub struct MarketFutures;

impl SkillBehavior for MarketFutures {
    const KIND: ActiveSkillKind = ActiveSkillKind::MarketFutures;

    fn validate(
        state: &GameState,
        user: UnitId,
        origin: Position,
        target: Position,
    ) -> Result<(), ActionError> {
        furniture_within(state, user, origin, target, Self::KIND.info().range)
    }

    fn resolve(
        engine: &mut TurnEngine<'_>,
        user: UnitId,
        target: Position,
    ) -> Result<(), ActionError> {
        let (_, owner_player) = caster(engine.state, user)?;
        let value = engine
            .cosmic_value(target)
            .ok_or(ActionError::InvalidTarget)?;

        debug!(unit = %user, %target, value, "anchor sunk");
        let replaced = engine.state.hazards.add_anchor(Anchor {
            owner: user,
            owner_player,
            position: target,
            value,
        });
        if let Some(old) = replaced {
            engine.emit(ResolvedEvent::HazardExpired {
                owner: old.owner,
                hazard: HazardKind::Anchor,
                center: target,
            });
        }
        engine.emit(ResolvedEvent::HazardCreated {
            owner: user,
            hazard: HazardKind::Anchor,
            center: target,
        });
        Ok(())
    }
}

/// Curses an enemy and hands what it loses to the nearest ally.
pub struct AuctionCurse;

impl AuctionCurse {
    /// Highest cosmic value in the 5x5 around `center`, 0 with no furniture.
    fn top_lot(engine: &TurnEngine<'_>, center: Position) -> u32 {
        center
            .square(AUCTION_REACH)
            .filter_map(|tile| engine.cosmic_value(tile))
            .max()
            .unwrap_or(0)
    }

    /// What the cursed enemy loses at `value`.
    fn levy(value: u32) -> StatDelta {
        let tier = |threshold| if value >= threshold { -1 } else { 0 };
        StatDelta {
            attack: tier(1),
            defense: 0,
            move_range: tier(7),
            attack_range: tier(4),
        }
    }

    /// Nearest other ally within reach of `user`, ties in arena order. Falls
    /// back to `user` itself.
    fn bidder(state: &GameState, user: UnitId) -> Option<UnitId> {
        let unit = state.living(user)?;
        let nearest = state
            .allies_near(unit.owner, unit.position, AUCTION_ALLY_RANGE)
            .into_iter()
            .filter(|id| *id != user)
            .filter_map(|id| state.living(id).map(|ally| (id, ally)))
            .filter(|(_, ally)| !ally.is_echo())
            .min_by_key(|(_, ally)| ally.position.distance(unit.position))
            .map(|(id, _)| id);
        Some(nearest.unwrap_or(user))
    }
}

impl SkillBehavior for AuctionCurse {
    const KIND: ActiveSkillKind = ActiveSkillKind::AuctionCurse;

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
        let value = Self::top_lot(engine, target);
        let levy = Self::levy(value);
        if levy.is_zero() {
            debug!(unit = %user, %target, "nothing nearby worth auctioning");
            return Ok(());
        }

        let bidder = Self::bidder(engine.state, user);
        engine.afflict(
            victim,
            StatusEffect::new(StatusKind::Cursed, AUCTION_TURNS, levy).from_source(user),
        );
        if let Some(bidder) = bidder {
            engine.afflict(
                bidder,
                StatusEffect::new(StatusKind::Bid, AUCTION_TURNS, -levy).from_source(user),
            );
        }
        Ok(())
    }
}

/// Writes a piece of furniture down to nothing. Enemies around it take the
/// loss; allies around it see farther.
pub struct DivineDepreciation;

impl SkillBehavior for DivineDepreciation {
    const KIND: ActiveSkillKind = ActiveSkillKind::DivineDepreciation;

    fn validate(
        state: &GameState,
        user: UnitId,
        origin: Position,
        target: Position,
    ) -> Result<(), ActionError> {
        furniture_within(state, user, origin, target, Self::KIND.info().range)
    }

    fn resolve(
        engine: &mut TurnEngine<'_>,
        user: UnitId,
        target: Position,
    ) -> Result<(), ActionError> {
        let (_, owner) = caster(engine.state, user)?;
        let value = engine
            .cosmic_value(target)
            .ok_or(ActionError::InvalidTarget)?;

        let cause = DamageCause::Skill(Self::KIND);
        for enemy in engine.state.enemies_near(owner, target, 1) {
            engine.hit(Some(user), enemy, DEPRECIATION_BASE + value, cause);
            engine.afflict(
                enemy,
                StatusEffect::new(
                    StatusKind::Depreciated,
                    DEPRECIATION_TURNS,
                    StatDelta::attack_range(-1),
                )
                .from_source(user),
            );
        }
        for ally in engine.state.allies_near(owner, target, 1) {
            engine.afflict(
                ally,
                StatusEffect::new(
                    StatusKind::Appreciated,
                    DEPRECIATION_TURNS,
                    StatDelta::attack_range(1),
                )
                .from_source(user),
            );
        }
        Ok(())
    }
}
