//! Passive skill hooks.
//!
//! Passives have no validate/queue/resolve cycle. The engine calls these at
//! fixed points:
//!
//! - after every resolution step: [`TurnEngine::run_post_step_triggers`]
//!   (Wretched Decension, then Autoclave)
//! - on a death inside a dike: [`TurnEngine::dominion_kill`]
//! - at the start of a player's turn: Effluvium Lathe charges and Mired from
//!   upgraded dikes
//! - before the first step and after every step: Valuation Oracle (see
//!   `appraiser`)
//!
//! Stasiality and Viseroy are plain checks at their call sites.

use tracing::debug;

use crate::action::rules::mitigated;
use crate::engine::{CriticalCheck, DamageCause, ResolvedEvent, TurnEngine};
use crate::env::{TerrainOracle, compute_seed, context};
use crate::skill::{ActiveSkillKind, PassiveKind};
use crate::state::{Direction, Player, Position, StatDelta, UnitId};
use crate::status::{StatusEffect, StatusKind};

const AUTOCLAVE_REACH: i32 = 3;
const AUTOCLAVE_POWER: i32 = 8;
const MAX_LATHE_CHARGES: u8 = 3;
const MIRED_TURNS: u32 = 2;

/// Upgrade order for Dominion kills.
const DOMINION_UPGRADES: [ActiveSkillKind; 3] = [
    ActiveSkillKind::MarrowDike,
    ActiveSkillKind::Ossify,
    ActiveSkillKind::BoneTithe,
];

/// Success chance in percent for a Wretched Decension roll.
fn decension_chance(fowls: usize) -> u32 {
    match fowls {
        0 | 1 => 100,
        2 => 50,
        _ => 25,
    }
}

impl TurnEngine<'_> {
    /// Evaluates critical-health thresholds for every hit the step produced.
    ///
    /// Thresholds are judged only here, after all of a step's damage is in.
    /// Triggers can deal damage themselves, so this repeats until no new
    /// checks are parked; Autoclave's one-shot flag bounds the loop.
    pub(crate) fn run_post_step_triggers(&mut self) {
        while !self.pending_checks.is_empty() {
            let checks = core::mem::take(&mut self.pending_checks);
            for check in &checks {
                self.wretched_decension(*check);
            }
            for check in &checks {
                self.arm_autoclave(check.victim);
            }
            self.fire_autoclaves();
        }
    }

    fn wretched_decension(&mut self, check: CriticalCheck) {
        let Some(source) = check.source else {
            return;
        };
        let Some(fowl) = self.state.unit(source) else {
            return;
        };
        if !fowl.has_passive(PassiveKind::WretchedDecension) {
            return;
        }
        let side = fowl.owner;
        let Some(victim) = self.state.living(check.victim) else {
            return;
        };
        if victim.owner == side || !self.env.config().is_critical(victim.hp, victim.max_hp) {
            return;
        }
        let remaining = victim.hp;

        let fowls = self
            .state
            .living_units()
            .filter(|(_, unit)| {
                unit.owner == side && !unit.is_echo() && unit.has_passive(PassiveKind::WretchedDecension)
            })
            .count();
        let chance = decension_chance(fowls);
        let seed = compute_seed(
            self.state.seed,
            self.state.turn.nonce,
            check.victim.index,
            context::TRIGGER_CHANCE + self.rolls,
        );
        self.rolls += 1;
        let roll = self.env.rng().roll_d100(seed);
        debug!(victim = %check.victim, roll, chance, "wretched decension roll");
        if roll > chance {
            return;
        }

        self.emit(ResolvedEvent::PassiveTriggered {
            unit: source,
            passive: PassiveKind::WretchedDecension,
        });
        self.hit(
            Some(source),
            check.victim,
            remaining,
            DamageCause::WretchedDecension,
        );
    }

    fn arm_autoclave(&mut self, id: UnitId) {
        let config = self.env.config();
        let Some(unit) = self.state.living_mut(id) else {
            return;
        };
        let passive = &mut unit.kit.passive;
        if passive.kind == PassiveKind::Autoclave
            && !passive.activated
            && config.is_critical(unit.hp, unit.max_hp)
        {
            passive.armed = true;
        }
    }

    fn fire_autoclaves(&mut self) {
        let armed: Vec<UnitId> = self
            .state
            .living_units()
            .filter(|(_, unit)| unit.kit.passive.armed)
            .map(|(id, _)| id)
            .collect();

        for id in armed {
            let Some(unit) = self.state.living_mut(id) else {
                continue;
            };
            unit.kit.passive.armed = false;
            if unit.kit.passive.activated {
                continue;
            }
            let (origin, owner) = (unit.position, unit.owner);

            let targets = self.autoclave_targets(origin, owner);
            if targets.is_empty() {
                debug!(unit = %id, "autoclave armed with nothing in reach");
                continue;
            }
            if let Some(unit) = self.state.living_mut(id) {
                unit.kit.passive.activated = true;
            }
            self.emit(ResolvedEvent::PassiveTriggered {
                unit: id,
                passive: PassiveKind::Autoclave,
            });

            let mut total = 0;
            for target in targets {
                let Some(defense) = self.state.living(target).map(|unit| unit.defense()) else {
                    continue;
                };
                total += self.hit(
                    Some(id),
                    target,
                    mitigated(AUTOCLAVE_POWER, defense, 1),
                    DamageCause::Autoclave,
                );
            }
            self.heal(id, total / 2);
        }
    }

    /// Enemies on the four orthogonal lines from `origin`. Impassable
    /// terrain ends a line; units do not.
    fn autoclave_targets(&self, origin: Position, owner: Player) -> Vec<UnitId> {
        let mut targets = Vec::new();
        for direction in Direction::ORTHOGONAL {
            let (dr, dc) = direction.delta();
            for step in 1..=AUTOCLAVE_REACH {
                let tile = origin.offset(dr * step, dc * step);
                if !self.state.terrain.is_passable(tile) {
                    break;
                }
                let enemy = self
                    .state
                    .unit_at(tile)
                    .filter(|id| self.state.living(*id).is_some_and(|unit| unit.owner != owner));
                if let Some(enemy) = enemy {
                    targets.push(enemy);
                }
            }
        }
        targets
    }

    /// Credits a Dominion kill to the enemy Condenser whose dike encloses `position`.
    pub(crate) fn dominion_kill(&mut self, position: Position, victim_owner: Player) {
        let Some(condenser) = self
            .state
            .hazards
            .dikes()
            .iter()
            .find(|dike| dike.owner_player != victim_owner && dike.encloses(position))
            .map(|dike| dike.owner)
        else {
            return;
        };
        let Some(unit) = self.state.living_mut(condenser) else {
            return;
        };
        if !unit.has_passive(PassiveKind::Dominion) {
            return;
        }
        unit.kit.passive.kills += 1;
        let upgraded = DOMINION_UPGRADES
            .into_iter()
            .find(|kind| unit.kit.upgrade(*kind));
        let kills = unit.kit.passive.kills;

        debug!(unit = %condenser, kills, ?upgraded, "dominion kill");
        self.emit(ResolvedEvent::PassiveTriggered {
            unit: condenser,
            passive: PassiveKind::Dominion,
        });
        if let Some(skill) = upgraded {
            self.emit(ResolvedEvent::SkillUpgraded {
                unit: condenser,
                skill,
            });
        }
    }

    pub(crate) fn charge_effluvium(&mut self, player: Player) {
        for (_, unit) in self.state.units.iter_mut() {
            let passive = &mut unit.kit.passive;
            if unit.owner == player
                && unit.hp > 0
                && passive.kind == PassiveKind::EffluviumLathe
                && passive.charges < MAX_LATHE_CHARGES
            {
                passive.charges += 1;
            }
        }
    }

    /// Mires `player`'s units standing inside an enemy's upgraded dike.
    pub(crate) fn mire_intruders(&mut self, player: Player) {
        let intruders: Vec<(UnitId, UnitId)> = self
            .state
            .hazards
            .dikes()
            .iter()
            .filter(|dike| dike.upgraded && dike.owner_player != player)
            .flat_map(|dike| {
                self.state
                    .living_units()
                    .filter(move |(_, unit)| unit.owner == player && dike.encloses(unit.position))
                    .map(move |(id, _)| (id, dike.owner))
            })
            .collect();

        for (id, source) in intruders {
            self.mire(id, source);
        }
    }

    pub(crate) fn mire(&mut self, target: UnitId, source: UnitId) {
        self.afflict(
            target,
            StatusEffect::new(StatusKind::Mired, MIRED_TURNS, StatDelta::move_range(-1))
                .from_source(source),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decension_odds_fall_with_more_fowls() {
        assert_eq!(decension_chance(1), 100);
        assert_eq!(decension_chance(2), 50);
        assert_eq!(decension_chance(3), 25);
        assert_eq!(decension_chance(5), 25);
    }
}
