//! The bookkeeping phases around the action pass.

use tracing::{debug, info};

use crate::engine::{DamageCause, ResolvedEvent, TurnEngine};
use crate::hazard::{HazardKind, Vapor, VaporKind};
use crate::state::{Player, UnitId};
use crate::status;

impl TurnEngine<'_> {
    /// Ages the ending player's echoes; an echo out of turns collapses.
    pub(crate) fn expire_echoes(&mut self, player: Player) {
        let echoes: Vec<UnitId> = self
            .state
            .living_units()
            .filter(|(_, unit)| unit.owner == player && unit.is_echo())
            .map(|(id, _)| id)
            .collect();

        for id in echoes {
            let Some(link) = self.state.living_mut(id).and_then(|unit| unit.echo.as_mut()) else {
                continue;
            };
            link.remaining_turns = link.remaining_turns.saturating_sub(1);
            if link.remaining_turns == 0 {
                self.on_death(id, None, DamageCause::EchoExpired);
            }
        }
    }

    /// Applies and ages every hazard owned by `player`.
    pub(crate) fn hazard_pass(&mut self, player: Player) {
        let vapors: Vec<Vapor> = self
            .state
            .hazards
            .vapors()
            .iter()
            .filter(|vapor| vapor.owner_player == player)
            .copied()
            .collect();
        for vapor in vapors {
            self.vapor_tick(vapor);
        }
        self.run_post_step_triggers();

        let expired = self.state.hazards.tick_owner(player);
        for dike in expired.dikes {
            for wall in &dike.walls {
                self.put_terrain(wall.position, wall.original);
            }
            self.emit(ResolvedEvent::HazardExpired {
                owner: dike.owner,
                hazard: HazardKind::Dike,
                center: dike.center,
            });
        }
        for vapor in expired.vapors {
            self.emit(ResolvedEvent::HazardExpired {
                owner: vapor.owner,
                hazard: HazardKind::Vapor(vapor.kind),
                center: vapor.center,
            });
        }
    }

    fn vapor_tick(&mut self, vapor: Vapor) {
        let (allies, enemies): (Vec<_>, Vec<_>) = self
            .state
            .living_units()
            .filter(|(_, unit)| vapor.covers(unit.position))
            .partition(|(_, unit)| unit.owner == vapor.owner_player);
        let allies: Vec<UnitId> = allies.into_iter().map(|(id, _)| id).collect();
        let enemies: Vec<UnitId> = enemies.into_iter().map(|(id, _)| id).collect();

        let cause = DamageCause::Hazard(vapor.kind);
        match vapor.kind {
            VaporKind::Broaching => {
                for enemy in enemies {
                    self.hit(Some(vapor.owner), enemy, 1, cause);
                }
                for ally in allies {
                    self.cleanse(ally);
                }
            }
            VaporKind::SaftE => {
                for ally in allies {
                    self.heal(ally, 1);
                }
            }
            VaporKind::Coolant => {
                for ally in allies {
                    self.heal(ally, 2);
                }
            }
            VaporKind::Cutting => {
                for enemy in enemies {
                    self.hit(Some(vapor.owner), enemy, 2, cause);
                }
            }
        }
    }

    fn cleanse(&mut self, id: UnitId) {
        let Some(unit) = self.state.living_mut(id) else {
            return;
        };
        for kind in status::cleanse_debuffs(unit) {
            self.emit(ResolvedEvent::EffectExpired { unit: id, kind });
        }
    }

    /// Status decay for the ending player, then rest healing for its idle units.
    pub(crate) fn decay_pass(&mut self, player: Player, idle: &[UnitId]) {
        for (unit, kind) in status::decay_owner_turn(&mut self.state.units, player) {
            self.emit(ResolvedEvent::EffectExpired { unit, kind });
        }

        let rest_heal = self.env.config().rest_heal;
        for &id in idle {
            let Some(unit) = self.state.living(id) else {
                continue;
            };
            if unit.is_echo() || !self.state.enemies_near(unit.owner, unit.position, 1).is_empty() {
                continue;
            }
            self.heal(id, rest_heal);
        }
    }

    /// Records a winner once a side has no non-echo unit left. Player One is
    /// examined first, so a mutual wipe goes to player Two.
    pub(crate) fn check_victory(&mut self) -> Option<Player> {
        let loser = Player::ALL
            .into_iter()
            .find(|player| !self.state.has_forces(*player))?;
        let winner = loser.opponent();

        info!(%winner, turn = self.state.turn.turn_number, "match decided");
        self.state.turn.winner = Some(winner);
        self.emit(ResolvedEvent::Victory { winner });
        Some(winner)
    }

    /// Clears every order; when play continues, also hands the turn over.
    pub(crate) fn switch_turn(&mut self, ending: Player, handover: bool) {
        for (_, unit) in self.state.units.iter_mut() {
            unit.clear_pending();
        }
        if !handover {
            return;
        }

        for (_, unit) in self.state.units.iter_mut() {
            if unit.owner == ending {
                unit.kit.tick_cooldowns();
            }
        }

        let next = ending.opponent();
        let turn = &mut self.state.turn;
        turn.current_player = next;
        if next == Player::One {
            turn.turn_number += 1;
        }
        let number = turn.turn_number;
        debug!(%ending, %next, turn = number, "turn handed over");
        self.emit(ResolvedEvent::TurnEnded {
            ended: ending,
            next,
            turn: number,
        });

        self.charge_effluvium(next);
        self.mire_intruders(next);
    }
}
