//! Primitive board mutations shared by basic attacks, skills, passives and
//! hazards. Each one emits its own event so callers only sequence them.

use tracing::{debug, warn};

use crate::engine::{CriticalCheck, DamageCause, ResolvedEvent, TurnEngine};
use crate::env::{TerrainKind, TerrainOracle};
use crate::state::{Position, UnitId};
use crate::status::{self, StatusEffect, StatusError};

impl TurnEngine<'_> {
    /// Deals `amount` to `target`, clamped at zero HP.
    ///
    /// A lethal hit runs the death pipeline immediately so the victim drops out
    /// of every later query in the step. A survivable hit is parked as a
    /// [`CriticalCheck`]; thresholds are judged only after the whole step's
    /// damage is in. Returns the HP actually removed.
    pub(crate) fn hit(
        &mut self,
        source: Option<UnitId>,
        target: UnitId,
        amount: u32,
        cause: DamageCause,
    ) -> u32 {
        self.strike(source, target, amount, cause, 0)
    }

    /// [`Self::hit`] with an explicit death-chain depth.
    pub(crate) fn strike(
        &mut self,
        source: Option<UnitId>,
        target: UnitId,
        amount: u32,
        cause: DamageCause,
        depth: u8,
    ) -> u32 {
        let Some(unit) = self.state.living_mut(target) else {
            return 0;
        };
        let dealt = unit.take_damage(amount);
        let hp_after = unit.hp;

        self.emit(ResolvedEvent::Damaged {
            source,
            target,
            amount: dealt,
            hp_after,
            cause,
        });
        if let Some(source) = source {
            self.grant_xp(source, dealt);
        }

        if hp_after == 0 {
            self.settle_death(target, source, cause, depth);
        } else {
            self.pending_checks.push(CriticalCheck {
                victim: target,
                source,
            });
        }
        dealt
    }

    pub(crate) fn grant_xp(&mut self, unit: UnitId, amount: u32) {
        if amount == 0 {
            return;
        }
        let config = self.env.config();
        let Some(earner) = self.state.living_mut(unit) else {
            return;
        };
        if earner.is_echo() {
            return;
        }
        if let Some(level) = earner.gain_xp(amount, config) {
            debug!(unit = %unit, level, "level up");
            self.emit(ResolvedEvent::LevelUp { unit, level });
        }
    }

    /// Restores HP up to the maximum. Echoes cannot be mended.
    pub(crate) fn heal(&mut self, unit: UnitId, amount: u32) -> u32 {
        let Some(patient) = self.state.living_mut(unit) else {
            return 0;
        };
        if patient.is_echo() {
            return 0;
        }
        let gained = patient.heal(amount);
        let hp_after = patient.hp;
        if gained > 0 {
            self.emit(ResolvedEvent::Healed {
                unit,
                amount: gained,
                hp_after,
            });
        }
        gained
    }

    /// Raises max HP and current HP together.
    pub(crate) fn grow(&mut self, unit: UnitId, amount: u32) {
        let Some(grower) = self.state.living_mut(unit) else {
            return;
        };
        grower.grow(amount);
        let hp_after = grower.hp;
        if amount > 0 {
            self.emit(ResolvedEvent::Healed {
                unit,
                amount,
                hp_after,
            });
        }
    }

    /// Adds a status effect through the ledger. Returns whether it landed.
    pub(crate) fn afflict(&mut self, target: UnitId, effect: StatusEffect) -> bool {
        let Some(unit) = self.state.living_mut(target) else {
            return false;
        };
        match status::apply(unit, effect) {
            Ok(_) => {
                self.emit(ResolvedEvent::EffectApplied {
                    unit: target,
                    kind: effect.kind,
                    duration: effect.remaining,
                });
                true
            }
            Err(StatusError::Immune) => {
                self.emit(ResolvedEvent::EffectResisted {
                    unit: target,
                    kind: effect.kind,
                });
                false
            }
            Err(err) => {
                warn!(unit = %target, kind = %effect.kind, %err, "status effect dropped");
                false
            }
        }
    }

    /// Forced movement. Immune units stay put. A displaced captive is freed,
    /// and so is everything a displaced captor was holding.
    pub(crate) fn displace(&mut self, target: UnitId, to: Position) -> Option<u32> {
        let unit = self.state.living_mut(target)?;
        if status::is_immune(unit) {
            return None;
        }
        let from = unit.position;
        unit.position = to;
        let captor = unit.trapped_by.take();

        let distance = from.distance(to);
        self.emit(ResolvedEvent::Displaced {
            unit: target,
            from,
            to,
            distance,
        });
        if let Some(captor) = captor {
            self.emit(ResolvedEvent::CaptiveReleased {
                captor,
                captive: target,
            });
        }
        self.release_captives(target);
        Some(distance)
    }

    /// Voluntary movement along the ground.
    pub(crate) fn walk(&mut self, unit: UnitId, to: Position) {
        let Some(walker) = self.state.living_mut(unit) else {
            return;
        };
        let from = walker.position;
        walker.position = to;
        self.emit(ResolvedEvent::Moved { unit, from, to });
    }

    /// Voluntary relocation that ignores the path.
    pub(crate) fn teleport(&mut self, unit: UnitId, to: Position) {
        let Some(jumper) = self.state.living_mut(unit) else {
            return;
        };
        let from = jumper.position;
        jumper.position = to;
        self.emit(ResolvedEvent::Teleported { unit, from, to });
    }

    pub(crate) fn trap(&mut self, captor: UnitId, captive: UnitId) {
        let Some(unit) = self.state.living_mut(captive) else {
            return;
        };
        if status::is_immune(unit) || unit.trapped_by == Some(captor) {
            return;
        }
        let previous = unit.trapped_by.replace(captor);
        if let Some(previous) = previous {
            self.emit(ResolvedEvent::CaptiveReleased {
                captor: previous,
                captive,
            });
        }
        self.emit(ResolvedEvent::Captured { captor, captive });
    }

    /// Frees everything `captor` holds. Dead captives lose the reference
    /// silently so no handle to `captor` outlives the grip.
    pub(crate) fn release_captives(&mut self, captor: UnitId) {
        let held: Vec<UnitId> = self
            .state
            .units
            .iter()
            .filter(|(_, unit)| unit.trapped_by == Some(captor))
            .map(|(id, _)| id)
            .collect();

        for captive in held {
            let Some(unit) = self.state.units.get_mut(captive) else {
                continue;
            };
            unit.trapped_by = None;
            if unit.is_alive() {
                self.emit(ResolvedEvent::CaptiveReleased { captor, captive });
            }
        }
    }

    pub(crate) fn put_terrain(&mut self, position: Position, kind: TerrainKind) {
        if let Err(err) = self.state.terrain.set_terrain(position, kind) {
            debug_assert!(false, "terrain write failed: {err}");
            warn!(%position, %err, "terrain write failed");
        }
    }
}
