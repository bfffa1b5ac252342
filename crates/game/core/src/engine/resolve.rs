use tracing::debug;

use crate::action::rules::{self, AttackTarget, Passage, mitigated};
use crate::action::{ActionError, ActionSlot};
use crate::engine::order::{EntryKind, ResolutionEntry};
use crate::engine::{DamageCause, ResolvedEvent, TurnEngine};
use crate::skill::{PassiveKind, SkillBehavior, dispatch_skill};
use crate::state::{PendingAction, Position, QueuedSkill, UnitId};

const TRAP_POWER: i32 = 3;
const WALL_DAMAGE: u32 = 1;

impl TurnEngine<'_> {
    pub(crate) fn resolve_entry(&mut self, entry: ResolutionEntry) {
        let Some(unit) = self.state.living_mut(entry.unit) else {
            debug!(unit = %entry.unit, "actor died before its step");
            return;
        };
        match entry.kind {
            EntryKind::TrapTick => self.trap_tick(entry.unit),
            EntryKind::Queued => {
                let orders = unit.pending;
                unit.clear_pending();
                self.resolve_orders(entry.unit, orders);
            }
        }
    }

    fn resolve_orders(&mut self, id: UnitId, orders: PendingAction) {
        if !self.state.captives_of(id).is_empty() && !self.preserves_grip(id, &orders) {
            self.release_captives(id);
        }
        if let Some(dest) = orders.move_to {
            self.resolve_move(id, dest);
        }
        if let Some(target) = orders.attack {
            self.resolve_attack(id, target);
        }
        if let Some(skill) = orders.skill {
            self.resolve_skill(id, skill);
        }
    }

    /// Only a lone attack on a current captive keeps the grip.
    fn preserves_grip(&self, id: UnitId, orders: &PendingAction) -> bool {
        if orders.move_to.is_some() || orders.skill.is_some() {
            return false;
        }
        orders
            .attack
            .and_then(|target| self.state.unit_at(target))
            .and_then(|victim| self.state.living(victim))
            .is_some_and(|victim| victim.trapped_by == Some(id))
    }

    fn trap_tick(&mut self, captor: UnitId) {
        for captive in self.state.captives_of(captor) {
            let Some(defense) = self.state.living(captive).map(|unit| unit.defense()) else {
                continue;
            };
            self.hit(
                Some(captor),
                captive,
                mitigated(TRAP_POWER, defense, 1),
                DamageCause::Trap,
            );
        }
    }

    fn resolve_move(&mut self, id: UnitId, dest: Position) {
        match rules::check_move(self.state, id, dest) {
            Ok(Passage::Walk) => self.walk(id, dest),
            Ok(Passage::Anchor(anchor)) => self.ride_anchor(id, anchor, dest),
            Err(reason) => self.skip(id, ActionSlot::Move, reason),
        }
    }

    fn resolve_attack(&mut self, id: UnitId, target: Position) {
        let Some(origin) = self.state.living(id).map(|unit| unit.position) else {
            return;
        };
        match rules::check_attack(self.state, id, origin, target) {
            Ok(AttackTarget::Unit(victim)) => self.strike_unit(id, victim, target),
            Ok(AttackTarget::Wall) => self.strike_wall(id, target),
            Err(reason) => self.skip(id, ActionSlot::Attack, reason),
        }
    }

    fn strike_unit(&mut self, id: UnitId, victim: UnitId, target: Position) {
        let Some(attacker) = self.state.living(id) else {
            return;
        };
        let power = attacker.attack();
        let pierces = attacker.kind.pierces_defense();
        let grips = attacker.has_passive(PassiveKind::Viseroy);
        let defense = if pierces {
            0
        } else {
            self.state.living(victim).map_or(0, |unit| unit.defense())
        };

        self.emit(ResolvedEvent::Attacked {
            attacker: id,
            target,
        });
        self.hit(Some(id), victim, mitigated(power, defense, 1), DamageCause::Attack);

        if grips && self.state.living(victim).is_some() {
            self.trap(id, victim);
        }
    }

    fn strike_wall(&mut self, id: UnitId, position: Position) {
        self.emit(ResolvedEvent::Attacked {
            attacker: id,
            target: position,
        });
        let Some(hit) = self.state.hazards.damage_wall(position, WALL_DAMAGE) else {
            return;
        };
        self.emit(ResolvedEvent::WallDamaged {
            attacker: id,
            position,
            remaining: hit.remaining,
        });
        if let Some(original) = hit.collapsed_to {
            self.put_terrain(position, original);
            self.emit(ResolvedEvent::WallDestroyed { position });
        }
    }

    fn resolve_skill(&mut self, id: UnitId, queued: QueuedSkill) {
        let slot = ActionSlot::Skill(queued.kind);
        let origin = match self.state.living(id) {
            Some(unit) if unit.is_echo() => {
                return self.skip(id, slot, ActionError::EchoRestricted);
            }
            Some(unit) if unit.is_trapped() => {
                return self.skip(id, slot, ActionError::Trapped);
            }
            Some(unit) => unit.position,
            None => return,
        };

        let state = &*self.state;
        let checked = dispatch_skill!(queued.kind, S => S::validate(state, id, origin, queued.target));
        if let Err(reason) = checked {
            return self.skip(id, slot, reason);
        }

        self.emit(ResolvedEvent::SkillUsed {
            unit: id,
            skill: queued.kind,
            target: queued.target,
        });
        if let Err(reason) = dispatch_skill!(queued.kind, S => S::resolve(self, id, queued.target)) {
            self.skip(id, slot, reason);
        }
    }

    fn skip(&mut self, unit: UnitId, slot: ActionSlot, reason: ActionError) {
        debug!(unit = %unit, ?slot, %reason, "stale action skipped");
        self.emit(ResolvedEvent::ActionSkipped { unit, slot, reason });
    }
}
