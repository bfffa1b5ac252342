//! Death and cleanup pipeline.
//!
//! Every path that drops a unit to zero HP ends up in [`TurnEngine::on_death`],
//! which runs a fixed sequence:
//!
//! 1. clear the victim's orders and report the death
//! 2. release the victim's captives and its own captor
//! 3. Dominion kill hooks, for deaths inside an enemy dike's interior
//! 4. kill experience for the killer
//! 5. echo cleanup: despawn, then explode on adjacent enemies
//!
//! Explosion victims re-enter the pipeline one level deeper. Echoes dying at
//! depth > 0 are despawned without exploding, which bounds the chain.

use tracing::debug;

use crate::action::rules::mitigated;
use crate::engine::{DamageCause, ResolvedEvent, TurnEngine};
use crate::state::{Player, Position, UnitId};

const ECHO_BLAST_POWER: i32 = 3;

impl TurnEngine<'_> {
    pub(crate) fn on_death(&mut self, victim: UnitId, killer: Option<UnitId>, cause: DamageCause) {
        self.settle_death(victim, killer, cause, 0);
    }

    pub(crate) fn settle_death(
        &mut self,
        victim: UnitId,
        killer: Option<UnitId>,
        cause: DamageCause,
        depth: u8,
    ) {
        let Some(unit) = self.state.units.get_mut(victim) else {
            return;
        };
        unit.hp = 0;
        unit.clear_pending();
        let position = unit.position;
        let owner = unit.owner;
        let echo = unit.echo;
        let captor = unit.trapped_by.take();

        debug!(unit = %victim, ?cause, depth, "unit died");
        self.emit(ResolvedEvent::UnitDied {
            unit: victim,
            killer,
            cause,
        });

        self.release_captives(victim);
        if let Some(captor) = captor {
            self.emit(ResolvedEvent::CaptiveReleased {
                captor,
                captive: victim,
            });
        }

        self.dominion_kill(position, owner);

        if let Some(killer) = killer.filter(|killer| *killer != victim) {
            self.grant_xp(killer, self.env.config().kill_xp);
        }

        let Some(link) = echo else {
            return;
        };
        self.state.units.remove(victim);
        if depth == 0 {
            self.echo_blast(link.original, position, owner, depth + 1);
        }
    }

    /// Hits every living enemy of `owner` adjacent to `center`.
    fn echo_blast(&mut self, original: UnitId, center: Position, owner: Player, depth: u8) {
        let victims = self.state.enemies_near(owner, center, 1);
        debug!(%center, victims = victims.len(), "echo explodes");

        for victim in victims {
            let Some(defense) = self.state.living(victim).map(|unit| unit.defense()) else {
                continue;
            };
            self.strike(
                Some(original),
                victim,
                mitigated(ECHO_BLAST_POWER, defense, 1),
                DamageCause::EchoExplosion,
                depth,
            );
        }
    }
}
