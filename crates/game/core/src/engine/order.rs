use tracing::trace;

use crate::engine::TurnEngine;
use crate::env::{compute_seed, context};
use crate::state::{Player, UnitId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EntryKind {
    /// The unit's own pending action.
    Queued,
    /// A gripper with captives and no orders deals its periodic trap damage.
    TrapTick,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ResolutionEntry {
    pub unit: UnitId,
    pub kind: EntryKind,
    pub timestamp: u64,
    pub draw: u32,
}

impl TurnEngine<'_> {
    /// Gathers this pass's entries in resolution order.
    ///
    /// Sort key is `(timestamp, draw, slot)`. The draw is seeded per unit and
    /// pass, so equal timestamps resolve in an order no unit type can rely on.
    pub(crate) fn collect_entries(&self) -> Vec<ResolutionEntry> {
        let rng = self.env.rng();
        let active = self.state.turn.current_player;
        let mut entries: Vec<ResolutionEntry> = self
            .state
            .living_units()
            .filter(|(_, unit)| unit.owner == active)
            .filter_map(|(id, unit)| {
                let (kind, timestamp) = if !unit.pending.is_empty() {
                    (EntryKind::Queued, unit.action_timestamp)
                } else if !self.state.captives_of(id).is_empty() {
                    (EntryKind::TrapTick, u64::MAX)
                } else {
                    return None;
                };
                let seed = compute_seed(self.state.seed, self.state.turn.nonce, id.index, context::TIE_BREAK);
                Some(ResolutionEntry {
                    unit: id,
                    kind,
                    timestamp,
                    draw: rng.next_u32(seed),
                })
            })
            .collect();

        entries.sort_by_key(|entry| (entry.timestamp, entry.draw, entry.unit.index));
        for entry in &entries {
            trace!(unit = %entry.unit, timestamp = entry.timestamp, draw = entry.draw, "ordered");
        }
        entries
    }

    /// Units of `player` that start the pass with nothing queued.
    pub(crate) fn idle_units(&self, player: Player) -> Vec<UnitId> {
        self.state
            .living_units()
            .filter(|(_, unit)| unit.owner == player && unit.pending.is_empty())
            .map(|(id, _)| id)
            .collect()
    }
}
