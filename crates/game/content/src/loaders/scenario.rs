//! Scenario loader.
//!
//! A scenario names a map, fixes the match seed, places units and may carry
//! scripted orders, one list per resolution pass. Orders go through the same
//! planning writers a UI would use, so an illegal script line is rejected the
//! same way a bad click would be.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{
    ActionError, GameConfig, GameState, Player, Position, RosterOracle, TerrainGrid, UnitId,
    UnitType, queue_attack, queue_move, queue_skill,
};
use tracing::{debug, warn};

use crate::loaders::{LoadResult, read_file};

/// One unit on the starting board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub kind: UnitType,
    pub owner: Player,
    pub at: (i32, i32), // (row, col)
}

/// A scripted order. `unit` indexes the scenario's placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    Move { unit: usize, to: (i32, i32) },
    Attack { unit: usize, target: (i32, i32) },
    Skill { unit: usize, slot: usize, target: (i32, i32) },
}

impl Order {
    pub fn unit(&self) -> usize {
        match *self {
            Order::Move { unit, .. } | Order::Attack { unit, .. } | Order::Skill { unit, .. } => {
                unit
            }
        }
    }

    /// Hands the order to the matching planning writer.
    pub fn queue(&self, state: &mut GameState, units: &[UnitId]) -> Result<(), ActionError> {
        let id = *units.get(self.unit()).ok_or(ActionError::UnitMissing)?;
        match *self {
            Order::Move { to, .. } => queue_move(state, id, position(to)),
            Order::Attack { target, .. } => queue_attack(state, id, position(target)),
            Order::Skill { slot, target, .. } => queue_skill(state, id, slot, position(target)),
        }
    }
}

fn position((row, col): (i32, i32)) -> Position {
    Position::new(row, col)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// Map file name under `maps/`, without the `.ron` extension.
    pub map: String,
    pub seed: u64,
    pub placements: Vec<Placement>,
    #[serde(default)]
    pub turns: Vec<Vec<Order>>,
}

impl Scenario {
    /// Spawns every placement on `terrain`. Placement order fixes arena indices.
    pub fn setup(
        &self,
        roster: &dyn RosterOracle,
        config: &GameConfig,
        terrain: TerrainGrid,
    ) -> LoadResult<Skirmish> {
        let mut state = GameState::new(self.seed, terrain);
        let mut units = Vec::with_capacity(self.placements.len());
        for (index, placement) in self.placements.iter().enumerate() {
            let id = state
                .spawn(roster, config, placement.kind, placement.owner, position(placement.at))
                .map_err(|e| {
                    anyhow::anyhow!(
                        "Placement {} ({} at {:?}) failed: {}",
                        index,
                        placement.kind,
                        placement.at,
                        e
                    )
                })?;
            units.push(id);
        }
        debug!(scenario = %self.name, units = units.len(), "scenario set up");

        Ok(Skirmish { state, units })
    }
}

/// A scenario's board, ready to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skirmish {
    pub state: GameState,
    /// Arena handles in placement order.
    pub units: Vec<UnitId>,
}

impl Skirmish {
    /// Queues one pass worth of scripted orders.
    ///
    /// Rejected orders are logged and returned; the rest still go in.
    pub fn queue(&mut self, orders: &[Order]) -> Vec<(Order, ActionError)> {
        let mut rejected = Vec::new();
        for order in orders {
            if let Err(err) = order.queue(&mut self.state, &self.units) {
                warn!(?order, %err, "scripted order rejected");
                rejected.push((*order, err));
            }
        }
        rejected
    }
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let scenario: Scenario = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;

        if scenario.placements.is_empty() {
            anyhow::bail!("Scenario '{}' places no units", scenario.name);
        }
        for (pass, orders) in scenario.turns.iter().enumerate() {
            if let Some(order) = orders
                .iter()
                .find(|order| order.unit() >= scenario.placements.len())
            {
                anyhow::bail!(
                    "Scenario '{}' pass {} orders unknown unit {}",
                    scenario.name,
                    pass,
                    order.unit()
                );
            }
        }

        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{MapDimensions, Roster};

    const DUEL: &str = r#"(
        name: "duel",
        map: "unused",
        seed: 9,
        placements: [
            (kind: Glaiveman, owner: One, at: (1, 1)),
            (kind: Grayman, owner: Two, at: (1, 2)),
        ],
        turns: [
            [Attack(unit: 0, target: (1, 2)), Move(unit: 1, to: (3, 3))],
        ],
    )"#;

    #[test]
    fn orders_for_the_idle_side_are_rejected() {
        let scenario = ScenarioLoader::parse(DUEL).unwrap();
        let mut skirmish = scenario
            .setup(
                &Roster::standard(),
                &GameConfig::default(),
                TerrainGrid::new(MapDimensions::new(5, 5)),
            )
            .unwrap();

        let rejected = skirmish.queue(&scenario.turns[0]);

        assert_eq!(rejected, vec![(scenario.turns[0][1], ActionError::NotYourTurn)]);
        let glaive = skirmish.state.unit(skirmish.units[0]).unwrap();
        assert_eq!(glaive.pending.attack, Some(Position::new(1, 2)));
    }

    #[test]
    fn unknown_unit_references_fail_to_load() {
        let broken = DUEL.replace("Move(unit: 1", "Move(unit: 7");
        let err = ScenarioLoader::parse(&broken).unwrap_err();
        assert!(err.to_string().contains("unknown unit 7"));
    }
}
