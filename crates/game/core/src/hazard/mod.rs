//! Owner-scoped area hazards: Marrow Dikes, vapor clouds and Market Futures
//! anchors.
//!
//! The registry only does bookkeeping. Terrain writes for wall placement and
//! restoration go through the terrain oracle in the engine, using the
//! `original` terrain recorded on each wall.

use crate::env::TerrainKind;
use crate::state::{Player, Position, UnitId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DikeWall {
    pub position: Position,
    pub hp: u32,
    /// Terrain to put back when the wall falls or the dike expires.
    pub original: TerrainKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarrowDike {
    pub owner: UnitId,
    pub owner_player: Player,
    pub center: Position,
    pub walls: Vec<DikeWall>,
    /// Tiles enclosed by the walls; kills here feed Dominion.
    pub interior: Vec<Position>,
    /// Owner turns left.
    pub remaining: u32,
    pub upgraded: bool,
}

impl MarrowDike {
    pub fn encloses(&self, position: Position) -> bool {
        self.interior.contains(&position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VaporKind {
    /// Pierces enemies, cleanses allies.
    Broaching,
    /// Protection zone that also mends allies.
    SaftE,
    /// Heals allies.
    Coolant,
    /// Pierces enemies.
    Cutting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vapor {
    pub kind: VaporKind,
    pub owner: UnitId,
    pub owner_player: Player,
    pub center: Position,
    pub remaining: u32,
}

impl Vapor {
    /// Clouds cover the 3x3 square around their center.
    pub fn covers(&self, position: Position) -> bool {
        self.center.distance(position) <= 1
    }
}

/// Teleport anchor sunk into a furniture tile. Consumed by the first ally
/// that rides it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Anchor {
    pub owner: UnitId,
    pub owner_player: Player,
    pub position: Position,
    /// Cosmic value at casting time; doubles as the jump radius.
    pub value: u32,
}

impl Anchor {
    /// An ally standing next to the anchor may jump to `dest`.
    pub fn reaches(&self, from: Position, dest: Position) -> bool {
        self.position.is_adjacent(from) && self.position.distance(dest) <= self.value
    }
}

/// Identifies a hazard in events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HazardKind {
    Dike,
    Vapor(VaporKind),
    Anchor,
}

/// Result of striking a dike wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallHit {
    pub remaining: u32,
    /// Set when the wall fell; terrain must be restored to this.
    pub collapsed_to: Option<TerrainKind>,
}

/// Hazards that reached zero duration on an owner tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Expired {
    pub dikes: Vec<MarrowDike>,
    pub vapors: Vec<Vapor>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HazardRegistry {
    dikes: Vec<MarrowDike>,
    vapors: Vec<Vapor>,
    #[cfg_attr(feature = "serde", serde(default))]
    anchors: Vec<Anchor>,
}

impl HazardRegistry {
    pub fn dikes(&self) -> &[MarrowDike] {
        &self.dikes
    }

    pub fn vapors(&self) -> &[Vapor] {
        &self.vapors
    }

    pub fn add_dike(&mut self, dike: MarrowDike) {
        self.dikes.push(dike);
    }

    pub fn add_vapor(&mut self, vapor: Vapor) {
        self.vapors.push(vapor);
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Sinks `anchor`, displacing any anchor already on that tile.
    pub fn add_anchor(&mut self, anchor: Anchor) -> Option<Anchor> {
        let previous = self.take_anchor(anchor.position);
        self.anchors.push(anchor);
        previous
    }

    pub fn take_anchor(&mut self, position: Position) -> Option<Anchor> {
        let index = self.anchors.iter().position(|anchor| anchor.position == position)?;
        Some(self.anchors.remove(index))
    }

    /// First anchor of `player` that carries a unit on `from` to `dest`.
    pub fn anchor_route(&self, player: Player, from: Position, dest: Position) -> Option<&Anchor> {
        self.anchors
            .iter()
            .find(|anchor| anchor.owner_player == player && anchor.reaches(from, dest))
    }

    pub fn dike_of(&self, owner: UnitId) -> Option<&MarrowDike> {
        self.dikes.iter().find(|dike| dike.owner == owner)
    }

    /// Detaches `owner`'s dike so its walls can be torn down.
    pub fn take_dike_of(&mut self, owner: UnitId) -> Option<MarrowDike> {
        let index = self.dikes.iter().position(|dike| dike.owner == owner)?;
        Some(self.dikes.remove(index))
    }

    pub fn wall_at(&self, position: Position) -> Option<&DikeWall> {
        self.dikes
            .iter()
            .flat_map(|dike| dike.walls.iter())
            .find(|wall| wall.position == position)
    }

    /// Dike whose interior contains `position`.
    pub fn zone_at(&self, position: Position) -> Option<&MarrowDike> {
        self.dikes.iter().find(|dike| dike.encloses(position))
    }

    /// Applies `amount` damage to the wall at `position`. A wall at 0 HP is
    /// removed from its dike.
    pub fn damage_wall(&mut self, position: Position, amount: u32) -> Option<WallHit> {
        for dike in &mut self.dikes {
            let Some(index) = dike.walls.iter().position(|wall| wall.position == position) else {
                continue;
            };
            let wall = &mut dike.walls[index];
            wall.hp = wall.hp.saturating_sub(amount);
            if wall.hp > 0 {
                return Some(WallHit {
                    remaining: wall.hp,
                    collapsed_to: None,
                });
            }
            let fallen = dike.walls.remove(index);
            return Some(WallHit {
                remaining: 0,
                collapsed_to: Some(fallen.original),
            });
        }
        None
    }

    /// True when an allied Saft-E cloud covers `target` but not `attacker`.
    pub fn is_shielded(&self, target: Position, target_owner: Player, attacker: Position) -> bool {
        self.vapors.iter().any(|vapor| {
            vapor.kind == VaporKind::SaftE
                && vapor.owner_player == target_owner
                && vapor.covers(target)
                && !vapor.covers(attacker)
        })
    }

    pub fn vapor_index(&self, owner: UnitId, center: Position) -> Option<usize> {
        self.vapors
            .iter()
            .position(|vapor| vapor.owner == owner && vapor.center == center)
    }

    pub fn remove_vapor(&mut self, index: usize) -> Vapor {
        self.vapors.remove(index)
    }

    /// Counts down every hazard owned by `player` and detaches the ones that run out.
    pub fn tick_owner(&mut self, player: Player) -> Expired {
        let mut expired = Expired::default();

        let mut index = 0;
        while index < self.dikes.len() {
            let dike = &mut self.dikes[index];
            if dike.owner_player == player {
                dike.remaining = dike.remaining.saturating_sub(1);
                if dike.remaining == 0 {
                    expired.dikes.push(self.dikes.remove(index));
                    continue;
                }
            }
            index += 1;
        }

        let mut index = 0;
        while index < self.vapors.len() {
            let vapor = &mut self.vapors[index];
            if vapor.owner_player == player {
                vapor.remaining = vapor.remaining.saturating_sub(1);
                if vapor.remaining == 0 {
                    expired.vapors.push(self.vapors.remove(index));
                    continue;
                }
            }
            index += 1;
        }

        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dike(remaining: u32) -> MarrowDike {
        MarrowDike {
            owner: UnitId::new(0, 0),
            owner_player: Player::One,
            center: Position::new(4, 4),
            walls: vec![DikeWall {
                position: Position::new(2, 4),
                hp: 2,
                original: TerrainKind::Dust,
            }],
            interior: Position::new(4, 4).square(1).collect(),
            remaining,
            upgraded: false,
        }
    }

    #[test]
    fn walls_collapse_to_their_original_terrain() {
        let mut registry = HazardRegistry::default();
        registry.add_dike(dike(3));

        let first = registry.damage_wall(Position::new(2, 4), 1).unwrap();
        assert_eq!(first.remaining, 1);
        assert_eq!(first.collapsed_to, None);

        let second = registry.damage_wall(Position::new(2, 4), 1).unwrap();
        assert_eq!(second.collapsed_to, Some(TerrainKind::Dust));
        assert!(registry.wall_at(Position::new(2, 4)).is_none());
        assert!(registry.damage_wall(Position::new(2, 4), 1).is_none());
    }

    #[test]
    fn only_the_owner_ticks_hazards() {
        let mut registry = HazardRegistry::default();
        registry.add_dike(dike(1));

        assert!(registry.tick_owner(Player::Two).dikes.is_empty());
        assert_eq!(registry.dikes().len(), 1);

        let expired = registry.tick_owner(Player::One);
        assert_eq!(expired.dikes.len(), 1);
        assert!(registry.dikes().is_empty());
    }

    #[test]
    fn shield_requires_attacker_outside_the_cloud() {
        let mut registry = HazardRegistry::default();
        registry.add_vapor(Vapor {
            kind: VaporKind::SaftE,
            owner: UnitId::new(1, 0),
            owner_player: Player::Two,
            center: Position::new(5, 5),
            remaining: 2,
        });

        let target = Position::new(5, 6);
        assert!(registry.is_shielded(target, Player::Two, Position::new(5, 8)));
        assert!(!registry.is_shielded(target, Player::Two, Position::new(4, 4)));
        assert!(!registry.is_shielded(target, Player::One, Position::new(5, 8)));
    }

    #[test]
    fn zone_lookup_uses_interior_only() {
        let mut registry = HazardRegistry::default();
        registry.add_dike(dike(3));
        assert!(registry.zone_at(Position::new(5, 5)).is_some());
        assert!(registry.zone_at(Position::new(2, 4)).is_none());
    }

    #[test]
    fn anchors_carry_only_their_side_within_value() {
        let mut registry = HazardRegistry::default();
        let anchor = Anchor {
            owner: UnitId::new(2, 0),
            owner_player: Player::One,
            position: Position::new(0, 4),
            value: 3,
        };
        assert_eq!(registry.add_anchor(anchor), None);

        let beside = Position::new(1, 4);
        assert!(registry.anchor_route(Player::One, beside, Position::new(3, 6)).is_some());
        assert!(registry.anchor_route(Player::One, beside, Position::new(4, 4)).is_none());
        assert!(registry.anchor_route(Player::One, Position::new(2, 4), Position::new(3, 4)).is_none());
        assert!(registry.anchor_route(Player::Two, beside, Position::new(3, 6)).is_none());

        let recast = Anchor { value: 8, ..anchor };
        assert_eq!(registry.add_anchor(recast), Some(anchor));
        assert_eq!(registry.anchors(), &[recast]);
        assert_eq!(registry.take_anchor(Position::new(0, 4)), Some(recast));
        assert!(registry.anchors().is_empty());
    }
}
