use crate::state::{Unit, UnitId};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Slot {
    generation: u32,
    unit: Option<Unit>,
}

/// Slot arena owning every unit in the match.
///
/// Dead units stay in their slot (HP 0) so reports and kill credit can still
/// refer to them. Only despawned units (echoes) vacate a slot; vacating bumps
/// the generation so every outstanding [`UnitId`] for it goes stale. Iteration
/// is always in slot order, which is the deterministic order resolution uses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitArena {
    slots: Vec<Slot>,
}

impl UnitArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `unit`, reusing the lowest vacant slot.
    pub fn insert(&mut self, unit: Unit) -> UnitId {
        if let Some(index) = self.slots.iter().position(|slot| slot.unit.is_none()) {
            let slot = &mut self.slots[index];
            slot.unit = Some(unit);
            return UnitId::new(index as u32, slot.generation);
        }
        self.slots.push(Slot {
            generation: 0,
            unit: Some(unit),
        });
        UnitId::new((self.slots.len() - 1) as u32, 0)
    }

    /// Vacates the slot behind `id`, invalidating the handle.
    pub fn remove(&mut self, id: UnitId) -> Option<Unit> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let unit = slot.unit.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        Some(unit)
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.unit.as_ref())
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.unit.as_mut())
    }

    pub fn iter(&self) -> impl Iterator<Item = (UnitId, &Unit)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.unit
                .as_ref()
                .map(|unit| (UnitId::new(index as u32, slot.generation), unit))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (UnitId, &mut Unit)> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let generation = slot.generation;
            slot.unit
                .as_mut()
                .map(|unit| (UnitId::new(index as u32, generation), unit))
        })
    }

    /// Snapshot of current handles, for loops that mutate while iterating.
    pub fn ids(&self) -> Vec<UnitId> {
        self.iter().map(|(id, _)| id).collect()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
