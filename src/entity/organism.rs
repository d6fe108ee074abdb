//! Organism archetype with SoA layout

use serde::{Deserialize, Serialize};

use crate::chemistry::bag::CompoundBag;
use crate::core::types::{EntityId, Tick};

/// Structure of Arrays for organism entities
///
/// Every organism carries exactly one compound bag. Despawned organisms
/// keep their slot (marked dead) so indices stay stable within a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganismArchetype {
    /// Unique identifiers
    pub ids: Vec<EntityId>,
    /// Compound storage, one bag per organism
    pub bags: Vec<CompoundBag>,
    /// Liveness flags; dead slots are skipped by every pass
    pub alive: Vec<bool>,
    /// Tick each organism was spawned on
    pub spawned_ticks: Vec<Tick>,
}

impl OrganismArchetype {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an organism, returning its index
    pub fn spawn(&mut self, id: EntityId, tick: Tick) -> usize {
        let index = self.ids.len();
        self.ids.push(id);
        self.bags.push(CompoundBag::new());
        self.alive.push(true);
        self.spawned_ticks.push(tick);
        index
    }

    /// Mark an organism dead; its slot is retained
    pub fn kill(&mut self, index: usize) {
        if let Some(flag) = self.alive.get_mut(index) {
            *flag = false;
        }
    }

    /// Indices of living organisms, in stable index order
    pub fn iter_living(&self) -> impl Iterator<Item = usize> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(i, _)| i)
    }

    /// Number of living organisms
    pub fn count(&self) -> usize {
        self.alive.iter().filter(|a| **a).count()
    }

    /// Total slots, including dead ones
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_and_kill() {
        let mut organisms = OrganismArchetype::new();

        let a = organisms.spawn(EntityId::new(), 0);
        let b = organisms.spawn(EntityId::new(), 3);
        assert_eq!(organisms.count(), 2);
        assert_eq!(organisms.spawned_ticks[b], 3);

        organisms.kill(a);
        assert_eq!(organisms.count(), 1);
        assert_eq!(organisms.len(), 2, "dead slots are retained");

        let living: Vec<usize> = organisms.iter_living().collect();
        assert_eq!(living, vec![b]);
    }

    #[test]
    fn test_kill_out_of_range_is_ignored() {
        let mut organisms = OrganismArchetype::new();
        organisms.spawn(EntityId::new(), 0);
        organisms.kill(42);
        assert_eq!(organisms.count(), 1);
    }
}
