//! ECS World - manages all organisms and their components
//!
//! The world is the entity source for the simulation: it owns the organism
//! archetype, maps entity ids to archetype indices, and records
//! additions/removals between ticks so the tick system can observe them.

use ahash::AHashMap;

use crate::chemistry::bag::CompoundBag;
use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{EntityId, Tick};
use crate::entity::organism::OrganismArchetype;

/// The simulation world containing all organisms
pub struct World {
    pub current_tick: Tick,
    pub config: SimulationConfig,
    pub organisms: OrganismArchetype,
    entity_registry: AHashMap<EntityId, usize>,
    added: Vec<EntityId>,
    removed: Vec<EntityId>,
}

impl World {
    pub fn new() -> Self {
        Self {
            current_tick: 0,
            config: SimulationConfig::default(),
            organisms: OrganismArchetype::new(),
            entity_registry: AHashMap::new(),
            added: Vec::new(),
            removed: Vec::new(),
        }
    }

    /// Spawn an organism with an empty compound bag
    pub fn spawn_organism(&mut self) -> EntityId {
        let entity_id = EntityId::new();
        let index = self.organisms.spawn(entity_id, self.current_tick);
        self.entity_registry.insert(entity_id, index);
        self.added.push(entity_id);
        entity_id
    }

    /// Despawn an organism; its archetype slot is marked dead
    pub fn despawn_organism(&mut self, entity_id: EntityId) {
        if let Some(index) = self.entity_registry.remove(&entity_id) {
            self.organisms.kill(index);
            self.removed.push(entity_id);
        }
    }

    /// Archetype index for an entity, if it is still alive
    pub fn index_of(&self, entity_id: EntityId) -> Option<usize> {
        self.entity_registry.get(&entity_id).copied()
    }

    /// Compound bag of a living entity
    pub fn bag(&self, entity_id: EntityId) -> Result<&CompoundBag> {
        self.index_of(entity_id)
            .map(|index| &self.organisms.bags[index])
            .ok_or(SimError::EntityNotFound(entity_id))
    }

    /// Mutable compound bag of a living entity
    pub fn bag_mut(&mut self, entity_id: EntityId) -> Result<&mut CompoundBag> {
        match self.index_of(entity_id) {
            Some(index) => Ok(&mut self.organisms.bags[index]),
            None => Err(SimError::EntityNotFound(entity_id)),
        }
    }

    pub fn entity_count(&self) -> usize {
        self.organisms.count()
    }

    /// Advance the tick counter
    pub fn tick(&mut self) {
        self.current_tick += 1;
    }

    /// Entities added since the last change flush
    pub fn added_entities(&self) -> &[EntityId] {
        &self.added
    }

    /// Entities removed since the last change flush
    pub fn removed_entities(&self) -> &[EntityId] {
        &self.removed
    }

    /// Drain the change lists, returning what was pending
    ///
    /// Called once per tick by the tick system after it has observed the
    /// changes.
    pub fn clear_changes(&mut self) -> (Vec<EntityId>, Vec<EntityId>) {
        (
            std::mem::take(&mut self.added),
            std::mem::take(&mut self.removed),
        )
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
