//! Tick system - orchestrates simulation updates
//!
//! Each tick: flush the world's entity change lists (additions/removals
//! are observed and surfaced as events; nothing else reacts to them yet),
//! run the metabolism pass over every living organism, then advance the
//! tick counter.

use crate::chemistry::catalog::ProcessCatalog;
use crate::chemistry::profile::ProfileRegistry;
use crate::core::types::{EntityId, ProcessId, Tick};
use crate::ecs::world::World;
use crate::simulation::metabolism::tick_metabolism;

/// Events generated during a simulation tick
///
/// Returned by [`run_simulation_tick`] so the host can log or display them.
#[derive(Debug, Clone)]
pub enum SimulationEvent {
    /// An organism entered the simulation since the last tick
    OrganismAdded { entity: EntityId, tick: Tick },
    /// An organism left the simulation since the last tick
    OrganismRemoved { entity: EntityId, tick: Tick },
    /// A metabolic process ran for an organism
    ProcessRan {
        entity: EntityId,
        /// Archetype index, stable within the tick
        organism_idx: usize,
        process: ProcessId,
        /// Rate the process ran at
        rate: f32,
        tick: Tick,
    },
}

/// Advance the simulation by one tick
///
/// The profile registry and catalog are borrowed shared for the whole
/// tick, so configuration cannot change mid-pass.
pub fn run_simulation_tick(
    world: &mut World,
    profiles: &ProfileRegistry,
    catalog: &ProcessCatalog,
) -> Vec<SimulationEvent> {
    let tick = world.current_tick;
    let mut events = Vec::new();

    // Observe entity churn since the last tick. Nothing downstream
    // consumes these yet; the hook is kept for future systems.
    let (added, removed) = world.clear_changes();
    for entity in added {
        tracing::trace!(?entity, tick, "organism added");
        events.push(SimulationEvent::OrganismAdded { entity, tick });
    }
    for entity in removed {
        tracing::trace!(?entity, tick, "organism removed");
        events.push(SimulationEvent::OrganismRemoved { entity, tick });
    }

    let results = tick_metabolism(&mut world.organisms, profiles, catalog, &world.config);

    tracing::debug!(
        tick,
        organisms = world.organisms.count(),
        processes_ran = results.len(),
        "metabolism pass complete"
    );

    for result in results {
        events.push(SimulationEvent::ProcessRan {
            entity: world.organisms.ids[result.organism_idx],
            organism_idx: result.organism_idx,
            process: result.process,
            rate: result.rate,
            tick,
        });
    }

    world.tick();
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chemistry::catalog::{defaults, ProcessCatalog};
    use crate::chemistry::profile::ProcessorProfile;

    #[test]
    fn test_tick_advances_counter() {
        let mut world = World::new();
        let profiles = ProfileRegistry::new();
        let catalog = ProcessCatalog::with_defaults();

        run_simulation_tick(&mut world, &profiles, &catalog);
        run_simulation_tick(&mut world, &profiles, &catalog);
        assert_eq!(world.current_tick, 2);
    }

    #[test]
    fn test_tick_reports_entity_churn_once() {
        let mut world = World::new();
        let profiles = ProfileRegistry::new();
        let catalog = ProcessCatalog::with_defaults();

        let id = world.spawn_organism();
        let events = run_simulation_tick(&mut world, &profiles, &catalog);
        assert!(events
            .iter()
            .any(|e| matches!(e, SimulationEvent::OrganismAdded { entity, .. } if *entity == id)));

        // Change lists were drained: the next tick reports nothing
        let events = run_simulation_tick(&mut world, &profiles, &catalog);
        assert!(events.is_empty());
    }

    #[test]
    fn test_tick_emits_process_events() {
        let mut world = World::new();
        let catalog = ProcessCatalog::with_defaults();

        let mut profile = ProcessorProfile::new();
        profile.set_threshold(defaults::GLUCOSE, 0.0, 100.0);
        profile.set_threshold(defaults::PYRUVATE, 10.0, 20.0);
        profile.set_threshold(defaults::ATP, 10.0, 20.0);
        profile.set_capacity(defaults::GLYCOLYSIS, 1.0);

        let mut profiles = ProfileRegistry::new();
        let profile_id = profiles.register(profile);

        let id = world.spawn_organism();
        let idx = world.index_of(id).unwrap();
        world.organisms.bags[idx].give(defaults::GLUCOSE, 50.0);
        // Starved traces of both outputs so glycolysis has demand to vent
        // into: pressure 1 - 1/10 = 0.9 each
        world.organisms.bags[idx].give(defaults::PYRUVATE, 1.0);
        world.organisms.bags[idx].give(defaults::ATP, 1.0);
        world.organisms.bags[idx].bind_processor(profile_id);

        let events = run_simulation_tick(&mut world, &profiles, &catalog);

        let ran: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                SimulationEvent::ProcessRan {
                    entity,
                    process,
                    rate,
                    ..
                } => Some((*entity, *process, *rate)),
                _ => None,
            })
            .collect();

        // raw = 0.9 - 0.0 -> rate 0.09
        assert_eq!(ran.len(), 1);
        assert_eq!(ran[0].0, id);
        assert_eq!(ran[0].1, defaults::GLYCOLYSIS);
        assert!((ran[0].2 - 0.09).abs() < 1e-6);

        // Stocks moved at the catalog's ratios (glucose 1.0, outputs 2.0)
        let bag = &world.organisms.bags[idx];
        assert!((bag.amount(defaults::GLUCOSE) - 49.91).abs() < 1e-4);
        assert!((bag.amount(defaults::PYRUVATE) - 1.18).abs() < 1e-4);
        assert!((bag.amount(defaults::ATP) - 1.18).abs() < 1e-4);
    }
}
