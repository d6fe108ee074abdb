//! Metabolism system - runs every organism's processes each tick
//!
//! For each living organism the pass:
//! 1. Snapshots a pressure value for every compound currently in its bag
//!    (default `(0, 0)` band for unconfigured compounds).
//! 2. Computes a rate for every process in its profile's capacities via the
//!    rate model and the catalog's input/output lists.
//! 3. Checks feasibility: if any input would be consumed at or beyond its
//!    current stock, the process does not run at all this tick.
//! 4. Applies the deltas: `rate * ratio` taken from every input, given to
//!    every output.
//!
//! Organisms are mutually independent within a tick, so the pass runs
//! organism-parallel with rayon; each bag is exclusively borrowed for the
//! duration of its own read-then-write sequence.

use ahash::AHashMap;
use rayon::prelude::*;

use crate::chemistry::bag::CompoundBag;
use crate::chemistry::catalog::ProcessCatalog;
use crate::chemistry::profile::ProfileRegistry;
use crate::chemistry::rate::{pressure, process_rate};
use crate::core::config::SimulationConfig;
use crate::core::types::{CompoundId, ProcessId};
use crate::entity::organism::OrganismArchetype;

/// One process firing during a metabolism pass
#[derive(Debug, Clone, PartialEq)]
pub struct MetabolismResult {
    /// Archetype index of the organism that ran the process
    pub organism_idx: usize,
    /// Process that ran
    pub process: ProcessId,
    /// Rate it ran at this tick
    pub rate: f32,
}

/// Run the metabolism pass over all living organisms
///
/// Results are returned in organism index order, so output is deterministic
/// for a given world state even though organisms are processed in parallel.
pub fn tick_metabolism(
    organisms: &mut OrganismArchetype,
    profiles: &ProfileRegistry,
    catalog: &ProcessCatalog,
    config: &SimulationConfig,
) -> Vec<MetabolismResult> {
    let alive = &organisms.alive;

    let per_organism: Vec<Vec<MetabolismResult>> = organisms
        .bags
        .par_iter_mut()
        .enumerate()
        .map(|(idx, bag)| {
            if !alive.get(idx).copied().unwrap_or(false) {
                return Vec::new();
            }
            step_organism(idx, bag, profiles, catalog, config)
        })
        .collect();

    per_organism.into_iter().flatten().collect()
}

/// Rate and apply every eligible process for one organism
fn step_organism(
    idx: usize,
    bag: &mut CompoundBag,
    profiles: &ProfileRegistry,
    catalog: &ProcessCatalog,
    config: &SimulationConfig,
) -> Vec<MetabolismResult> {
    // An unbound bag (or a stale handle) is metabolically inert
    let profile = match bag.processor().and_then(|id| profiles.get(id)) {
        Some(p) => p,
        None => return Vec::new(),
    };

    // Pressure snapshot covers only compounds present in the bag; anything
    // a process references but the bag lacks reads as pressure 0.0 below.
    let mut pressures: AHashMap<CompoundId, f32> = AHashMap::new();
    for (compound, stock) in bag.compounds() {
        let band = profile.threshold(compound);
        pressures.insert(compound, pressure(stock, band.low, band.high));
    }

    let mut results = Vec::new();
    for (process, _capacity) in profile.capacities() {
        let inputs = catalog.inputs(process);
        let outputs = catalog.outputs(process);

        // Capacity gates eligibility only; the computed rate is not clamped
        // to it.
        let rate = process_rate(
            inputs,
            outputs,
            |c| pressures.get(&c).copied().unwrap_or(0.0),
            config.smoothing_factor,
        ) * config.time_scale;

        // All-or-nothing feasibility: consuming at or beyond the current
        // stock of any single input blocks the whole process this tick.
        let will_run = inputs
            .iter()
            .all(|(compound, ratio)| rate * ratio < bag.amount(*compound));
        if !will_run {
            continue;
        }

        for (compound, ratio) in inputs {
            bag.take(*compound, rate * ratio);
        }
        for (compound, ratio) in outputs {
            bag.give(*compound, rate * ratio);
        }

        if rate > 0.0 {
            results.push(MetabolismResult {
                organism_idx: idx,
                process,
                rate,
            });
        }
    }

    results
}
