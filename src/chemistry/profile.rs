//! Processor profiles - per-organism-type metabolic configuration
//!
//! A profile records which processes an organism type can run (capacities)
//! and the comfortable operating band for each compound (thresholds). One
//! profile is shared by every organism of its type, so bags hold a
//! non-owning `ProfileId` into a caller-owned registry rather than the
//! profile itself.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{CompoundId, ProcessId};

/// Operating band for a compound
///
/// Below `low` the organism is starved of the compound; above `high` it is
/// oversupplied and wants to vent. Callers must keep `low <= high`;
/// `low > high` is undefined behavior at the simulation level, not checked
/// here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub low: f32,
    pub high: f32,
}

impl Threshold {
    pub fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }
}

/// Metabolic configuration shared by all organisms of one type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessorProfile {
    capacities: AHashMap<ProcessId, f32>,
    thresholds: AHashMap<CompoundId, Threshold>,
}

impl ProcessorProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert the operating band for a compound
    ///
    /// Caller contract: `0 <= low <= high`.
    pub fn set_threshold(&mut self, compound: CompoundId, low: f32, high: f32) {
        self.thresholds.insert(compound, Threshold::new(low, high));
    }

    /// Upsert the capacity ceiling for a process
    ///
    /// A process absent from the capacity map is not runnable by this
    /// organism type; registering it (even at 0.0) makes it eligible.
    pub fn set_capacity(&mut self, process: ProcessId, capacity: f32) {
        self.capacities.insert(process, capacity);
    }

    /// Operating band for a compound, `(0, 0)` when unconfigured
    ///
    /// The zero band means any positive stock reads as oversupplied, which
    /// is the defined behavior for compounds nobody configured.
    pub fn threshold(&self, compound: CompoundId) -> Threshold {
        self.thresholds.get(&compound).copied().unwrap_or_default()
    }

    /// Capacity for a process, `None` if the process is not runnable
    pub fn capacity(&self, process: ProcessId) -> Option<f32> {
        self.capacities.get(&process).copied()
    }

    /// Processes this profile can run, with their capacities
    pub fn capacities(&self) -> impl Iterator<Item = (ProcessId, f32)> + '_ {
        self.capacities.iter().map(|(id, cap)| (*id, *cap))
    }
}

/// Handle to a profile inside a [`ProfileRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId(pub u32);

/// Arena of processor profiles
///
/// Owned by whatever system configures organism types; it must outlive
/// every bag holding one of its handles. Borrowed shared for the duration
/// of a simulation pass, so capacities and thresholds cannot change
/// mid-tick.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: Vec<ProcessorProfile>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a profile, returning its handle
    pub fn register(&mut self, profile: ProcessorProfile) -> ProfileId {
        let id = ProfileId(self.profiles.len() as u32);
        self.profiles.push(profile);
        id
    }

    pub fn get(&self, id: ProfileId) -> Option<&ProcessorProfile> {
        self.profiles.get(id.0 as usize)
    }

    /// Mutable access, for configuration between ticks
    pub fn get_mut(&mut self, id: ProfileId) -> Option<&mut ProcessorProfile> {
        self.profiles.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
