//! Compound bag - per-organism compound storage
//!
//! Holds the current quantity of every compound an organism carries, plus
//! the handle of the processor profile that governs its metabolism. `take`
//! is the only removal primitive; quantities never go negative.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::chemistry::profile::ProfileId;
use crate::core::types::CompoundId;

/// Per-organism compound stocks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompoundBag {
    compounds: AHashMap<CompoundId, f32>,
    processor: Option<ProfileId>,
}

impl CompoundBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current quantity of a compound, `0.0` if absent
    pub fn amount(&self, compound: CompoundId) -> f32 {
        self.compounds.get(&compound).copied().unwrap_or(0.0)
    }

    /// Add `amount` of a compound; no upper bound is enforced
    ///
    /// Caller contract: `amount >= 0`.
    pub fn give(&mut self, compound: CompoundId, amount: f32) {
        *self.compounds.entry(compound).or_insert(0.0) += amount;
    }

    /// Remove up to `amount` of a compound, returning how much was removed
    ///
    /// Caller contract: `amount >= 0`. The stock never goes negative.
    pub fn take(&mut self, compound: CompoundId, amount: f32) -> f32 {
        match self.compounds.get_mut(&compound) {
            Some(stock) => {
                let removed = amount.min(*stock);
                *stock -= removed;
                removed
            }
            None => 0.0,
        }
    }

    /// Bind the processor profile governing this bag
    ///
    /// Rebinding is allowed; the new capacities and thresholds apply from
    /// the next tick onward.
    pub fn bind_processor(&mut self, profile: ProfileId) {
        self.processor = Some(profile);
    }

    /// Bound profile handle, if any
    ///
    /// An unbound bag is metabolically inert: the simulation pass skips it.
    pub fn processor(&self) -> Option<ProfileId> {
        self.processor
    }

    /// Compounds currently present, with their quantities
    pub fn compounds(&self) -> impl Iterator<Item = (CompoundId, f32)> + '_ {
        self.compounds.iter().map(|(id, amt)| (*id, *amt))
    }
}
