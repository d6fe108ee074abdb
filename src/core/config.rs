//! Simulation configuration with documented constants
//!
//! All tuning values for the metabolism loop are collected here with
//! explanations of their purpose and how they interact with each other.

/// Configuration for the metabolic simulation
///
/// These values reproduce the observed dynamics of the reference chemistry.
/// Changing them will affect how quickly organisms burn through and
/// accumulate compounds.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Damping applied to a positive raw process rate
    ///
    /// A process never converts its full pressure signal in a single tick;
    /// the raw rate is multiplied by this factor so stocks drain and fill
    /// gradually instead of overshooting their bands. At the default (0.1)
    /// a sustained pressure of 0.5 moves 0.05 units of a ratio-1.0 compound
    /// per tick.
    pub smoothing_factor: f32,

    /// Global multiplier on computed process rates
    ///
    /// Applied before the feasibility check, so scaled rates still respect
    /// available stock. Left at 1.0 the simulation runs in real tick time;
    /// hosts that tick at a different cadence can compress or stretch
    /// chemistry without retuning thresholds.
    pub time_scale: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            smoothing_factor: crate::chemistry::rate::SMOOTHING_FACTOR,
            time_scale: 1.0,
        }
    }
}
