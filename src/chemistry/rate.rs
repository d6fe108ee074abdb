//! Rate model - pure supply/demand pressure computation
//!
//! Two building blocks, no side effects: [`pressure`] turns a compound's
//! current quantity and its operating band into a signed pressure value,
//! and [`process_rate`] combines the pressures of a process's inputs and
//! outputs into a per-tick throughput rate.

use crate::core::types::CompoundId;

/// Default damping applied to a positive raw rate
pub const SMOOTHING_FACTOR: f32 = 0.1;

/// Signed pressure of a compound against its operating band
///
/// - `value > high`: oversupplied, returns `high - value` (negative, and
///   more negative the further above the band).
/// - `low <= value <= high`: inside the band, returns `0`.
/// - `value < low`: starved, returns `1 - value/low` (positive, approaching
///   1 as the stock approaches 0).
///
/// Caller contract: `value >= 0` and `low <= high`. With `value >= 0` the
/// starved branch is unreachable when `low == 0`, so the division is safe.
pub fn pressure(value: f32, low: f32, high: f32) -> f32 {
    if value > high {
        high - value
    } else if value >= low {
        0.0
    } else {
        1.0 - value / low
    }
}

/// Per-tick throughput rate for a process
///
/// `pressure_of` resolves a compound id to its pressure this tick. Both
/// sides take the maximum pressure over their compound list, seeded at
/// `-1` so an empty list never throttles the process. The raw signal is
/// `output_pressure - input_pressure`: oversupplied outputs and starved
/// inputs both push it up, reflecting a vent/throughput heuristic. This
/// sign convention is deliberate observed behavior; do not invert it.
///
/// A non-positive raw signal means "do not run this tick"; a positive one
/// is damped by `smoothing` so stocks move gradually.
pub fn process_rate(
    inputs: &[(CompoundId, f32)],
    outputs: &[(CompoundId, f32)],
    pressure_of: impl Fn(CompoundId) -> f32,
    smoothing: f32,
) -> f32 {
    let mut input_pressure = -1.0f32;
    for (compound, _) in inputs {
        input_pressure = input_pressure.max(pressure_of(*compound));
    }

    let mut output_pressure = -1.0f32;
    for (compound, _) in outputs {
        output_pressure = output_pressure.max(pressure_of(*compound));
    }

    let raw = output_pressure - input_pressure;
    if raw > 0.0 {
        raw * smoothing
    } else {
        0.0
    }
}
