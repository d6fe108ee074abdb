pub mod metabolism;
pub mod tick;

pub use metabolism::{tick_metabolism, MetabolismResult};
pub use tick::{run_simulation_tick, SimulationEvent};
