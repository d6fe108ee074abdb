//! Chemistry layer - compounds, processes, profiles, and the rate model

pub mod bag;
pub mod catalog;
pub mod profile;
pub mod rate;

pub use bag::CompoundBag;
pub use catalog::{BioProcess, CatalogError, ProcessCatalog};
pub use profile::{ProcessorProfile, ProfileId, ProfileRegistry, Threshold};
pub use rate::{pressure, process_rate, SMOOTHING_FACTOR};
