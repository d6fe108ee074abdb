pub mod organism;

pub use organism::OrganismArchetype;
