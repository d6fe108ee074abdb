//! Process catalog - defines what metabolic processes convert
//!
//! A process owns an ordered list of input compounds and an ordered list of
//! output compounds, each with a stoichiometric ratio: the units of that
//! compound consumed or produced per unit of process rate.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{CompoundId, ProcessId};

/// A metabolic conversion rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BioProcess {
    /// Unique identifier
    pub id: ProcessId,
    /// Human-readable name
    pub name: String,
    /// Input compounds consumed, ratio units per unit of rate
    pub inputs: Vec<(CompoundId, f32)>,
    /// Output compounds produced, ratio units per unit of rate
    pub outputs: Vec<(CompoundId, f32)>,
}

/// Catalog of all known processes
///
/// Lookups must be total for any process id present in a processor
/// profile's capacities; unknown ids resolve to empty input and output
/// lists so the tick loop degrades to "process does nothing" instead of
/// failing.
#[derive(Debug, Clone, Default)]
pub struct ProcessCatalog {
    processes: AHashMap<ProcessId, BioProcess>,
}

/// Compound and process ids used by the built-in chemistry
pub mod defaults {
    use crate::core::types::{CompoundId, ProcessId};

    pub const GLUCOSE: CompoundId = CompoundId(0);
    pub const PYRUVATE: CompoundId = CompoundId(1);
    pub const ATP: CompoundId = CompoundId(2);
    pub const OXYGEN: CompoundId = CompoundId(3);
    pub const CO2: CompoundId = CompoundId(4);

    pub const GLYCOLYSIS: ProcessId = ProcessId(0);
    pub const RESPIRATION: ProcessId = ProcessId(1);
    pub const PHOTOSYNTHESIS: ProcessId = ProcessId(2);
}

impl ProcessCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the built-in microbial chemistry
    pub fn with_defaults() -> Self {
        use defaults::*;

        let mut catalog = Self::new();

        catalog.add(BioProcess {
            id: GLYCOLYSIS,
            name: "Glycolysis".into(),
            inputs: vec![(GLUCOSE, 1.0)],
            outputs: vec![(PYRUVATE, 2.0), (ATP, 2.0)],
        });

        catalog.add(BioProcess {
            id: RESPIRATION,
            name: "Respiration".into(),
            inputs: vec![(PYRUVATE, 1.0), (OXYGEN, 3.0)],
            outputs: vec![(ATP, 15.0), (CO2, 3.0)],
        });

        catalog.add(BioProcess {
            id: PHOTOSYNTHESIS,
            name: "Photosynthesis".into(),
            inputs: vec![(CO2, 6.0)],
            outputs: vec![(GLUCOSE, 1.0), (OXYGEN, 6.0)],
        });

        catalog
    }

    /// Add a process to the catalog, replacing any previous definition
    pub fn add(&mut self, process: BioProcess) {
        self.processes.insert(process.id, process);
    }

    /// Get a process by id
    pub fn get(&self, id: ProcessId) -> Option<&BioProcess> {
        self.processes.get(&id)
    }

    /// Ordered input list for a process, empty for unknown ids
    pub fn inputs(&self, id: ProcessId) -> &[(CompoundId, f32)] {
        match self.processes.get(&id) {
            Some(p) => &p.inputs,
            None => &[],
        }
    }

    /// Ordered output list for a process, empty for unknown ids
    pub fn outputs(&self, id: ProcessId) -> &[(CompoundId, f32)] {
        match self.processes.get(&id) {
            Some(p) => &p.outputs,
            None => &[],
        }
    }

    /// All registered processes, in no particular order
    pub fn all(&self) -> impl Iterator<Item = &BioProcess> {
        self.processes.values()
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Load a catalog from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::IoError(e.to_string()))?;
        Self::parse_toml(&content)
    }

    /// Parse a catalog from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self, CatalogError> {
        let toml_data: TomlProcesses =
            toml::from_str(content).map_err(|e| CatalogError::ParseError(e.to_string()))?;

        let mut catalog = Self::new();
        for process in toml_data.processes {
            catalog.add(process.into_process()?);
        }
        Ok(catalog)
    }
}

/// Error type for catalog loading
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Process '{name}' has non-positive ratio {ratio} for compound {compound}")]
    InvalidRatio {
        name: String,
        compound: u32,
        ratio: f32,
    },
}

/// TOML representation of a catalog file
#[derive(Debug, Deserialize)]
struct TomlProcesses {
    processes: Vec<TomlProcess>,
}

/// TOML representation of a single process
#[derive(Debug, Deserialize)]
struct TomlProcess {
    id: u32,
    name: String,
    #[serde(default)]
    inputs: Vec<TomlCompoundRatio>,
    outputs: Vec<TomlCompoundRatio>,
}

/// TOML representation of one (compound, ratio) pair
#[derive(Debug, Deserialize)]
struct TomlCompoundRatio {
    compound: u32,
    ratio: f32,
}

impl TomlProcess {
    fn into_process(self) -> Result<BioProcess, CatalogError> {
        let check = |name: &str, pairs: &[TomlCompoundRatio]| -> Result<(), CatalogError> {
            for pair in pairs {
                if pair.ratio <= 0.0 {
                    return Err(CatalogError::InvalidRatio {
                        name: name.into(),
                        compound: pair.compound,
                        ratio: pair.ratio,
                    });
                }
            }
            Ok(())
        };
        check(&self.name, &self.inputs)?;
        check(&self.name, &self.outputs)?;

        let convert = |pairs: Vec<TomlCompoundRatio>| {
            pairs
                .into_iter()
                .map(|p| (CompoundId(p.compound), p.ratio))
                .collect::<Vec<_>>()
        };

        Ok(BioProcess {
            id: ProcessId(self.id),
            name: self.name,
            inputs: convert(self.inputs),
            outputs: convert(self.outputs),
        })
    }
}
