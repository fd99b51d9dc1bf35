// material/ligand.rs
// Organic linker table: porosity multiplier applied to capacity

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::table_key;
use crate::error::{is_positive, Error, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LigandProperties {
    pub name: String,
    /// Capacity multiplier from the pore volume the linker opens up
    pub porosity: f64,
}

const CURATED_LIGANDS: &[(&str, f64)] = &[
    ("BDC", 1.10),
    ("BTC", 1.20),
    ("DOBDC", 1.15),
    ("BPDC", 1.05),
    ("NDC", 1.08),
    ("TPA", 1.12),
    ("4,4-bipyridine", 1.18),
    ("Isonicotinic acid", 1.06),
];

static CURATED: Lazy<LigandTable> = Lazy::new(|| {
    let mut table = LigandTable::default();
    for &(name, porosity) in CURATED_LIGANDS {
        table.push(LigandProperties { name: name.to_string(), porosity });
    }
    table
});

#[derive(Clone, Debug, Default)]
pub struct LigandTable {
    entries: Vec<LigandProperties>,
    index: HashMap<String, usize>,
}

impl LigandTable {
    /// Porosity of a ligand nobody has characterized.
    pub const NEUTRAL_POROSITY: f64 = 1.0;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn curated() -> &'static LigandTable {
        &CURATED
    }

    pub fn insert(&mut self, props: LigandProperties) -> Result<()> {
        if !is_positive(props.porosity) {
            return Err(Error::InvalidTableEntry {
                key: props.name,
                reason: format!("porosity must be positive, got {}", props.porosity),
            });
        }
        if self.index.contains_key(&table_key(&props.name)) {
            return Err(Error::InvalidTableEntry {
                key: props.name,
                reason: "duplicate ligand".to_string(),
            });
        }
        self.push(props);
        Ok(())
    }

    fn push(&mut self, props: LigandProperties) {
        self.index.insert(table_key(&props.name), self.entries.len());
        self.entries.push(props);
    }

    pub fn get(&self, ligand: &str) -> Option<&LigandProperties> {
        self.index.get(&table_key(ligand)).map(|&i| &self.entries[i])
    }

    /// Porosity multiplier, 1.0 for unrecognized ligands.
    pub fn porosity(&self, ligand: &str) -> f64 {
        self.get(ligand)
            .map(|l| l.porosity)
            .unwrap_or(Self::NEUTRAL_POROSITY)
    }

    /// Position of `ligand` in table order (used by feature encoding)
    pub fn position(&self, ligand: &str) -> Option<usize> {
        self.index.get(&table_key(ligand)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LigandProperties> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
