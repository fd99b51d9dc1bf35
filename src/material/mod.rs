// material/mod.rs
// Static property tables for the electrode's building blocks
//
// This module handles:
// - Metal nodes (redox activity, conductivity, spectroscopic peaks)
// - Organic linkers (porosity)
// - Electrode substrates (capacity boost, collector resistance)
//
// Every table resolves unknown names to a neutral record instead of failing.

pub mod electrode;
pub mod ligand;
pub mod metal;

pub use electrode::{ElectrodeProperties, ElectrodeTable};
pub use ligand::{LigandProperties, LigandTable};
pub use metal::{normalize_symbol, resolve, MetalProperties, MetalTable};

/// Case-insensitive key for name-indexed tables.
pub(crate) fn table_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// The three tables the estimator reads, bundled so they can be swapped together
#[derive(Clone, Copy, Debug)]
pub struct MaterialTables<'a> {
    pub metals: &'a MetalTable,
    pub ligands: &'a LigandTable,
    pub electrodes: &'a ElectrodeTable,
}

impl MaterialTables<'static> {
    pub fn curated() -> Self {
        Self {
            metals: MetalTable::curated(),
            ligands: LigandTable::curated(),
            electrodes: ElectrodeTable::curated(),
        }
    }
}

impl Default for MaterialTables<'static> {
    fn default() -> Self {
        Self::curated()
    }
}
