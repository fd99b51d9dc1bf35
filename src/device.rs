// device.rs
// Cell configuration: which material is measured, and how

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};
use crate::material::{MaterialTables, MetalProperties};

/// Measurement cell assembly
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssemblyType {
    /// Working electrode against reference and counter electrodes
    #[serde(alias = "Three-Electrode")]
    ThreeElectrode,
    /// Full device (hybrid or asymmetric)
    #[serde(alias = "Two-Electrode")]
    TwoElectrode,
    /// Two identical electrodes
    Symmetric,
}

impl AssemblyType {
    pub const ALL: [AssemblyType; 3] = [
        AssemblyType::ThreeElectrode,
        AssemblyType::TwoElectrode,
        AssemblyType::Symmetric,
    ];

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            AssemblyType::ThreeElectrode => "Three-Electrode",
            AssemblyType::TwoElectrode => "Two-Electrode",
            AssemblyType::Symmetric => "Symmetric",
        }
    }
}

impl fmt::Display for AssemblyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Everything the estimator needs to know about one electrode.
///
/// Fields are private so a constructed configuration always carries a valid
/// valency and cannot change afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Configuration {
    metal: MetalProperties,
    valency: u32,
    ligand: String,
    assembly: AssemblyType,
    electrode: String,
    is_mof: bool,
}

impl Configuration {
    pub fn new(
        metal: MetalProperties,
        valency: u32,
        ligand: impl Into<String>,
        assembly: AssemblyType,
        electrode: impl Into<String>,
        is_mof: bool,
    ) -> Result<Self> {
        if valency == 0 {
            return Err(Error::InvalidValency(valency));
        }
        Ok(Self {
            metal,
            valency,
            ligand: ligand.into().trim().to_string(),
            assembly,
            electrode: electrode.into().trim().to_string(),
            is_mof,
        })
    }

    /// Build from a metal symbol, resolving it against `tables`.
    pub fn from_symbol(
        tables: &MaterialTables<'_>,
        symbol: &str,
        valency: u32,
        ligand: impl Into<String>,
        assembly: AssemblyType,
        electrode: impl Into<String>,
        is_mof: bool,
    ) -> Result<Self> {
        Self::new(
            tables.metals.resolve(symbol),
            valency,
            ligand,
            assembly,
            electrode,
            is_mof,
        )
    }

    pub fn metal(&self) -> &MetalProperties {
        &self.metal
    }

    pub fn valency(&self) -> u32 {
        self.valency
    }

    pub fn ligand(&self) -> &str {
        &self.ligand
    }

    pub fn assembly(&self) -> AssemblyType {
        self.assembly
    }

    pub fn electrode(&self) -> &str {
        &self.electrode
    }

    pub fn is_mof(&self) -> bool {
        self.is_mof
    }

    /// Literature key, "Metal-Ligand"
    pub fn lookup_key(&self) -> String {
        format!("{}-{}", self.metal.symbol, self.ligand)
    }

    /// Same configuration with a different framework flag
    pub fn with_mof(&self, is_mof: bool) -> Self {
        Self { is_mof, ..self.clone() }
    }

    /// Numeric encoding: one-hot metal, valency/3, one-hot ligand,
    /// three-electrode flag, one-hot electrode, MOF flag.
    /// Names missing from the tables encode as all-zero blocks.
    pub fn feature_vector(&self, tables: &MaterialTables<'_>) -> Vec<f64> {
        let mut features = Vec::with_capacity(
            tables.metals.len() + tables.ligands.len() + tables.electrodes.len() + 3,
        );
        features.extend(
            tables
                .metals
                .iter()
                .map(|m| if m.symbol == self.metal.symbol { 1.0 } else { 0.0 }),
        );
        features.push(self.valency as f64 / 3.0);

        let ligand = tables.ligands.position(&self.ligand);
        features.extend((0..tables.ligands.len()).map(|i| one_hot(ligand, i)));

        features.push(if self.assembly == AssemblyType::ThreeElectrode { 1.0 } else { 0.0 });

        let electrode = tables.electrodes.position(&self.electrode);
        features.extend((0..tables.electrodes.len()).map(|i| one_hot(electrode, i)));

        features.push(if self.is_mof { 1.0 } else { 0.0 });
        features
    }
}

fn one_hot(hit: Option<usize>, i: usize) -> f64 {
    if hit == Some(i) {
        1.0
    } else {
        0.0
    }
}
