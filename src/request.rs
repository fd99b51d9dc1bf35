// request.rs
// Handles loading and saving prediction requests from TOML files

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config;
use crate::device::{AssemblyType, Configuration};
use crate::error::Result;
use crate::gcd::VoltageWindow;
use crate::material::MaterialTables;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Score the prediction against the literature catalog
    #[serde(default = "default_compare")]
    pub compare: bool,
    pub material: MaterialSpec,
    #[serde(default)]
    pub gcd: GcdSettings,
    #[serde(default)]
    pub eis: EisSettings,
    #[serde(default)]
    pub ies: IesSettings,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    /// Any element symbol; unknown metals use neutral properties
    pub metal: String,
    pub valency: u32,
    pub ligand: String,
    #[serde(default = "default_assembly")]
    pub assembly: AssemblyType,
    pub electrode: String,
    #[serde(default = "default_is_mof")]
    pub is_mof: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GcdSettings {
    #[serde(default = "default_current_densities")]
    pub current_densities: Vec<f64>,
    #[serde(default = "default_v_min")]
    pub v_min: f64,
    #[serde(default = "default_v_max")]
    pub v_max: f64,
    #[serde(default = "default_t_max_h")]
    pub t_max_h: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EisSettings {
    #[serde(default = "default_z_max_ohm")]
    pub z_max_ohm: f64,
    #[serde(default = "default_eis_points")]
    pub points: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IesSettings {
    #[serde(default = "default_e_max_ev")]
    pub e_max_ev: f64,
    #[serde(default = "default_ies_points")]
    pub points: usize,
}

fn default_compare() -> bool {
    true
}

fn default_assembly() -> AssemblyType {
    AssemblyType::TwoElectrode
}

fn default_is_mof() -> bool {
    true
}

fn default_current_densities() -> Vec<f64> {
    config::DEFAULT_CURRENT_DENSITIES.to_vec()
}

fn default_v_min() -> f64 {
    config::DEFAULT_V_MIN
}

fn default_v_max() -> f64 {
    config::DEFAULT_V_MAX
}

fn default_t_max_h() -> f64 {
    config::DEFAULT_T_MAX_H
}

fn default_z_max_ohm() -> f64 {
    config::DEFAULT_Z_MAX_OHM
}

fn default_eis_points() -> usize {
    config::DEFAULT_EIS_POINTS
}

fn default_e_max_ev() -> f64 {
    config::DEFAULT_IES_E_MAX_EV
}

fn default_ies_points() -> usize {
    config::DEFAULT_IES_POINTS
}

impl Default for GcdSettings {
    fn default() -> Self {
        Self {
            current_densities: default_current_densities(),
            v_min: default_v_min(),
            v_max: default_v_max(),
            t_max_h: default_t_max_h(),
        }
    }
}

impl GcdSettings {
    pub fn window(&self) -> VoltageWindow {
        VoltageWindow { v_min: self.v_min, v_max: self.v_max }
    }
}

impl Default for EisSettings {
    fn default() -> Self {
        Self { z_max_ohm: default_z_max_ohm(), points: default_eis_points() }
    }
}

impl Default for IesSettings {
    fn default() -> Self {
        Self { e_max_ev: default_e_max_ev(), points: default_ies_points() }
    }
}

impl MaterialSpec {
    pub fn configuration(&self, tables: &MaterialTables<'_>) -> Result<Configuration> {
        Configuration::from_symbol(
            tables,
            &self.metal,
            self.valency,
            self.ligand.as_str(),
            self.assembly,
            self.electrode.as_str(),
            self.is_mof,
        )
    }
}

impl PredictionRequest {
    /// Default sweep settings for the given material
    pub fn new(material: MaterialSpec) -> Self {
        Self {
            compare: default_compare(),
            material,
            gcd: GcdSettings::default(),
            eis: EisSettings::default(),
            ies: IesSettings::default(),
        }
    }

    /// Cu / 4,4-bipyridine hybrid device on nickel foam
    pub fn template() -> Self {
        Self::new(MaterialSpec {
            metal: "Cu".to_string(),
            valency: 2,
            ligand: "4,4-bipyridine".to_string(),
            assembly: AssemblyType::TwoElectrode,
            electrode: "Nickel Foam".to_string(),
            is_mof: true,
        })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load a request from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let request = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), metal = %request.material.metal, "loaded request");
        Ok(request)
    }

    /// Save the request to a TOML file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_toml_string()?)?;
        tracing::info!(path = %path.display(), "wrote request");
        Ok(())
    }
}
