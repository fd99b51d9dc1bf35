// estimator.rs
// Closed-form performance metrics from a cell configuration

use serde::{Deserialize, Serialize};

use crate::config;
use crate::device::{AssemblyType, Configuration};
use crate::material::MaterialTables;

/// Scalar figures of merit the curve generators start from
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Specific discharge capacity (mAh/g)
    pub capacity_mah_g: f64,
    /// Intrinsic cell resistance (Ω)
    pub base_resistance_ohm: f64,
    /// Fraction of capacity kept after long cycling, in [0, 1]
    pub retention_fraction: f64,
}

/// Multipliers of the estimator formulas. None of these are fitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConstants {
    pub base_capacity_mah_g: f64,
    pub mof_bonus: f64,
    pub three_electrode_capacity_factor: f64,
    pub base_resistance_ohm: f64,
    pub three_electrode_resistance_factor: f64,
    pub two_electrode_resistance_factor: f64,
    pub symmetric_resistance_factor: f64,
    pub retention_base: f64,
}

impl Default for EstimatorConstants {
    fn default() -> Self {
        Self {
            base_capacity_mah_g: config::BASE_CAPACITY_MAH_G,
            mof_bonus: config::MOF_BONUS,
            three_electrode_capacity_factor: config::THREE_ELECTRODE_CAPACITY_FACTOR,
            base_resistance_ohm: config::BASE_RESISTANCE_OHM,
            three_electrode_resistance_factor: config::THREE_ELECTRODE_RESISTANCE_FACTOR,
            two_electrode_resistance_factor: config::TWO_ELECTRODE_RESISTANCE_FACTOR,
            symmetric_resistance_factor: config::SYMMETRIC_RESISTANCE_FACTOR,
            retention_base: config::RETENTION_BASE,
        }
    }
}

impl EstimatorConstants {
    pub fn assembly_capacity_factor(&self, assembly: AssemblyType) -> f64 {
        match assembly {
            AssemblyType::ThreeElectrode => self.three_electrode_capacity_factor,
            AssemblyType::TwoElectrode | AssemblyType::Symmetric => 1.0,
        }
    }

    /// Three-electrode cells exclude the counter electrode from the reading
    pub fn assembly_resistance_factor(&self, assembly: AssemblyType) -> f64 {
        match assembly {
            AssemblyType::ThreeElectrode => self.three_electrode_resistance_factor,
            AssemblyType::TwoElectrode => self.two_electrode_resistance_factor,
            AssemblyType::Symmetric => self.symmetric_resistance_factor,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PerformanceEstimator<'a> {
    tables: MaterialTables<'a>,
    constants: EstimatorConstants,
}

impl Default for PerformanceEstimator<'static> {
    fn default() -> Self {
        Self::new(MaterialTables::curated(), EstimatorConstants::default())
    }
}

impl<'a> PerformanceEstimator<'a> {
    pub fn new(tables: MaterialTables<'a>, constants: EstimatorConstants) -> Self {
        Self { tables, constants }
    }

    pub fn constants(&self) -> &EstimatorConstants {
        &self.constants
    }

    pub fn tables(&self) -> &MaterialTables<'a> {
        &self.tables
    }

    pub fn estimate(&self, config: &Configuration) -> PerformanceMetrics {
        PerformanceMetrics {
            capacity_mah_g: self.capacity(config),
            base_resistance_ohm: self.base_resistance(config),
            retention_fraction: self.retention(config),
        }
    }

    /// Capacity grows with sqrt(valency): each extra electron per metal
    /// is harder to access than the last.
    pub fn capacity(&self, config: &Configuration) -> f64 {
        let c = &self.constants;
        let mof = if config.is_mof() { c.mof_bonus } else { 1.0 };
        c.base_capacity_mah_g
            * config.metal().redox_factor
            * self.tables.ligands.porosity(config.ligand())
            * (config.valency() as f64).sqrt()
            * self.tables.electrodes.capacity_boost(config.electrode())
            * c.assembly_capacity_factor(config.assembly())
            * mof
    }

    pub fn base_resistance(&self, config: &Configuration) -> f64 {
        let c = &self.constants;
        c.base_resistance_ohm
            * self.tables.electrodes.resistance_factor(config.electrode())
            * c.assembly_resistance_factor(config.assembly())
            / config.metal().conductivity
    }

    pub fn retention(&self, config: &Configuration) -> f64 {
        let metal = config.metal();
        let raw = self.constants.retention_base * metal.conductivity * metal.redox_factor.sqrt();
        raw.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{resolve, MetalProperties, MetalTable};

    fn config(
        symbol: &str,
        valency: u32,
        ligand: &str,
        electrode: &str,
        is_mof: bool,
    ) -> Configuration {
        Configuration::new(
            resolve(symbol),
            valency,
            ligand,
            AssemblyType::TwoElectrode,
            electrode,
            is_mof,
        )
        .unwrap()
    }

    #[test]
    fn cu_bdc_exact_values() {
        let m = PerformanceEstimator::default()
            .estimate(&config("Cu", 2, "BDC", "Glassy Carbon", true));
        let expected_capacity = 100.0 * 1.2 * 1.1 * 2f64.sqrt() * 1.5;
        assert!((m.capacity_mah_g - expected_capacity).abs() < 1e-9);
        assert!((m.base_resistance_ohm - 14.0 / 1.15).abs() < 1e-9);
        assert!((m.retention_fraction - 0.36 * 1.15 * 1.2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn neutral_inputs_give_base_values() {
        let m = PerformanceEstimator::default()
            .estimate(&config("Ru", 1, "unknown", "unknown", false));
        assert_eq!(m.capacity_mah_g, 100.0);
        assert_eq!(m.base_resistance_ohm, 14.0);
        assert_eq!(m.retention_fraction, 0.36);
    }

    #[test]
    fn three_electrode_reads_lower_resistance() {
        let est = PerformanceEstimator::default();
        let base = config("Ni", 2, "BTC", "Nickel Foam", true);
        let three = Configuration::new(
            base.metal().clone(),
            2,
            "BTC",
            AssemblyType::ThreeElectrode,
            "Nickel Foam",
            true,
        )
        .unwrap();
        let symmetric = Configuration::new(
            base.metal().clone(),
            2,
            "BTC",
            AssemblyType::Symmetric,
            "Nickel Foam",
            true,
        )
        .unwrap();
        let r_two = est.base_resistance(&base);
        assert!(est.base_resistance(&three) < r_two);
        assert!(r_two < est.base_resistance(&symmetric));
    }

    #[test]
    fn better_collector_lowers_resistance() {
        let est = PerformanceEstimator::default();
        let foam = est.base_resistance(&config("Co", 2, "BDC", "Nickel Foam", true));
        let steel = est.base_resistance(&config("Co", 2, "BDC", "Stainless Steel", true));
        assert!(foam < steel);
    }

    #[test]
    fn valency_has_diminishing_returns() {
        let est = PerformanceEstimator::default();
        let caps: Vec<f64> = (1..=4)
            .map(|v| est.capacity(&config("Fe", v, "TPA", "Carbon Cloth", true)))
            .collect();
        for w in caps.windows(2) {
            assert!(w[1] > w[0]);
        }
        assert!(caps[1] - caps[0] > caps[2] - caps[1]);
    }

    #[test]
    fn retention_is_clamped_for_extreme_substitute_metals() {
        let mut metals = MetalTable::new();
        let mut hot = MetalProperties::neutral("Xx");
        hot.conductivity = 10.0;
        hot.redox_factor = 10.0;
        metals.insert(hot).unwrap();
        let tables = MaterialTables { metals: &metals, ..MaterialTables::curated() };
        let est = PerformanceEstimator::new(tables, EstimatorConstants::default());
        let cfg =
            Configuration::from_symbol(&tables, "Xx", 3, "BDC", AssemblyType::Symmetric, "", true)
                .unwrap();
        assert_eq!(est.retention(&cfg), 1.0);
    }

    #[test]
    fn injected_constants_change_output() {
        let constants = EstimatorConstants { mof_bonus: 2.0, ..EstimatorConstants::default() };
        let est = PerformanceEstimator::new(MaterialTables::curated(), constants);
        let cfg = config("Ru", 1, "x", "y", true);
        assert_eq!(est.capacity(&cfg), 200.0);
    }
}
