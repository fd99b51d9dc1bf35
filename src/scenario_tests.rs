// scenario_tests.rs
// End-to-end properties of the prediction pipeline

use proptest::prelude::*;

use crate::comparison::{pct_diff, AgreementLevel, ComparisonEngine};
use crate::device::{AssemblyType, Configuration};
use crate::eis::EisCurveGenerator;
use crate::error::Error;
use crate::estimator::PerformanceEstimator;
use crate::gcd::{GcdCurveGenerator, VoltageWindow};
use crate::material::{resolve, MaterialTables};
use crate::predictor::Predictor;
use crate::request::{MaterialSpec, PredictionRequest};

const METALS: &[&str] = &[
    "Cu", "Ni", "Co", "Zn", "Fe", "Mn", "Ag", "Pt", "W", "Ru", "Xx", "li",
];
const LIGANDS: &[&str] = &["BDC", "BTC", "DOBDC", "TPA", "4,4-bipyridine", "Custom"];
const ELECTRODES: &[&str] = &[
    "Nickel Foam",
    "Glassy Carbon",
    "Carbon Cloth",
    "Stainless Steel",
    "Paper",
];

fn configuration() -> impl Strategy<Value = Configuration> {
    (
        prop::sample::select(METALS),
        1u32..=10,
        prop::sample::select(LIGANDS),
        prop::sample::select(AssemblyType::ALL.to_vec()),
        prop::sample::select(ELECTRODES),
        any::<bool>(),
    )
        .prop_map(|(metal, valency, ligand, assembly, electrode, is_mof)| {
            Configuration::from_symbol(
                &MaterialTables::curated(),
                metal,
                valency,
                ligand,
                assembly,
                electrode,
                is_mof,
            )
            .unwrap()
        })
}

/// Windows anywhere in [-2, 4] V, including fully negative ones
fn voltage_window() -> impl Strategy<Value = VoltageWindow> {
    (-2.0f64..1.0, 0.05f64..3.0).prop_map(|(v_min, span)| VoltageWindow {
        v_min,
        v_max: v_min + span,
    })
}

fn cu_bdc() -> Configuration {
    Configuration::new(
        resolve("Cu"),
        2,
        "BDC",
        AssemblyType::TwoElectrode,
        "Glassy Carbon",
        true,
    )
    .unwrap()
}

proptest! {
    #[test]
    fn estimate_is_deterministic(config in configuration()) {
        let estimator = PerformanceEstimator::default();
        let a = estimator.estimate(&config);
        let b = estimator.estimate(&config.clone());
        prop_assert_eq!(a.capacity_mah_g.to_bits(), b.capacity_mah_g.to_bits());
        prop_assert_eq!(a.base_resistance_ohm.to_bits(), b.base_resistance_ohm.to_bits());
        prop_assert_eq!(a.retention_fraction.to_bits(), b.retention_fraction.to_bits());
    }

    #[test]
    fn framework_never_lowers_capacity(config in configuration()) {
        let estimator = PerformanceEstimator::default();
        let bulk = estimator.capacity(&config.with_mof(false));
        let mof = estimator.capacity(&config.with_mof(true));
        prop_assert!(mof >= bulk);
    }

    #[test]
    fn retention_stays_in_unit_interval(config in configuration()) {
        let metrics = PerformanceEstimator::default().estimate(&config);
        prop_assert!((0.0..=1.0).contains(&metrics.retention_fraction));
        prop_assert!(metrics.capacity_mah_g >= 0.0);
        prop_assert!(metrics.base_resistance_ohm > 0.0);
    }

    #[test]
    fn discharge_voltage_never_rises(
        config in configuration(),
        window in voltage_window(),
        current in prop_oneof![0.01f64..10.0, Just(1e-310)],
        t_max_h in 0.01f64..5.0,
    ) {
        let metrics = PerformanceEstimator::default().estimate(&config);
        let set = GcdCurveGenerator::default()
            .generate(&metrics, &[current], window, t_max_h)
            .unwrap();
        let curve = set.get(current).unwrap();
        for pair in curve.samples.windows(2) {
            prop_assert!(pair[1].time_h > pair[0].time_h);
            prop_assert!(pair[1].voltage_v <= pair[0].voltage_v);
        }
        for s in &curve.samples {
            prop_assert!(s.voltage_v >= window.v_min && s.voltage_v <= window.v_max);
        }
    }

    #[test]
    fn nyquist_runs_high_to_low_frequency(config in configuration(), points in 2usize..120) {
        let metrics = PerformanceEstimator::default().estimate(&config);
        let curve = EisCurveGenerator::default().generate(&metrics, 50.0, points).unwrap();
        prop_assert_eq!(curve.samples.len(), points);
        for pair in curve.samples.windows(2) {
            prop_assert!(pair[1].frequency_hz < pair[0].frequency_hz);
        }
        for s in &curve.samples {
            prop_assert!(s.z_real_ohm >= 0.0);
            prop_assert!(s.z_imag_ohm >= 0.0);
        }
        prop_assert!(curve.max_real() <= 50.0 + 1e-9);
    }
}

#[test]
fn cu_bdc_capacity_diff_is_reproducible() {
    let config = cu_bdc();
    let engine = ComparisonEngine::default();
    let estimator = PerformanceEstimator::default();

    let first = engine.compare(&estimator.estimate(&config), &config);
    let second = engine.compare(&estimator.estimate(&config), &config);
    assert!(first.matched);
    assert_eq!(first, second);

    let expected_capacity = 100.0 * 1.20 * 1.10 * 2f64.sqrt() * 1.5;
    let diff = first.capacity_pct_diff.unwrap();
    assert!((diff - pct_diff(expected_capacity, 285.0)).abs() < 1e-6);
    assert!(diff < 0.0);
    assert!((diff + 1.750).abs() < 0.01);
    assert_eq!(first.agreement_level, AgreementLevel::Excellent);
}

#[test]
fn unknown_metal_has_no_literature_match() {
    let ru = resolve("Ru");
    assert_eq!(ru.redox_factor, 1.0);
    assert_eq!(ru.conductivity, 1.0);

    let config =
        Configuration::new(ru, 2, "DOBDC", AssemblyType::TwoElectrode, "Nickel Foam", true)
            .unwrap();
    let metrics = PerformanceEstimator::default().estimate(&config);
    let result = ComparisonEngine::default().compare(&metrics, &config);
    assert!(!result.matched);
    assert_eq!(result.agreement_level, AgreementLevel::NoMatch);
}

#[test]
fn non_positive_current_produces_no_curves() {
    let metrics = PerformanceEstimator::default().estimate(&cu_bdc());
    let generator = GcdCurveGenerator::default();
    for bad in [0.0, -1.0, f64::NAN] {
        let err = generator
            .generate(&metrics, &[0.5, bad, 1.0], VoltageWindow::default(), 0.5)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCurrentDensity(_)));
        assert!(err.is_invalid_input());
    }
}

#[test]
fn inverted_window_and_bad_bound_are_rejected() {
    let metrics = PerformanceEstimator::default().estimate(&cu_bdc());
    let err = GcdCurveGenerator::default()
        .generate(&metrics, &[1.0], VoltageWindow { v_min: 0.6, v_max: 0.6 }, 0.5)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidVoltageWindow { .. }));

    let err = EisCurveGenerator::default().generate(&metrics, -5.0, 50).unwrap_err();
    assert!(matches!(err, Error::InvalidImpedanceBound(_)));
}

#[test]
fn request_file_drives_full_pipeline() {
    let request = PredictionRequest::from_toml_str(
        r#"
        [material]
        metal = "co"
        valency = 2
        ligand = "dobdc"
        assembly = "Three-Electrode"
        electrode = "Carbon Cloth"

        [gcd]
        current_densities = [0.5, 1.0, 2.0]
        "#,
    )
    .unwrap();
    let prediction = Predictor::default().predict(&request).unwrap();
    assert_eq!(prediction.configuration.lookup_key(), "Co-dobdc");
    assert_eq!(prediction.gcd.len(), 3);
    let cmp = prediction.comparison.unwrap();
    assert!(cmp.matched);
    assert_eq!(cmp.reference.unwrap().key, "Co-DOBDC");
}

#[test]
fn custom_material_is_first_class() {
    let request = PredictionRequest::new(MaterialSpec {
        metal: "Ru".to_string(),
        valency: 3,
        ligand: "Custom".to_string(),
        assembly: AssemblyType::Symmetric,
        electrode: "Paper".to_string(),
        is_mof: false,
    });
    let prediction = Predictor::default().predict(&request).unwrap();
    // neutral metal, ligand and electrode
    let expected = 100.0 * 3f64.sqrt();
    assert!((prediction.metrics.capacity_mah_g - expected).abs() < 1e-9);
    assert_eq!(prediction.comparison.unwrap().agreement_level, AgreementLevel::NoMatch);
}
