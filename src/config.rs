// Centralized configuration for prediction parameters

// ====================
// Capacity Parameters
// ====================
/// Capacity of a neutral monovalent non-MOF electrode (mAh/g).
pub const BASE_CAPACITY_MAH_G: f64 = 100.0;
/// Surface-area bonus applied to framework (MOF) structures.
pub const MOF_BONUS: f64 = 1.5;
/// Capacity factor of a three-electrode measurement.
pub const THREE_ELECTRODE_CAPACITY_FACTOR: f64 = 1.1;

// ====================
// Resistance Parameters
// ====================
/// Intrinsic resistance of a neutral-conductivity electrode (Ω).
pub const BASE_RESISTANCE_OHM: f64 = 14.0;
pub const THREE_ELECTRODE_RESISTANCE_FACTOR: f64 = 0.85;
pub const TWO_ELECTRODE_RESISTANCE_FACTOR: f64 = 1.0;
pub const SYMMETRIC_RESISTANCE_FACTOR: f64 = 1.05;

// ====================
// Retention Parameters
// ====================
/// Retention of a neutral metal (redox = conductivity = 1.0) after cycling.
pub const RETENTION_BASE: f64 = 0.36;

// ====================
// GCD Parameters
// ====================
/// Current densities (A/g) swept when a request does not name its own.
pub const DEFAULT_CURRENT_DENSITIES: [f64; 9] = [0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0, 2.25];
pub const DEFAULT_V_MIN: f64 = 0.0;
pub const DEFAULT_V_MAX: f64 = 0.6; // hybrid device window
/// Discharge time cap in hours.
pub const DEFAULT_T_MAX_H: f64 = 0.5;
/// Samples per discharge branch.
pub const GCD_SAMPLES: usize = 200;
/// Active mass on the electrode (g), converts A/g into A for the IR drop.
pub const ACTIVE_MASS_G: f64 = 1.0e-3;
/// The IR step never eats more than this fraction of the voltage window.
pub const IR_MAX_FRACTION: f64 = 0.5;
/// Full discharge time divided by the capacitive decay time constant.
pub const DECAY_SHAPE: f64 = 3.0;
/// Reference current for the rate-capability power law (A/g).
pub const RATE_REFERENCE_CURRENT: f64 = 0.5;
pub const RATE_EXPONENT: f64 = 0.3;

// ====================
// EIS Parameters
// ====================
pub const EIS_F_MAX_HZ: f64 = 1.0e5;
pub const EIS_F_MIN_HZ: f64 = 1.0e-2;
pub const DEFAULT_EIS_POINTS: usize = 50;
/// Default upper bound of the Nyquist real axis (Ω).
pub const DEFAULT_Z_MAX_OHM: f64 = 50.0;
/// Solution resistance as a fraction of the base resistance.
pub const RS_FRACTION: f64 = 0.15;
/// Charge-transfer resistance as a fraction of the base resistance.
pub const RCT_FRACTION: f64 = 0.5;
/// Rct·Cdl time constant of the charge-transfer arc (s).
pub const CHARGE_TRANSFER_TAU_S: f64 = 0.01;
/// Warburg coefficient σ (Ω·s^-1/2).
pub const WARBURG_COEFFICIENT: f64 = 8.0;

// Electrode state after long cycling, relative to the fresh electrode
pub const CYCLED_RS_FACTOR: f64 = 0.95;
pub const CYCLED_RCT_FACTOR: f64 = 0.4;
pub const CYCLED_TAU_FACTOR: f64 = 1.5;
pub const CYCLED_WARBURG_FACTOR: f64 = 0.8;

// ====================
// IES Parameters
// ====================
pub const DEFAULT_IES_E_MAX_EV: f64 = 50.0;
pub const DEFAULT_IES_POINTS: usize = 500;
pub const PLASMON_INTENSITY: f64 = 0.9;
pub const PLASMON_WIDTH_EV: f64 = 2.25;
pub const D_TRANSITION_INTENSITY: f64 = 0.45;
pub const D_TRANSITION_WIDTH_EV: f64 = 1.65;
pub const IES_BACKGROUND_AMPLITUDE: f64 = 0.1;
pub const IES_BACKGROUND_DECAY_EV: f64 = 30.0;

// ====================
// Literature Agreement
// ====================
/// |pct diff| below this is Excellent.
pub const EXCELLENT_THRESHOLD_PCT: f64 = 10.0;
/// |pct diff| below this is Good, otherwise Moderate.
pub const GOOD_THRESHOLD_PCT: f64 = 20.0;
