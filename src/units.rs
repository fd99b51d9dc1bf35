//! Unit conversions used by the curve generators.
//!
//! Base units:
//! - Time: hour (h) on GCD curves, second (s) for impedance
//! - Capacity: mAh per gram of active material
//! - Current density: A per gram of active material

/// Seconds in one hour.
pub const SECONDS_PER_HOUR: f64 = 3600.0;
/// Milliamp-hours in one amp-hour.
pub const MAH_PER_AH: f64 = 1000.0;

/// Convert hours to seconds.
pub fn hours_to_seconds(hours: f64) -> f64 {
    hours * SECONDS_PER_HOUR
}

/// Time (h) to deliver `capacity_mah_g` at `current_a_g`.
pub fn discharge_time_h(capacity_mah_g: f64, current_a_g: f64) -> f64 {
    capacity_mah_g / (MAH_PER_AH * current_a_g)
}

/// Charge (C/g) passed at `current_a_g` during `time_h`.
pub fn charge_c_g(current_a_g: f64, time_h: f64) -> f64 {
    current_a_g * hours_to_seconds(time_h)
}

/// Angular frequency ω = 2πf.
pub fn angular_frequency(frequency_hz: f64) -> f64 {
    2.0 * std::f64::consts::PI * frequency_hz
}
