// gcd.rs
// Galvanostatic discharge curves, specific capacity table and rate capability

use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{check_non_negative, check_positive, is_positive, Error, Result};
use crate::estimator::PerformanceMetrics;
use crate::units;

/// Potential window the discharge runs across
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VoltageWindow {
    pub v_min: f64,
    pub v_max: f64,
}

impl VoltageWindow {
    pub fn new(v_min: f64, v_max: f64) -> Result<Self> {
        let window = Self { v_min, v_max };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.v_min.is_finite() && self.v_max.is_finite()) || self.v_min >= self.v_max {
            return Err(Error::InvalidVoltageWindow { v_min: self.v_min, v_max: self.v_max });
        }
        Ok(())
    }

    pub fn span(&self) -> f64 {
        self.v_max - self.v_min
    }
}

impl Default for VoltageWindow {
    fn default() -> Self {
        Self { v_min: config::DEFAULT_V_MIN, v_max: config::DEFAULT_V_MAX }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GcdSample {
    pub current_density_a_g: f64,
    pub time_h: f64,
    pub voltage_v: f64,
}

/// One discharge branch at a fixed current density
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GcdCurve {
    pub current_density_a_g: f64,
    /// Time to reach v_min if the curve were not capped (h)
    pub full_discharge_h: f64,
    /// True when `t_max_h` cut the branch short
    pub truncated: bool,
    /// Ohmic step at the start of the discharge (V)
    pub ir_drop_v: f64,
    pub samples: Vec<GcdSample>,
}

impl GcdCurve {
    /// Time of the last sample (h)
    pub fn end_time_h(&self) -> f64 {
        self.samples.last().map(|s| s.time_h).unwrap_or(0.0)
    }

    /// Charge passed until the last sample (C/g)
    pub fn specific_capacity_c_g(&self) -> f64 {
        units::charge_c_g(self.current_density_a_g, self.end_time_h())
    }
}

/// Curves in the order their currents were requested
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GcdCurveSet {
    pub window: VoltageWindow,
    pub curves: Vec<GcdCurve>,
}

impl GcdCurveSet {
    pub fn get(&self, current_a_g: f64) -> Option<&GcdCurve> {
        self.curves.iter().find(|c| c.current_density_a_g == current_a_g)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GcdCurve> {
        self.curves.iter()
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Specific capacity and capacitance per current
    pub fn capacity_table(&self) -> Vec<CapacityRow> {
        let span = self.window.span();
        self.curves
            .iter()
            .map(|curve| {
                let q = curve.specific_capacity_c_g();
                CapacityRow {
                    current_density_a_g: curve.current_density_a_g,
                    specific_capacity_c_g: q,
                    specific_capacitance_f_g: q / span,
                }
            })
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CapacityRow {
    pub current_density_a_g: f64,
    pub specific_capacity_c_g: f64,
    pub specific_capacitance_f_g: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    pub current_density_a_g: f64,
    pub capacity_mah_g: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GcdCurveGenerator {
    /// Samples per branch, at least 2
    pub samples: usize,
    pub active_mass_g: f64,
    pub ir_max_fraction: f64,
    pub decay_shape: f64,
}

impl Default for GcdCurveGenerator {
    fn default() -> Self {
        Self {
            samples: config::GCD_SAMPLES,
            active_mass_g: config::ACTIVE_MASS_G,
            ir_max_fraction: config::IR_MAX_FRACTION,
            decay_shape: config::DECAY_SHAPE,
        }
    }
}

impl GcdCurveGenerator {
    pub fn validate(&self) -> Result<()> {
        if self.samples < 2 {
            return Err(Error::InvalidSampleCount { curve: "GCD", count: self.samples, min: 2 });
        }
        check_non_negative("active_mass_g", self.active_mass_g)?;
        check_positive("decay_shape", self.decay_shape)?;
        check_non_negative("ir_max_fraction", self.ir_max_fraction)?;
        if self.ir_max_fraction > 1.0 {
            return Err(Error::InvalidParameter {
                name: "ir_max_fraction",
                value: self.ir_max_fraction,
            });
        }
        Ok(())
    }

    /// Validates every argument before building any curve.
    pub fn generate(
        &self,
        metrics: &PerformanceMetrics,
        currents: &[f64],
        window: VoltageWindow,
        t_max_h: f64,
    ) -> Result<GcdCurveSet> {
        window.validate()?;
        if !is_positive(t_max_h) {
            return Err(Error::InvalidTimeLimit(t_max_h));
        }
        self.validate()?;
        if let Some(&bad) = currents.iter().find(|&&j| !is_positive(j)) {
            return Err(Error::InvalidCurrentDensity(bad));
        }

        let curves = currents
            .iter()
            .map(|&j| self.discharge(metrics, j, window, t_max_h))
            .collect();
        Ok(GcdCurveSet { window, curves })
    }

    fn discharge(
        &self,
        metrics: &PerformanceMetrics,
        current: f64,
        window: VoltageWindow,
        t_max_h: f64,
    ) -> GcdCurve {
        let full = units::discharge_time_h(metrics.capacity_mah_g, current);
        let truncated = full > t_max_h;
        let t_end = full.min(t_max_h);
        let ir = (current * self.active_mass_g * metrics.base_resistance_ohm)
            .min(self.ir_max_fraction * window.span());
        let top = window.v_max - ir;
        let k = self.decay_shape;
        let tail = (-k).exp();

        let dt = t_end / (self.samples - 1) as f64;
        let mut samples = Vec::with_capacity(self.samples);
        samples.push(GcdSample {
            current_density_a_g: current,
            time_h: 0.0,
            voltage_v: window.v_max,
        });
        for i in 1..self.samples {
            let t = i as f64 * dt;
            // normalized so s(0) = 1 and s(full) = 0; an unbounded discharge stays at s = 1
            let s = if full > 0.0 { ((-k * (t / full)).exp() - tail) / (1.0 - tail) } else { 0.0 };
            let v = window.v_min + (top - window.v_min) * s;
            samples.push(GcdSample {
                current_density_a_g: current,
                time_h: t,
                voltage_v: v.clamp(window.v_min, window.v_max),
            });
        }

        GcdCurve {
            current_density_a_g: current,
            full_discharge_h: full,
            truncated,
            ir_drop_v: ir,
            samples,
        }
    }

    /// Capacity delivered at each current, falling off as a power law
    /// above the reference current.
    pub fn rate_capability(
        &self,
        metrics: &PerformanceMetrics,
        currents: &[f64],
    ) -> Result<Vec<RatePoint>> {
        if let Some(&bad) = currents.iter().find(|&&j| !is_positive(j)) {
            return Err(Error::InvalidCurrentDensity(bad));
        }
        Ok(currents
            .iter()
            .map(|&j| RatePoint {
                current_density_a_g: j,
                capacity_mah_g: metrics.capacity_mah_g
                    * (config::RATE_REFERENCE_CURRENT / j).powf(config::RATE_EXPONENT).min(1.0),
            })
            .collect())
    }
}
