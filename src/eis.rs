// eis.rs
// Nyquist spectra from a Randles equivalent circuit
//
//   Z(ω) = Rs + 1 / ( jωC_dl + 1 / (Rct + Z_W) ),   Z_W = σ ω^-1/2 (1 - j)
//
// Imaginary parts are reported as -Im(Z), the positive "-Z''" axis of a
// Nyquist plot. For this circuit -Im(Z) is never negative.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{check_non_negative, check_positive, is_positive, Error, Result};
use crate::estimator::PerformanceMetrics;
use crate::units::angular_frequency;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EisSample {
    pub frequency_hz: f64,
    pub z_real_ohm: f64,
    /// -Im(Z), non-negative
    pub z_imag_ohm: f64,
}

/// Element values of one Randles circuit
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RandlesCircuit {
    pub rs_ohm: f64,
    pub rct_ohm: f64,
    pub cdl_f: f64,
    /// Warburg coefficient σ (Ω·s^-1/2)
    pub warburg: f64,
}

impl RandlesCircuit {
    pub fn impedance(&self, frequency_hz: f64) -> Complex64 {
        let omega = angular_frequency(frequency_hz);
        let j = Complex64::i();
        let zw = Complex64::new(1.0, -1.0) * (self.warburg / omega.sqrt());
        let faradaic = Complex64::new(self.rct_ohm, 0.0) + zw;
        let admittance = j * omega * self.cdl_f + faradaic.inv();
        Complex64::new(self.rs_ohm, 0.0) + admittance.inv()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EisCurve {
    pub circuit: RandlesCircuit,
    /// Uniform factor applied to both axes to fit `z_max_ohm` (1.0 = unscaled)
    pub scale: f64,
    /// Highest to lowest frequency
    pub samples: Vec<EisSample>,
}

impl EisCurve {
    pub fn max_real(&self) -> f64 {
        self.samples.iter().map(|s| s.z_real_ohm).fold(0.0, f64::max)
    }
}

/// Circuit constants relative to the base resistance
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EisConstants {
    pub rs_fraction: f64,
    pub rct_fraction: f64,
    pub charge_transfer_tau_s: f64,
    pub warburg: f64,
    pub f_max_hz: f64,
    pub f_min_hz: f64,
    pub cycled_rs_factor: f64,
    pub cycled_rct_factor: f64,
    pub cycled_tau_factor: f64,
    pub cycled_warburg_factor: f64,
}

impl Default for EisConstants {
    fn default() -> Self {
        Self {
            rs_fraction: config::RS_FRACTION,
            rct_fraction: config::RCT_FRACTION,
            charge_transfer_tau_s: config::CHARGE_TRANSFER_TAU_S,
            warburg: config::WARBURG_COEFFICIENT,
            f_max_hz: config::EIS_F_MAX_HZ,
            f_min_hz: config::EIS_F_MIN_HZ,
            cycled_rs_factor: config::CYCLED_RS_FACTOR,
            cycled_rct_factor: config::CYCLED_RCT_FACTOR,
            cycled_tau_factor: config::CYCLED_TAU_FACTOR,
            cycled_warburg_factor: config::CYCLED_WARBURG_FACTOR,
        }
    }
}

impl EisConstants {
    /// The sweep must span a positive, non-empty band and the circuit
    /// elements must stay physical.
    pub fn validate(&self) -> Result<()> {
        check_non_negative("rs_fraction", self.rs_fraction)?;
        check_positive("rct_fraction", self.rct_fraction)?;
        check_positive("charge_transfer_tau_s", self.charge_transfer_tau_s)?;
        check_non_negative("warburg", self.warburg)?;
        check_positive("f_min_hz", self.f_min_hz)?;
        check_positive("f_max_hz", self.f_max_hz)?;
        if self.f_max_hz <= self.f_min_hz {
            return Err(Error::InvalidParameter { name: "f_max_hz", value: self.f_max_hz });
        }
        check_non_negative("cycled_rs_factor", self.cycled_rs_factor)?;
        check_positive("cycled_rct_factor", self.cycled_rct_factor)?;
        check_positive("cycled_tau_factor", self.cycled_tau_factor)?;
        check_non_negative("cycled_warburg_factor", self.cycled_warburg_factor)?;
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EisCurveGenerator {
    pub constants: EisConstants,
}

impl EisCurveGenerator {
    pub fn new(constants: EisConstants) -> Self {
        Self { constants }
    }

    /// Circuit of the fresh electrode. Rs and Rct follow the base
    /// resistance, so both shrink with conductivity.
    pub fn circuit(&self, metrics: &PerformanceMetrics) -> RandlesCircuit {
        let c = &self.constants;
        let rct = c.rct_fraction * metrics.base_resistance_ohm;
        RandlesCircuit {
            rs_ohm: c.rs_fraction * metrics.base_resistance_ohm,
            rct_ohm: rct,
            cdl_f: c.charge_transfer_tau_s / rct,
            warburg: c.warburg,
        }
    }

    /// Circuit after long cycling: the electrode has stabilized and
    /// transfers charge faster.
    pub fn cycled_circuit(&self, metrics: &PerformanceMetrics) -> RandlesCircuit {
        let c = &self.constants;
        let fresh = self.circuit(metrics);
        let rct = fresh.rct_ohm * c.cycled_rct_factor;
        let tau = c.charge_transfer_tau_s * c.cycled_tau_factor;
        RandlesCircuit {
            rs_ohm: fresh.rs_ohm * c.cycled_rs_factor,
            rct_ohm: rct,
            cdl_f: tau / rct,
            warburg: fresh.warburg * c.cycled_warburg_factor,
        }
    }

    pub fn generate(
        &self,
        metrics: &PerformanceMetrics,
        z_max_ohm: f64,
        n_points: usize,
    ) -> Result<EisCurve> {
        self.sweep(self.circuit(metrics), z_max_ohm, n_points)
    }

    pub fn generate_cycled(
        &self,
        metrics: &PerformanceMetrics,
        z_max_ohm: f64,
        n_points: usize,
    ) -> Result<EisCurve> {
        self.sweep(self.cycled_circuit(metrics), z_max_ohm, n_points)
    }

    /// Log-spaced frequencies from f_max down to f_min
    pub fn frequencies(&self, n_points: usize) -> Vec<f64> {
        let hi = self.constants.f_max_hz.log10();
        let lo = self.constants.f_min_hz.log10();
        let step = (hi - lo) / (n_points.max(2) - 1) as f64;
        (0..n_points).map(|i| 10f64.powf(hi - step * i as f64)).collect()
    }

    /// Evaluate `circuit` over the sweep. If the real axis runs past
    /// `z_max_ohm`, both axes shrink by the same factor.
    pub fn sweep(
        &self,
        circuit: RandlesCircuit,
        z_max_ohm: f64,
        n_points: usize,
    ) -> Result<EisCurve> {
        if !is_positive(z_max_ohm) {
            return Err(Error::InvalidImpedanceBound(z_max_ohm));
        }
        if n_points < 2 {
            return Err(Error::InvalidSampleCount { curve: "EIS", count: n_points, min: 2 });
        }
        self.constants.validate()?;

        let mut samples: Vec<EisSample> = self
            .frequencies(n_points)
            .into_iter()
            .map(|f| {
                let z = circuit.impedance(f);
                EisSample { frequency_hz: f, z_real_ohm: z.re, z_imag_ohm: (-z.im).max(0.0) }
            })
            .collect();

        let max_real = samples.iter().map(|s| s.z_real_ohm).fold(0.0, f64::max);
        let scale = if max_real > z_max_ohm { z_max_ohm / max_real } else { 1.0 };
        if scale < 1.0 {
            for s in &mut samples {
                s.z_real_ohm *= scale;
                s.z_imag_ohm *= scale;
            }
        }

        Ok(EisCurve { circuit, scale, samples })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> PerformanceMetrics {
        PerformanceMetrics {
            capacity_mah_g: 280.0,
            base_resistance_ohm: 14.0 / 1.15,
            retention_fraction: 0.45,
        }
    }

    #[test]
    fn circuit_tracks_base_resistance() {
        let c = EisCurveGenerator::default().circuit(&metrics());
        assert!((c.rs_ohm - 0.15 * 14.0 / 1.15).abs() < 1e-12);
        assert!((c.rct_ohm - 0.5 * 14.0 / 1.15).abs() < 1e-12);
        assert!((c.rct_ohm * c.cdl_f - 0.01).abs() < 1e-15);
    }

    #[test]
    fn high_frequency_limit_is_rs() {
        let c = EisCurveGenerator::default().circuit(&metrics());
        let z = c.impedance(1.0e9);
        assert!((z.re - c.rs_ohm).abs() < 1e-3);
    }

    #[test]
    fn frequencies_descend_over_seven_decades() {
        let f = EisCurveGenerator::default().frequencies(50);
        assert_eq!(f.len(), 50);
        assert!((f[0] - 1.0e5).abs() < 1e-6);
        assert!((f[49] - 1.0e-2).abs() < 1e-12);
        assert!(f.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn spectrum_has_arc_then_tail() {
        let curve = EisCurveGenerator::default().generate(&metrics(), 1.0e6, 100).unwrap();
        assert_eq!(curve.scale, 1.0);
        let s = &curve.samples;
        assert!(s.iter().all(|p| p.z_real_ohm >= 0.0 && p.z_imag_ohm >= 0.0));
        // Warburg tail: the lowest frequency point sits highest
        let last = s.last().unwrap();
        assert!(s.iter().all(|p| p.z_imag_ohm <= last.z_imag_ohm));
        // real part grows as frequency drops
        assert!(s.windows(2).all(|w| w[1].z_real_ohm >= w[0].z_real_ohm - 1e-9));
    }

    #[test]
    fn curve_is_scaled_into_bound() {
        let gen = EisCurveGenerator::default();
        let free = gen.generate(&metrics(), 1.0e6, 50).unwrap();
        let bound = free.max_real() / 2.0;
        let clipped = gen.generate(&metrics(), bound, 50).unwrap();
        assert!((clipped.scale - 0.5).abs() < 1e-12);
        assert!((clipped.max_real() - bound).abs() < 1e-9);
        for (a, b) in free.samples.iter().zip(&clipped.samples) {
            assert_eq!(a.frequency_hz, b.frequency_hz);
            assert!((a.z_imag_ohm * 0.5 - b.z_imag_ohm).abs() < 1e-9);
        }
        assert_eq!(clipped, gen.generate(&metrics(), bound, 50).unwrap());
    }

    #[test]
    fn cycled_electrode_has_smaller_arc() {
        let gen = EisCurveGenerator::default();
        let fresh = gen.circuit(&metrics());
        let cycled = gen.cycled_circuit(&metrics());
        assert!(cycled.rct_ohm < fresh.rct_ohm);
        assert!(cycled.rs_ohm < fresh.rs_ohm);
        assert!((cycled.rct_ohm * cycled.cdl_f - 0.015).abs() < 1e-15);
    }

    #[test]
    fn degenerate_constants_are_rejected() {
        let flat_band = EisConstants { f_max_hz: 10.0, f_min_hz: 10.0, ..Default::default() };
        let no_arc = EisConstants { rct_fraction: 0.0, ..Default::default() };
        let bad_tau = EisConstants { charge_transfer_tau_s: f64::INFINITY, ..Default::default() };
        for constants in [flat_band, no_arc, bad_tau] {
            let err = EisCurveGenerator::new(constants).generate(&metrics(), 50.0, 50).unwrap_err();
            assert!(matches!(err, Error::InvalidParameter { .. }));
        }
        let gen = EisCurveGenerator::new(EisConstants { warburg: 0.0, ..Default::default() });
        assert!(gen.generate(&metrics(), 50.0, 50).is_ok());
    }

    #[test]
    fn invalid_bounds_are_rejected() {
        let gen = EisCurveGenerator::default();
        assert!(matches!(gen.generate(&metrics(), 0.0, 50), Err(Error::InvalidImpedanceBound(_))));
        assert!(matches!(gen.generate(&metrics(), -5.0, 50), Err(Error::InvalidImpedanceBound(_))));
        assert!(matches!(gen.generate(&metrics(), 50.0, 1), Err(Error::InvalidSampleCount { .. })));
    }
}
