// ies.rs
// Synthetic inelastic electron scattering (energy-loss) spectrum of the metal node
//
// Two Gaussian loss peaks (bulk plasmon, d-d transition) over a slowly
// decaying background.

use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{check_non_negative, check_positive, is_positive, Error, Result};
use crate::material::MetalProperties;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IesSample {
    pub energy_ev: f64,
    pub intensity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IesSpectrum {
    pub symbol: String,
    pub samples: Vec<IesSample>,
}

impl IesSpectrum {
    /// Energy of the most intense sample
    pub fn peak_energy(&self) -> Option<f64> {
        self.samples
            .iter()
            .max_by(|a, b| a.intensity.total_cmp(&b.intensity))
            .map(|s| s.energy_ev)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IesSpectrumGenerator {
    pub plasmon_intensity: f64,
    pub plasmon_width_ev: f64,
    pub d_intensity: f64,
    pub d_width_ev: f64,
    pub background_amplitude: f64,
    pub background_decay_ev: f64,
}

impl Default for IesSpectrumGenerator {
    fn default() -> Self {
        Self {
            plasmon_intensity: config::PLASMON_INTENSITY,
            plasmon_width_ev: config::PLASMON_WIDTH_EV,
            d_intensity: config::D_TRANSITION_INTENSITY,
            d_width_ev: config::D_TRANSITION_WIDTH_EV,
            background_amplitude: config::IES_BACKGROUND_AMPLITUDE,
            background_decay_ev: config::IES_BACKGROUND_DECAY_EV,
        }
    }
}

impl IesSpectrumGenerator {
    pub fn validate(&self) -> Result<()> {
        check_non_negative("plasmon_intensity", self.plasmon_intensity)?;
        check_positive("plasmon_width_ev", self.plasmon_width_ev)?;
        check_non_negative("d_intensity", self.d_intensity)?;
        check_positive("d_width_ev", self.d_width_ev)?;
        check_non_negative("background_amplitude", self.background_amplitude)?;
        check_positive("background_decay_ev", self.background_decay_ev)?;
        Ok(())
    }

    pub fn intensity(&self, metal: &MetalProperties, energy_ev: f64) -> f64 {
        let gauss = |center: f64, width: f64| (-((energy_ev - center) / width).powi(2)).exp();
        self.plasmon_intensity * gauss(metal.plasmon_peak_ev, self.plasmon_width_ev)
            + self.d_intensity * gauss(metal.d_transition_ev, self.d_width_ev)
            + self.background_amplitude * (-energy_ev / self.background_decay_ev).exp()
    }

    /// Evenly spaced spectrum over [0, e_max_ev].
    pub fn generate(
        &self,
        metal: &MetalProperties,
        e_max_ev: f64,
        n_points: usize,
    ) -> Result<IesSpectrum> {
        if !is_positive(e_max_ev) {
            return Err(Error::InvalidEnergyRange(e_max_ev));
        }
        if n_points < 2 {
            return Err(Error::InvalidSampleCount { curve: "IES", count: n_points, min: 2 });
        }
        self.validate()?;
        let step = e_max_ev / (n_points - 1) as f64;
        let samples = (0..n_points)
            .map(|i| {
                let e = step * i as f64;
                IesSample { energy_ev: e, intensity: self.intensity(metal, e).max(0.0) }
            })
            .collect();
        Ok(IesSpectrum { symbol: metal.symbol.clone(), samples })
    }
}
