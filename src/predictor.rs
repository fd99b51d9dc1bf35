// predictor.rs
// Runs the whole pipeline for one request, or for many in parallel

use rayon::prelude::*;
use serde::Serialize;

use crate::comparison::{ComparisonEngine, ComparisonResult};
use crate::device::Configuration;
use crate::eis::{EisCurve, EisCurveGenerator};
use crate::error::Result;
use crate::estimator::{EstimatorConstants, PerformanceEstimator, PerformanceMetrics};
use crate::gcd::{CapacityRow, GcdCurveGenerator, GcdCurveSet, RatePoint};
use crate::ies::{IesSpectrum, IesSpectrumGenerator};
use crate::literature::LiteratureCatalog;
use crate::material::MaterialTables;
use crate::request::PredictionRequest;

/// Everything predicted for one configuration
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Prediction {
    pub configuration: Configuration,
    pub metrics: PerformanceMetrics,
    pub gcd: GcdCurveSet,
    pub capacity_table: Vec<CapacityRow>,
    pub rate_capability: Vec<RatePoint>,
    pub eis: EisCurve,
    /// Spectrum of the same electrode after long cycling
    pub eis_cycled: EisCurve,
    pub ies: IesSpectrum,
    /// None when the request did not ask for a comparison
    pub comparison: Option<ComparisonResult>,
}

#[derive(Clone, Debug)]
pub struct Predictor<'a> {
    pub estimator: PerformanceEstimator<'a>,
    pub gcd: GcdCurveGenerator,
    pub eis: EisCurveGenerator,
    pub ies: IesSpectrumGenerator,
    pub comparison: ComparisonEngine<'a>,
}

impl Default for Predictor<'static> {
    fn default() -> Self {
        Self::new(MaterialTables::curated(), LiteratureCatalog::builtin())
    }
}

impl<'a> Predictor<'a> {
    pub fn new(tables: MaterialTables<'a>, catalog: &'a LiteratureCatalog) -> Self {
        Self {
            estimator: PerformanceEstimator::new(tables, EstimatorConstants::default()),
            gcd: GcdCurveGenerator::default(),
            eis: EisCurveGenerator::default(),
            ies: IesSpectrumGenerator::default(),
            comparison: ComparisonEngine::new(catalog),
        }
    }

    pub fn tables(&self) -> &MaterialTables<'a> {
        self.estimator.tables()
    }

    pub fn configuration(&self, request: &PredictionRequest) -> Result<Configuration> {
        request.material.configuration(self.tables())
    }

    /// Estimate metrics, build every curve and optionally compare.
    /// The first invalid setting aborts the whole prediction.
    pub fn predict(&self, request: &PredictionRequest) -> Result<Prediction> {
        let configuration = self.configuration(request)?;
        let metrics = self.estimator.estimate(&configuration);

        let settings = &request.gcd;
        let gcd = self
            .gcd
            .generate(&metrics, &settings.current_densities, settings.window(), settings.t_max_h)?;
        let capacity_table = gcd.capacity_table();
        let rate_capability = self.gcd.rate_capability(&metrics, &settings.current_densities)?;

        let eis = self.eis.generate(&metrics, request.eis.z_max_ohm, request.eis.points)?;
        let eis_cycled = self
            .eis
            .generate_cycled(&metrics, request.eis.z_max_ohm, request.eis.points)?;

        let ies = self
            .ies
            .generate(configuration.metal(), request.ies.e_max_ev, request.ies.points)?;

        let comparison = request
            .compare
            .then(|| self.comparison.compare(&metrics, &configuration));

        Ok(Prediction {
            configuration,
            metrics,
            gcd,
            capacity_table,
            rate_capability,
            eis,
            eis_cycled,
            ies,
            comparison,
        })
    }

    /// Predictions share no mutable state, so requests run in parallel.
    /// Results keep the input order.
    pub fn predict_batch(&self, requests: &[PredictionRequest]) -> Vec<Result<Prediction>> {
        requests.par_iter().map(|r| self.predict(r)).collect()
    }
}
