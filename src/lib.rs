pub mod comparison;
pub mod config;
pub mod device;
pub mod eis;
pub mod error;
pub mod estimator;
pub mod export;
pub mod gcd;
pub mod ies;
pub mod literature;
pub mod material;
pub mod predictor;
pub mod request;
pub mod units;

#[cfg(test)]
mod scenario_tests;

pub use comparison::{AgreementLevel, ComparisonEngine, ComparisonResult};
pub use device::{AssemblyType, Configuration};
pub use eis::{EisCurve, EisCurveGenerator};
pub use error::{Error, Result};
pub use estimator::{PerformanceEstimator, PerformanceMetrics};
pub use gcd::{GcdCurveGenerator, GcdCurveSet, VoltageWindow};
pub use ies::{IesSpectrum, IesSpectrumGenerator};
pub use literature::{LiteratureCatalog, LiteratureReference};
pub use material::{MaterialTables, MetalProperties};
pub use predictor::{Prediction, Predictor};
pub use request::PredictionRequest;
