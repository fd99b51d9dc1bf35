// comparison.rs
// Scores a prediction against the matching literature reference

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{EXCELLENT_THRESHOLD_PCT, GOOD_THRESHOLD_PCT};
use crate::device::Configuration;
use crate::estimator::PerformanceMetrics;
use crate::literature::{LiteratureCatalog, LiteratureReference};

/// Ordered from closest to most divergent
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgreementLevel {
    Excellent,
    Good,
    Moderate,
    NoMatch,
}

impl AgreementLevel {
    /// Bucket for a single metric's percent difference.
    pub fn classify(pct_diff: f64) -> Self {
        let magnitude = pct_diff.abs();
        if magnitude < EXCELLENT_THRESHOLD_PCT {
            AgreementLevel::Excellent
        } else if magnitude < GOOD_THRESHOLD_PCT {
            AgreementLevel::Good
        } else {
            AgreementLevel::Moderate
        }
    }
}

impl fmt::Display for AgreementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AgreementLevel::Excellent => "Excellent",
            AgreementLevel::Good => "Good",
            AgreementLevel::Moderate => "Moderate",
            AgreementLevel::NoMatch => "No match",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub matched: bool,
    pub reference: Option<LiteratureReference>,
    pub capacity_pct_diff: Option<f64>,
    pub resistance_pct_diff: Option<f64>,
    pub retention_pct_diff: Option<f64>,
    pub agreement_level: AgreementLevel,
}

impl ComparisonResult {
    pub fn no_match() -> Self {
        Self {
            matched: false,
            reference: None,
            capacity_pct_diff: None,
            resistance_pct_diff: None,
            retention_pct_diff: None,
            agreement_level: AgreementLevel::NoMatch,
        }
    }

    /// Largest |pct diff| across the three metrics
    pub fn worst_pct_diff(&self) -> Option<f64> {
        [self.capacity_pct_diff, self.resistance_pct_diff, self.retention_pct_diff]
            .into_iter()
            .flatten()
            .map(f64::abs)
            .reduce(f64::max)
    }
}

/// Signed percent difference of `predicted` from `reference`.
pub fn pct_diff(predicted: f64, reference: f64) -> f64 {
    (predicted - reference) / reference * 100.0
}

#[derive(Clone, Copy, Debug)]
pub struct ComparisonEngine<'a> {
    catalog: &'a LiteratureCatalog,
}

impl Default for ComparisonEngine<'static> {
    fn default() -> Self {
        Self::new(LiteratureCatalog::builtin())
    }
}

impl<'a> ComparisonEngine<'a> {
    pub fn new(catalog: &'a LiteratureCatalog) -> Self {
        Self { catalog }
    }

    /// The overall level is the worst of the three metrics, so one large
    /// divergence is never averaged away.
    pub fn compare(
        &self,
        metrics: &PerformanceMetrics,
        config: &Configuration,
    ) -> ComparisonResult {
        let Some(reference) = self.catalog.lookup(&config.metal().symbol, config.ligand()) else {
            return ComparisonResult::no_match();
        };

        let capacity = pct_diff(metrics.capacity_mah_g, reference.reference_capacity);
        let resistance = pct_diff(metrics.base_resistance_ohm, reference.reference_resistance);
        let retention = pct_diff(metrics.retention_fraction, reference.reference_retention);

        let agreement_level = [capacity, resistance, retention]
            .into_iter()
            .map(AgreementLevel::classify)
            .max()
            .unwrap_or(AgreementLevel::NoMatch);

        ComparisonResult {
            matched: true,
            reference: Some(reference.clone()),
            capacity_pct_diff: Some(capacity),
            resistance_pct_diff: Some(resistance),
            retention_pct_diff: Some(retention),
            agreement_level,
        }
    }
}
