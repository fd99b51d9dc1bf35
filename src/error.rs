// error.rs
// Error type shared by the prediction engine and its I/O layer

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid current density: {0} A/g (must be positive and finite)")]
    InvalidCurrentDensity(f64),

    #[error("Invalid valency: {0} (must be at least 1)")]
    InvalidValency(u32),

    #[error("Invalid voltage window: v_min {v_min} V must be below v_max {v_max} V")]
    InvalidVoltageWindow { v_min: f64, v_max: f64 },

    #[error("Invalid time limit: {0} h (must be positive and finite)")]
    InvalidTimeLimit(f64),

    #[error("Invalid impedance bound: {0} Ω (must be positive and finite)")]
    InvalidImpedanceBound(f64),

    #[error("Invalid energy range: {0} eV (must be positive and finite)")]
    InvalidEnergyRange(f64),

    #[error("Invalid sample count for {curve}: {count} (need at least {min})")]
    InvalidSampleCount { curve: &'static str, count: usize, min: usize },

    #[error("Invalid model parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("Invalid table entry '{key}': {reason}")]
    InvalidTableEntry { key: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request parse error: {0}")]
    RequestParse(#[from] toml::de::Error),

    #[error("Request serialization error: {0}")]
    RequestWrite(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for caller mistakes rejected before any computation runs.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::InvalidCurrentDensity(_)
                | Error::InvalidValency(_)
                | Error::InvalidVoltageWindow { .. }
                | Error::InvalidTimeLimit(_)
                | Error::InvalidImpedanceBound(_)
                | Error::InvalidEnergyRange(_)
                | Error::InvalidSampleCount { .. }
                | Error::InvalidParameter { .. }
                | Error::InvalidTableEntry { .. }
        )
    }
}

/// Positive and finite.
pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Model parameter that must be positive and finite.
pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<()> {
    if is_positive(value) {
        Ok(())
    } else {
        Err(Error::InvalidParameter { name, value })
    }
}

/// Model parameter that may be zero but must be finite.
pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter { name, value })
    }
}
