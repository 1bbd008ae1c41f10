//! Configuration errors raised while building geometry and particle sets.
//!
//! Nothing here is raised per frame: once a curve, ribbon or particle set
//! exists, every evaluation over it is total.

use thiserror::Error;

/// Result type for generation-time operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Invalid generation parameters. Never clamped, always reported.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Parameter must be strictly positive
    #[error("{name} must be > 0, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    /// Parameter must not be negative
    #[error("{name} must be >= 0, got {value}")]
    Negative { name: &'static str, value: f32 },

    /// Parameter must be finite
    #[error("{name} must be finite")]
    NotFinite { name: &'static str },

    /// Not enough samples to describe a curve or cross-section
    #[error("{name} must be at least {min}, got {got}")]
    TooFewSamples {
        name: &'static str,
        got: usize,
        min: usize,
    },

    /// Fraction outside the half-open unit interval
    #[error("{name} must lie in [0, 1), got {value}")]
    FractionOutOfRange { name: &'static str, value: f32 },

    /// Range whose lower bound exceeds its upper bound
    #[error("{name} range is inverted: {min} > {max}")]
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },

    /// Malformed configuration document
    #[error("config parse error: {0}")]
    Parse(String),
}

/// Reject NaN and infinities.
pub(crate) fn finite(name: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { name })
    }
}

pub(crate) fn positive(name: &'static str, value: f32) -> Result<f32> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

pub(crate) fn non_negative(name: &'static str, value: f32) -> Result<f32> {
    finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

pub(crate) fn ordered(name: &'static str, min: f32, max: f32) -> Result<(f32, f32)> {
    finite(name, min)?;
    finite(name, max)?;
    if min <= max {
        Ok((min, max))
    } else {
        Err(ConfigError::InvertedRange { name, min, max })
    }
}
