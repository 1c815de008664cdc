//! Airframe configuration errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("lift curve has no keyframes")]
    EmptyLiftCurve,

    #[error("lift curve keyframe {index} is not strictly after the previous angle of attack")]
    UnsortedLiftCurve { index: usize },

    #[error("lift curve keyframe {index} is not finite")]
    NonFiniteLiftCurve { index: usize },

    #[error("engine mount point is not set, thrust will not be applied")]
    MissingEnginePosition,

    #[error("lift application point is not set, lift will not be applied")]
    MissingLiftPosition,

    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be zero or positive (got {value})")]
    Negative { field: &'static str, value: f64 },
}

/// Require `value > 0`.
pub(crate) fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

/// Require `value >= 0`.
pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
