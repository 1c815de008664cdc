//! Lift coefficient as a function of angle of attack.
//!
//! A sorted keyframe table, linearly interpolated and clamped to the
//! first/last keyframe outside its range.

use serde::{Deserialize, Serialize};
use wingman_core::constants::DEFAULT_LIFT_CURVE;

use crate::error::ConfigError;

/// One keyframe: Cl at a given angle of attack (degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiftKey {
    pub aoa_deg: f64,
    pub cl: f64,
}

/// Keyframes are non-empty, finite and strictly increasing in AoA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LiftKey>", into = "Vec<LiftKey>")]
pub struct LiftCurve {
    keys: Vec<LiftKey>,
}

impl LiftCurve {
    pub fn new(keys: Vec<LiftKey>) -> Result<Self, ConfigError> {
        if keys.is_empty() {
            return Err(ConfigError::EmptyLiftCurve);
        }
        for (index, key) in keys.iter().enumerate() {
            if !key.aoa_deg.is_finite() || !key.cl.is_finite() {
                return Err(ConfigError::NonFiniteLiftCurve { index });
            }
            if index > 0 && key.aoa_deg <= keys[index - 1].aoa_deg {
                return Err(ConfigError::UnsortedLiftCurve { index });
            }
        }
        Ok(Self { keys })
    }

    /// Build from `(aoa_deg, cl)` pairs.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, ConfigError> {
        Self::new(
            pairs
                .iter()
                .map(|&(aoa_deg, cl)| LiftKey { aoa_deg, cl })
                .collect(),
        )
    }

    pub fn keys(&self) -> &[LiftKey] {
        &self.keys
    }

    /// Cl at `aoa_deg`.
    pub fn evaluate(&self, aoa_deg: f64) -> f64 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };
        if aoa_deg.is_nan() {
            return 0.0;
        }
        if aoa_deg <= first.aoa_deg {
            return first.cl;
        }
        if aoa_deg >= last.aoa_deg {
            return last.cl;
        }

        // first.aoa < aoa < last.aoa, so 1 <= upper < len
        let upper = self.keys.partition_point(|k| k.aoa_deg <= aoa_deg);
        let a = self.keys[upper - 1];
        let b = self.keys[upper];
        let t = (aoa_deg - a.aoa_deg) / (b.aoa_deg - a.aoa_deg);
        a.cl + (b.cl - a.cl) * t
    }

    /// Peak lift coefficient.
    pub fn max_cl(&self) -> f64 {
        self.keys
            .iter()
            .map(|k| k.cl)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

impl Default for LiftCurve {
    fn default() -> Self {
        Self {
            keys: DEFAULT_LIFT_CURVE
                .iter()
                .map(|&(aoa_deg, cl)| LiftKey { aoa_deg, cl })
                .collect(),
        }
    }
}

impl TryFrom<Vec<LiftKey>> for LiftCurve {
    type Error = ConfigError;

    fn try_from(keys: Vec<LiftKey>) -> Result<Self, Self::Error> {
        Self::new(keys)
    }
}

impl From<LiftCurve> for Vec<LiftKey> {
    fn from(curve: LiftCurve) -> Self {
        curve.keys
    }
}
