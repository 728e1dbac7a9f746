// acrobat_core/src/error.rs

use nalgebra::Vector3;
use thiserror::Error;

/// Problems found while freezing a `MissionConfig` into a `ControlPipeline`.
/// Every variant is fatal: no control cycle may run with a bad configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("allocation matrix is singular (determinant {determinant:e}); thrusters cannot span the wrench space")]
    SingularAllocationMatrix { determinant: f64 },

    #[error("vehicle mass must be positive, got {0}")]
    NonPositiveMass(f64),

    #[error("moment of inertia must be positive on every axis, got {0:?}")]
    NonPositiveInertia(Vector3<f64>),

    #[error("maximum blade speed must be positive, got {0} rps")]
    NonPositiveBladeRate(f64),

    #[error("configuration value `{0}` is not finite")]
    NonFiniteValue(&'static str),
}

/// Per-cycle failures. A cycle that fails leaves nothing behind, so the next
/// sample is evaluated from scratch.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ControlError {
    /// `Rd^T * R` is (close to) a half-turn, so the attitude-error scale
    /// `1 / (2 * sqrt(1 + trace))` blows up. The geometric law only
    /// stabilizes attitude errors well inside 180 degrees.
    #[error("attitude error is near 180 degrees (1 + trace(Rd^T R) = {trace:e}); error metric undefined")]
    AttitudeErrorSingular { trace: f64 },

    /// The matrix handed to the vee map was not skew-symmetric.
    #[error("matrix is not skew-symmetric (max |S + S^T| = {residual:e})")]
    NotSkewSymmetric { residual: f64 },
}
