// acrobat_core/src/config.rs

//! Mission configuration as it is read from disk.
//!
//! Every section has a `Default` matching the ACROBAT prototype, so an empty
//! file is a valid mission: hold 20 cm in front of the marker, aligned with it.

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::allocation::ActuatorCommand;
use crate::control::geometric::{ControllerGains, DesiredState};
use crate::error::ConfigError;
use crate::math::rotation::euler_to_rotation_matrix;
use crate::utils::serde_helpers;

// =========================================================================
// == Top-Level Configuration ==
// =========================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct MissionConfig {
    #[serde(default)]
    pub vehicle: VehicleConfig,

    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub gains: ControllerGains,

    #[serde(default)]
    pub allocation: AllocationConfig,
}

impl MissionConfig {
    /// Checks what can be checked without building the pipeline.
    /// The allocation matrix is checked when it is inverted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let v = &self.vehicle;
        if !v.mass.is_finite() {
            return Err(ConfigError::NonFiniteValue("vehicle.mass"));
        }
        if v.mass <= 0.0 {
            return Err(ConfigError::NonPositiveMass(v.mass));
        }
        if v.inertia.iter().any(|i| !i.is_finite()) {
            return Err(ConfigError::NonFiniteValue("vehicle.inertia"));
        }
        if v.inertia.iter().any(|&i| i <= 0.0) {
            return Err(ConfigError::NonPositiveInertia(v.inertia));
        }
        if !v.max_blade_rps.is_finite() {
            return Err(ConfigError::NonFiniteValue("vehicle.max_blade_rps"));
        }
        if v.max_blade_rps <= 0.0 {
            return Err(ConfigError::NonPositiveBladeRate(v.max_blade_rps));
        }

        let t = &self.target;
        let targets = [
            ("target.position", &t.position),
            ("target.linear_velocity", &t.linear_velocity),
            ("target.attitude", &t.attitude),
            ("target.angular_velocity", &t.angular_velocity),
            ("target.angular_acceleration", &t.angular_acceleration),
        ];
        for (name, value) in targets {
            if value.iter().any(|x| !x.is_finite()) {
                return Err(ConfigError::NonFiniteValue(name));
            }
        }

        let g = &self.gains;
        if [g.kx, g.kv, g.kr, g.kw].iter().any(|k| !k.is_finite()) {
            return Err(ConfigError::NonFiniteValue("gains"));
        }
        Ok(())
    }
}

// =========================================================================
// == Configuration Sub-Structs ==
// =========================================================================

/// Physical constants of the free-flyer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VehicleConfig {
    /// kg
    pub mass: f64,
    /// Diagonal of the inertia tensor, kg·m².
    #[serde(with = "serde_helpers::vec3_from_array")]
    pub inertia: Vector3<f64>,
    /// Blade speed at a normalized command of 1, revolutions per second.
    pub max_blade_rps: f64,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            mass: 0.340,
            inertia: Vector3::new(0.1348056, 0.1902704, 0.1435024),
            max_blade_rps: 568.0,
        }
    }
}

impl VehicleConfig {
    /// Blade speeds a command asks for, in revolutions per second.
    pub fn blade_rps(&self, command: &ActuatorCommand) -> Vector3<f64> {
        command.blade_speeds() * self.max_blade_rps
    }
}

/// The static set-point, expressed in the marker frame (z pointing out of the tag).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
    /// m
    #[serde(with = "serde_helpers::vec3_from_array")]
    pub position: Vector3<f64>,
    /// m/s
    #[serde(with = "serde_helpers::vec3_from_array")]
    pub linear_velocity: Vector3<f64>,
    /// `(roll, pitch, yaw)`, radians.
    #[serde(with = "serde_helpers::vec3_from_array")]
    pub attitude: Vector3<f64>,
    /// rad/s
    #[serde(with = "serde_helpers::vec3_from_array")]
    pub angular_velocity: Vector3<f64>,
    /// rad/s²
    #[serde(with = "serde_helpers::vec3_from_array")]
    pub angular_acceleration: Vector3<f64>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.2),
            linear_velocity: Vector3::zeros(),
            attitude: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
            angular_acceleration: Vector3::zeros(),
        }
    }
}

impl TargetConfig {
    /// Freezes the target. This is the only place the desired rotation
    /// matrix is built.
    pub fn desired_state(&self) -> DesiredState {
        DesiredState {
            position: self.position,
            linear_velocity: self.linear_velocity,
            rotation: euler_to_rotation_matrix(&self.attitude),
            angular_velocity: self.angular_velocity,
            angular_acceleration: self.angular_acceleration,
        }
    }
}

/// Thruster geometry. Column `i` is the `(force_x, force_z, torque_y)`
/// produced by unit intensity on thruster `i`; the column order must match
/// the ESC wiring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AllocationConfig {
    #[serde(with = "serde_helpers::columns_from_arrays")]
    pub columns: [Vector3<f64>; 3],
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            columns: [
                Vector3::new(0.2588, -0.9659, 0.8528812),
                Vector3::new(-0.9659, 0.2588, -0.85289255),
                Vector3::new(0.7071, 0.7071, -0.85290402),
            ],
        }
    }
}

impl AllocationConfig {
    pub fn matrix(&self) -> Matrix3<f64> {
        Matrix3::from_columns(&self.columns)
    }
}
