// acrobat_core/src/control/geometric.rs

//! Geometric PD controller on SO(3).
//!
//! Position is handled by a plain PD law whose output acceleration is rotated
//! into the body frame (thrust acts along body axes). Attitude is handled on
//! rotation matrices directly:
//!
//! ```text
//! e_R   = vee(Rd^T R - R^T Rd) / (2 sqrt(1 + tr(Rd^T R)))
//! ω_r   = R^T Rd ω_d
//! e_ω   = ω - ω_r
//! τ     = -Kr e_R - Kw e_ω + S(ω_r) (J ω_r) + J (R^T Rd α_d)
//! ```
//!
//! with `J` the diagonal inertia. The Euler-angle state is only used to build
//! `R`; the error metric never touches Euler angles.

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::WrenchController;
use crate::error::ControlError;
use crate::math::rotation::euler_to_rotation_matrix;
use crate::math::skew::{try_skew_to_vector, vector_to_skew};
use crate::types::{SpatialWrench, StateSample, Wrench};

/// Smallest `1 + tr(Rd^T R)` for which the attitude error is evaluated.
/// It reaches zero at a 180 degree error.
pub const ATTITUDE_SINGULARITY_EPSILON: f64 = 1e-9;

/// Tolerance on `Rd^T R - R^T Rd` being skew-symmetric. The difference is
/// skew by construction; anything above round-off means a broken input matrix.
pub const SKEW_TOLERANCE: f64 = 1e-9;

/// Controller gains. All four are expected to be positive; nothing here
/// enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerGains {
    /// Proportional gain, translational part.
    pub kx: f64,
    /// Derivative gain, translational part.
    pub kv: f64,
    /// Proportional gain, rotational part.
    pub kr: f64,
    /// Derivative gain, rotational part.
    pub kw: f64,
}

impl Default for ControllerGains {
    fn default() -> Self {
        Self {
            kx: 4.0,
            kv: 0.1,
            kr: 2.0,
            kw: 0.1,
        }
    }
}

/// The fixed set-point. `rotation` is computed once from Euler angles when
/// the mission is configured.
#[derive(Debug, Clone, PartialEq)]
pub struct DesiredState {
    pub position: Vector3<f64>,
    pub linear_velocity: Vector3<f64>,
    pub rotation: Matrix3<f64>,
    pub angular_velocity: Vector3<f64>,
    pub angular_acceleration: Vector3<f64>,
}

impl DesiredState {
    /// Holds `position` at attitude `angles`, at rest.
    pub fn hold(position: Vector3<f64>, angles: &Vector3<f64>) -> Self {
        Self {
            position,
            linear_velocity: Vector3::zeros(),
            rotation: euler_to_rotation_matrix(angles),
            angular_velocity: Vector3::zeros(),
            angular_acceleration: Vector3::zeros(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeometricWrenchController {
    gains: ControllerGains,
    desired: DesiredState,
    mass: f64,
    inertia: Vector3<f64>,
}

impl GeometricWrenchController {
    pub fn new(
        gains: ControllerGains,
        desired: DesiredState,
        mass: f64,
        inertia: Vector3<f64>,
    ) -> Self {
        Self {
            gains,
            desired,
            mass,
            inertia,
        }
    }

    pub fn gains(&self) -> &ControllerGains {
        &self.gains
    }

    pub fn desired(&self) -> &DesiredState {
        &self.desired
    }

    /// Evaluates the control law for Euler-angle attitude and returns the
    /// wrench in the subspace the thrusters span.
    pub fn compute_wrench(
        &self,
        position: &Vector3<f64>,
        attitude: &Vector3<f64>,
        linear_velocity: &Vector3<f64>,
        angular_velocity: &Vector3<f64>,
    ) -> Result<Wrench, ControlError> {
        let r = euler_to_rotation_matrix(attitude);
        let spatial = self.compute_spatial_wrench(position, &r, linear_velocity, angular_velocity)?;
        Ok(spatial.reduce())
    }

    /// The full 3D law, before the reduction to two forces and one torque.
    pub fn compute_spatial_wrench(
        &self,
        position: &Vector3<f64>,
        r: &Matrix3<f64>,
        linear_velocity: &Vector3<f64>,
        angular_velocity: &Vector3<f64>,
    ) -> Result<SpatialWrench, ControlError> {
        let d = &self.desired;
        let g = &self.gains;

        // --- Translational part ---
        let error_position = position - d.position;
        let error_velocity = linear_velocity - d.linear_velocity;
        let acceleration = -g.kx * error_position - g.kv * error_velocity;
        let force = self.mass * (r * acceleration);

        // --- Rotational part ---
        let error_attitude = self.attitude_error(r)?;

        let r_t_rd = r.transpose() * d.rotation;
        let omega_ref = r_t_rd * d.angular_velocity;
        let error_omega = angular_velocity - omega_ref;
        let alpha_ref = r_t_rd * d.angular_acceleration;

        let gyroscopic = vector_to_skew(&omega_ref) * self.inertia.component_mul(&omega_ref);
        let feed_forward = self.inertia.component_mul(&alpha_ref);
        let torque = -g.kr * error_attitude - g.kw * error_omega + gyroscopic + feed_forward;

        trace!(
            ?error_position,
            ?error_attitude,
            ?force,
            ?torque,
            "geometric controller evaluated"
        );

        Ok(SpatialWrench { force, torque })
    }

    /// `vee(Rd^T R - R^T Rd) / (2 sqrt(1 + tr(Rd^T R)))`.
    ///
    /// Fails when the attitude error approaches 180 degrees: the scale factor
    /// is unbounded there, and this law does not stabilize such errors anyway.
    pub fn attitude_error(&self, r: &Matrix3<f64>) -> Result<Vector3<f64>, ControlError> {
        let rd = &self.desired.rotation;
        let rd_t_r = rd.transpose() * r;

        let one_plus_trace = 1.0 + rd_t_r.trace();
        // Negated comparison so NaN lands here as well.
        if !(one_plus_trace > ATTITUDE_SINGULARITY_EPSILON) {
            return Err(ControlError::AttitudeErrorSingular {
                trace: one_plus_trace,
            });
        }

        let m = rd_t_r - r.transpose() * rd;
        let vee = try_skew_to_vector(&m, SKEW_TOLERANCE)?;
        Ok(vee / (2.0 * one_plus_trace.sqrt()))
    }
}

impl WrenchController for GeometricWrenchController {
    fn compute(&self, sample: &StateSample) -> Result<Wrench, ControlError> {
        // Matrix attitudes go through Euler angles first so that every sample
        // builds R with the same convention as the desired rotation.
        self.compute_wrench(
            &sample.pose.position,
            &sample.pose.attitude.to_euler(),
            &sample.velocity.linear,
            &sample.velocity.angular,
        )
    }
}
