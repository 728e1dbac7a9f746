// acrobat_core/src/types.rs

use nalgebra::{Matrix3, Vector2, Vector3};

use crate::math::rotation::{euler_to_rotation_matrix, rotation_matrix_to_euler};

// --- Pose ---

/// Attitude as the pose estimator delivers it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Attitude {
    /// `(roll, pitch, yaw)` in radians, see `math::rotation` for the convention.
    Euler(Vector3<f64>),
    /// A proper rotation matrix (body to reference).
    Matrix(Matrix3<f64>),
}

impl Attitude {
    /// Euler triple for this attitude. A matrix near gimbal lock loses its yaw
    /// here (see `rotation_matrix_to_euler`).
    pub fn to_euler(&self) -> Vector3<f64> {
        match self {
            Attitude::Euler(angles) => *angles,
            Attitude::Matrix(r) => rotation_matrix_to_euler(r),
        }
    }

    pub fn to_rotation_matrix(&self) -> Matrix3<f64> {
        match self {
            Attitude::Euler(angles) => euler_to_rotation_matrix(angles),
            Attitude::Matrix(r) => *r,
        }
    }
}

impl Default for Attitude {
    fn default() -> Self {
        Attitude::Euler(Vector3::zeros())
    }
}

/// Position and attitude of the vehicle relative to the marker.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub position: Vector3<f64>,
    pub attitude: Attitude,
}

impl Pose {
    pub fn from_euler(position: Vector3<f64>, angles: Vector3<f64>) -> Self {
        Self {
            position,
            attitude: Attitude::Euler(angles),
        }
    }
}

// --- Velocity ---

/// Linear and angular velocity fed to the derivative terms.
///
/// Nothing on the vehicle measures these yet. `Default` is all zeros, which
/// keeps the loop running but removes the damping the `Kv`/`Kw` terms add.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VelocityState {
    pub linear: Vector3<f64>,
    pub angular: Vector3<f64>,
}

/// Everything one control cycle consumes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StateSample {
    pub pose: Pose,
    pub velocity: VelocityState,
}

impl StateSample {
    /// A sample with no velocity information (velocities default to zero).
    pub fn at_rest(pose: Pose) -> Self {
        Self {
            pose,
            velocity: VelocityState::default(),
        }
    }
}

// --- Wrench ---

/// Full 3D force/torque before it is cut down to what the thrusters can produce.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpatialWrench {
    pub force: Vector3<f64>,
    pub torque: Vector3<f64>,
}

impl SpatialWrench {
    /// Keeps body x and z force and torque about body y.
    ///
    /// The three thrusters lie in the body x-z plane, so these are the only
    /// wrench components they span. The allocation matrix rows are ordered
    /// the same way.
    pub fn reduce(&self) -> Wrench {
        Wrench {
            force: Vector2::new(self.force.x, self.force.z),
            torque: self.torque.y,
        }
    }
}

/// The wrench the allocator accepts: two forces and one torque.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Wrench {
    pub force: Vector2<f64>,
    pub torque: f64,
}

impl Wrench {
    pub fn new(force: Vector2<f64>, torque: f64) -> Self {
        Self { force, torque }
    }

    /// `(force[0], force[1], torque)`, the order the allocation matrix expects.
    pub fn as_vector(&self) -> Vector3<f64> {
        Vector3::new(self.force.x, self.force.y, self.torque)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_reduce_keeps_x_z_force_and_y_torque() {
        let spatial = SpatialWrench {
            force: Vector3::new(1.0, 2.0, 3.0),
            torque: Vector3::new(4.0, 5.0, 6.0),
        };
        let wrench = spatial.reduce();
        assert_eq!(wrench.force, Vector2::new(1.0, 3.0));
        assert_eq!(wrench.torque, 5.0);
        assert_eq!(wrench.as_vector(), Vector3::new(1.0, 3.0, 5.0));
    }

    #[test]
    fn test_attitude_conversions_agree() {
        let angles = Vector3::new(0.1, -0.2, 0.3);
        let from_euler = Attitude::Euler(angles);
        let from_matrix = Attitude::Matrix(euler_to_rotation_matrix(&angles));

        assert_abs_diff_eq!(from_matrix.to_euler(), angles, epsilon = 1e-12);
        assert_abs_diff_eq!(
            from_euler.to_rotation_matrix(),
            from_matrix.to_rotation_matrix(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_default_velocity_is_zero() {
        let sample = StateSample::at_rest(Pose::default());
        assert_eq!(sample.velocity.linear, Vector3::zeros());
        assert_eq!(sample.velocity.angular, Vector3::zeros());
    }
}
