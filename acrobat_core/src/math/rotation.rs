// acrobat_core/src/math/rotation.rs

//! Euler-angle ↔ rotation-matrix conversions.
//!
//! One convention is used everywhere in the crate: `angles = (roll, pitch, yaw)`
//! and
//!
//! ```text
//! R = Rz(yaw) * Ry(pitch) * Rx(roll)
//! ```
//!
//! The desired attitude and every measured attitude go through the same
//! function, which the geometric attitude error relies on.

use nalgebra::{Matrix3, Rotation3, Vector3};

/// Below this value of `sqrt(R00² + R10²)` the pitch is treated as ±90°
/// and yaw is no longer observable.
pub const GIMBAL_LOCK_THRESHOLD: f64 = 1e-6;

/// Builds `Rz(yaw) * Ry(pitch) * Rx(roll)` from `(roll, pitch, yaw)` in radians.
pub fn euler_to_rotation_matrix(angles: &Vector3<f64>) -> Matrix3<f64> {
    // nalgebra applies roll, then pitch, then yaw: the same product as above.
    Rotation3::from_euler_angles(angles.x, angles.y, angles.z).into_inner()
}

/// Recovers `(roll, pitch, yaw)` from a rotation matrix.
///
/// Near gimbal lock (pitch ≈ ±90°) only the combination of roll and yaw is
/// observable; yaw is reported as zero and the whole rotation is folded into
/// roll. Rebuilding the matrix from the result still gives back `r`, but the
/// individual angles are not the ones that produced it.
pub fn rotation_matrix_to_euler(r: &Matrix3<f64>) -> Vector3<f64> {
    let sy = (r[(0, 0)] * r[(0, 0)] + r[(1, 0)] * r[(1, 0)]).sqrt();

    if sy < GIMBAL_LOCK_THRESHOLD {
        let roll = (-r[(1, 2)]).atan2(r[(1, 1)]);
        let pitch = (-r[(2, 0)]).atan2(sy);
        return Vector3::new(roll, pitch, 0.0);
    }

    let roll = r[(2, 1)].atan2(r[(2, 2)]);
    let pitch = (-r[(2, 0)]).atan2(sy);
    let yaw = r[(1, 0)].atan2(r[(0, 0)]);
    Vector3::new(roll, pitch, yaw)
}
