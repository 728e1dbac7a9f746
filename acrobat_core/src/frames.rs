// acrobat_core/src/frames.rs

//! Conversions between the marker estimator's conventions and the controller's.

use nalgebra::{Matrix3, Rotation3, Vector3};
use std::f64::consts::PI;

/// Rotation of π about x.
///
/// The marker frame has z pointing out of the tag (towards the camera); the
/// vehicle frame has it pointing the other way.
pub fn marker_flip() -> Matrix3<f64> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), PI).into_inner()
}

/// Re-expresses a marker-frame attitude in the vehicle convention.
pub fn marker_to_body(r_marker: &Matrix3<f64>) -> Matrix3<f64> {
    marker_flip() * r_marker
}

/// Rotation vector (axis × angle, radians) to rotation matrix.
/// The zero vector maps to the identity.
pub fn rotation_vector_to_matrix(rvec: &Vector3<f64>) -> Matrix3<f64> {
    Rotation3::new(*rvec).into_inner()
}
