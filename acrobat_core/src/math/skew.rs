// acrobat_core/src/math/skew.rs

//! The hat map `S(ω)` and its inverse (the vee map).
//!
//! For v = [x, y, z]^T:
//! ```text
//! S(v) = [ 0  -z   y]
//!        [ z   0  -x]
//!        [-y   x   0]
//! ```
//! so that `S(v) * u = v × u`.

use nalgebra::{Matrix3, Vector3};

use crate::error::ControlError;

/// Cross-product matrix of `v`.
#[rustfmt::skip]
pub fn vector_to_skew(v: &Vector3<f64>) -> Matrix3<f64> {
    Matrix3::new(
        0.0, -v.z, v.y,
        v.z, 0.0, -v.x,
        -v.y, v.x, 0.0,
    )
}

/// Reads `(S[2][1], S[0][2], S[1][0])` without looking at the rest of the
/// matrix. A matrix that is not skew-symmetric yields a meaningless vector.
pub fn skew_to_vector(s: &Matrix3<f64>) -> Vector3<f64> {
    Vector3::new(s[(2, 1)], s[(0, 2)], s[(1, 0)])
}

/// Largest entry of `|S + S^T|`. Zero for an exactly skew-symmetric matrix,
/// NaN if any entry is NaN.
pub fn skew_residual(s: &Matrix3<f64>) -> f64 {
    (s + s.transpose()).iter().fold(0.0_f64, |acc, e| {
        if e.is_nan() || e.abs() > acc {
            e.abs()
        } else {
            acc
        }
    })
}

/// Vee map that first checks `s` is skew-symmetric to within `tolerance`.
pub fn try_skew_to_vector(s: &Matrix3<f64>, tolerance: f64) -> Result<Vector3<f64>, ControlError> {
    let residual = skew_residual(s);
    // Written so that a NaN residual is rejected too.
    if !(residual <= tolerance) {
        return Err(ControlError::NotSkewSymmetric { residual });
    }
    Ok(skew_to_vector(s))
}
