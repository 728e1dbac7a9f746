// acrobat_core/src/allocation/mod.rs

//! Thruster allocation: wrench → per-thruster intensity → blade speed → pulse width.

use nalgebra::{Matrix3, Vector3};
use tracing::debug;

use crate::error::ConfigError;
use crate::types::Wrench;

// ESC protocol: 1000 µs full reverse, 1500 µs neutral, 2000 µs full forward.
pub const PULSE_WIDTH_NEUTRAL: f64 = 1500.0;
pub const PULSE_WIDTH_HALF_RANGE: f64 = 500.0;
pub const PULSE_WIDTH_MIN: f64 = PULSE_WIDTH_NEUTRAL - PULSE_WIDTH_HALF_RANGE;
pub const PULSE_WIDTH_MAX: f64 = PULSE_WIDTH_NEUTRAL + PULSE_WIDTH_HALF_RANGE;

/// Allocation matrices whose |det| is below this fraction of the product of
/// their column norms are rejected as singular. The ratio is 1 for orthogonal
/// columns and does not depend on the units the columns are given in.
pub const MIN_ALLOCATION_CONDITION: f64 = 1e-9;

/// |det(A)| / (‖a₁‖·‖a₂‖·‖a₃‖), in `[0, 1]` by Hadamard's inequality.
/// Zero when any column vanishes.
pub fn normalized_determinant(allocation: &Matrix3<f64>) -> f64 {
    let column_norms: f64 = allocation.column_iter().map(|c| c.norm()).product();
    if column_norms == 0.0 {
        return 0.0;
    }
    allocation.determinant().abs() / column_norms
}

/// Maps a reduced wrench onto the three thrusters.
///
/// `A` maps thruster intensities to `(force_x, force_z, torque_y)`; column `i`
/// is thruster `i`'s contribution. Its inverse is computed once here and
/// reused for every cycle.
#[derive(Debug, Clone)]
pub struct ActuatorAllocator {
    allocation: Matrix3<f64>,
    allocation_inverse: Matrix3<f64>,
}

impl ActuatorAllocator {
    pub fn new(allocation: Matrix3<f64>) -> Result<Self, ConfigError> {
        let determinant = allocation.determinant();
        if !determinant.is_finite() {
            return Err(ConfigError::NonFiniteValue("allocation.columns"));
        }
        if normalized_determinant(&allocation) < MIN_ALLOCATION_CONDITION {
            return Err(ConfigError::SingularAllocationMatrix { determinant });
        }

        let allocation_inverse = allocation
            .try_inverse()
            .ok_or(ConfigError::SingularAllocationMatrix { determinant })?;

        debug!(determinant, "allocation matrix inverted");

        Ok(Self {
            allocation,
            allocation_inverse,
        })
    }

    /// Builds `A` from one column per thruster.
    pub fn from_columns(columns: &[Vector3<f64>; 3]) -> Result<Self, ConfigError> {
        Self::new(Matrix3::from_columns(columns))
    }

    pub fn allocation_matrix(&self) -> &Matrix3<f64> {
        &self.allocation
    }

    pub fn allocation_inverse(&self) -> &Matrix3<f64> {
        &self.allocation_inverse
    }

    /// `A⁻¹ · (force_x, force_z, torque_y)`. Linear in the wrench.
    pub fn intensities(&self, wrench: &Wrench) -> Vector3<f64> {
        self.allocation_inverse * wrench.as_vector()
    }

    /// Full allocation. The result is not clamped to the protocol range.
    pub fn allocate(&self, wrench: &Wrench) -> ActuatorCommand {
        ActuatorCommand::from_intensities(&self.intensities(wrench))
    }
}

/// Thrust grows with the square of blade speed, so speed is the square root
/// of the demanded intensity. The sign carries the spin direction.
pub fn signed_sqrt(q: f64) -> f64 {
    if q < 0.0 {
        -(-q).sqrt()
    } else {
        q.sqrt()
    }
}

/// Normalized blade speed (nominally -1..=1) to pulse width in microseconds.
pub fn pulse_width(speed: f64) -> f64 {
    PULSE_WIDTH_NEUTRAL + speed * PULSE_WIDTH_HALF_RANGE
}

/// One pulse width per thruster, in allocation-column order.
///
/// Values may lie outside `[PULSE_WIDTH_MIN, PULSE_WIDTH_MAX]`; whoever drives
/// the ESCs saturates them (see `saturated`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActuatorCommand {
    pub pulse_widths: [f64; 3],
}

impl ActuatorCommand {
    /// All thrusters at rest.
    pub fn neutral() -> Self {
        Self {
            pulse_widths: [PULSE_WIDTH_NEUTRAL; 3],
        }
    }

    pub fn from_intensities(intensities: &Vector3<f64>) -> Self {
        let speeds = intensities.map(signed_sqrt);
        Self {
            pulse_widths: [pulse_width(speeds.x), pulse_width(speeds.y), pulse_width(speeds.z)],
        }
    }

    /// Normalized signed blade speeds this command encodes.
    pub fn blade_speeds(&self) -> Vector3<f64> {
        Vector3::from_iterator(
            self.pulse_widths
                .iter()
                .map(|pw| (pw - PULSE_WIDTH_NEUTRAL) / PULSE_WIDTH_HALF_RANGE),
        )
    }

    pub fn is_within_protocol(&self) -> bool {
        self.pulse_widths
            .iter()
            .all(|pw| (PULSE_WIDTH_MIN..=PULSE_WIDTH_MAX).contains(pw))
    }

    /// Copy clamped to the protocol range. NaN widths become neutral.
    pub fn saturated(&self) -> Self {
        let clamp = |pw: f64| {
            if pw.is_nan() {
                PULSE_WIDTH_NEUTRAL
            } else {
                pw.clamp(PULSE_WIDTH_MIN, PULSE_WIDTH_MAX)
            }
        };
        Self {
            pulse_widths: self.pulse_widths.map(clamp),
        }
    }
}

impl Default for ActuatorCommand {
    fn default() -> Self {
        Self::neutral()
    }
}
