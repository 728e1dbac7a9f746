// acrobat_ctl/src/input.rs

//! Text pose samples, one per line:
//!
//! ```text
//! x y z a b c [vx vy vz wx wy wz]
//! ```
//!
//! `a b c` is either `roll pitch yaw` or a rotation vector, depending on
//! `AttitudeFormat`. Blank lines and `#` comments are skipped.

use acrobat_core::frames::{marker_to_body, rotation_vector_to_matrix};
use acrobat_core::math::rotation::euler_to_rotation_matrix;
use acrobat_core::types::{Attitude, Pose, StateSample, VelocityState};
use nalgebra::Vector3;

use crate::cli::AttitudeFormat;
use crate::error::CtlError;

const POSE_FIELDS: usize = 6;
const POSE_AND_VELOCITY_FIELDS: usize = 12;

/// A parsed line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedSample {
    pub sample: StateSample,
    /// False when the line carried no velocities and zeros were substituted.
    pub has_velocity: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SampleParser {
    pub format: AttitudeFormat,
    pub marker_frame: bool,
}

impl SampleParser {
    pub fn new(format: AttitudeFormat, marker_frame: bool) -> Self {
        Self {
            format,
            marker_frame,
        }
    }

    /// `Ok(None)` for lines that carry no sample.
    pub fn parse_line(&self, line_no: usize, line: &str) -> Result<Option<ParsedSample>, CtlError> {
        let content = line.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            return Ok(None);
        }

        let values = content
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|e| CtlError::SampleParse {
                    line: line_no,
                    reason: format!("`{}`: {}", token, e),
                })
            })
            .collect::<Result<Vec<f64>, CtlError>>()?;

        if values.len() != POSE_FIELDS && values.len() != POSE_AND_VELOCITY_FIELDS {
            return Err(CtlError::SampleParse {
                line: line_no,
                reason: format!(
                    "expected {} or {} values, got {}",
                    POSE_FIELDS,
                    POSE_AND_VELOCITY_FIELDS,
                    values.len()
                ),
            });
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(CtlError::SampleParse {
                line: line_no,
                reason: format!("non-finite value {}", bad),
            });
        }

        let vec3 = |i: usize| Vector3::new(values[i], values[i + 1], values[i + 2]);

        let pose = Pose {
            position: vec3(0),
            attitude: self.attitude(vec3(3)),
        };

        let has_velocity = values.len() == POSE_AND_VELOCITY_FIELDS;
        let velocity = if has_velocity {
            VelocityState {
                linear: vec3(6),
                angular: vec3(9),
            }
        } else {
            VelocityState::default()
        };

        Ok(Some(ParsedSample {
            sample: StateSample { pose, velocity },
            has_velocity,
        }))
    }

    fn attitude(&self, raw: Vector3<f64>) -> Attitude {
        match (self.format, self.marker_frame) {
            (AttitudeFormat::Euler, false) => Attitude::Euler(raw),
            (AttitudeFormat::Euler, true) => {
                Attitude::Matrix(marker_to_body(&euler_to_rotation_matrix(&raw)))
            }
            (AttitudeFormat::RotationVector, false) => {
                Attitude::Matrix(rotation_vector_to_matrix(&raw))
            }
            (AttitudeFormat::RotationVector, true) => {
                Attitude::Matrix(marker_to_body(&rotation_vector_to_matrix(&raw)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::Matrix3;
    use std::f64::consts::PI;

    fn euler_parser() -> SampleParser {
        SampleParser::new(AttitudeFormat::Euler, false)
    }

    #[test]
    fn test_blank_and_comment_lines_are_skipped() {
        let parser = euler_parser();
        assert_eq!(parser.parse_line(1, "").unwrap(), None);
        assert_eq!(parser.parse_line(2, "   \t").unwrap(), None);
        assert_eq!(parser.parse_line(3, "# x y z roll pitch yaw").unwrap(), None);
    }

    #[test]
    fn test_pose_only_line_defaults_velocity() {
        let parsed = euler_parser()
            .parse_line(1, "0.1 0.0 0.2 0.0 0.05 0.0  # trailing comment")
            .unwrap()
            .unwrap();

        assert!(!parsed.has_velocity);
        assert_eq!(parsed.sample.pose.position, Vector3::new(0.1, 0.0, 0.2));
        assert_eq!(
            parsed.sample.pose.attitude,
            Attitude::Euler(Vector3::new(0.0, 0.05, 0.0))
        );
        assert_eq!(parsed.sample.velocity, VelocityState::default());
    }

    #[test]
    fn test_full_line_carries_velocity() {
        let parsed = euler_parser()
            .parse_line(1, "0 0 0.2 0 0 0 0.1 0.2 0.3 0.4 0.5 0.6")
            .unwrap()
            .unwrap();

        assert!(parsed.has_velocity);
        assert_eq!(parsed.sample.velocity.linear, Vector3::new(0.1, 0.2, 0.3));
        assert_eq!(parsed.sample.velocity.angular, Vector3::new(0.4, 0.5, 0.6));
    }

    #[test]
    fn test_wrong_field_count_is_an_error() {
        let err = euler_parser().parse_line(7, "1 2 3 4").unwrap_err();
        match err {
            CtlError::SampleParse { line, reason } => {
                assert_eq!(line, 7);
                assert!(reason.contains("got 4"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_garbage_token_is_an_error() {
        assert!(matches!(
            euler_parser().parse_line(2, "0 0 0.2 0 zero 0"),
            Err(CtlError::SampleParse { line: 2, .. })
        ));
    }

    #[test]
    fn test_non_finite_value_is_an_error() {
        assert!(euler_parser().parse_line(1, "0 0 inf 0 0 0").is_err());
        assert!(euler_parser().parse_line(1, "0 0 NaN 0 0 0").is_err());
    }

    #[test]
    fn test_rotation_vector_from_marker_frame() {
        let parser = SampleParser::new(AttitudeFormat::RotationVector, true);
        let parsed = parser
            .parse_line(1, &format!("0 0 0.2 {} 0 0", PI))
            .unwrap()
            .unwrap();

        match parsed.sample.pose.attitude {
            Attitude::Matrix(r) => assert_abs_diff_eq!(r, Matrix3::identity(), epsilon = 1e-12),
            other => panic!("expected a matrix attitude, got {:?}", other),
        }
    }

    #[test]
    fn test_euler_in_marker_frame_is_flipped() {
        let parser = SampleParser::new(AttitudeFormat::Euler, true);
        let parsed = parser.parse_line(1, "0 0 0.2 0 0 0").unwrap().unwrap();
        assert_abs_diff_eq!(
            parsed.sample.pose.attitude.to_rotation_matrix(),
            Matrix3::from_diagonal(&Vector3::new(1.0, -1.0, -1.0)),
            epsilon = 1e-12
        );
    }
}
