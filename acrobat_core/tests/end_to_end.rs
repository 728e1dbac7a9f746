// acrobat_core/tests/end_to_end.rs

use acrobat_core::frames::{marker_to_body, rotation_vector_to_matrix};
use acrobat_core::prelude::*;
use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra::{Vector2, Vector3};

fn default_pipeline() -> ControlPipeline {
    ControlPipeline::from_config(&MissionConfig::default()).expect("default mission is valid")
}

#[test]
fn on_target_at_rest_commands_neutral() {
    let pipeline = default_pipeline();
    let sample = StateSample::at_rest(Pose::from_euler(
        Vector3::new(0.0, 0.0, 0.2),
        Vector3::zeros(),
    ));

    let out = pipeline.step(&sample).unwrap();

    assert_abs_diff_eq!(out.wrench.force, Vector2::zeros(), epsilon = 1e-12);
    assert_abs_diff_eq!(out.wrench.torque, 0.0, epsilon = 1e-12);
    assert_eq!(out.command.pulse_widths, [1500.0, 1500.0, 1500.0]);
}

#[test]
fn controller_and_allocator_compose_like_the_pipeline() {
    let config = MissionConfig::default();
    let pipeline = ControlPipeline::from_config(&config).unwrap();
    let controller = GeometricWrenchController::new(
        config.gains,
        config.target.desired_state(),
        config.vehicle.mass,
        config.vehicle.inertia,
    );

    let position = Vector3::new(0.03, -0.01, 0.26);
    let attitude = Vector3::new(0.0, 0.15, 0.0);
    let wrench = controller
        .compute_wrench(&position, &attitude, &Vector3::zeros(), &Vector3::zeros())
        .unwrap();
    let command = pipeline.allocator().allocate(&wrench);

    let out = pipeline
        .step(&StateSample::at_rest(Pose::from_euler(position, attitude)))
        .unwrap();

    assert_eq!(out.wrench, wrench);
    assert_eq!(out.command, command);
    assert_relative_eq!(
        pipeline.allocator().allocation_matrix() * out.intensities,
        wrench.as_vector(),
        epsilon = 1e-12
    );
}

#[test]
fn matrix_attitude_matches_euler_attitude() {
    let pipeline = default_pipeline();
    let position = Vector3::new(-0.02, 0.0, 0.18);
    let angles = Vector3::new(0.05, -0.1, 0.2);

    let via_euler = pipeline
        .step(&StateSample::at_rest(Pose::from_euler(position, angles)))
        .unwrap();
    let via_matrix = pipeline
        .step(&StateSample::at_rest(Pose {
            position,
            attitude: Attitude::Matrix(euler_to_rotation_matrix(&angles)),
        }))
        .unwrap();

    assert_relative_eq!(via_euler.intensities, via_matrix.intensities, epsilon = 1e-9);
}

#[test]
fn marker_seen_head_on_is_level() {
    let pipeline = default_pipeline();
    let seen = rotation_vector_to_matrix(&Vector3::new(std::f64::consts::PI, 0.0, 0.0));
    let sample = StateSample::at_rest(Pose {
        position: Vector3::new(0.0, 0.0, 0.2),
        attitude: Attitude::Matrix(marker_to_body(&seen)),
    });

    let out = pipeline.step(&sample).unwrap();
    assert_abs_diff_eq!(out.wrench.torque, 0.0, epsilon = 1e-9);
}

#[test]
fn velocity_feedback_changes_the_command() {
    let pipeline = default_pipeline();
    let pose = Pose::from_euler(Vector3::new(0.0, 0.0, 0.25), Vector3::zeros());

    let at_rest = pipeline.step(&StateSample::at_rest(pose)).unwrap();
    let moving = pipeline
        .step(&StateSample {
            pose,
            velocity: VelocityState {
                linear: Vector3::new(0.0, 0.0, -0.2),
                angular: Vector3::zeros(),
            },
        })
        .unwrap();

    // Approaching the target already: the damping term eases off the push.
    assert!(moving.wrench.force.y.abs() < at_rest.wrench.force.y.abs());
}
