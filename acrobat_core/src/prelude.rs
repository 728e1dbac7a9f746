// acrobat_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::control::WrenchController;
pub use crate::error::{ConfigError, ControlError};

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::types::{Attitude, Pose, SpatialWrench, StateSample, VelocityState, Wrench};

// --- Configuration ---
pub use crate::config::{AllocationConfig, MissionConfig, TargetConfig, VehicleConfig};

// --- Control and Allocation ---
pub use crate::allocation::{ActuatorAllocator, ActuatorCommand};
pub use crate::control::geometric::{ControllerGains, DesiredState, GeometricWrenchController};
pub use crate::pipeline::{ControlPipeline, CycleOutput};

// --- Math helpers (Export common ones for convenience) ---
pub use crate::math::rotation::{euler_to_rotation_matrix, rotation_matrix_to_euler};
pub use crate::math::skew::{skew_to_vector, vector_to_skew};
