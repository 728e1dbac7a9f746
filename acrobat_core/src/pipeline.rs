// acrobat_core/src/pipeline.rs

use nalgebra::Vector3;
use tracing::{debug, trace};

use crate::allocation::{ActuatorAllocator, ActuatorCommand};
use crate::config::MissionConfig;
use crate::control::geometric::GeometricWrenchController;
use crate::control::WrenchController;
use crate::error::{ConfigError, ControlError};
use crate::types::{StateSample, Wrench};

/// What one control cycle produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleOutput {
    pub wrench: Wrench,
    /// `A⁻¹ · wrench`, before the square-root thrust model.
    pub intensities: Vector3<f64>,
    pub command: ActuatorCommand,
}

/// Controller and allocator, frozen at startup.
///
/// `step` takes `&self`; nothing changes between cycles.
#[derive(Debug)]
pub struct ControlPipeline {
    controller: Box<dyn WrenchController>,
    allocator: ActuatorAllocator,
}

impl ControlPipeline {
    pub fn new(controller: Box<dyn WrenchController>, allocator: ActuatorAllocator) -> Self {
        Self {
            controller,
            allocator,
        }
    }

    /// Validates `config`, builds the desired rotation and inverts the
    /// allocation matrix. Fails before any cycle can run.
    pub fn from_config(config: &MissionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let allocator = ActuatorAllocator::new(config.allocation.matrix())?;
        let desired = config.target.desired_state();

        debug!(
            mass = config.vehicle.mass,
            inertia = ?config.vehicle.inertia,
            target = ?desired.position,
            gains = ?config.gains,
            "control pipeline configured"
        );

        let controller = GeometricWrenchController::new(
            config.gains,
            desired,
            config.vehicle.mass,
            config.vehicle.inertia,
        );

        Ok(Self::new(Box::new(controller), allocator))
    }

    pub fn allocator(&self) -> &ActuatorAllocator {
        &self.allocator
    }

    /// One pass: sample → wrench → intensities → pulse widths.
    pub fn step(&self, sample: &StateSample) -> Result<CycleOutput, ControlError> {
        let wrench = self.controller.compute(sample)?;
        let intensities = self.allocator.intensities(&wrench);
        let command = ActuatorCommand::from_intensities(&intensities);

        trace!(?wrench, ?intensities, pulse_widths = ?command.pulse_widths, "cycle complete");

        Ok(CycleOutput {
            wrench,
            intensities,
            command,
        })
    }
}
