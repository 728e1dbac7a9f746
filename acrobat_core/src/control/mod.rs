// acrobat_core/src/control/mod.rs

use std::fmt::Debug;

use crate::error::ControlError;
use crate::types::{StateSample, Wrench};

/// The contract for any algorithm that turns a state sample into a wrench
/// demand the allocator can distribute.
///
/// Implementations hold only read-only configuration, so one instance can be
/// shared by reference across threads.
pub trait WrenchController: Debug + Send + Sync {
    /// Evaluates one control cycle. Must not mutate any internal state.
    fn compute(&self, sample: &StateSample) -> Result<Wrench, ControlError>;
}

pub mod geometric;
