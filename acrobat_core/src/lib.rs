// acrobat_core/src/lib.rs

// The public modules of the control library. Everything in here is pure:
// no I/O, no clocks, no hardware. The application crate owns all of that.
pub mod allocation;
pub mod config;
pub mod control;
pub mod error;
pub mod frames;
pub mod math;
pub mod pipeline;
pub mod prelude;
pub mod types;
pub mod utils;
