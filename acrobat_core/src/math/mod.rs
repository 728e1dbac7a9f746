// acrobat_core/src/math/mod.rs

//! SO(3) helpers shared by the controller, the frame conversions and the
//! configuration layer.

pub mod rotation;
pub mod skew;
