// acrobat_core/src/utils/mod.rs

pub mod serde_helpers;
