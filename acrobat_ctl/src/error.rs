// acrobat_ctl/src/error.rs

use acrobat_core::error::ConfigError;
use std::path::PathBuf;

/// Errors that stop the controller process.
#[derive(Debug, thiserror::Error)]
pub enum CtlError {
    #[error("invalid mission configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to load configuration: {0}")]
    Figment(#[from] figment::Error),

    #[error("configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("line {line}: {reason}")]
    SampleParse { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
