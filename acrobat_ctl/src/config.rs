// acrobat_ctl/src/config.rs

//! Loads the mission configuration from disk.
//!
//! Layers, later ones win:
//! 1. built-in defaults (`MissionConfig::default()`),
//! 2. the TOML file passed with `--config`,
//! 3. `ACROBAT_`-prefixed environment variables, `__` separating sections,
//!    e.g. `ACROBAT_GAINS__KX=5.0` or `ACROBAT_TARGET__POSITION=[0, 0, 0.3]`.

use acrobat_core::config::MissionConfig;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;
use tracing::info;

use crate::error::CtlError;

pub const ENV_PREFIX: &str = "ACROBAT_";

/// The layered provider, before extraction.
pub fn figment(path: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(MissionConfig::default()));
    if let Some(path) = path {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Loads and validates the mission configuration.
pub fn load_mission_config(path: Option<&Path>) -> Result<MissionConfig, CtlError> {
    match path {
        Some(path) if !path.exists() => return Err(CtlError::ConfigNotFound(path.to_path_buf())),
        Some(path) => info!("Loading mission configuration from: {}", path.display()),
        None => info!("No configuration file given, using built-in mission defaults."),
    }

    let config: MissionConfig = figment(path).extract()?;
    config.validate()?;
    Ok(config)
}

/// The configuration as TOML, for `--print-config`.
pub fn render(config: &MissionConfig) -> Result<String, CtlError> {
    Ok(toml::to_string_pretty(config)?)
}
