// acrobat_ctl/src/cli.rs

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// ACROBAT pose controller.
///
/// Reads pose samples (one per line) from a file or stdin and writes one line
/// of three thruster pulse widths per sample to stdout. Logs go to stderr.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Mission configuration TOML file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Pose sample file. Reads stdin when omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// How the three attitude columns of a sample are interpreted.
    #[arg(long, value_enum, default_value_t = AttitudeFormat::Euler)]
    pub attitude: AttitudeFormat,

    /// Samples are in the marker frame (z out of the tag); flip them into
    /// the vehicle frame first.
    #[arg(long, default_value_t = false)]
    pub marker_frame: bool,

    /// Log filter directives, e.g. "debug" or "info,acrobat_core=trace".
    /// Overrides RUST_LOG.
    #[arg(long)]
    pub log_filter: Option<String>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long, default_value_t = false)]
    pub print_config: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttitudeFormat {
    /// roll pitch yaw, radians
    #[default]
    Euler,
    /// Rotation vector (axis × angle, radians), as marker estimators report it
    RotationVector,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_rotation_vector_flag() {
        let cli = Cli::parse_from([
            "acrobat_ctl",
            "--attitude",
            "rotation-vector",
            "--marker-frame",
            "-c",
            "mission.toml",
        ]);
        assert_eq!(cli.attitude, AttitudeFormat::RotationVector);
        assert!(cli.marker_frame);
        assert_eq!(cli.config, Some(PathBuf::from("mission.toml")));
        assert!(cli.input.is_none());
    }
}
