// acrobat_ctl/src/logging.rs

use tracing_subscriber::EnvFilter;

/// Used when neither `--log-filter` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "info,acrobat_core=debug";

fn build_filter(directives: Option<&str>) -> EnvFilter {
    match directives {
        Some(d) => EnvFilter::new(d),
        None => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        }
    }
}

/// Installs the global subscriber. Stdout carries pulse widths, so logs go
/// to stderr.
pub fn init(directives: Option<&str>) {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(directives))
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
