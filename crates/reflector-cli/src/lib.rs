//! Reflection header tool.
//!
//! Scans C++ headers for reflection markers, generates a
//! `<stem>.generated.h` for each reflected header and a
//! `<Project>Reflection.h` that registers everything at startup.

pub mod args;
pub mod config;
pub mod driver;
pub mod scan;

pub use args::{Args, USAGE};
pub use config::{ConfigError, ConfigFile, DriverConfig};
pub use driver::{run, DriverError, RunSummary};

/// Install the stderr subscriber. `RUST_LOG` overrides the default level.
pub fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
