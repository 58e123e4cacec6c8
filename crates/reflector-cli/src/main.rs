//! `reflector` command-line entry point.

use anyhow::Context;
use reflector_cli::{run, setup_tracing, Args, DriverConfig, USAGE};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse_normalized(std::env::args_os());
    setup_tracing(args.verbose);

    let config = match DriverConfig::from_args(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            if err.is_usage_error() {
                eprintln!("{}", USAGE);
            }
            return ExitCode::FAILURE;
        }
    };

    match generate(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn generate(config: &DriverConfig) -> anyhow::Result<()> {
    let summary = run(config)
        .with_context(|| format!("Reflection generation for '{}' failed", config.project))?;

    println!(
        "Reflection for {} generated in {:.3}s ({} generated, {} up to date, {} skipped)",
        config.project,
        summary.elapsed.as_secs_f64(),
        summary.generated,
        summary.reused,
        summary.skipped
    );
    Ok(())
}
