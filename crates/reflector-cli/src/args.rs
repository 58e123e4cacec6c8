//! Command-line arguments

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

pub const USAGE: &str =
    "Usage: reflector -pPROJECT_NAME -oOUT_PATH -sSCAN_PATH [-sSCAN_PATH ...] [-force]";

#[derive(Parser, Debug, Default, Clone, PartialEq)]
#[command(name = "reflector")]
#[command(about = "Generate reflection registration code for C++ headers", long_about = None)]
#[command(version)]
pub struct Args {
    /// Project name, used for the aggregate header and its namespace
    #[arg(short = 'p', long = "project", value_name = "PROJECT_NAME")]
    pub project: Option<String>,

    /// Directory receiving generated headers
    #[arg(short = 'o', long = "output", value_name = "OUT_PATH")]
    pub output: Option<PathBuf>,

    /// Directory to scan for headers (repeatable)
    #[arg(short = 's', long = "scan", value_name = "SCAN_PATH")]
    pub scan: Vec<PathBuf>,

    /// Regenerate every header even if its generated file is up to date
    #[arg(long)]
    pub force: bool,

    /// Header included first by the aggregate header
    #[arg(long, value_name = "INCLUDE")]
    pub prelude: Option<String>,

    /// TOML file providing defaults for the options above
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse arguments, accepting the single-dash `-force` spelling.
    pub fn parse_normalized<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::parse_from(normalize(args))
    }
}

/// Rewrite `-force` as `--force`.
pub fn normalize<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| if arg == "-force" { OsString::from("--force") } else { arg })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attached_short_values() {
        let args = Args::parse_normalized(["reflector", "-pGame", "-oGenerated", "-sSource", "-sPlugins", "-force"]);
        assert_eq!(args.project.as_deref(), Some("Game"));
        assert_eq!(args.output, Some(PathBuf::from("Generated")));
        assert_eq!(args.scan, [PathBuf::from("Source"), PathBuf::from("Plugins")]);
        assert!(args.force);
    }

    #[test]
    fn test_long_forms() {
        let args = Args::parse_normalized([
            "reflector", "--project", "Game", "--output", "out", "--scan", "src", "--config", "r.toml", "-v",
        ]);
        assert_eq!(args.project.as_deref(), Some("Game"));
        assert_eq!(args.config, Some(PathBuf::from("r.toml")));
        assert!(args.verbose);
        assert!(!args.force);
    }

    #[test]
    fn test_missing_values_are_not_parse_errors() {
        let args = Args::try_parse_from(["reflector"]).unwrap();
        assert_eq!(args, Args::default());
    }
}
