//! Driver configuration
//!
//! Options come from the command line and, optionally, a TOML file:
//!
//! ```toml
//! project = "Game"
//! output = "Intermediate/Generated"
//! scan = ["Source", "Plugins/Source"]
//! force = false
//! prelude = "Core/Minimal.h"
//! ```
//!
//! Command-line values take precedence. Relative paths in the file are
//! resolved against the file's directory.

use crate::args::Args;
use reflector_codegen::DEFAULT_PRELUDE;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Please, specify the output path with -oOUT_PATH!")]
    MissingOutput,

    #[error("Please, specify at least one scan path with -sSCAN_PATH!")]
    MissingScanPath,

    #[error("Please, specify project name with -pPROJECT_NAME!")]
    MissingProject,

    #[error("Invalid project name '{0}': expected a C++ identifier")]
    InvalidProject(String),

    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Whether the usage text should accompany the error.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            ConfigError::MissingOutput | ConfigError::MissingScanPath | ConfigError::MissingProject
        )
    }
}

/// Contents of a config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub project: Option<String>,
    pub output: Option<PathBuf>,
    pub scan: Vec<PathBuf>,
    pub force: Option<bool>,
    pub prelude: Option<String>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut file = Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(dir) = path.parent() {
            file.output = file.output.map(|p| dir.join(p));
            file.scan = file.scan.into_iter().map(|p| dir.join(p)).collect();
        }
        tracing::debug!("loaded config from {}", path.display());
        Ok(file)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DriverConfig {
    pub project: String,
    pub output: PathBuf,
    pub scan: Vec<PathBuf>,
    pub force: bool,
    pub prelude: String,
}

impl DriverConfig {
    pub fn new(project: impl Into<String>, output: impl Into<PathBuf>, scan: Vec<PathBuf>) -> Self {
        Self {
            project: project.into(),
            output: output.into(),
            scan,
            force: false,
            prelude: DEFAULT_PRELUDE.to_string(),
        }
    }

    /// Merge command-line arguments over an optional config file.
    pub fn resolve(args: &Args, file: Option<ConfigFile>) -> Result<Self, ConfigError> {
        let file = file.unwrap_or_default();

        let output = args
            .output
            .clone()
            .or(file.output)
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ConfigError::MissingOutput)?;

        let scan = if args.scan.is_empty() { file.scan } else { args.scan.clone() };
        if scan.is_empty() {
            return Err(ConfigError::MissingScanPath);
        }

        let project = args
            .project
            .clone()
            .or(file.project)
            .filter(|p| !p.is_empty())
            .ok_or(ConfigError::MissingProject)?;
        if !is_identifier(&project) {
            return Err(ConfigError::InvalidProject(project));
        }

        Ok(Self {
            project,
            output,
            scan,
            force: args.force || file.force.unwrap_or(false),
            prelude: args
                .prelude
                .clone()
                .or(file.prelude)
                .unwrap_or_else(|| DEFAULT_PRELUDE.to_string()),
        })
    }

    /// Load the config file named by `args`, if any, and resolve.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let file = args.config.as_deref().map(ConfigFile::load).transpose()?;
        Self::resolve(args, file)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
