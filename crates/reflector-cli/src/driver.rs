//! Project driver
//!
//! Walks every scan root, regenerates the `.generated.h` of each changed
//! reflected header, and writes the project's aggregate header once every
//! file has been processed without errors.

use crate::config::DriverConfig;
use crate::scan::{collect_headers, include_path};
use reflector_codegen::{
    generate_project_header, generated_file_name, project_file_name, CppEmitter, FileId,
    ProjectEntry,
};
use reflector_parser::{parse_source, Lexer, ParseError};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Can't find or create output directory! ({}: {source})", .path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}", join_errors(.errors))]
    Parse { path: PathBuf, errors: Vec<ParseError> },
}

fn join_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> DriverError + '_ {
    move |source| DriverError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Headers regenerated in this run.
    pub generated: usize,
    /// Headers whose up-to-date generated file was kept.
    pub reused: usize,
    /// Headers without reflection.
    pub skipped: usize,
    pub elapsed: Duration,
    /// Path of the aggregate header.
    pub project_file: PathBuf,
}

enum Outcome {
    Generated(FileId),
    Reused(FileId),
    Skipped,
}

struct Driver<'a> {
    config: &'a DriverConfig,
    output: PathBuf,
    entries: Vec<ProjectEntry>,
    /// Generated file name to the source that produced it.
    claimed: HashMap<String, PathBuf>,
    summary: RunSummary,
}

/// Run the tool over `config`.
pub fn run(config: &DriverConfig) -> Result<RunSummary, DriverError> {
    let start = Instant::now();

    fs::create_dir_all(&config.output).map_err(|source| DriverError::CreateOutputDir {
        path: config.output.clone(),
        source,
    })?;
    let output = fs::canonicalize(&config.output).map_err(|source| DriverError::CreateOutputDir {
        path: config.output.clone(),
        source,
    })?;

    let mut driver = Driver {
        config,
        output,
        entries: Vec::new(),
        claimed: HashMap::new(),
        summary: RunSummary::default(),
    };

    for root in &config.scan {
        if !root.exists() {
            tracing::debug!("scan path {} does not exist, skipping", root.display());
            continue;
        }
        driver.scan_root(root)?;
    }

    let project_path = driver.output.join(project_file_name(&config.project));
    let contents = generate_project_header(&config.project, &config.prelude, &driver.entries);
    fs::write(&project_path, contents).map_err(io_error(&project_path))?;

    driver.summary.project_file = project_path;
    driver.summary.elapsed = start.elapsed();
    tracing::info!(
        "{} generated, {} up to date, {} skipped in {:.3}s",
        driver.summary.generated,
        driver.summary.reused,
        driver.summary.skipped,
        driver.summary.elapsed.as_secs_f64()
    );
    Ok(driver.summary)
}

impl Driver<'_> {
    fn scan_root(&mut self, root: &Path) -> Result<(), DriverError> {
        let canonical = fs::canonicalize(root).map_err(io_error(root))?;
        let headers = collect_headers(&canonical, &self.output).map_err(io_error(root))?;
        tracing::debug!("{} headers under {}", headers.len(), root.display());

        for header in headers {
            let include = include_path(&header, &canonical);
            match self.process(&header, &include)? {
                Outcome::Generated(id) => {
                    self.summary.generated += 1;
                    self.entries.push(ProjectEntry::new(include, id));
                }
                Outcome::Reused(id) => {
                    self.summary.reused += 1;
                    self.entries.push(ProjectEntry::new(include, id));
                }
                Outcome::Skipped => self.summary.skipped += 1,
            }
        }
        Ok(())
    }

    fn process(&mut self, header: &Path, include: &str) -> Result<Outcome, DriverError> {
        let stem = header
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name = generated_file_name(&stem);
        let generated = self.output.join(&file_name);

        if !self.config.force {
            if let Some(id) = self.reusable_id(header, &generated) {
                tracing::debug!("{} is up to date", generated.display());
                self.claim(&file_name, header);
                return Ok(Outcome::Reused(id));
            }
        }

        let bytes = fs::read(header).map_err(io_error(header))?;
        let source = String::from_utf8_lossy(&bytes);

        let lexer = Lexer::new(&source);
        if !lexer.includes_generated_header(&stem) || !lexer.has_reflection_markers() {
            tracing::trace!("{} has no reflection", header.display());
            return Ok(Outcome::Skipped);
        }

        let parsed = parse_source(&source, header);
        if parsed.has_errors() {
            return Err(DriverError::Parse {
                path: header.to_path_buf(),
                errors: parsed.diagnostics.errors().to_vec(),
            });
        }

        for warning in parsed.diagnostics.warnings() {
            tracing::warn!("{warning}");
        }

        let id = FileId::generate();
        let file = CppEmitter::emit(&parsed.decls, &id, include);
        fs::write(&generated, file.contents).map_err(io_error(&generated))?;

        self.claim(&file_name, header);
        tracing::debug!("generated {} ({})", generated.display(), id);
        Ok(Outcome::Generated(id))
    }

    /// The recorded id of `generated` if it is at least as new as `header`.
    fn reusable_id(&self, header: &Path, generated: &Path) -> Option<FileId> {
        let source_time = fs::metadata(header).and_then(|m| m.modified()).ok()?;
        let generated_time = fs::metadata(generated).and_then(|m| m.modified()).ok()?;
        if generated_time < source_time {
            return None;
        }

        let contents = fs::read_to_string(generated).ok()?;
        match FileId::from_generated(&contents) {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::debug!("regenerating {}: {}", generated.display(), err);
                None
            }
        }
    }

    fn claim(&mut self, file_name: &str, header: &Path) {
        if let Some(previous) = self.claimed.insert(file_name.to_string(), header.to_path_buf()) {
            tracing::warn!(
                "{} and {} both generate {}, the later one wins",
                previous.display(),
                header.display(),
                file_name
            );
        }
    }
}
