//! Header discovery

use std::io;
use std::path::{Path, PathBuf};

/// Extensions treated as headers, compared case-insensitively.
pub const HEADER_EXTENSIONS: &[&str] = &["h", "hpp", "h++", "hh", "hxx"];

pub fn is_header(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| HEADER_EXTENSIONS.contains(&e.as_str()))
}

/// Collect headers under `root` recursively, in sorted order, skipping
/// everything under `exclude`. Symlinked directories are not followed.
pub fn collect_headers(root: &Path, exclude: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_in_dir(root, exclude, &mut files)?;
    Ok(files)
}

fn collect_in_dir(dir: &Path, exclude: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    let mut entries = std::fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        if path.starts_with(exclude) {
            tracing::trace!("skipping output path {}", path.display());
            continue;
        }

        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_in_dir(&path, exclude, files)?;
        } else if file_type.is_file() && is_header(&path) {
            files.push(path);
        }
    }
    Ok(())
}

/// Include path of `path` relative to `root`, with forward slashes.
pub fn include_path(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
