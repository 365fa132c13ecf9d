//! Staging turns build output into the directory tree handed to the backend.

pub mod error;
pub mod flexible;
pub mod standard;

pub use error::*;
pub use flexible::FlexibleStager;
pub use standard::StandardStager;

use crate::types::{DeploymentRequest, RuntimeMode};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

pub trait Stager {
    /// Produces the full staged tree and returns its root.
    fn stage(&self) -> Result<PathBuf, StagingError>;

    /// Returns the directory single-resource pushes read their file from.
    fn configure_app_engine_directory(&self) -> Result<PathBuf, StagingError>;
}

/// Picks the stager matching the request's runtime mode.
pub fn new_stager(request: &DeploymentRequest) -> Box<dyn Stager> {
    match request.mode {
        RuntimeMode::Standard => Box::new(StandardStager::from_request(request)),
        RuntimeMode::Flexible => Box::new(FlexibleStager::from_request(request)),
    }
}

/// Fails when `staging` equals, contains or sits inside any of `inputs`.
/// Must hold before `reset_directory` runs on `staging`.
pub(crate) fn ensure_disjoint(staging: &Path, inputs: &[&Path]) -> Result<(), StagingError> {
    let staging_abs = normalize(staging)?;
    for input in inputs {
        let input_abs = normalize(input)?;
        if staging_abs.starts_with(&input_abs) || input_abs.starts_with(&staging_abs) {
            return Err(StagingError::OverlappingDirectories {
                staging: staging.to_path_buf(),
                input: input.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Absolute, lexically cleaned form of `path` with symlinks resolved as far
/// as the path exists.
fn normalize(path: &Path) -> Result<PathBuf, StagingError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut cleaned = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other),
        }
    }

    let mut existing = cleaned.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            return Ok(missing
                .iter()
                .rev()
                .fold(canonical, |acc: PathBuf, part| acc.join(part)));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(cleaned),
        }
    }
}

/// Removes and recreates `dir` so no output from a previous run survives.
pub(crate) fn reset_directory(dir: &Path) -> Result<(), StagingError> {
    if dir.exists() {
        debug!("Cleaning staging directory {}", dir.display());
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Copies the contents of `from` into `to`, creating directories as needed.
pub(crate) fn copy_tree(from: &Path, to: &Path) -> Result<usize, StagingError> {
    if !from.is_dir() {
        return Err(StagingError::SourceNotFound {
            path: from.to_path_buf(),
        });
    }

    let mut copied = 0;
    for entry in WalkDir::new(from).follow_links(true) {
        let entry = entry.map_err(|e| StagingError::WalkFailed {
            path: from.to_path_buf(),
            reason: e.to_string(),
        })?;

        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| StagingError::WalkFailed {
                path: entry.path().to_path_buf(),
                reason: e.to_string(),
            })?;
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            copy_file(entry.path(), &target)?;
            copied += 1;
        }
    }

    debug!(
        "Copied {} files from {} to {}",
        copied,
        from.display(),
        to.display()
    );
    Ok(copied)
}

pub(crate) fn copy_file(from: &Path, to: &Path) -> Result<(), StagingError> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(from, to).map_err(|source| StagingError::CopyFailed {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;
    Ok(())
}
