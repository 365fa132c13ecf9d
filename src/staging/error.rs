use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StagingError {
    #[error("Source directory not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Artifact not found: {path}")]
    ArtifactNotFound { path: PathBuf },

    #[error("Staging directory {staging} overlaps input {input}")]
    OverlappingDirectories { staging: PathBuf, input: PathBuf },

    #[error("Failed to copy {from} to {to}: {source}")]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk {path}: {reason}")]
    WalkFailed { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
