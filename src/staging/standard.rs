use crate::staging::{copy_tree, ensure_disjoint, reset_directory, Stager, StagingError};
use crate::types::{generated_config_root, DeploymentRequest};
use std::path::PathBuf;
use tracing::info;

/// Stages an exploded web application for the standard environment.
#[derive(Debug, Clone)]
pub struct StandardStager {
    source_directory: PathBuf,
    staging_directory: PathBuf,
}

impl StandardStager {
    pub fn new(source_directory: PathBuf, staging_directory: PathBuf) -> Self {
        Self {
            source_directory,
            staging_directory,
        }
    }

    pub fn from_request(request: &DeploymentRequest) -> Self {
        Self::new(
            request.source_directory.clone(),
            request.staging_directory.clone(),
        )
    }
}

impl Stager for StandardStager {
    fn stage(&self) -> Result<PathBuf, StagingError> {
        info!(
            "Staging {} to {}",
            self.source_directory.display(),
            self.staging_directory.display()
        );

        ensure_disjoint(&self.staging_directory, &[&self.source_directory])?;
        reset_directory(&self.staging_directory)?;
        copy_tree(&self.source_directory, &self.staging_directory)?;

        Ok(self.staging_directory.clone())
    }

    fn configure_app_engine_directory(&self) -> Result<PathBuf, StagingError> {
        Ok(generated_config_root(&self.staging_directory))
    }
}
