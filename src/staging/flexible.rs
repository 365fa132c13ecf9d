use crate::staging::{copy_file, copy_tree, ensure_disjoint, reset_directory, Stager, StagingError};
use crate::types::DeploymentRequest;
use std::path::PathBuf;
use tracing::{debug, info};

/// Stages a packaged artifact plus its platform configuration for the
/// flexible environment.
#[derive(Debug, Clone)]
pub struct FlexibleStager {
    staging_directory: PathBuf,
    app_engine_directory: PathBuf,
    docker_directory: Option<PathBuf>,
    artifact: Option<PathBuf>,
}

impl FlexibleStager {
    pub fn new(staging_directory: PathBuf, app_engine_directory: PathBuf) -> Self {
        Self {
            staging_directory,
            app_engine_directory,
            docker_directory: None,
            artifact: None,
        }
    }

    pub fn with_docker_directory(mut self, dir: PathBuf) -> Self {
        self.docker_directory = Some(dir);
        self
    }

    pub fn with_artifact(mut self, artifact: PathBuf) -> Self {
        self.artifact = Some(artifact);
        self
    }

    pub fn from_request(request: &DeploymentRequest) -> Self {
        Self {
            staging_directory: request.staging_directory.clone(),
            app_engine_directory: request.app_engine_directory.clone(),
            docker_directory: request.docker_directory.clone(),
            artifact: request.artifact.clone(),
        }
    }
}

impl Stager for FlexibleStager {
    fn stage(&self) -> Result<PathBuf, StagingError> {
        info!("Staging flexible application to {}", self.staging_directory.display());

        if let Some(artifact) = &self.artifact {
            if !artifact.is_file() {
                return Err(StagingError::ArtifactNotFound {
                    path: artifact.clone(),
                });
            }
        }

        let mut inputs = vec![self.app_engine_directory.as_path()];
        inputs.extend(self.docker_directory.as_deref());
        inputs.extend(self.artifact.as_deref());
        ensure_disjoint(&self.staging_directory, &inputs)?;

        reset_directory(&self.staging_directory)?;

        if self.app_engine_directory.is_dir() {
            copy_tree(&self.app_engine_directory, &self.staging_directory)?;
        } else {
            debug!(
                "No App Engine directory at {}",
                self.app_engine_directory.display()
            );
        }

        if let Some(docker_directory) = &self.docker_directory {
            copy_tree(docker_directory, &self.staging_directory)?;
        }

        if let Some(artifact) = &self.artifact {
            if let Some(file_name) = artifact.file_name() {
                copy_file(artifact, &self.staging_directory.join(file_name))?;
            }
        }

        Ok(self.staging_directory.clone())
    }

    fn configure_app_engine_directory(&self) -> Result<PathBuf, StagingError> {
        Ok(self.app_engine_directory.clone())
    }
}
