use crate::backend::{BackendError, DeploymentBackend};
use crate::types::{ConfigKind, DeployFlags, DeployableSet, DeploymentIdentity};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Deploys by shelling out to `gcloud app deploy`.
#[derive(Debug, Clone, Default)]
pub struct GcloudBackend {
    executable: Option<PathBuf>,
}

impl GcloudBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a specific gcloud binary instead of searching `PATH`.
    pub fn with_executable(executable: PathBuf) -> Self {
        Self {
            executable: Some(executable),
        }
    }

    /// Arguments for a full deploy. Absent identity fields are omitted so
    /// gcloud falls back to its active configuration.
    pub fn deploy_arguments(
        identity: &DeploymentIdentity,
        deployables: &DeployableSet,
        flags: &DeployFlags,
    ) -> Vec<String> {
        let mut args = vec!["app".to_string(), "deploy".to_string()];
        args.extend(deployables.iter().map(|p| p.display().to_string()));

        if let Some(project) = &identity.project {
            args.push(format!("--project={project}"));
        }
        if let Some(version) = &identity.version {
            args.push(format!("--version={version}"));
        }
        if let Some(bucket) = &flags.bucket {
            args.push(format!("--bucket={bucket}"));
        }
        if let Some(image_url) = &flags.image_url {
            args.push(format!("--image-url={image_url}"));
        }
        match flags.promote {
            Some(true) => args.push("--promote".to_string()),
            Some(false) => args.push("--no-promote".to_string()),
            None => {}
        }
        if let Some(server) = &flags.server {
            args.push(format!("--server={server}"));
        }
        match flags.stop_previous_version {
            Some(true) => args.push("--stop-previous-version".to_string()),
            Some(false) => args.push("--no-stop-previous-version".to_string()),
            None => {}
        }

        args.push("--quiet".to_string());
        args
    }

    /// Arguments for a single configuration push. Version-scoped flags do
    /// not apply to these files.
    pub fn config_arguments(
        kind: ConfigKind,
        identity: &DeploymentIdentity,
        config_dir: &Path,
        flags: &DeployFlags,
    ) -> Vec<String> {
        let mut args = vec![
            "app".to_string(),
            "deploy".to_string(),
            config_dir.join(kind.file_name()).display().to_string(),
        ];

        if let Some(project) = &identity.project {
            args.push(format!("--project={project}"));
        }
        if let Some(server) = &flags.server {
            args.push(format!("--server={server}"));
        }

        args.push("--quiet".to_string());
        args
    }

    fn locate(&self) -> Result<PathBuf, BackendError> {
        match &self.executable {
            Some(path) => Ok(path.clone()),
            None => which::which("gcloud").map_err(|_| BackendError::GcloudNotFound),
        }
    }

    fn run(&self, args: &[String]) -> Result<(), BackendError> {
        let executable = self.locate()?;
        let command = format!("{} {}", executable.display(), args.join(" "));
        info!("Running {command}");

        let output = Command::new(&executable)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| BackendError::Launch {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(BackendError::CommandFailed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        debug!("gcloud finished: {}", output.status);
        Ok(())
    }
}

impl DeploymentBackend for GcloudBackend {
    fn deploy(
        &self,
        identity: &DeploymentIdentity,
        deployables: &DeployableSet,
        flags: &DeployFlags,
    ) -> Result<(), BackendError> {
        self.run(&Self::deploy_arguments(identity, deployables, flags))
    }

    fn deploy_config(
        &self,
        kind: ConfigKind,
        identity: &DeploymentIdentity,
        config_dir: &Path,
        flags: &DeployFlags,
    ) -> Result<(), BackendError> {
        self.run(&Self::config_arguments(kind, identity, config_dir, flags))
    }

    fn backend_name(&self) -> &'static str {
        "gcloud"
    }
}
