use crate::backend::{BackendError, DeploymentBackend, GcloudBackend};
use crate::types::{ConfigKind, DeployFlags, DeployableSet, DeploymentIdentity};
use std::path::Path;
use tracing::info;

/// Logs the gcloud invocation a real deploy would make and reports success.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunBackend;

impl DeploymentBackend for DryRunBackend {
    fn deploy(
        &self,
        identity: &DeploymentIdentity,
        deployables: &DeployableSet,
        flags: &DeployFlags,
    ) -> Result<(), BackendError> {
        let args = GcloudBackend::deploy_arguments(identity, deployables, flags);
        info!("[dry run] gcloud {}", args.join(" "));
        Ok(())
    }

    fn deploy_config(
        &self,
        kind: ConfigKind,
        identity: &DeploymentIdentity,
        config_dir: &Path,
        flags: &DeployFlags,
    ) -> Result<(), BackendError> {
        let args = GcloudBackend::config_arguments(kind, identity, config_dir, flags);
        info!("[dry run] gcloud {}", args.join(" "));
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "dry-run"
    }
}
