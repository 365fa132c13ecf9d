//! Deployment backends receive a resolved identity and the files to push.

pub mod dry_run;
pub mod error;
pub mod gcloud;

pub use dry_run::DryRunBackend;
pub use error::*;
pub use gcloud::GcloudBackend;

use crate::types::{ConfigKind, DeployFlags, DeployableSet, DeploymentIdentity};
use std::path::Path;

pub trait DeploymentBackend {
    /// Deploys the application descriptor and its auxiliary configuration.
    fn deploy(
        &self,
        identity: &DeploymentIdentity,
        deployables: &DeployableSet,
        flags: &DeployFlags,
    ) -> Result<(), BackendError>;

    /// Pushes a single configuration file found in `config_dir`.
    fn deploy_config(
        &self,
        kind: ConfigKind,
        identity: &DeploymentIdentity,
        config_dir: &Path,
        flags: &DeployFlags,
    ) -> Result<(), BackendError>;

    fn backend_name(&self) -> &'static str;
}
