use crate::backend::{DeploymentBackend, GcloudBackend};
use crate::deploy::{DeployError, DeployableSetBuilder, PropertyResolver, Result};
use crate::descriptor::{AppEngineWebXml, DescriptorSource};
use crate::staging::{new_stager, Stager};
use crate::types::*;
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

/// Sequences staging, discovery, resolution and the backend call for one
/// [`DeploymentRequest`].
pub struct DeploymentManager {
    request: DeploymentRequest,
    stager: Box<dyn Stager>,
    backend: Box<dyn DeploymentBackend>,
    descriptors: Box<dyn DescriptorSource>,
    resolver: PropertyResolver,
    builder: DeployableSetBuilder,
}

impl DeploymentManager {
    pub fn new(request: DeploymentRequest) -> Self {
        let stager = new_stager(&request);

        Self {
            request,
            stager,
            backend: Box::new(GcloudBackend::new()),
            descriptors: Box::new(AppEngineWebXml),
            resolver: PropertyResolver::new(),
            builder: DeployableSetBuilder::new(),
        }
    }

    pub fn with_stager(mut self, stager: Box<dyn Stager>) -> Self {
        self.stager = stager;
        self
    }

    pub fn with_backend(mut self, backend: Box<dyn DeploymentBackend>) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_descriptor_source(mut self, descriptors: Box<dyn DescriptorSource>) -> Self {
        self.descriptors = descriptors;
        self
    }

    pub fn run(&self, operation: DeployOperation) -> Result<DeploymentReport> {
        match operation {
            DeployOperation::All => self.deploy_all(),
            DeployOperation::Config(kind) => self.deploy_config(kind),
        }
    }

    /// Stages the full application and deploys `app.yaml` together with
    /// every auxiliary configuration file found for the runtime mode.
    pub fn deploy_all(&self) -> Result<DeploymentReport> {
        let started_at = Utc::now();
        let mode = self.request.mode;
        info!("Starting {mode} deployment");

        let staging_dir = self.stager.stage()?;
        let deployables =
            self.builder
                .build(&staging_dir, &self.request.app_engine_directory, mode)?;
        let identity = self
            .resolver
            .resolve_request(&self.request, &*self.descriptors)?;

        debug!(
            "Handing {} files to the {} backend",
            deployables.len(),
            self.backend.backend_name()
        );
        self.backend
            .deploy(&identity, &deployables, &self.request.flags)
            .map_err(|source| DeployError::Backend {
                operation: DeployOperation::All,
                source,
            })?;

        info!("Deployment completed ({identity})");
        Ok(self.report(
            DeployOperation::All,
            identity,
            deployables.into_paths(),
            started_at,
        ))
    }

    /// Pushes a single configuration file without deploying a new version.
    pub fn deploy_config(&self, kind: ConfigKind) -> Result<DeploymentReport> {
        let started_at = Utc::now();
        let operation = DeployOperation::Config(kind);
        info!("Starting {kind} configuration deployment");

        let config_dir = self.stager.configure_app_engine_directory()?;
        self.stager.stage()?;
        let config_file = config_dir.join(kind.file_name());
        if !config_file.is_file() {
            return Err(DeployError::ConfigFileNotFound {
                kind,
                path: config_file,
            });
        }
        let identity = self
            .resolver
            .resolve_request(&self.request, &*self.descriptors)?;

        self.backend
            .deploy_config(kind, &identity, &config_dir, &self.request.flags)
            .map_err(|source| DeployError::Backend { operation, source })?;

        info!("{} deployed ({identity})", kind.file_name());
        Ok(self.report(
            operation,
            identity,
            vec![config_file],
            started_at,
        ))
    }

    pub fn deploy_cron(&self) -> Result<DeploymentReport> {
        self.deploy_config(ConfigKind::Cron)
    }

    pub fn deploy_dispatch(&self) -> Result<DeploymentReport> {
        self.deploy_config(ConfigKind::Dispatch)
    }

    pub fn deploy_dos(&self) -> Result<DeploymentReport> {
        self.deploy_config(ConfigKind::Dos)
    }

    pub fn deploy_index(&self) -> Result<DeploymentReport> {
        self.deploy_config(ConfigKind::Index)
    }

    pub fn deploy_queue(&self) -> Result<DeploymentReport> {
        self.deploy_config(ConfigKind::Queue)
    }

    fn report(
        &self,
        operation: DeployOperation,
        identity: DeploymentIdentity,
        deployed_files: Vec<std::path::PathBuf>,
        started_at: chrono::DateTime<Utc>,
    ) -> DeploymentReport {
        DeploymentReport {
            deployment_id: Uuid::new_v4().to_string(),
            operation,
            mode: self.request.mode,
            identity,
            deployed_files,
            started_at,
            completed_at: Utc::now(),
        }
    }
}
