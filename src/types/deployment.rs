use crate::types::runtime::RuntimeMode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Everything one deploy invocation needs, fixed before the pipeline starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRequest {
    pub mode: RuntimeMode,
    /// Raw project setting, possibly a sentinel token.
    pub project: Option<String>,
    /// Raw version setting, possibly a sentinel token.
    pub version: Option<String>,
    pub staging_directory: PathBuf,
    /// Exploded web application; holds `WEB-INF/appengine-web.xml`.
    pub source_directory: PathBuf,
    /// Platform configuration directory (`app.yaml`, `cron.yaml`, ...).
    pub app_engine_directory: PathBuf,
    pub artifact: Option<PathBuf>,
    pub docker_directory: Option<PathBuf>,
    #[serde(default)]
    pub flags: DeployFlags,
}

impl DeploymentRequest {
    pub const DEFAULT_STAGING_DIRECTORY: &'static str = "target/appengine-staging";
    pub const DEFAULT_SOURCE_DIRECTORY: &'static str = "src/main/webapp";
    pub const DEFAULT_APP_ENGINE_DIRECTORY: &'static str = "src/main/appengine";

    pub fn new(mode: RuntimeMode) -> Self {
        Self {
            mode,
            project: None,
            version: None,
            staging_directory: PathBuf::from(Self::DEFAULT_STAGING_DIRECTORY),
            source_directory: PathBuf::from(Self::DEFAULT_SOURCE_DIRECTORY),
            app_engine_directory: PathBuf::from(Self::DEFAULT_APP_ENGINE_DIRECTORY),
            artifact: None,
            docker_directory: None,
            flags: DeployFlags::default(),
        }
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_staging_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_directory = dir.into();
        self
    }

    pub fn with_source_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_directory = dir.into();
        self
    }

    pub fn with_app_engine_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.app_engine_directory = dir.into();
        self
    }

    pub fn with_artifact(mut self, artifact: impl Into<PathBuf>) -> Self {
        self.artifact = Some(artifact.into());
        self
    }

    pub fn with_docker_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.docker_directory = Some(dir.into());
        self
    }

    pub fn with_flags(mut self, flags: DeployFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Optional backend flags passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployFlags {
    pub bucket: Option<String>,
    pub image_url: Option<String>,
    pub promote: Option<bool>,
    pub server: Option<String>,
    pub stop_previous_version: Option<bool>,
}

/// Resolved project and version. `None` leaves the field to gcloud.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentIdentity {
    pub project: Option<String>,
    pub version: Option<String>,
}

impl fmt::Display for DeploymentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "project={}, version={}",
            self.project.as_deref().unwrap_or("<gcloud config>"),
            self.version.as_deref().unwrap_or("<gcloud config>")
        )
    }
}

/// Ordered files handed to the backend; the first entry is always `app.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployableSet {
    paths: Vec<PathBuf>,
}

impl DeployableSet {
    pub(crate) fn new(primary: PathBuf) -> Self {
        Self {
            paths: vec![primary],
        }
    }

    pub(crate) fn push_auxiliary(&mut self, path: PathBuf) {
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    pub fn primary(&self) -> &Path {
        &self.paths[0]
    }

    pub fn auxiliary(&self) -> &[PathBuf] {
        &self.paths[1..]
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.paths.iter()
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.paths
    }
}

impl<'a> IntoIterator for &'a DeployableSet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// Auxiliary configuration files that can be pushed on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigKind {
    Cron,
    Dispatch,
    Dos,
    Index,
    Queue,
}

impl ConfigKind {
    /// Canonical discovery order.
    pub const ALL: [ConfigKind; 5] = [
        ConfigKind::Cron,
        ConfigKind::Dispatch,
        ConfigKind::Dos,
        ConfigKind::Index,
        ConfigKind::Queue,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ConfigKind::Cron => "cron.yaml",
            ConfigKind::Dispatch => "dispatch.yaml",
            ConfigKind::Dos => "dos.yaml",
            ConfigKind::Index => "index.yaml",
            ConfigKind::Queue => "queue.yaml",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConfigKind::Cron => "cron",
            ConfigKind::Dispatch => "dispatch",
            ConfigKind::Dos => "dos",
            ConfigKind::Index => "index",
            ConfigKind::Queue => "queue",
        }
    }
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeployOperation {
    All,
    Config(ConfigKind),
}

impl fmt::Display for DeployOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployOperation::All => f.write_str("deploy"),
            DeployOperation::Config(kind) => write!(f, "{kind} deploy"),
        }
    }
}

/// Outcome of a successful deploy operation.
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentReport {
    pub deployment_id: String,
    pub operation: DeployOperation,
    pub mode: RuntimeMode,
    pub identity: DeploymentIdentity,
    pub deployed_files: Vec<PathBuf>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}
