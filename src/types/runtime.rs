use crate::types::config_value::{Field, APPENGINE_CONFIG, GCLOUD_CONFIG};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Primary application descriptor expected in every deployable set.
pub const APP_YAML: &str = "app.yaml";

/// Where the standard environment keeps generated configuration files
/// inside a staged application.
pub fn generated_config_root(staging_dir: &Path) -> PathBuf {
    staging_dir.join("WEB-INF").join("appengine-generated")
}

/// App Engine runtime environment a deployment targets.
///
/// The mode is the single strategy value the deploy pipeline consults for
/// everything that differs between environments: which property sources are
/// legal, where `app.yaml` may live and where auxiliary configuration files
/// are discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    #[default]
    Standard,
    Flexible,
}

impl RuntimeMode {
    /// Whether `APPENGINE_CONFIG` may be used to source identity fields.
    pub fn allows_embedded_descriptor(&self) -> bool {
        matches!(self, RuntimeMode::Standard)
    }

    /// Diagnostic listing every legal way to configure `field` in this mode.
    pub fn configuration_error_message(&self, field: Field) -> String {
        let name = field.setting_name();
        let header = format!(
            "Deployment {name} must be defined or configured to read from system state\n\
             1. Set <{name}>{example}</{name}>\n",
            example = field.example_value()
        );

        match self {
            RuntimeMode::Standard => format!(
                "{header}\
                 2. Set <{name}>{APPENGINE_CONFIG}</{name}> to use <{element}> from appengine-web.xml\n\
                 3. Set <{name}>{GCLOUD_CONFIG}</{name}> to use {name} from gcloud config.",
                element = field.descriptor_element()
            ),
            RuntimeMode::Flexible => format!(
                "{header}\
                 2. Set <{name}>{GCLOUD_CONFIG}</{name}> to use {name} from gcloud config.\n\
                 3. Using <{name}>{APPENGINE_CONFIG}</{name}> is not allowed for flexible environment projects"
            ),
        }
    }

    /// Candidate locations of `app.yaml`, in search order.
    pub fn primary_descriptor_candidates(
        &self,
        staging_dir: &Path,
        app_engine_dir: &Path,
    ) -> Vec<PathBuf> {
        match self {
            RuntimeMode::Standard => vec![staging_dir.join(APP_YAML)],
            RuntimeMode::Flexible => {
                vec![staging_dir.join(APP_YAML), app_engine_dir.join(APP_YAML)]
            }
        }
    }

    /// Directory searched for auxiliary configuration files.
    pub fn auxiliary_root(&self, staging_dir: &Path, app_engine_dir: &Path) -> PathBuf {
        match self {
            RuntimeMode::Standard => generated_config_root(staging_dir),
            RuntimeMode::Flexible => app_engine_dir.to_path_buf(),
        }
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeMode::Standard => f.write_str("standard"),
            RuntimeMode::Flexible => f.write_str("flexible"),
        }
    }
}

impl FromStr for RuntimeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(RuntimeMode::Standard),
            "flexible" | "flex" => Ok(RuntimeMode::Flexible),
            other => Err(format!(
                "Unknown runtime mode '{other}', expected 'standard' or 'flexible'"
            )),
        }
    }
}
