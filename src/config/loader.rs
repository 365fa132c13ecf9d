use crate::config::ConfigError;
use crate::types::{DeployFlags, DeploymentRequest, RuntimeMode};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "appengine-deploy.yaml";

/// Deploy settings from a config file or the command line. Every field is
/// optional so layers can be merged before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeployConfig {
    pub mode: Option<RuntimeMode>,
    #[serde(deserialize_with = "scalar_string")]
    pub project: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub version: Option<String>,
    pub staging_directory: Option<PathBuf>,
    pub source_directory: Option<PathBuf>,
    pub app_engine_directory: Option<PathBuf>,
    pub artifact: Option<PathBuf>,
    pub docker_directory: Option<PathBuf>,
    pub bucket: Option<String>,
    pub image_url: Option<String>,
    pub promote: Option<bool>,
    pub server: Option<String>,
    pub stop_previous_version: Option<bool>,
}

impl DeployConfig {
    /// Parses YAML config content. `origin` only labels errors.
    pub fn from_yaml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Self::from_yaml(&content, path)
    }

    /// Layers `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merge(self, overrides: DeployConfig) -> DeployConfig {
        DeployConfig {
            mode: overrides.mode.or(self.mode),
            project: overrides.project.or(self.project),
            version: overrides.version.or(self.version),
            staging_directory: overrides.staging_directory.or(self.staging_directory),
            source_directory: overrides.source_directory.or(self.source_directory),
            app_engine_directory: overrides.app_engine_directory.or(self.app_engine_directory),
            artifact: overrides.artifact.or(self.artifact),
            docker_directory: overrides.docker_directory.or(self.docker_directory),
            bucket: overrides.bucket.or(self.bucket),
            image_url: overrides.image_url.or(self.image_url),
            promote: overrides.promote.or(self.promote),
            server: overrides.server.or(self.server),
            stop_previous_version: overrides.stop_previous_version.or(self.stop_previous_version),
        }
    }

    /// Applies built-in defaults for anything still unset. Project and
    /// version stay unset so the resolver can report them.
    pub fn into_request(self) -> DeploymentRequest {
        let defaults = DeploymentRequest::new(self.mode.unwrap_or_default());

        DeploymentRequest {
            mode: defaults.mode,
            project: self.project,
            version: self.version,
            staging_directory: self
                .staging_directory
                .unwrap_or(defaults.staging_directory),
            source_directory: self.source_directory.unwrap_or(defaults.source_directory),
            app_engine_directory: self
                .app_engine_directory
                .unwrap_or(defaults.app_engine_directory),
            artifact: self.artifact,
            docker_directory: self.docker_directory,
            flags: DeployFlags {
                bucket: self.bucket,
                image_url: self.image_url,
                promote: self.promote,
                server: self.server,
                stop_previous_version: self.stop_previous_version,
            },
        }
    }
}

/// Finds the config file to use: an explicit path, else `./appengine-deploy.yaml`,
/// else the per-user config file. An explicit path must exist.
pub fn discover_config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Ok(Some(local));
    }

    Ok(user_config_file().filter(|path| path.is_file()))
}

pub fn user_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("appengine-deploy").join("config.yaml"))
}

/// Loads the discovered config file, or an empty config when none exists.
pub fn load_config(explicit: Option<&Path>) -> Result<DeployConfig, ConfigError> {
    match discover_config_file(explicit)? {
        Some(path) => DeployConfig::load(&path),
        None => Ok(DeployConfig::default()),
    }
}

/// Accepts `version: 1` as well as `version: "1"`.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Integer(i64),
        Bool(bool),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
        Scalar::Text(text) => text,
        Scalar::Integer(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_yaml_full_config() {
        let yaml = r#"
mode: flexible
project: GCLOUD_CONFIG
version: 1
app_engine_directory: config/appengine
promote: false
"#;
        let config = DeployConfig::from_yaml(yaml, Path::new("test.yaml")).unwrap();

        assert_eq!(config.mode, Some(RuntimeMode::Flexible));
        assert_eq!(config.project.as_deref(), Some("GCLOUD_CONFIG"));
        assert_eq!(config.version.as_deref(), Some("1"));
        assert_eq!(config.promote, Some(false));
    }

    #[test]
    fn test_from_yaml_rejects_unquoted_float_version() {
        let result = DeployConfig::from_yaml("version: 1.10\n", Path::new("test.yaml"));
        assert!(matches!(result, Err(ConfigError::InvalidYaml { .. })));

        let config = DeployConfig::from_yaml("version: \"1.10\"\n", Path::new("test.yaml")).unwrap();
        assert_eq!(config.version.as_deref(), Some("1.10"));
    }

    #[test]
    fn test_from_yaml_rejects_unknown_keys() {
        let result = DeployConfig::from_yaml("projcet: typo\n", Path::new("test.yaml"));
        assert!(matches!(result, Err(ConfigError::InvalidYaml { .. })));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = DeployConfig::from_yaml("\n", Path::new("test.yaml")).unwrap();
        assert_eq!(config, DeployConfig::default());
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let file = DeployConfig {
            project: Some("from-file".to_string()),
            version: Some("v1".to_string()),
            ..Default::default()
        };
        let cli = DeployConfig {
            project: Some("from-cli".to_string()),
            ..Default::default()
        };

        let merged = file.merge(cli);
        assert_eq!(merged.project.as_deref(), Some("from-cli"));
        assert_eq!(merged.version.as_deref(), Some("v1"));
    }

    #[test]
    fn test_into_request_applies_defaults() {
        let request = DeployConfig {
            bucket: Some("gs://b".to_string()),
            ..Default::default()
        }
        .into_request();

        assert_eq!(request.mode, RuntimeMode::Standard);
        assert_eq!(request.source_directory, PathBuf::from("src/main/webapp"));
        assert_eq!(request.flags.bucket.as_deref(), Some("gs://b"));
        assert!(request.project.is_none());
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.yaml");

        assert!(matches!(
            load_config(Some(&missing)),
            Err(ConfigError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("deploy.yaml");
        std::fs::write(&path, "mode: standard\nproject: APPENGINE_CONFIG\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.project.as_deref(), Some("APPENGINE_CONFIG"));
    }
}
