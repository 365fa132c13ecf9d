use crate::deploy::{DeployError, Result};
use crate::types::{ConfigKind, DeployableSet, RuntimeMode, APP_YAML};
use std::path::Path;
use tracing::{debug, info};

/// Discovers the files a full deploy hands to the backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeployableSetBuilder;

impl DeployableSetBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Locates `app.yaml` for `mode`, then appends every auxiliary
    /// configuration file present under the mode's search root, in
    /// [`ConfigKind::ALL`] order.
    pub fn build(
        &self,
        staging_dir: &Path,
        app_engine_dir: &Path,
        mode: RuntimeMode,
    ) -> Result<DeployableSet> {
        let candidates = mode.primary_descriptor_candidates(staging_dir, app_engine_dir);
        let primary = candidates
            .iter()
            .find(|candidate| candidate.is_file())
            .cloned()
            .ok_or_else(|| DeployError::DescriptorNotFound {
                searched: candidates.clone(),
            })?;

        info!("deployAll: Preparing to deploy {APP_YAML}");
        let mut deployables = DeployableSet::new(primary);

        let auxiliary_root = mode.auxiliary_root(staging_dir, app_engine_dir);
        debug!(
            "Looking for configuration files in {}",
            auxiliary_root.display()
        );

        for kind in ConfigKind::ALL {
            let path = auxiliary_root.join(kind.file_name());
            if path.is_file() {
                info!("deployAll: Preparing to deploy {}", kind.file_name());
                deployables.push_auxiliary(path);
            }
        }

        Ok(deployables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Layout {
        _temp_dir: TempDir,
        staging: PathBuf,
        app_engine: PathBuf,
    }

    fn layout() -> Layout {
        let temp_dir = TempDir::new().unwrap();
        let staging = temp_dir.path().join("staging");
        let app_engine = temp_dir.path().join("src/main/appengine");
        fs::create_dir_all(&staging).unwrap();
        fs::create_dir_all(&app_engine).unwrap();
        Layout {
            _temp_dir: temp_dir,
            staging,
            app_engine,
        }
    }

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_standard_collects_generated_configs() {
        let layout = layout();
        let generated = layout.staging.join("WEB-INF/appengine-generated");
        touch(&layout.staging.join("app.yaml"));
        touch(&generated.join("queue.yaml"));
        touch(&generated.join("cron.yaml"));
        touch(&generated.join("dos.yaml"));

        let set = DeployableSetBuilder::new()
            .build(&layout.staging, &layout.app_engine, RuntimeMode::Standard)
            .unwrap();

        assert_eq!(
            set.paths(),
            &[
                layout.staging.join("app.yaml"),
                generated.join("cron.yaml"),
                generated.join("dos.yaml"),
                generated.join("queue.yaml"),
            ]
        );
    }

    #[test]
    fn test_standard_ignores_configs_outside_generated_dir() {
        let layout = layout();
        touch(&layout.staging.join("app.yaml"));
        touch(&layout.staging.join("cron.yaml"));
        touch(&layout.app_engine.join("cron.yaml"));

        let set = DeployableSetBuilder::new()
            .build(&layout.staging, &layout.app_engine, RuntimeMode::Standard)
            .unwrap();

        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_standard_does_not_fall_back_to_app_engine_dir() {
        let layout = layout();
        touch(&layout.app_engine.join("app.yaml"));

        let err = DeployableSetBuilder::new()
            .build(&layout.staging, &layout.app_engine, RuntimeMode::Standard)
            .unwrap_err();

        match err {
            DeployError::DescriptorNotFound { searched } => {
                assert_eq!(searched, vec![layout.staging.join("app.yaml")]);
            }
            other => panic!("Expected DescriptorNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_flexible_prefers_staged_app_yaml() {
        let layout = layout();
        touch(&layout.staging.join("app.yaml"));
        touch(&layout.app_engine.join("app.yaml"));

        let set = DeployableSetBuilder::new()
            .build(&layout.staging, &layout.app_engine, RuntimeMode::Flexible)
            .unwrap();

        assert_eq!(set.primary(), layout.staging.join("app.yaml"));
    }

    #[test]
    fn test_flexible_falls_back_to_app_engine_dir() {
        let layout = layout();
        touch(&layout.app_engine.join("app.yaml"));
        touch(&layout.app_engine.join("dispatch.yaml"));
        touch(&layout.app_engine.join("index.yaml"));

        let set = DeployableSetBuilder::new()
            .build(&layout.staging, &layout.app_engine, RuntimeMode::Flexible)
            .unwrap();

        assert_eq!(
            set.paths(),
            &[
                layout.app_engine.join("app.yaml"),
                layout.app_engine.join("dispatch.yaml"),
                layout.app_engine.join("index.yaml"),
            ]
        );
    }

    #[test]
    fn test_flexible_missing_everywhere() {
        let layout = layout();
        touch(&layout.app_engine.join("cron.yaml"));

        let err = DeployableSetBuilder::new()
            .build(&layout.staging, &layout.app_engine, RuntimeMode::Flexible)
            .unwrap_err();

        match err {
            DeployError::DescriptorNotFound { searched } => assert_eq!(searched.len(), 2),
            other => panic!("Expected DescriptorNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_directory_named_like_config_is_skipped() {
        let layout = layout();
        touch(&layout.app_engine.join("app.yaml"));
        fs::create_dir_all(layout.app_engine.join("cron.yaml")).unwrap();

        let set = DeployableSetBuilder::new()
            .build(&layout.staging, &layout.app_engine, RuntimeMode::Flexible)
            .unwrap();

        assert!(set.auxiliary().is_empty());
    }
}
