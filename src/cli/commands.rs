use crate::backend::DryRunBackend;
use crate::cli::AppEngineDeployCli;
use crate::config::{load_config, ConfigError, DeployConfig};
use crate::deploy::DeploymentManager;
use crate::types::{DeploymentReport, DeploymentRequest};
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Layers command line settings over the config file and applies defaults.
pub fn build_request(cli: &AppEngineDeployCli) -> std::result::Result<DeploymentRequest, ConfigError> {
    let file_config = load_config(cli.config.as_deref())?;
    let request = file_config
        .merge(DeployConfig::from(&cli.settings))
        .into_request();

    debug!("Deployment request: {request:?}");
    Ok(request)
}

/// Runs the operation selected on the command line.
pub fn run_command(cli: &AppEngineDeployCli) -> Result<DeploymentReport> {
    let request = build_request(cli).context("Failed to load deploy configuration")?;
    let operation = cli.command.operation();

    let mut manager = DeploymentManager::new(request);
    if cli.dry_run {
        info!("Dry run: staging and validation run, gcloud is not called");
        manager = manager.with_backend(Box::new(DryRunBackend));
    }

    let report = manager.run(operation)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RuntimeMode;
    use clap::Parser;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_cli_settings_override_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("deploy.yaml");
        std::fs::write(
            &config_path,
            "mode: flexible\nproject: file-project\nversion: file-version\n",
        )
        .unwrap();

        let cli = AppEngineDeployCli::try_parse_from([
            "appengine-deploy",
            "deploy",
            "--config",
            config_path.to_str().unwrap(),
            "--project",
            "cli-project",
        ])
        .unwrap();

        let request = build_request(&cli).unwrap();
        assert_eq!(request.mode, RuntimeMode::Flexible);
        assert_eq!(request.project.as_deref(), Some("cli-project"));
        assert_eq!(request.version.as_deref(), Some("file-version"));
        assert_eq!(
            request.staging_directory,
            PathBuf::from("target/appengine-staging")
        );
    }

    #[test]
    fn test_dry_run_deploy_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        let app_engine = temp_dir.path().join("appengine");
        std::fs::create_dir_all(&app_engine).unwrap();
        std::fs::write(app_engine.join("app.yaml"), "runtime: java").unwrap();
        std::fs::write(app_engine.join("cron.yaml"), "cron: []").unwrap();
        let staging = temp_dir.path().join("staging");
        let config_path = temp_dir.path().join("none.yaml");
        std::fs::write(&config_path, "").unwrap();

        let cli = AppEngineDeployCli::try_parse_from([
            "appengine-deploy",
            "deploy",
            "--dry-run",
            "--config",
            config_path.to_str().unwrap(),
            "--mode",
            "flexible",
            "--project",
            "GCLOUD_CONFIG",
            "--app-version",
            "1",
            "--staging-dir",
            staging.to_str().unwrap(),
            "--appengine-dir",
            app_engine.to_str().unwrap(),
        ])
        .unwrap();

        let report = run_command(&cli).unwrap();
        assert_eq!(report.identity.project, None);
        assert_eq!(report.identity.version.as_deref(), Some("1"));
        assert_eq!(
            report.deployed_files,
            vec![staging.join("app.yaml"), app_engine.join("cron.yaml")]
        );
    }
}
