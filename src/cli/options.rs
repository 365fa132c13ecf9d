use crate::config::DeployConfig;
use crate::types::{ConfigKind, DeployOperation, RuntimeMode};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Main appengine-deploy CLI interface
#[derive(Parser, Debug)]
#[command(name = "appengine-deploy")]
#[command(about = "Stage and deploy applications to App Engine standard and flexible environments")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct AppEngineDeployCli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub settings: DeploySettings,

    /// Config file (defaults to ./appengine-deploy.yaml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log what would be deployed without calling gcloud
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbosity")]
    pub quiet: bool,

    /// Output format for the deployment report
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Stage the application and deploy app.yaml with its configuration files
    Deploy,
    /// Deploy cron.yaml only
    Cron,
    /// Deploy dispatch.yaml only
    Dispatch,
    /// Deploy dos.yaml only
    Dos,
    /// Deploy index.yaml only
    Index,
    /// Deploy queue.yaml only
    Queue,
}

impl Commands {
    pub fn operation(&self) -> DeployOperation {
        match self {
            Commands::Deploy => DeployOperation::All,
            Commands::Cron => DeployOperation::Config(ConfigKind::Cron),
            Commands::Dispatch => DeployOperation::Config(ConfigKind::Dispatch),
            Commands::Dos => DeployOperation::Config(ConfigKind::Dos),
            Commands::Index => DeployOperation::Config(ConfigKind::Index),
            Commands::Queue => DeployOperation::Config(ConfigKind::Queue),
        }
    }
}

/// Settings that override the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct DeploySettings {
    /// Runtime environment
    #[arg(long, value_enum, global = true)]
    pub mode: Option<ModeArg>,

    /// Project id, GCLOUD_CONFIG, or APPENGINE_CONFIG (standard only)
    #[arg(long, global = true)]
    pub project: Option<String>,

    /// Version id, GCLOUD_CONFIG, or APPENGINE_CONFIG (standard only)
    #[arg(id = "app_version", long = "app-version", global = true)]
    pub version: Option<String>,

    /// Staging directory
    #[arg(long, global = true)]
    pub staging_dir: Option<PathBuf>,

    /// Exploded web application directory
    #[arg(long, global = true)]
    pub source_dir: Option<PathBuf>,

    /// Directory holding app.yaml and other App Engine configuration
    #[arg(long = "appengine-dir", global = true)]
    pub app_engine_dir: Option<PathBuf>,

    /// Packaged artifact to stage (flexible)
    #[arg(long, global = true)]
    pub artifact: Option<PathBuf>,

    /// Directory holding a Dockerfile (flexible)
    #[arg(long, global = true)]
    pub docker_dir: Option<PathBuf>,

    /// Cloud Storage bucket used to stage files
    #[arg(long, global = true)]
    pub bucket: Option<String>,

    /// Deploy a prebuilt container image (flexible)
    #[arg(long, global = true)]
    pub image_url: Option<String>,

    /// Route all traffic to the new version
    #[arg(long, global = true)]
    pub promote: Option<bool>,

    /// App Engine server to connect to
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Stop the previously running version once the new one serves
    #[arg(long, global = true)]
    pub stop_previous_version: Option<bool>,
}

impl From<&DeploySettings> for DeployConfig {
    fn from(settings: &DeploySettings) -> Self {
        Self {
            mode: settings.mode.map(RuntimeMode::from),
            project: settings.project.clone(),
            version: settings.version.clone(),
            staging_directory: settings.staging_dir.clone(),
            source_directory: settings.source_dir.clone(),
            app_engine_directory: settings.app_engine_dir.clone(),
            artifact: settings.artifact.clone(),
            docker_directory: settings.docker_dir.clone(),
            bucket: settings.bucket.clone(),
            image_url: settings.image_url.clone(),
            promote: settings.promote,
            server: settings.server.clone(),
            stop_previous_version: settings.stop_previous_version,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// App Engine standard environment
    Standard,
    /// App Engine flexible environment
    Flexible,
}

impl From<ModeArg> for RuntimeMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Standard => RuntimeMode::Standard,
            ModeArg::Flexible => RuntimeMode::Flexible,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
