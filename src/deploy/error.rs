use crate::backend::BackendError;
use crate::descriptor::DescriptorError;
use crate::staging::StagingError;
use crate::types::{ConfigKind, DeployOperation, Field};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeployError {
    /// Project or version is missing or uses a source the mode forbids.
    #[error("{message}")]
    Configuration { field: Field, message: String },

    #[error("Failed to deploy all: could not find app.yaml.")]
    DescriptorNotFound { searched: Vec<PathBuf> },

    #[error("Failed to deploy {kind}: could not find {path}")]
    ConfigFileNotFound { kind: ConfigKind, path: PathBuf },

    #[error("<{element}> was not found in appengine-web.xml")]
    DescriptorFieldMissing { field: Field, element: &'static str },

    #[error("Failed to read {field} from appengine-web.xml")]
    DescriptorUnreadable {
        field: Field,
        #[source]
        source: DescriptorError,
    },

    #[error("App Engine {operation} failed: {source}")]
    Backend {
        operation: DeployOperation,
        #[source]
        source: BackendError,
    },

    #[error("Staging failed: {0}")]
    Staging(#[from] StagingError),
}

impl DeployError {
    pub fn configuration(field: Field, message: impl Into<String>) -> Self {
        DeployError::Configuration {
            field,
            message: message.into(),
        }
    }

    /// Whether the operator can fix this by correcting input and re-running.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            DeployError::Configuration { .. }
                | DeployError::DescriptorNotFound { .. }
                | DeployError::ConfigFileNotFound { .. }
                | DeployError::DescriptorFieldMissing { .. }
                | DeployError::DescriptorUnreadable { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DeployError>;
