use crate::deploy::{DeployError, Result};
use crate::descriptor::DescriptorSource;
use crate::types::{ConfigValue, DeploymentIdentity, DeploymentRequest, Field, RuntimeMode};
use std::path::Path;
use tracing::{debug, info};

/// Turns raw project/version settings into a concrete [`DeploymentIdentity`].
///
/// Project is resolved before version and the first invalid field aborts
/// resolution, so a bad version is only reported once the project is valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyResolver;

impl PropertyResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(
        &self,
        project: Option<&str>,
        version: Option<&str>,
        mode: RuntimeMode,
        source_directory: &Path,
        descriptors: &dyn DescriptorSource,
    ) -> Result<DeploymentIdentity> {
        let project =
            self.resolve_field(Field::Project, project, mode, source_directory, descriptors)?;
        let version =
            self.resolve_field(Field::Version, version, mode, source_directory, descriptors)?;

        let identity = DeploymentIdentity { project, version };
        info!("Resolved deployment identity ({identity})");
        Ok(identity)
    }

    pub fn resolve_request(
        &self,
        request: &DeploymentRequest,
        descriptors: &dyn DescriptorSource,
    ) -> Result<DeploymentIdentity> {
        self.resolve(
            request.project.as_deref(),
            request.version.as_deref(),
            request.mode,
            &request.source_directory,
            descriptors,
        )
    }

    fn resolve_field(
        &self,
        field: Field,
        raw: Option<&str>,
        mode: RuntimeMode,
        source_directory: &Path,
        descriptors: &dyn DescriptorSource,
    ) -> Result<Option<String>> {
        match ConfigValue::classify(raw) {
            ConfigValue::Literal(value) => Ok(Some(value)),
            ConfigValue::UseAmbientConfig => {
                debug!("Leaving {field} to gcloud config");
                Ok(None)
            }
            ConfigValue::UseEmbeddedDescriptor if mode.allows_embedded_descriptor() => self
                .read_from_descriptor(field, source_directory, descriptors)
                .map(Some),
            ConfigValue::Unset | ConfigValue::UseEmbeddedDescriptor => Err(
                DeployError::configuration(field, mode.configuration_error_message(field)),
            ),
        }
    }

    fn read_from_descriptor(
        &self,
        field: Field,
        source_directory: &Path,
        descriptors: &dyn DescriptorSource,
    ) -> Result<String> {
        let descriptor = descriptors
            .load(source_directory)
            .map_err(|source| DeployError::DescriptorUnreadable { field, source })?;

        let value = match field {
            Field::Project => descriptor.project_id,
            Field::Version => descriptor.project_version,
        };

        match value {
            Some(value) if !value.trim().is_empty() => {
                debug!("Using {field} '{value}' from appengine-web.xml");
                Ok(value)
            }
            _ => Err(DeployError::DescriptorFieldMissing {
                field,
                element: field.descriptor_element(),
            }),
        }
    }
}
