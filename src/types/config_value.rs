use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel telling the resolver to read the field from `appengine-web.xml`.
pub const APPENGINE_CONFIG: &str = "APPENGINE_CONFIG";

/// Sentinel telling the resolver to leave the field to gcloud's own configuration.
pub const GCLOUD_CONFIG: &str = "GCLOUD_CONFIG";

/// Identity field being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Project,
    Version,
}

impl Field {
    /// Name of the setting as the operator writes it.
    pub fn setting_name(&self) -> &'static str {
        match self {
            Field::Project => "project",
            Field::Version => "version",
        }
    }

    /// Element carrying this field inside `appengine-web.xml`.
    pub fn descriptor_element(&self) -> &'static str {
        match self {
            Field::Project => "application",
            Field::Version => "version",
        }
    }

    /// Placeholder literal shown in configuration diagnostics.
    pub fn example_value(&self) -> &'static str {
        match self {
            Field::Project => "my-project-name",
            Field::Version => "my-version",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.setting_name())
    }
}

/// Classified form of a raw project or version setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Unset,
    Literal(String),
    UseAmbientConfig,
    UseEmbeddedDescriptor,
}

impl ConfigValue {
    /// Classifies a raw configured string. Sentinels match exactly and
    /// case-sensitively; anything else non-blank is taken verbatim.
    pub fn classify(raw: Option<&str>) -> Self {
        match raw {
            None => ConfigValue::Unset,
            Some(value) if value.trim().is_empty() => ConfigValue::Unset,
            Some(APPENGINE_CONFIG) => ConfigValue::UseEmbeddedDescriptor,
            Some(GCLOUD_CONFIG) => ConfigValue::UseAmbientConfig,
            Some(value) => ConfigValue::Literal(value.to_string()),
        }
    }
}
