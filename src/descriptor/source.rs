use crate::descriptor::{Descriptor, DescriptorError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Supplies the embedded descriptor for a source directory.
pub trait DescriptorSource {
    fn load(&self, source_directory: &Path) -> Result<Descriptor, DescriptorError>;
}

/// Reads `WEB-INF/appengine-web.xml` from the exploded application.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppEngineWebXml;

impl AppEngineWebXml {
    pub const FILE_NAME: &'static str = "appengine-web.xml";

    pub fn path_in(source_directory: &Path) -> PathBuf {
        source_directory.join("WEB-INF").join(Self::FILE_NAME)
    }
}

impl DescriptorSource for AppEngineWebXml {
    fn load(&self, source_directory: &Path) -> Result<Descriptor, DescriptorError> {
        let path = Self::path_in(source_directory);
        debug!("Reading descriptor from {}", path.display());

        let content = std::fs::read_to_string(&path)
            .map_err(|source| DescriptorError::Io { path, source })?;
        Descriptor::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_web_inf() {
        let temp_dir = TempDir::new().unwrap();
        let web_inf = temp_dir.path().join("WEB-INF");
        std::fs::create_dir_all(&web_inf).unwrap();
        std::fs::write(
            web_inf.join("appengine-web.xml"),
            "<appengine-web-app><application>p</application><version>v</version></appengine-web-app>",
        )
        .unwrap();

        let descriptor = AppEngineWebXml.load(temp_dir.path()).unwrap();
        assert_eq!(descriptor.project_id.as_deref(), Some("p"));
        assert_eq!(descriptor.project_version.as_deref(), Some("v"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = AppEngineWebXml.load(temp_dir.path());

        match result {
            Err(DescriptorError::Io { path, .. }) => {
                assert!(path.ends_with("WEB-INF/appengine-web.xml"));
            }
            other => panic!("Expected Io error, got {other:?}"),
        }
    }
}
