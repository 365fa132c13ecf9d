use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed appengine-web.xml: {reason}")]
    Malformed { reason: String },
}

impl From<quick_xml::Error> for DescriptorError {
    fn from(err: quick_xml::Error) -> Self {
        DescriptorError::Malformed {
            reason: err.to_string(),
        }
    }
}
