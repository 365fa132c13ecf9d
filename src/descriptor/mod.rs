pub mod error;
pub mod parser;
pub mod source;

pub use error::*;
pub use parser::Descriptor;
pub use source::{AppEngineWebXml, DescriptorSource};
