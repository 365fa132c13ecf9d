pub mod deployables;
pub mod error;
pub mod manager;
pub mod resolver;

pub use deployables::DeployableSetBuilder;
pub use error::*;
pub use manager::DeploymentManager;
pub use resolver::PropertyResolver;
