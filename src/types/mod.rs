pub mod config_value;
pub mod deployment;
pub mod runtime;

pub use config_value::*;
pub use deployment::*;
pub use runtime::*;
