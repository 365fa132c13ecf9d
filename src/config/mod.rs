//! File-based deploy settings layered beneath command line flags.

pub mod error;
pub mod loader;

pub use error::*;
pub use loader::*;
