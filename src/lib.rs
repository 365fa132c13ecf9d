//! App Engine Deploy - staging and deployment for App Engine applications
//!
//! This crate resolves the deployment identity (project and version) from the
//! configured settings, discovers the files to deploy for the standard or
//! flexible environment, and hands both to a deployment backend.

pub mod backend;
pub mod cli;
pub mod config;
pub mod deploy;
pub mod descriptor;
pub mod staging;
pub mod types;

pub use deploy::DeploymentManager;
pub use types::*;
