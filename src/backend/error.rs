use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("gcloud executable not found on PATH")]
    GcloudNotFound,

    #[error("Command `{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },
}
