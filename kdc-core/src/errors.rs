use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to run '{command}': {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    #[error("{what} not ready after {attempts} attempts")]
    RetriesExhausted { what: String, attempts: u32 },

    #[error("{what} check failed: {reason}")]
    ProbeFailed { what: String, reason: String },

    #[error("Control plane request failed: {0}")]
    Kube(#[from] kube::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, OrchestratorError>;
