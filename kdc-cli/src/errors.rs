use kdc_core::errors::OrchestratorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid action '{action}'. Use {expected}.")]
    InvalidAction {
        action: String,
        expected: &'static str,
    },

    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),
}

pub type Result<T> = std::result::Result<T, CliError>;
