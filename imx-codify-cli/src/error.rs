use thiserror::Error;

use imx_codify_lib::CodifyError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Codification, description or verification failed
    #[error("{0}")]
    Codify(#[from] CodifyError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Image does not match its header
    #[error("Verification failed: {0}")]
    Invalid(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    /// Stage label for the error report.
    pub(crate) fn stage(&self) -> &'static str {
        match self {
            Self::Codify(e) => e.stage(),
            Self::Config(_) => "settings",
            Self::Invalid(_) => "verify",
        }
    }
}
