//! CLI error types.

use confmark_config::ConfigError;
use confmark_confluence::{ConfluenceError, PublishError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Confluence(#[from] ConfluenceError),

    #[error("{0}")]
    Publish(#[from] PublishError),

    #[error("{0}")]
    Validation(String),
}

impl CliError {
    /// Underlying Confluence error, if any.
    pub(crate) fn confluence(&self) -> Option<&ConfluenceError> {
        match self {
            Self::Confluence(err) | Self::Publish(PublishError::Confluence(err)) => Some(err),
            _ => None,
        }
    }
}
