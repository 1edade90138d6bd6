//! Publisher error types.

use crate::error::ConfluenceError;

/// Error during page publishing.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Page storage operation failed.
    #[error(transparent)]
    Confluence(#[from] ConfluenceError),

    /// No title given and the markdown has no level-1 header.
    #[error("page title required: pass a title or start the document with '# Title'")]
    MissingTitle,
}
