//! Publisher result types.

use crate::types::Page;

/// What [`PagePublisher`](super::PagePublisher) did to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishAction {
    /// A new page was created.
    Created,
    /// An existing page got a new version.
    Updated,
}

/// Result of a successful publish.
#[derive(Debug, Clone)]
pub struct PublishResult {
    /// Page as returned by the store after the write.
    pub page: Page,
    /// Whether the page was created or updated.
    pub action: PublishAction,
}

/// Existing page a dry run would update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingPage {
    /// Page ID.
    pub id: String,
    /// Current title.
    pub title: String,
    /// Current version number.
    pub version: u32,
}

/// Result of a dry run.
#[derive(Debug, Clone)]
pub struct DryRunResult {
    /// Converted storage markup.
    pub markup: String,
    /// Title the page would get.
    pub title: String,
    /// Page that would be updated; `None` means a new page would be created.
    pub existing: Option<ExistingPage>,
}
