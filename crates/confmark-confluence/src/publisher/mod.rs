//! Page publisher for Confluence.
//!
//! This module provides the [`PagePublisher`] struct that encapsulates the
//! workflow for publishing a Confluence page from markdown content:
//!
//! 1. Convert markdown to Confluence storage format
//! 2. Resolve the page title (explicit, or first H1)
//! 3. Find the existing page, by ID or by title within the space
//! 4. Create the page, or update it against the version just fetched
//!
//! Version conflicts are reported, never retried.
//!
//! # Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use confmark_confluence::{MemoryPageStore, PagePublisher, PublishAction, PublishConfig};
//!
//! let store = MemoryPageStore::new();
//! let config = PublishConfig {
//!     space_key: "DOCS".to_owned(),
//!     parent_id: None,
//!     message: None,
//! };
//! let publisher = PagePublisher::new(&store, config);
//!
//! let first = publisher.publish("# Guide\n\nHello", None)?;
//! assert_eq!(first.action, PublishAction::Created);
//!
//! let second = publisher.publish("# Guide\n\nHello again", None)?;
//! assert_eq!(second.action, PublishAction::Updated);
//! assert_eq!(second.page.version.number, 2);
//! # Ok(())
//! # }
//! ```

mod error;
mod executor;
mod result;

pub use error::PublishError;
pub use executor::PagePublisher;
pub use result::{DryRunResult, ExistingPage, PublishAction, PublishResult};

/// Configuration for publishing pages into one space.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// Space pages are looked up and created in.
    pub space_key: String,
    /// Parent page for newly created pages.
    pub parent_id: Option<String>,
    /// Version message for updates.
    pub message: Option<String>,
}
