//! Confluence publishing for confmark.
//!
//! - [`PageStore`]: page repository with optimistic concurrency, implemented
//!   over HTTP by [`ConfluenceClient`] and in memory by [`MemoryPageStore`]
//! - [`PagePublisher`]: converts markdown and creates or updates a page
//! - [`ConfluenceError`]: error taxonomy with stable codes and remediation hints

mod client;
mod error;
mod publisher;
mod store;
mod types;

pub use client::ConfluenceClient;
pub use error::ConfluenceError;
pub use publisher::{
    DryRunResult, ExistingPage, PagePublisher, PublishAction, PublishConfig, PublishError,
    PublishResult,
};
pub use store::{MemoryPageStore, PageStore};
pub use types::{Body, Links, NewPage, Page, PageUpdate, Space, Storage, Version};
