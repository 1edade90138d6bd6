//! Confluence API types.

mod page;

pub use page::{Body, Links, NewPage, Page, PageUpdate, Space, Storage, Version};
pub(crate) use page::{ContentRequest, SearchResponse};
