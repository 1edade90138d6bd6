//! Page storage abstraction.
//!
//! [`PageStore`] is the seam between publishing logic and the Confluence REST
//! API. [`ConfluenceClient`](crate::ConfluenceClient) implements it over HTTP;
//! [`MemoryPageStore`] keeps pages in memory with the same version rules.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::error::ConfluenceError;
use crate::types::{Body, NewPage, Page, PageUpdate, Space, Storage, Version};

/// Page repository with optimistic concurrency.
pub trait PageStore {
    /// Fetch a page by ID with body, version and space expanded.
    fn get_page(&self, id: &str) -> Result<Page, ConfluenceError>;

    /// Find a page by exact title within a space.
    fn get_page_by_title(&self, space_key: &str, title: &str)
    -> Result<Option<Page>, ConfluenceError>;

    /// Create a page at version 1.
    fn create_page(&self, page: &NewPage) -> Result<Page, ConfluenceError>;

    /// Replace title and body of a page.
    ///
    /// Fails with [`ConfluenceError::VersionConflict`] unless the page is
    /// still at `update.version`. On success the page is at `update.version + 1`.
    fn update_page(&self, id: &str, update: &PageUpdate) -> Result<Page, ConfluenceError>;
}

/// In-memory [`PageStore`].
#[derive(Debug, Default)]
pub struct MemoryPageStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    pages: HashMap<String, StoredPage>,
    next_id: u64,
}

#[derive(Debug, Clone)]
struct StoredPage {
    page: Page,
    parent_id: Option<String>,
}

impl MemoryPageStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().pages.len()
    }

    /// Whether the store holds no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parent page ID recorded at creation.
    #[must_use]
    pub fn parent_of(&self, id: &str) -> Option<String> {
        self.lock().pages.get(id).and_then(|p| p.parent_id.clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PageStore for MemoryPageStore {
    fn get_page(&self, id: &str) -> Result<Page, ConfluenceError> {
        self.lock()
            .pages
            .get(id)
            .map(|p| p.page.clone())
            .ok_or_else(|| ConfluenceError::NotFound {
                resource: format!("page {id}"),
            })
    }

    fn get_page_by_title(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<Option<Page>, ConfluenceError> {
        Ok(self
            .lock()
            .pages
            .values()
            .find(|p| p.page.space_key() == Some(space_key) && p.page.title == title)
            .map(|p| p.page.clone()))
    }

    fn create_page(&self, new_page: &NewPage) -> Result<Page, ConfluenceError> {
        if new_page.title.trim().is_empty() {
            return Err(ConfluenceError::Validation(
                "page title cannot be empty".to_owned(),
            ));
        }
        if new_page.space_key.is_empty() {
            return Err(ConfluenceError::Validation(
                "space key cannot be empty".to_owned(),
            ));
        }

        let mut inner = self.lock();

        let duplicate = inner.pages.values().any(|p| {
            p.page.space_key() == Some(new_page.space_key.as_str())
                && p.page.title == new_page.title
        });
        if duplicate {
            return Err(ConfluenceError::Validation(format!(
                "a page titled '{}' already exists in space {}",
                new_page.title, new_page.space_key
            )));
        }
        if let Some(parent) = &new_page.parent_id
            && !inner.pages.contains_key(parent)
        {
            return Err(ConfluenceError::NotFound {
                resource: format!("parent page {parent}"),
            });
        }

        inner.next_id += 1;
        let id = inner.next_id.to_string();
        let page = Page {
            id: id.clone(),
            content_type: "page".to_owned(),
            title: new_page.title.clone(),
            space: Some(Space {
                key: new_page.space_key.clone(),
            }),
            version: Version {
                number: 1,
                message: None,
            },
            body: Some(Body {
                storage: Some(Storage::new(new_page.body.clone())),
            }),
            links: None,
        };
        inner.pages.insert(
            id,
            StoredPage {
                page: page.clone(),
                parent_id: new_page.parent_id.clone(),
            },
        );
        Ok(page)
    }

    fn update_page(&self, id: &str, update: &PageUpdate) -> Result<Page, ConfluenceError> {
        let mut inner = self.lock();
        let stored = inner
            .pages
            .get_mut(id)
            .ok_or_else(|| ConfluenceError::NotFound {
                resource: format!("page {id}"),
            })?;

        let current = stored.page.version.number;
        if current != update.version {
            return Err(ConfluenceError::VersionConflict {
                page_id: id.to_owned(),
                expected: update.version,
                actual: Some(current),
            });
        }

        stored.page.title.clone_from(&update.title);
        stored.page.body = Some(Body {
            storage: Some(Storage::new(update.body.clone())),
        });
        stored.page.version = Version {
            number: current + 1,
            message: update.message.clone(),
        };
        Ok(stored.page.clone())
    }
}
