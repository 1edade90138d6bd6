//! Page publisher implementation.

use confmark_converter::{Conversion, convert_with_title};
use tracing::info;

use crate::store::PageStore;
use crate::types::{NewPage, Page, PageUpdate};

use super::PublishConfig;
use super::error::PublishError;
use super::result::{DryRunResult, ExistingPage, PublishAction, PublishResult};

/// Handles publishing Confluence pages from markdown.
pub struct PagePublisher<'a, S: PageStore + ?Sized> {
    store: &'a S,
    config: PublishConfig,
}

impl<'a, S: PageStore + ?Sized> PagePublisher<'a, S> {
    /// Create a new page publisher.
    #[must_use]
    pub fn new(store: &'a S, config: PublishConfig) -> Self {
        Self { store, config }
    }

    /// Publish markdown as the page with the resolved title in the configured space.
    ///
    /// The title is `title` if given, otherwise the first H1 of the markdown.
    /// The page is created when no page with that title exists in the space,
    /// and updated against its current version otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - no title can be resolved
    /// - the page changed between lookup and update (version conflict)
    /// - Confluence API calls fail
    pub fn publish(
        &self,
        markdown: &str,
        title: Option<&str>,
    ) -> Result<PublishResult, PublishError> {
        let conversion = convert_with_title(markdown);
        let title = resolve_title(title, &conversion)?;

        match self.store.get_page_by_title(&self.config.space_key, &title)? {
            Some(existing) => {
                info!(
                    "Page '{}' exists as {} (v{}), updating",
                    title, existing.id, existing.version.number
                );
                let page = self.write_update(&existing, title, conversion.markup)?;
                Ok(PublishResult {
                    page,
                    action: PublishAction::Updated,
                })
            }
            None => {
                info!(
                    "Page '{}' not found in space {}, creating",
                    title, self.config.space_key
                );
                let page = self.store.create_page(&NewPage {
                    title,
                    space_key: self.config.space_key.clone(),
                    body: conversion.markup,
                    parent_id: self.config.parent_id.clone(),
                })?;
                Ok(PublishResult {
                    page,
                    action: PublishAction::Created,
                })
            }
        }
    }

    /// Update the page with `page_id` from markdown content.
    ///
    /// The title falls back to the first H1, then to the current page title.
    ///
    /// # Errors
    ///
    /// Returns an error if the page does not exist, changed while being
    /// updated, or Confluence API calls fail.
    pub fn update(
        &self,
        page_id: &str,
        markdown: &str,
        title: Option<&str>,
    ) -> Result<PublishResult, PublishError> {
        let conversion = convert_with_title(markdown);
        let current = self.store.get_page(page_id)?;
        let title = resolve_title(title, &conversion).unwrap_or_else(|_| current.title.clone());

        let page = self.write_update(&current, title, conversion.markup)?;
        Ok(PublishResult {
            page,
            action: PublishAction::Updated,
        })
    }

    /// Perform a dry-run publish (no changes made).
    ///
    /// With `page_id` the target is that page, as in [`update`](Self::update);
    /// without it the target is looked up by title, as in
    /// [`publish`](Self::publish).
    ///
    /// # Errors
    ///
    /// Returns an error if no title can be resolved or lookups fail.
    pub fn dry_run(
        &self,
        markdown: &str,
        title: Option<&str>,
        page_id: Option<&str>,
    ) -> Result<DryRunResult, PublishError> {
        let conversion = convert_with_title(markdown);

        let (title, existing) = if let Some(page_id) = page_id {
            let current = self.store.get_page(page_id)?;
            let title =
                resolve_title(title, &conversion).unwrap_or_else(|_| current.title.clone());
            (title, Some(current))
        } else {
            let title = resolve_title(title, &conversion)?;
            let existing = self
                .store
                .get_page_by_title(&self.config.space_key, &title)?;
            (title, existing)
        };

        Ok(DryRunResult {
            markup: conversion.markup,
            title,
            existing: existing.map(|page| ExistingPage {
                id: page.id,
                title: page.title,
                version: page.version.number,
            }),
        })
    }

    fn write_update(
        &self,
        current: &Page,
        title: String,
        markup: String,
    ) -> Result<Page, PublishError> {
        let update = PageUpdate {
            title,
            body: markup,
            version: current.version.number,
            message: self.config.message.clone(),
        };
        Ok(self.store.update_page(&current.id, &update)?)
    }
}

/// Explicit title if non-blank, otherwise the first H1.
fn resolve_title(explicit: Option<&str>, conversion: &Conversion) -> Result<String, PublishError> {
    explicit
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .or(conversion.title.as_deref())
        .map(str::to_owned)
        .ok_or(PublishError::MissingTitle)
}
