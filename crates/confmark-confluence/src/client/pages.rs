//! Page operations for Confluence API.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::{debug, info};

use super::{ConfluenceClient, read_json};
use crate::error::ConfluenceError;
use crate::store::PageStore;
use crate::types::{ContentRequest, NewPage, Page, PageUpdate, SearchResponse};

/// Fields expanded on every page fetch.
const PAGE_EXPAND: &str = "body.storage,version,space";

/// HTTP status Confluence returns for a stale version number.
const STATUS_CONFLICT: u16 = 409;

impl PageStore for ConfluenceClient {
    fn get_page(&self, id: &str) -> Result<Page, ConfluenceError> {
        let url = format!("{}/content/{}?expand={PAGE_EXPAND}", self.api_url(), id);

        info!("Getting page {}", id);
        debug!(%url, "GET");

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.authorization)
            .header("Accept", "application/json")
            .call()?;

        read_json(response, &format!("page {id}"))
    }

    fn get_page_by_title(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<Option<Page>, ConfluenceError> {
        let url = format!(
            "{}/content?type=page&spaceKey={}&title={}&expand={PAGE_EXPAND}&limit=1",
            self.api_url(),
            utf8_percent_encode(space_key, NON_ALPHANUMERIC),
            utf8_percent_encode(title, NON_ALPHANUMERIC),
        );

        info!("Looking up page '{}' in space {}", title, space_key);
        debug!(%url, "GET");

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.authorization)
            .header("Accept", "application/json")
            .call()?;

        let search: SearchResponse = read_json(response, &format!("space {space_key}"))?;
        Ok(search.results.into_iter().next())
    }

    fn create_page(&self, page: &NewPage) -> Result<Page, ConfluenceError> {
        let url = format!("{}/content", self.api_url());

        info!("Creating page '{}' in space {}", page.title, page.space_key);
        debug!(%url, "POST");

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.authorization)
            .header("Accept", "application/json")
            .send_json(ContentRequest::create(page))?;

        let resource = match &page.parent_id {
            Some(parent) => format!("space {} or parent page {parent}", page.space_key),
            None => format!("space {}", page.space_key),
        };
        let created: Page = read_json(response, &resource)?;
        info!("Created page {} (v{})", created.id, created.version.number);
        Ok(created)
    }

    fn update_page(&self, id: &str, update: &PageUpdate) -> Result<Page, ConfluenceError> {
        let url = format!("{}/content/{}", self.api_url(), id);

        info!("Updating page {} from version {}", id, update.version);
        debug!(%url, "PUT");

        let response = self
            .agent
            .put(&url)
            .header("Authorization", &self.authorization)
            .header("Accept", "application/json")
            .send_json(ContentRequest::update(update))?;

        if response.status().as_u16() == STATUS_CONFLICT {
            return Err(ConfluenceError::VersionConflict {
                page_id: id.to_owned(),
                expected: update.version,
                actual: None,
            });
        }

        let updated: Page = read_json(response, &format!("page {id}"))?;
        info!("Updated page {} to v{}", updated.id, updated.version.number);
        Ok(updated)
    }
}
