//! Confluence REST API client.
//!
//! Provides sync HTTP client for the Confluence REST API with Basic
//! (username and API token) or Bearer (personal access token) authentication.

mod auth;
mod pages;

use std::time::Duration;

use confmark_config::AuthConfig;
use serde::de::DeserializeOwned;
use ureq::Agent;
use ureq::http::Response;

use crate::error::ConfluenceError;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Confluence REST API client.
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    authorization: String,
}

impl ConfluenceClient {
    /// Create client for `base_url` using the given credentials.
    #[must_use]
    pub fn new(base_url: &str, auth: &AuthConfig) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            authorization: auth::header_value(auth),
        }
    }

    /// Get the API base URL.
    fn api_url(&self) -> String {
        format!("{}/rest/api", self.base_url)
    }

    /// Absolute web UI URL for a page.
    #[must_use]
    pub fn page_url(&self, page: &crate::types::Page) -> Option<String> {
        let webui = page.links.as_ref()?.webui.as_deref()?;
        Some(format!("{}{webui}", self.base_url))
    }
}

/// Read a JSON body, or turn an error status into a [`ConfluenceError`].
fn read_json<T: DeserializeOwned>(
    response: Response<ureq::Body>,
    resource: &str,
) -> Result<T, ConfluenceError> {
    let status = response.status().as_u16();
    let mut body_reader = response.into_body();

    if status >= 400 {
        let error_body = body_reader
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned());
        return Err(ConfluenceError::from_status(status, error_body, resource));
    }

    decode_body(status, body_reader.read_to_string())
}

/// Decode the body of a successful response.
///
/// A body that cannot be read after a success status is a broken response,
/// not an unreachable server.
fn decode_body<T: DeserializeOwned>(
    status: u16,
    body: Result<String, ureq::Error>,
) -> Result<T, ConfluenceError> {
    let text = body.map_err(|err| ConfluenceError::HttpResponse {
        status,
        body: format!("unable to read response body: {err}"),
    })?;
    Ok(serde_json::from_str(&text)?)
}
