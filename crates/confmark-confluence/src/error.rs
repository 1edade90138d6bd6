//! Error types for Confluence integration.

/// Error from page storage operations.
///
/// Every variant maps to a stable [`code`](Self::code) and a
/// [`remediation`](Self::remediation) hint for the user. Nothing in this crate
/// retries on error; a [`VersionConflict`](Self::VersionConflict) has to be
/// resolved by fetching the page again and resubmitting.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfluenceError {
    /// Credentials were rejected (HTTP 401).
    #[error("authentication failed: {body}")]
    Authentication {
        /// Response body.
        body: String,
    },

    /// Credentials are valid but lack access (HTTP 403).
    #[error("permission denied: {body}")]
    PermissionDenied {
        /// Response body.
        body: String,
    },

    /// Page, space or parent does not exist (HTTP 404).
    #[error("not found: {resource}")]
    NotFound {
        /// Description of what was looked up.
        resource: String,
    },

    /// Request was rejected as invalid (HTTP 400, duplicate title, etc).
    #[error("validation error: {0}")]
    Validation(String),

    /// Expected page version does not match the stored version.
    #[error("version conflict on page {page_id}: expected version {expected}{}", actual_suffix(.actual.as_ref().copied()))]
    VersionConflict {
        /// Page ID.
        page_id: String,
        /// Version the caller based its update on.
        expected: u32,
        /// Stored version, when known.
        actual: Option<u32>,
    },

    /// HTTP request failed (network error, timeout, etc).
    #[error("network request failed")]
    Network(#[from] ureq::Error),

    /// HTTP response error (server returned another error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// JSON serialization/deserialization error.
    #[error("invalid JSON response")]
    Json(#[from] serde_json::Error),
}

fn actual_suffix(actual: Option<u32>) -> String {
    actual.map_or_else(String::new, |v| format!(", found {v}"))
}

impl ConfluenceError {
    /// Map an HTTP error status to an error.
    pub(crate) fn from_status(status: u16, body: String, resource: &str) -> Self {
        match status {
            400 => Self::Validation(body),
            401 => Self::Authentication { body },
            403 => Self::PermissionDenied { body },
            404 => Self::NotFound {
                resource: resource.to_owned(),
            },
            _ => Self::HttpResponse { status, body },
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Authentication { .. } => "auth_failed",
            Self::PermissionDenied { .. } => "permission_denied",
            Self::NotFound { .. } => "not_found",
            Self::Validation(_) => "validation_error",
            Self::VersionConflict { .. } => "version_conflict",
            Self::Network(_) => "network_unreachable",
            Self::HttpResponse { .. } => "http_error",
            Self::Json(_) => "invalid_response",
        }
    }

    /// Human-readable hint on how to resolve the error.
    #[must_use]
    pub fn remediation(&self) -> &'static str {
        match self {
            Self::Authentication { .. } => {
                "Check confluence.username and confluence.api_token (or confluence.token) in confmark.toml."
            }
            Self::PermissionDenied { .. } => {
                "Ask a space administrator to grant your account edit access to the space."
            }
            Self::NotFound { .. } => {
                "Verify the page ID, space key and parent ID exist and are visible to your account."
            }
            Self::Validation(_) => {
                "Fix the page title, space key or content rejected by the server and try again."
            }
            Self::VersionConflict { .. } => {
                "The page was changed by someone else. Fetch the latest version and publish again."
            }
            Self::Network(_) => {
                "Check confluence.base_url and your network connection."
            }
            Self::HttpResponse { .. } => {
                "The server returned an unexpected error; see the response body for details."
            }
            Self::Json(_) => {
                "The server response was not understood; check that confluence.base_url points at the REST API host."
            }
        }
    }
}
