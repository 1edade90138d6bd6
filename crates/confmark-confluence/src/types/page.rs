//! Confluence page types.

use serde::{Deserialize, Serialize};

/// Confluence page.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page {
    /// Page ID.
    pub id: String,
    /// Content type (always "page").
    #[serde(rename = "type")]
    pub content_type: String,
    /// Page title.
    pub title: String,
    /// Space the page lives in.
    #[serde(default)]
    pub space: Option<Space>,
    /// Version information.
    pub version: Version,
    /// Page body content.
    #[serde(default)]
    pub body: Option<Body>,
    /// Hypermedia links.
    #[serde(rename = "_links", default)]
    pub links: Option<Links>,
}

impl Page {
    /// Storage format body, or an empty string when the body was not expanded.
    #[must_use]
    pub fn storage_value(&self) -> &str {
        self.body
            .as_ref()
            .and_then(|b| b.storage.as_ref())
            .map_or("", |s| s.value.as_str())
    }

    /// Key of the containing space, if it was expanded.
    #[must_use]
    pub fn space_key(&self) -> Option<&str> {
        self.space.as_ref().map(|s| s.key.as_str())
    }
}

/// Space reference.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Space {
    /// Space key.
    pub key: String,
}

/// Page version.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Version {
    /// Version number.
    pub number: u32,
    /// Version message/comment.
    #[serde(default)]
    pub message: Option<String>,
}

/// Page body content.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Body {
    /// Storage format content.
    #[serde(default)]
    pub storage: Option<Storage>,
}

/// Storage format representation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Storage {
    /// HTML content in Confluence storage format.
    pub value: String,
    /// Content representation (always "storage").
    pub representation: String,
}

impl Storage {
    /// Wrap storage format markup.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            representation: "storage".to_owned(),
        }
    }
}

/// Hypermedia links.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Links {
    /// Web UI link.
    #[serde(default)]
    pub webui: Option<String>,
    /// API self link.
    #[serde(rename = "self", default)]
    pub self_link: Option<String>,
}

/// Data for creating a page.
#[derive(Debug, Clone)]
pub struct NewPage {
    /// Page title, unique within the space.
    pub title: String,
    /// Target space key.
    pub space_key: String,
    /// Storage format body.
    pub body: String,
    /// Parent page ID.
    pub parent_id: Option<String>,
}

/// Data for updating a page.
#[derive(Debug, Clone)]
pub struct PageUpdate {
    /// New title.
    pub title: String,
    /// New storage format body.
    pub body: String,
    /// Version the update is based on. The page must still be at this version.
    pub version: u32,
    /// Version message.
    pub message: Option<String>,
}

/// `GET /content` search response.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub(crate) results: Vec<Page>,
}

/// Request body for `POST /content` and `PUT /content/{id}`.
#[derive(Debug, Serialize)]
pub(crate) struct ContentRequest<'a> {
    #[serde(rename = "type")]
    content_type: &'static str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    space: Option<SpaceRef<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ancestors: Vec<AncestorRef<'a>>,
    body: BodyRef<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<VersionRef<'a>>,
}

#[derive(Debug, Serialize)]
struct SpaceRef<'a> {
    key: &'a str,
}

#[derive(Debug, Serialize)]
struct AncestorRef<'a> {
    id: &'a str,
}

#[derive(Debug, Serialize)]
struct BodyRef<'a> {
    storage: StorageRef<'a>,
}

#[derive(Debug, Serialize)]
struct StorageRef<'a> {
    value: &'a str,
    representation: &'static str,
}

#[derive(Debug, Serialize)]
struct VersionRef<'a> {
    number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

impl<'a> ContentRequest<'a> {
    fn with_body(title: &'a str, body: &'a str) -> Self {
        Self {
            content_type: "page",
            title,
            space: None,
            ancestors: Vec::new(),
            body: BodyRef {
                storage: StorageRef {
                    value: body,
                    representation: "storage",
                },
            },
            version: None,
        }
    }

    /// Request body for creating `page`.
    pub(crate) fn create(page: &'a NewPage) -> Self {
        let mut request = Self::with_body(&page.title, &page.body);
        request.space = Some(SpaceRef {
            key: &page.space_key,
        });
        if let Some(parent) = &page.parent_id {
            request.ancestors.push(AncestorRef { id: parent });
        }
        request
    }

    /// Request body for `update`; the sent version number is one past the expected one.
    pub(crate) fn update(update: &'a PageUpdate) -> Self {
        let mut request = Self::with_body(&update.title, &update.body);
        request.version = Some(VersionRef {
            number: update.version + 1,
            message: update.message.as_deref(),
        });
        request
    }
}
