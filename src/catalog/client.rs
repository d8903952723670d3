//! Remote catalog search client.
//!
//! Wraps the external book catalog behind one async operation: free-text
//! search returning normalized [`CatalogEntry`] values. The wire format is the
//! Google Books volumes shape (an optional `items` list of volumes, each with
//! nested `volumeInfo` fields); the raw DTOs stay private to this module and
//! every absent field is filled with the engine's defaults before a result
//! leaves here.
//!
//! Failures are explicit: transport errors, non-success statuses, and
//! malformed bodies all surface as [`ShelfmarkError::Search`] with a message
//! fit for direct display. An absent `items` list is an empty result set, not
//! an error.

use crate::domain::error::{Result, ShelfmarkError};
use crate::domain::CatalogEntry;
use serde::Deserialize;

/// Title used when the catalog omits one.
const UNKNOWN_TITLE: &str = "Unknown Title";

/// Author placeholder keeping the authors list non-empty.
const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Category used when the catalog provides none.
const UNCATEGORIZED: &str = "Uncategorized";

/// Raw search response body.
#[derive(Debug, Deserialize)]
struct VolumeList {
    items: Option<Vec<Volume>>,
}

/// One raw volume as returned by the catalog.
#[derive(Debug, Deserialize)]
struct Volume {
    id: String,
    #[serde(rename = "volumeInfo", default)]
    volume_info: VolumeInfo,
}

/// Nested volume metadata; every field is optional on the wire.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    published_date: Option<String>,
    image_links: Option<ImageLinks>,
    categories: Option<Vec<String>>,
    page_count: Option<u32>,
    average_rating: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

impl From<Volume> for CatalogEntry {
    fn from(volume: Volume) -> Self {
        let info = volume.volume_info;

        let authors = match info.authors {
            Some(authors) if !authors.is_empty() => authors,
            _ => vec![UNKNOWN_AUTHOR.to_string()],
        };

        Self {
            id: volume.id,
            title: info.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            authors,
            published_date: info.published_date,
            image_url: info.image_links.and_then(|links| links.thumbnail),
            categories: info
                .categories
                .unwrap_or_else(|| vec![UNCATEGORIZED.to_string()]),
            page_count: info.page_count.unwrap_or(0),
            average_rating: info.average_rating.unwrap_or(0.0).clamp(0.0, 5.0),
        }
    }
}

/// Async client for the external book catalog.
///
/// Cheap to clone; the inner `reqwest::Client` shares its connection pool
/// across clones, so the driver can hand one to each spawned search task.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    endpoint: String,
    max_results: u32,
}

impl CatalogClient {
    /// Creates a client for the given search endpoint.
    ///
    /// `max_results` caps every request; the engine does not paginate.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, max_results: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            max_results,
        }
    }

    /// Issues one search request and returns normalized entries.
    ///
    /// The query is sent URL-encoded as the `q` parameter. Caller is expected
    /// to have applied the minimum-length gate already; this method does no
    /// gating of its own.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfmarkError::Search`] on transport failure, a non-success
    /// HTTP status, or an unparseable response body.
    pub async fn search(&self, query: &str) -> Result<Vec<CatalogEntry>> {
        tracing::debug!(query = %query, max_results = self.max_results, "searching catalog");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("q", query), ("maxResults", &self.max_results.to_string())])
            .send()
            .await
            .map_err(|e| ShelfmarkError::Search(format!("network request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = %status, "catalog request rejected");
            return Err(ShelfmarkError::Search(format!(
                "catalog request failed with status {status}"
            )));
        }

        let body: VolumeList = response
            .json()
            .await
            .map_err(|e| ShelfmarkError::Search(format!("malformed catalog response: {e}")))?;

        let entries: Vec<CatalogEntry> = body
            .items
            .unwrap_or_default()
            .into_iter()
            .map(CatalogEntry::from)
            .collect();

        tracing::debug!(result_count = entries.len(), "catalog search completed");
        Ok(entries)
    }
}
