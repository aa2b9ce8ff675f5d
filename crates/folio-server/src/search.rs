//! Search data export.
//!
//! Produces the JSON array a client-side search library indexes: one record
//! per published entry of a collection, in the order the store yields them.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use folio_content::{ContentCollection, ContentEntry, ContentError, PubDate};

/// Searchable summary of a published entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Raw body text of the entry
    pub content: String,
    pub tags: Vec<String>,
    pub pub_date: PubDate,
}

impl From<ContentEntry> for SearchRecord {
    fn from(entry: ContentEntry) -> Self {
        Self {
            slug: entry.slug,
            title: entry.data.title,
            description: entry.data.description,
            content: entry.body,
            tags: entry.data.tags,
            pub_date: entry.data.pub_date,
        }
    }
}

/// Errors that can occur while exporting search data.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Failed to load content: {0}")]
    Content(#[from] ContentError),

    #[error("Failed to serialize search data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Content loading task failed: {0}")]
    Task(String),
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}

/// Published entries of `collection`, projected to search records.
pub fn search_records(
    content: &dyn ContentCollection,
    collection: &str,
) -> Result<Vec<SearchRecord>, ContentError> {
    let entries = content.get_collection(collection, &|entry| !entry.data.draft)?;
    Ok(entries.into_iter().map(SearchRecord::from).collect())
}

/// Search data for `collection` as a JSON array.
pub fn search_json(content: &dyn ContentCollection, collection: &str) -> Result<String, SearchError> {
    let records = search_records(content, collection)?;
    Ok(serde_json::to_string(&records)?)
}
