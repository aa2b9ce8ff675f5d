//! HTTP surface of a folio site.
//!
//! Serves the search data export at `/search.json` along with a home page
//! rendered from the site configuration.

pub mod search;
pub mod server;

pub use search::{search_json, search_records, SearchError, SearchRecord};
pub use server::{router, AppState, Server, ServerConfig, ServerError};
