//! HTTP server implementation.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use tower_http::services::ServeDir;

use folio_content::ContentCollection;
use folio_site::{render, SiteConfig};

use crate::search::{search_json, SearchError};

/// Configuration for the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Collection exported by `/search.json`
    pub collection: String,

    /// Static files served for unmatched paths
    pub public_dir: Option<PathBuf>,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            collection: "blog".to_string(),
            public_dir: None,
            port: 4321,
            host: "127.0.0.1".to_string(),
            open: false,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),
}

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    pub site: Arc<SiteConfig>,
    pub content: Arc<dyn ContentCollection>,
    pub collection: String,
}

impl AppState {
    pub fn new(site: SiteConfig, content: Arc<dyn ContentCollection>, collection: &str) -> Self {
        Self {
            site: Arc::new(site),
            content,
            collection: collection.to_string(),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState, public_dir: Option<&PathBuf>) -> Router {
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/search.json", get(search_handler))
        .with_state(state);

    match public_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    }
}

/// Site server.
pub struct Server {
    config: ServerConfig,
    state: AppState,
}

impl Server {
    /// Create a new server for `site`, reading entries from `content`.
    pub fn new(config: ServerConfig, site: SiteConfig, content: Arc<dyn ContentCollection>) -> Self {
        let state = AppState::new(site, content, &config.collection);
        Self { config, state }
    }

    /// Start the server.
    pub async fn start(self) -> Result<(), ServerError> {
        let raw = format!("{}:{}", self.config.host, self.config.port);
        let addr: SocketAddr = raw
            .parse()
            .map_err(|_| ServerError::InvalidAddress(raw.clone()))?;

        let public_dir = self.config.public_dir.as_ref().filter(|d| d.is_dir());
        if let Some(dir) = public_dir {
            tracing::info!("Serving static files from {}", dir.display());
        }

        let app = router(self.state, public_dir);

        tracing::info!("Starting server at http://{}", addr);

        // Start server
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        // Open browser if configured
        if self.config.open {
            let url = format!("http://{}", addr);
            let _ = open::that(&url);
        }

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Handler for `/search.json`.
///
/// Content is read on every request; nothing is cached between requests.
async fn search_handler(State(state): State<AppState>) -> Result<impl IntoResponse, SearchError> {
    let json = tokio::task::spawn_blocking(move || {
        search_json(state.content.as_ref(), &state.collection)
    })
    .await
    .map_err(|e| SearchError::Task(e.to_string()))??;

    tracing::debug!("Exported search data ({} bytes)", json.len());

    Ok(([(header::CONTENT_TYPE, "application/json")], json))
}

/// Handler for the home page.
async fn index_handler(State(state): State<AppState>) -> impl IntoResponse {
    let site = state.site.as_ref();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  {}
</head>
<body>
  <header>
    <h1>{}</h1>
    <p class="tagline">{}</p>
  </header>
  {}
  {}
</body>
</html>"#,
        render::seo_tags(site, None, "/"),
        render::escape_html(site.site_title()),
        render::escape_html(site.site_description()),
        render::byline(site),
        render::social_links(site)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use folio_content::{parse_entry, FsCollection, MemoryCollection};
    use tempfile::tempdir;
    use tower::ServiceExt;

    fn memory_state(store: MemoryCollection) -> AppState {
        AppState::new(SiteConfig::canonical(), Arc::new(store), "blog")
    }

    async fn fetch(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn serves_published_entries() {
        let published = parse_entry(
            "a.md",
            "---\ntitle: A\ndescription: d1\ntags: [x]\npubDate: 2024-01-01\n---\nhello",
        )
        .unwrap();
        let draft = parse_entry(
            "b.md",
            "---\ntitle: B\ndescription: d2\npubDate: 2024-01-02\ndraft: true\n---\nnope",
        )
        .unwrap();
        let store = MemoryCollection::new()
            .with_entry("blog", published)
            .with_entry("blog", draft);

        let (status, content_type, body) = fetch(router(memory_state(store), None), "/search.json").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(
            body,
            r#"[{"slug":"a","title":"A","description":"d1","content":"hello","tags":["x"],"pubDate":"2024-01-01"}]"#
        );
    }

    #[tokio::test]
    async fn empty_collection_returns_empty_array() {
        let app = router(memory_state(MemoryCollection::new()), None);

        let (status, content_type, body) = fetch(app, "/search.json").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(body, "[]");
    }

    #[tokio::test]
    async fn malformed_content_fails_request() {
        let temp = tempdir().unwrap();
        let blog = temp.path().join("blog");
        std::fs::create_dir_all(&blog).unwrap();
        std::fs::write(blog.join("broken.md"), "---\ntitle: [oops\n---\n").unwrap();

        let state = AppState::new(
            SiteConfig::canonical(),
            Arc::new(FsCollection::new(temp.path())),
            "blog",
        );

        let (status, _, body) = fetch(router(state, None), "/search.json").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("broken.md"));
    }

    #[tokio::test]
    async fn reads_content_fresh_on_each_request() {
        let temp = tempdir().unwrap();
        let blog = temp.path().join("blog");
        std::fs::create_dir_all(&blog).unwrap();

        let state = AppState::new(
            SiteConfig::canonical(),
            Arc::new(FsCollection::new(temp.path())),
            "blog",
        );
        let app = router(state, None);

        let (_, _, before) = fetch(app.clone(), "/search.json").await;
        std::fs::write(
            blog.join("new.md"),
            "---\ntitle: New\ndescription: d\npubDate: 2024-06-01\n---\nfresh",
        )
        .unwrap();
        let (_, _, after) = fetch(app, "/search.json").await;

        assert_eq!(before, "[]");
        assert!(after.contains(r#""slug":"new""#));
    }

    #[tokio::test]
    async fn home_page_renders_site_config() {
        let mut site = SiteConfig::canonical();
        site.social.github = None;
        let state = AppState::new(site, Arc::new(MemoryCollection::new()), "blog");

        let (status, _, body) = fetch(router(state, None), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<title>@jdrhyne</title>"));
        assert!(body.contains("Jonathan D. Rhyne"));
        assert!(!body.contains("social-github"));
        assert!(body.contains("social-linkedin"));
    }

    #[tokio::test]
    async fn falls_back_to_public_dir() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("robots.txt"), "User-agent: *").unwrap();
        let public = temp.path().to_path_buf();

        let app = router(memory_state(MemoryCollection::new()), Some(&public));

        let (status, _, body) = fetch(app, "/robots.txt").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "User-agent: *");
    }

    #[test]
    fn creates_server_with_default_config() {
        let server = Server::new(
            ServerConfig::default(),
            SiteConfig::canonical(),
            Arc::new(MemoryCollection::new()),
        );
        assert_eq!(server.config.port, 4321);
        assert_eq!(server.state.collection, "blog");
    }
}
