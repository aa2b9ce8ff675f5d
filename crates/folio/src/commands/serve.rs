//! Serve command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use folio_content::FsCollection;
use folio_server::{Server, ServerConfig};
use folio_site::SiteConfig;

/// Flags of the serve command.
pub struct ServeOptions {
    pub port: u16,
    pub host: String,
    pub public: PathBuf,
    pub open: bool,
}

/// Run the server.
pub async fn run(
    config_path: &Path,
    content_dir: &Path,
    collection: &str,
    options: ServeOptions,
) -> Result<()> {
    let site = SiteConfig::load_or_canonical(config_path).context("Failed to load site config")?;

    if !content_dir.exists() {
        tracing::warn!(
            "Content directory not found: {}. Run 'folio init' to create one.",
            content_dir.display()
        );
    }

    let config = ServerConfig {
        collection: collection.to_string(),
        public_dir: Some(options.public),
        port: options.port,
        host: options.host,
        open: options.open,
    };

    Server::new(config, site, Arc::new(FsCollection::new(content_dir)))
        .start()
        .await?;

    Ok(())
}
