//! Static export command.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use folio_content::FsCollection;
use folio_server::search_json;
use folio_site::SiteConfig;

/// Run the build command.
pub async fn run(
    config_path: &Path,
    content_dir: &Path,
    collection: &str,
    output: PathBuf,
) -> Result<()> {
    tracing::info!("Building search data...");
    let start = Instant::now();

    // Config errors should fail the build, not the first page render
    let site = SiteConfig::load_or_canonical(config_path).context("Failed to load site config")?;

    let path = export_search(content_dir, collection, &output)?;

    tracing::info!(
        "Built search data for {} in {}ms",
        site.site_url,
        start.elapsed().as_millis()
    );
    tracing::info!("Output: {}", path.display());

    Ok(())
}

/// Write `search.json` for `collection` into `output`.
pub fn export_search(content_dir: &Path, collection: &str, output: &Path) -> Result<PathBuf> {
    let store = FsCollection::new(content_dir);
    let json = search_json(&store, collection)?;

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let path = output.join("search.json");
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}
