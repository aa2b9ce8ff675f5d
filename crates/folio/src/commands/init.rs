//! Initialize a folio site.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, content_dir: &Path, collection: &str, yes: bool) -> Result<()> {
    tracing::info!("Initializing folio...");

    let created = scaffold(config_path, content_dir, collection, yes)?;
    for path in &created {
        tracing::info!("Created {}", path.display());
    }

    if created.is_empty() {
        tracing::warn!("Nothing to do, files already exist. Use --yes to overwrite.");
        return Ok(());
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'folio serve' to start the server.");

    Ok(())
}

/// Write the starter files, skipping existing ones unless `overwrite` is set.
///
/// Returns the paths that were written.
pub fn scaffold(
    config_path: &Path,
    content_dir: &Path,
    collection: &str,
    overwrite: bool,
) -> Result<Vec<PathBuf>> {
    let mut created = Vec::new();

    if !config_path.exists() || overwrite {
        if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        fs::write(config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        created.push(config_path.to_path_buf());
    }

    let collection_dir = content_dir.join(collection);
    fs::create_dir_all(&collection_dir).context("Failed to create content directory")?;

    let post_path = collection_dir.join("hello-world.md");
    if !post_path.exists() || overwrite {
        fs::write(&post_path, DEFAULT_POST)
            .with_context(|| format!("Failed to write {}", post_path.display()))?;
        created.push(post_path);
    }

    Ok(created)
}

const DEFAULT_CONFIG: &str = r#"# Folio site configuration

title = "@me"
description = "Notes, projects and photos."
siteUrl = "https://example.com"

[author]
name = "Your Name"
bio = "A short bio shown in bylines."
# avatar = "/images/avatar.png"

# Unset links are not rendered.
[social]
github = "https://github.com/your-handle"
# twitter = "https://x.com/your-handle"
# instagram = "https://instagram.com/your-handle"
# linkedin = "https://www.linkedin.com/in/your-handle/"
# email = "you@example.com"
"#;

const DEFAULT_POST: &str = r#"---
title: Hello, world
description: The first post on this site.
pubDate: 2024-01-01
tags: [meta]
draft: false
---

Welcome! Posts live in `content/blog/`. Set `draft: true` in the frontmatter
to keep a post out of listings and search.
"#;
