//! Content entries and slug derivation.

use std::path::PathBuf;

use crate::frontmatter::{extract_frontmatter, parse_frontmatter, Frontmatter, FrontmatterError};

/// A single entry of a content collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentEntry {
    /// Path relative to the collection directory, `/`-separated
    pub id: String,

    /// URL slug, unique within the collection
    pub slug: String,

    /// Parsed frontmatter
    pub data: Frontmatter,

    /// Raw body text after the frontmatter block
    pub body: String,
}

/// Errors raised while loading a collection.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("{path}: unclosed frontmatter block - missing closing ---")]
    UnclosedFrontmatter { path: String },

    #[error("{path}: missing frontmatter")]
    MissingFrontmatter { path: String },

    #[error("{path}: {message}")]
    InvalidFrontmatter { path: String, message: String },

    #[error("Failed to scan collection: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Duplicate slug '{slug}' in {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parse a source file into an entry.
///
/// `id` is the file's path relative to its collection and is used both for
/// error messages and to derive the slug when the frontmatter has none.
pub fn parse_entry(id: &str, source: &str) -> Result<ContentEntry, ContentError> {
    let (yaml, body) = extract_frontmatter(source).map_err(|e| match e {
        FrontmatterError::Unclosed => ContentError::UnclosedFrontmatter {
            path: id.to_string(),
        },
        FrontmatterError::InvalidYaml(message) => ContentError::InvalidFrontmatter {
            path: id.to_string(),
            message,
        },
    })?;

    let Some(yaml) = yaml else {
        return Err(ContentError::MissingFrontmatter {
            path: id.to_string(),
        });
    };

    let data = parse_frontmatter(yaml).map_err(|e| ContentError::InvalidFrontmatter {
        path: id.to_string(),
        message: e.to_string(),
    })?;

    let slug = match data.slug.as_deref().map(|s| s.trim().trim_matches('/')) {
        Some(slug) if !slug.is_empty() => slug.to_string(),
        _ => slug_from_id(id),
    };

    Ok(ContentEntry {
        id: id.to_string(),
        slug,
        data,
        body: body.to_string(),
    })
}

/// Derive a slug from an entry id.
///
/// `2024/Hello World.md` becomes `2024/hello-world`; a trailing `index`
/// segment collapses into its directory.
pub fn slug_from_id(id: &str) -> String {
    let without_ext = match id.rsplit_once('.') {
        Some((stem, ext)) if !ext.contains('/') => stem,
        _ => id,
    };

    let mut segments: Vec<String> = without_ext
        .split('/')
        .map(slugify)
        .filter(|s| !s.is_empty())
        .collect();

    if segments.len() > 1 && segments.last().is_some_and(|s| s == "index") {
        segments.pop();
    }

    segments.join("/")
}

/// Convert a path segment to a URL-safe slug.
fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
