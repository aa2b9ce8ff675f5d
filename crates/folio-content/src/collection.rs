//! Content collections.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::{DirEntry, WalkDir};

use crate::entry::{parse_entry, ContentError, ContentEntry};

/// A source of content entries grouped into named collections.
pub trait ContentCollection: Send + Sync {
    /// Return every entry of collection `name` for which `filter` holds.
    ///
    /// Entries come back in the store's natural order. A single malformed
    /// entry fails the whole call.
    fn get_collection(
        &self,
        name: &str,
        filter: &dyn Fn(&ContentEntry) -> bool,
    ) -> Result<Vec<ContentEntry>, ContentError>;
}

/// Collections backed by a directory tree.
///
/// Each subdirectory of `root` is a collection; `.md` and `.mdx` files are
/// its entries, ordered by relative path. Names starting with `_` or `.` are
/// ignored. Slugs must be unique within a collection.
#[derive(Debug, Clone)]
pub struct FsCollection {
    root: PathBuf,
}

impl FsCollection {
    /// Create a collection store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Find entry files of a collection, sorted by relative path.
    ///
    /// Unreadable directories and dangling links fail the scan.
    fn discover(&self, dir: &Path) -> Result<Vec<(String, PathBuf)>, ContentError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        {
            let entry = entry?;

            if !entry.file_type().is_file() {
                continue;
            }

            let ext = entry.path().extension().and_then(|x| x.to_str()).unwrap_or("");
            if ext != "md" && ext != "mdx" {
                continue;
            }

            let id = entry
                .path()
                .strip_prefix(dir)
                .unwrap_or(entry.path())
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            files.push((id, entry.into_path()));
        }

        files.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(files)
    }
}

/// Fail if two entries resolve to the same slug.
fn check_unique_slugs(entries: &[ContentEntry]) -> Result<(), ContentError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();

    for entry in entries {
        if let Some(first) = seen.insert(&entry.slug, &entry.id) {
            return Err(ContentError::DuplicateSlug {
                slug: entry.slug.clone(),
                first: first.to_string(),
                second: entry.id.clone(),
            });
        }
    }

    Ok(())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('_') || s.starts_with('.'))
}

impl ContentCollection for FsCollection {
    fn get_collection(
        &self,
        name: &str,
        filter: &dyn Fn(&ContentEntry) -> bool,
    ) -> Result<Vec<ContentEntry>, ContentError> {
        let dir = self.root.join(name);

        if !dir.is_dir() {
            tracing::warn!(
                "Collection '{}' does not exist or is empty ({})",
                name,
                dir.display()
            );
            return Ok(Vec::new());
        }

        let files = self.discover(&dir)?;
        tracing::debug!("Loading {} entries from collection '{}'", files.len(), name);

        // Parse in parallel; collect keeps discovery order
        let entries: Vec<ContentEntry> = files
            .par_iter()
            .map(|(id, path)| {
                let source = fs::read_to_string(path).map_err(|source| ContentError::Io {
                    path: path.clone(),
                    source,
                })?;
                parse_entry(id, &source)
            })
            .collect::<Result<_, _>>()?;

        check_unique_slugs(&entries)?;

        Ok(entries.into_iter().filter(|e| filter(e)).collect())
    }
}

/// Collections held in memory, yielded in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryCollection {
    collections: Vec<(String, Vec<ContentEntry>)>,
}

impl MemoryCollection {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to collection `name`.
    pub fn insert(&mut self, name: &str, entry: ContentEntry) {
        match self.collections.iter_mut().find(|(n, _)| n == name) {
            Some((_, entries)) => entries.push(entry),
            None => self.collections.push((name.to_string(), vec![entry])),
        }
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_entry(mut self, name: &str, entry: ContentEntry) -> Self {
        self.insert(name, entry);
        self
    }
}

impl ContentCollection for MemoryCollection {
    fn get_collection(
        &self,
        name: &str,
        filter: &dyn Fn(&ContentEntry) -> bool,
    ) -> Result<Vec<ContentEntry>, ContentError> {
        Ok(self
            .collections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, entries)| entries.iter().filter(|&e| filter(e)).cloned().collect())
            .unwrap_or_default())
    }
}
