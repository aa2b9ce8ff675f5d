//! Markdown content collections.
//!
//! This crate loads markdown/MDX files with YAML frontmatter from a content
//! directory and exposes them as named collections that can be queried with a
//! predicate.

pub mod collection;
pub mod entry;
pub mod frontmatter;

pub use collection::{ContentCollection, FsCollection, MemoryCollection};
pub use entry::{parse_entry, ContentEntry, ContentError};
pub use frontmatter::{Frontmatter, PubDate};
