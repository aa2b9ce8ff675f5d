//! Frontmatter extraction and parsing.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Parsed frontmatter of a blog entry.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Frontmatter {
    /// Post title (required)
    pub title: String,

    /// One-line summary (required)
    pub description: String,

    /// Category labels, in authored order
    #[serde(default)]
    pub tags: Vec<String>,

    /// Publication date (required)
    pub pub_date: PubDate,

    /// Unpublished entries are excluded from public listings; null means published
    #[serde(default, deserialize_with = "null_as_false")]
    pub draft: bool,

    /// Custom slug override
    #[serde(default)]
    pub slug: Option<String>,
}

fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Publication timestamp as authored in frontmatter.
///
/// A bare calendar date stays a calendar date when written back out, so
/// `2024-01-01` round-trips as `"2024-01-01"` rather than growing a time part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PubDate {
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
}

impl FromStr for PubDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::Date(date));
        }

        match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => Ok(Self::DateTime(dt)),
            Err(rfc_err) => {
                // Offset-less timestamps are taken as UTC
                let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                    .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
                    .map_err(|_| rfc_err)?;
                Ok(Self::DateTime(naive.and_utc().fixed_offset()))
            }
        }
    }
}

impl fmt::Display for PubDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::DateTime(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }
}

impl Serialize for PubDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PubDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid pubDate '{}': {}", raw, e)))
    }
}

/// Split a leading `---` frontmatter block from the document body.
///
/// Returns the raw YAML (if present) and the remaining content after the block.
pub fn extract_frontmatter(source: &str) -> Result<(Option<&str>, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    if !trimmed.starts_with("---") {
        return Ok((None, source));
    }

    // Find the closing ---
    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    Ok((Some(yaml_content), remaining.trim_start()))
}

/// Parse a YAML frontmatter block.
pub fn parse_frontmatter(yaml: &str) -> Result<Frontmatter, FrontmatterError> {
    serde_yaml::from_str(yaml).map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid frontmatter: {0}")]
    InvalidYaml(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_valid_frontmatter() {
        let source = r#"---
title: First Post
description: Hello there
pubDate: 2024-01-01
tags: [rust, web]
---

# First Post
"#;

        let (yaml, content) = extract_frontmatter(source).unwrap();
        let fm = parse_frontmatter(yaml.unwrap()).unwrap();

        assert_eq!(fm.title, "First Post");
        assert_eq!(fm.description, "Hello there");
        assert_eq!(fm.tags, vec!["rust", "web"]);
        assert_eq!(
            fm.pub_date,
            PubDate::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );
        assert!(!fm.draft);
        assert!(content.starts_with("# First Post"));
    }

    #[test]
    fn handles_no_frontmatter() {
        let source = "# Just Markdown\n\nNo frontmatter here.";

        let (yaml, content) = extract_frontmatter(source).unwrap();

        assert!(yaml.is_none());
        assert_eq!(content, source);
    }

    #[test]
    fn errors_on_unclosed_frontmatter() {
        let source = "---\ntitle: Test\n# No closing";

        let result = extract_frontmatter(source);

        assert!(matches!(result, Err(FrontmatterError::Unclosed)));
    }

    #[test]
    fn errors_on_invalid_yaml() {
        let result = parse_frontmatter("title: [invalid yaml");

        assert!(matches!(result, Err(FrontmatterError::InvalidYaml(_))));
    }

    #[test]
    fn errors_on_missing_required_field() {
        let result = parse_frontmatter("title: No date\ndescription: d");

        let Err(FrontmatterError::InvalidYaml(message)) = result else {
            panic!("expected missing pubDate to be rejected");
        };
        assert!(message.contains("pubDate"));
    }

    #[test]
    fn reads_draft_flag() {
        let fm = parse_frontmatter("title: T\ndescription: d\npubDate: 2024-03-02\ndraft: true")
            .unwrap();

        assert!(fm.draft);
        assert!(fm.tags.is_empty());
    }

    #[test]
    fn null_draft_means_published() {
        let fm = parse_frontmatter("title: T\ndescription: d\npubDate: 2024-03-02\ndraft: ~")
            .unwrap();
        assert!(!fm.draft);

        let fm = parse_frontmatter("title: T\ndescription: d\npubDate: 2024-03-02\ndraft:")
            .unwrap();
        assert!(!fm.draft);
    }

    #[test]
    fn pub_date_keeps_authored_form() {
        let date: PubDate = "2024-01-01".parse().unwrap();
        assert_eq!(date.to_string(), "2024-01-01");

        let dt: PubDate = "2024-01-01T09:30:00Z".parse().unwrap();
        assert_eq!(dt.to_string(), "2024-01-01T09:30:00Z");

        let offset: PubDate = "2024-01-01T09:30:00+02:00".parse().unwrap();
        assert_eq!(offset.to_string(), "2024-01-01T09:30:00+02:00");

        let naive: PubDate = "2024-01-01 09:30:00".parse().unwrap();
        assert_eq!(naive.to_string(), "2024-01-01T09:30:00Z");
    }

    #[test]
    fn pub_date_rejects_garbage() {
        assert!("last tuesday".parse::<PubDate>().is_err());
    }

    #[test]
    fn pub_date_serializes_as_string() {
        let date: PubDate = "2023-12-31".parse().unwrap();

        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2023-12-31\"");
    }
}
