//! Site configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Site identity and author metadata.
///
/// Built once at startup and handed to whatever needs it; nothing mutates it
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Short display name or handle
    pub title: String,

    /// One-line tagline
    pub description: String,

    /// Canonical base URL (e.g., "https://example.com")
    pub site_url: String,

    /// Author shown in bylines
    pub author: Author,

    /// Social profile links
    #[serde(default)]
    pub social: Social,
}

/// Site author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub bio: String,
    /// Avatar image path or URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Social profile links. Absent entries are not rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Social {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    /// Plain address, not a `mailto:` URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Supported social platforms, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Github,
    Twitter,
    Instagram,
    Linkedin,
    Email,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Self::Github,
        Self::Twitter,
        Self::Instagram,
        Self::Linkedin,
        Self::Email,
    ];

    /// Config key for this platform.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Twitter => "twitter",
            Self::Instagram => "instagram",
            Self::Linkedin => "linkedin",
            Self::Email => "email",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Github => "GitHub",
            Self::Twitter => "Twitter",
            Self::Instagram => "Instagram",
            Self::Linkedin => "LinkedIn",
            Self::Email => "Email",
        }
    }
}

/// A social link ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink<'a> {
    pub platform: Platform,
    pub href: String,
    pub value: &'a str,
}

impl Social {
    /// Configured value for a platform.
    pub fn get(&self, platform: Platform) -> Option<&str> {
        match platform {
            Platform::Github => self.github.as_deref(),
            Platform::Twitter => self.twitter.as_deref(),
            Platform::Instagram => self.instagram.as_deref(),
            Platform::Linkedin => self.linkedin.as_deref(),
            Platform::Email => self.email.as_deref(),
        }
    }

    /// Present links only, in [`Platform::ALL`] order.
    pub fn links(&self) -> impl Iterator<Item = SocialLink<'_>> + '_ {
        Platform::ALL.into_iter().filter_map(move |platform| {
            let value = self.get(platform)?;
            let href = match platform {
                Platform::Email if !value.starts_with("mailto:") => format!("mailto:{}", value),
                _ => value.to_string(),
            };
            Some(SocialLink {
                platform,
                href,
                value,
            })
        })
    }
}

/// Errors that can occur when loading site configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Site config field '{0}' must not be empty")]
    EmptyField(&'static str),
}

impl SiteConfig {
    /// The canonical site configuration.
    pub fn canonical() -> Self {
        Self {
            title: "@jdrhyne".to_string(),
            description:
                "Code, Curiosity, and Continuous Growth\u{2014}Scaling Ideas Beyond Paper."
                    .to_string(),
            site_url: "https://jdrhyne.me".to_string(),
            author: Author {
                name: "Jonathan D. Rhyne".to_string(),
                bio: "American attorney, entrepreneur and photographer. Co-founder of PSPDFKit, \
                      the industry leading mobile PDF framework. Frequent public speaker \
                      lecturing around the world."
                    .to_string(),
                avatar: Some("/images/avatar.png".to_string()),
            },
            social: Social {
                github: Some("https://github.com/jdrhyne".to_string()),
                twitter: Some("https://x.com/jdrhyne".to_string()),
                instagram: None,
                linkedin: Some("https://www.linkedin.com/in/jonathan-rhyne-54084811/".to_string()),
                email: Some("hello@jdrhyne.me".to_string()),
            },
        }
    }

    /// Parse and validate a TOML site config.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(source).map_err(|e| ConfigError::Parse {
            path: "site config".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML site config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// Load `path` if it exists, otherwise fall back to [`canonical`](Self::canonical).
    /// Returns an error if the file exists but is malformed.
    pub fn load_or_canonical(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let config = Self::load(path)?;
            tracing::info!("Loaded site config from {}", path.display());
            Ok(config)
        } else {
            tracing::debug!("{} not found, using built-in site config", path.display());
            Ok(Self::canonical())
        }
    }

    /// Check that every present string field is non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("title", self.title.as_str()),
            ("description", self.description.as_str()),
            ("author.name", self.author.name.as_str()),
            ("author.bio", self.author.bio.as_str()),
            ("siteUrl", self.site_url.as_str()),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField(name));
            }
        }

        if self.author.avatar.as_deref().is_some_and(|a| a.trim().is_empty()) {
            return Err(ConfigError::EmptyField("author.avatar"));
        }

        for platform in Platform::ALL {
            if self.social.get(platform).is_some_and(|v| v.trim().is_empty()) {
                return Err(ConfigError::EmptyField(social_field(platform)));
            }
        }

        Ok(())
    }

    /// Title used by SEO tags.
    pub fn site_title(&self) -> &str {
        &self.title
    }

    /// Description used by SEO tags.
    pub fn site_description(&self) -> &str {
        &self.description
    }

    /// Absolute URL for a site-relative path.
    pub fn absolute_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.site_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn social_field(platform: Platform) -> &'static str {
    match platform {
        Platform::Github => "social.github",
        Platform::Twitter => "social.twitter",
        Platform::Instagram => "social.instagram",
        Platform::Linkedin => "social.linkedin",
        Platform::Email => "social.email",
    }
}
