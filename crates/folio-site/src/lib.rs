//! Site identity for folio.
//!
//! Holds the site title, tagline, author and social links, and renders the
//! small HTML fragments (SEO tags, byline, social links) that pages share.

pub mod config;
pub mod render;

pub use config::{Author, ConfigError, Platform, SiteConfig, Social, SocialLink};
