//! HTML fragments built from site configuration.

use crate::config::SiteConfig;

/// `<head>` metadata for a page.
///
/// `page_title` is prefixed to the site title when given.
pub fn seo_tags(config: &SiteConfig, page_title: Option<&str>, path: &str) -> String {
    let title = match page_title {
        Some(page) => format!("{} | {}", page, config.site_title()),
        None => config.site_title().to_string(),
    };
    let title = escape_html(&title);
    let description = escape_html(config.site_description());
    let canonical = escape_html(&config.absolute_url(path));

    let mut tags = vec![
        format!("<title>{}</title>", title),
        format!(r#"<meta name="description" content="{}">"#, description),
        format!(r#"<link rel="canonical" href="{}">"#, canonical),
        format!(r#"<meta property="og:title" content="{}">"#, title),
        format!(r#"<meta property="og:description" content="{}">"#, description),
        format!(r#"<meta property="og:url" content="{}">"#, canonical),
        r#"<meta property="og:type" content="website">"#.to_string(),
    ];

    if let Some(avatar) = &config.author.avatar {
        tags.push(format!(
            r#"<meta property="og:image" content="{}">"#,
            escape_html(&config.absolute_url(avatar))
        ));
    }

    tags.push(format!(
        r#"<meta name="author" content="{}">"#,
        escape_html(&config.author.name)
    ));

    tags.join("\n")
}

/// Social link list. Unset platforms produce no element at all.
pub fn social_links(config: &SiteConfig) -> String {
    let items: Vec<String> = config
        .social
        .links()
        .map(|link| {
            format!(
                r#"<li><a class="social-{}" href="{}" rel="me">{}</a></li>"#,
                link.platform.key(),
                escape_html(&link.href),
                link.platform.label()
            )
        })
        .collect();

    if items.is_empty() {
        return String::new();
    }

    format!(r#"<ul class="social">{}</ul>"#, items.join(""))
}

/// Author byline with optional avatar.
pub fn byline(config: &SiteConfig) -> String {
    let author = &config.author;
    let avatar = author
        .avatar
        .as_ref()
        .map(|src| {
            format!(
                r#"<img class="avatar" src="{}" alt="{}">"#,
                escape_html(src),
                escape_html(&author.name)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="byline">{}<p class="name">{}</p><p class="bio">{}</p></div>"#,
        avatar,
        escape_html(&author.name),
        escape_html(&author.bio)
    )
}

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
