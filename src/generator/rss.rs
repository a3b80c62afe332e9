//! rss feed generation.
//!
//! Turns the post collection into an rss channel written to the output
//! directory. Posts arrive newest-first from the repository, which is
//! also the conventional feed order.

use crate::{config::SiteConfig, content::post::Post, log, utils::date::DateTimeUtc};
use anyhow::{Result, anyhow};
use regex::Regex;
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::{fs, sync::LazyLock};

// ============================================================================
// Public API
// ============================================================================

/// Build the rss feed if enabled in config.
pub fn build_rss(config: &SiteConfig, posts: &[Post]) -> Result<()> {
    if config.build.rss.enable {
        RssFeed::new(config, posts).write(config)?;
    }
    Ok(())
}

// ============================================================================
// RssFeed Implementation
// ============================================================================

/// rss feed builder
struct RssFeed<'a> {
    config: &'a SiteConfig,
    posts: &'a [Post],
}

impl<'a> RssFeed<'a> {
    fn new(config: &'a SiteConfig, posts: &'a [Post]) -> Self {
        Self { config, posts }
    }

    /// Generate rss xml string.
    ///
    /// Posts whose date does not parse are silently skipped; the
    /// repository has already defaulted dates, so this only drops
    /// hand-crafted records.
    fn into_xml(self) -> Result<String> {
        let items: Vec<_> = self
            .posts
            .iter()
            .filter_map(|post| post_to_rss_item(post, self.config))
            .collect();

        let channel = ChannelBuilder::default()
            .title(&self.config.base.title)
            .link(self.config.base.url.as_deref().unwrap_or_default())
            .description(&self.config.base.description)
            .language(self.config.base.language.clone())
            .generator("folio-ssg".to_string())
            .items(items)
            .build();

        channel
            .validate()
            .map_err(|e| anyhow!("rss validation failed: {e}"))?;
        Ok(channel.to_string())
    }

    /// Write rss feed to file
    fn write(self, config: &SiteConfig) -> Result<()> {
        let xml = self.into_xml()?;
        let rss_path = config.rss_path();

        if let Some(parent) = rss_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&rss_path, &xml)?;

        log!("rss"; "{}", rss_path.file_name().unwrap_or_default().to_string_lossy());
        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert a [`Post`] to an rss item.
/// Returns None if the post's date cannot be parsed.
fn post_to_rss_item(post: &Post, config: &SiteConfig) -> Option<rss::Item> {
    let pub_date = DateTimeUtc::parse(&post.date).map(DateTimeUtc::to_rfc2822)?;

    let base_url = config
        .base
        .url
        .as_deref()
        .unwrap_or_default()
        .trim_end_matches('/');
    let link = format!("{}{}/{}/", base_url, config.build.blog_path, post.slug);

    let description = (!post.summary.is_empty()).then(|| post.summary.clone());
    let author = normalize_rss_author(&post.author, config);

    Some(
        ItemBuilder::default()
            .title(post.title.clone())
            .link(Some(link.clone()))
            .guid(GuidBuilder::default().permalink(true).value(link).build())
            .description(description)
            .pub_date(pub_date)
            .author(author)
            .build(),
    )
}

/// Normalize author field to rss format: "email@example.com (Name)"
///
/// Priority:
/// 1. Post author if already in valid format
/// 2. Site config author if in valid format
/// 3. Combine site config email and author
fn normalize_rss_author(author: &str, config: &SiteConfig) -> Option<String> {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$").unwrap()
    });

    if RE_VALID_AUTHOR.is_match(author) {
        return Some(author.to_string());
    }

    let site_author = &config.base.author;
    if RE_VALID_AUTHOR.is_match(site_author) {
        return Some(site_author.clone());
    }

    Some(format!("{} ({})", config.base.email, site_author))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::post::DEFAULT_THUMBNAIL;

    fn make_config(author: &str, email: &str) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.base.title = "Test Site".to_string();
        config.base.description = "Test feed".to_string();
        config.base.author = author.to_string();
        config.base.email = email.to_string();
        config.base.url = Some("https://example.com".to_string());
        config
    }

    fn make_post(title: &str, date: &str, summary: &str, author: &str) -> Post {
        let slug = title.to_lowercase().replace(' ', "-");
        Post {
            id: slug.clone(),
            slug,
            title: title.to_string(),
            date: date.to_string(),
            author: author.to_string(),
            category: "General".into(),
            tags: vec![],
            summary: summary.to_string(),
            thumbnail_url: DEFAULT_THUMBNAIL.into(),
            likes: 0,
            comment_count: 0,
            visits: 0,
            content: None,
        }
    }

    #[test]
    fn test_normalize_rss_author() {
        let config = make_config("Site Author", "site@example.com");

        // Case 1: Post author is already valid
        assert_eq!(
            normalize_rss_author("post@example.com (Post Author)", &config),
            Some("post@example.com (Post Author)".to_string())
        );

        // Case 2: Post author is just a name, fallback to site config (combined)
        assert_eq!(
            normalize_rss_author("Post Author", &config),
            Some("site@example.com (Site Author)".to_string())
        );

        // Case 3: Site author is already in valid email format
        let config_valid = make_config("site@example.com (Site Author)", "");
        assert_eq!(
            normalize_rss_author("Post Author", &config_valid),
            Some("site@example.com (Site Author)".to_string())
        );
    }

    #[test]
    fn test_post_to_rss_item() {
        let config = make_config("Site Author", "site@example.com");
        let post = make_post(
            "Test Title",
            "2024-01-01T00:00:00Z",
            "Test Summary",
            "author@example.com (Author)",
        );

        let item = post_to_rss_item(&post, &config).expect("Should convert to rss item");
        assert_eq!(item.title(), Some("Test Title"));
        assert_eq!(item.link(), Some("https://example.com/blog/test-title/"));
        assert_eq!(item.description(), Some("Test Summary"));
        assert_eq!(item.author(), Some("author@example.com (Author)"));
        // RFC2822 format check
        assert!(item.pub_date().unwrap().contains("Jan 2024"));
    }

    #[test]
    fn test_post_to_rss_item_unparseable_date() {
        let config = make_config("Site Author", "site@example.com");
        let post = make_post("Title", "someday", "", "");

        assert!(post_to_rss_item(&post, &config).is_none());
    }

    #[test]
    fn test_feed_xml_contains_items() {
        let config = make_config("Site Author", "site@example.com");
        let posts = vec![
            make_post("First", "2024-01-01", "s1", "Alice"),
            make_post("Second", "2024-02-01", "s2", "Bob"),
        ];

        let xml = RssFeed::new(&config, &posts).into_xml().unwrap();
        assert!(xml.contains("<title>Test Site</title>"));
        assert!(xml.contains("First"));
        assert!(xml.contains("Second"));
    }

    #[test]
    fn test_build_rss_disabled_is_noop() {
        let mut config = make_config("A", "a@example.com");
        config.build.rss.enable = false;

        assert!(build_rss(&config, &[]).is_ok());
    }
}
