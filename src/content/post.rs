//! The post record produced by front matter parsing.
//!
//! Serialized into `_data/posts.json`; field names follow the JSON
//! convention the client-side filter code expects (camelCase).

use serde::Serialize;

/// Thumbnail used when front matter does not provide one.
pub const DEFAULT_THUMBNAIL: &str = "/images/default-blog-thumb.jpg";

/// A single blog post.
///
/// `content` is present only when the post was loaded individually with
/// its body attached; list views leave it `None`, which keeps list and
/// detail records structurally distinguishable (and out of posts.json).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub slug: String,
    pub title: String,
    /// ISO 8601 date string, e.g. "2024-01-15"
    pub date: String,
    pub author: String,
    /// Single category; matched exactly (case-sensitive) by filters
    pub category: String,
    /// Order and case preserved verbatim from front matter;
    /// matched case-insensitively by filters
    pub tags: Vec<String>,
    pub summary: String,
    pub thumbnail_url: String,
    pub likes: u64,
    pub comment_count: u64,
    pub visits: u64,
    /// Markdown body, attached only for single-post loads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Post {
        Post {
            id: "hello".into(),
            slug: "hello".into(),
            title: "Hello".into(),
            date: "2024-01-15".into(),
            author: "Alice".into(),
            category: "Frontend".into(),
            tags: vec!["React".into(), "css".into()],
            summary: "A first post".into(),
            thumbnail_url: DEFAULT_THUMBNAIL.into(),
            likes: 3,
            comment_count: 1,
            visits: 42,
            content: None,
        }
    }

    #[test]
    fn test_json_field_names_are_camel_case() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"thumbnailUrl\""));
        assert!(json.contains("\"commentCount\""));
        assert!(!json.contains("\"content\""));
    }

    #[test]
    fn test_content_serialized_when_present() {
        let mut post = sample();
        post.content = Some("# Body".into());
        let json = serde_json::to_string(&post).unwrap();
        assert!(json.contains("\"content\":\"# Body\""));
    }
}
