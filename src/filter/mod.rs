//! Post filtering by category and tags.
//!
//! One pure function shared by every rendering path, so the statically
//! generated listing, the dev server, and the JSON-driven client all
//! agree on what a filter means.

pub mod query;

use crate::content::post::Post;

/// Filter posts by category and/or tags.
///
/// - `category`: exact, case-sensitive match against `post.category`.
///   `None` passes everything.
/// - `tags`: OR semantics - a post passes if any of its own tags equals
///   any selected tag, compared case-insensitively. An empty selection
///   passes everything (it is the absence of a tag filter, not an empty
///   match set).
///
/// Both predicates combine with AND. The input is untouched; the result
/// borrows the matching posts in their original order.
pub fn filter_posts<'a>(
    posts: &'a [Post],
    category: Option<&str>,
    tags: &[String],
) -> Vec<&'a Post> {
    let wanted: Vec<String> = tags.iter().map(|tag| tag.to_lowercase()).collect();

    posts
        .iter()
        .filter(|post| {
            if let Some(category) = category
                && post.category != category
            {
                return false;
            }

            if !wanted.is_empty() {
                let has_match = post
                    .tags
                    .iter()
                    .any(|tag| wanted.iter().any(|wanted| tag.to_lowercase() == *wanted));
                if !has_match {
                    return false;
                }
            }

            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::post::DEFAULT_THUMBNAIL;

    fn post(title: &str, category: &str, tags: &[&str]) -> Post {
        Post {
            id: title.to_lowercase(),
            slug: title.to_lowercase(),
            title: title.to_string(),
            date: "2024-01-01".into(),
            author: "Anonymous".into(),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            summary: String::new(),
            thumbnail_url: DEFAULT_THUMBNAIL.into(),
            likes: 0,
            comment_count: 0,
            visits: 0,
            content: None,
        }
    }

    /// The reference dataset: three categories, "react" on two posts.
    fn posts() -> Vec<Post> {
        vec![
            post("Hooks", "Frontend", &["react", "hooks"]),
            post("SSR", "Backend", &["React", "node"]),
            post("Layers", "Architecture", &["design"]),
        ]
    }

    #[test]
    fn test_no_filters_is_identity() {
        let posts = posts();
        let result = filter_posts(&posts, None, &[]);
        assert_eq!(result.len(), posts.len());
        let titles: Vec<&str> = result.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Hooks", "SSR", "Layers"]);
    }

    #[test]
    fn test_category_is_exact_match() {
        let posts = posts();
        let result = filter_posts(&posts, Some("Frontend"), &[]);
        assert!(result.iter().all(|p| p.category == "Frontend"));
        assert_eq!(result.len(), 1);

        // Case-sensitive: "frontend" matches nothing
        assert!(filter_posts(&posts, Some("frontend"), &[]).is_empty());
    }

    #[test]
    fn test_tag_match_is_case_insensitive() {
        let posts = posts();
        // "react" appears as "react" and "React" - both must match
        let selection = vec!["REACT".to_string()];
        let result = filter_posts(&posts, None, &selection);

        let titles: Vec<&str> = result.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Hooks", "SSR"]);
    }

    #[test]
    fn test_multiple_tags_broaden() {
        let posts = posts();
        let selection = vec!["hooks".to_string(), "design".to_string()];
        let result = filter_posts(&posts, None, &selection);

        // OR semantics: either tag qualifies a post
        let titles: Vec<&str> = result.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Hooks", "Layers"]);
    }

    #[test]
    fn test_category_and_tags_intersect() {
        let posts = posts();
        let selection = vec!["react".to_string()];
        let result = filter_posts(&posts, Some("Frontend"), &selection);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Hooks");
    }

    #[test]
    fn test_excluded_posts_share_no_tag() {
        let posts = posts();
        let selection = vec!["react".to_string()];
        let result = filter_posts(&posts, None, &selection);

        for post in &posts {
            let included = result.iter().any(|p| p.title == post.title);
            let matches = post
                .tags
                .iter()
                .any(|t| t.eq_ignore_ascii_case("react"));
            assert_eq!(included, matches, "post {}", post.title);
        }
    }

    #[test]
    fn test_unknown_tag_matches_nothing() {
        let posts = posts();
        let selection = vec!["zig".to_string()];
        assert!(filter_posts(&posts, None, &selection).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(filter_posts(&[], Some("Frontend"), &[]).is_empty());
    }
}
