//! JSON data files for the client-rendered filtering path.
//!
//! The build writes three files into `<output>/_data/`:
//!
//! | File              | Shape                                    |
//! |-------------------|------------------------------------------|
//! | `posts.json`      | array of posts (no bodies)               |
//! | `categories.json` | sorted unique category names             |
//! | `tags.json`       | tag name → list of `{slug, title, date}` |
//!
//! Client code filters `posts.json` with the same category/tag semantics
//! the server uses, so both paths render the same subsets.

use crate::content::post::Post;
use crate::content::store::unique_categories_of;
use crate::log;
use anyhow::{Context, Result};
use serde::Serialize;
use std::{collections::BTreeMap, fs, path::Path};

/// Tags index: maps tag names (verbatim) to the posts carrying them.
pub type TagsIndex = BTreeMap<String, Vec<TaggedPost>>;

/// A post reference within the tags index.
#[derive(Debug, Clone, Serialize)]
pub struct TaggedPost {
    pub slug: String,
    pub title: String,
    pub date: String,
}

/// Build the tags index from a post collection.
///
/// Tag names are kept verbatim (case preserved); empty tags are dropped.
/// Post order within a tag follows the input order, which is already
/// newest-first when fed from the repository.
pub fn tags_index(posts: &[Post]) -> TagsIndex {
    let mut index: TagsIndex = BTreeMap::new();

    for post in posts {
        for tag in &post.tags {
            if tag.is_empty() {
                continue;
            }
            index.entry(tag.clone()).or_default().push(TaggedPost {
                slug: post.slug.clone(),
                title: post.title.clone(),
                date: post.date.clone(),
            });
        }
    }

    index
}

/// Write the data files into `data_dir`, creating it if needed.
pub fn write_data_files(posts: &[Post], data_dir: &Path) -> Result<()> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("failed to create {}", data_dir.display()))?;

    write_json(&data_dir.join("posts.json"), posts)?;
    write_json(&data_dir.join("categories.json"), &unique_categories_of(posts))?;
    write_json(&data_dir.join("tags.json"), &tags_index(posts))?;

    log!("data"; "wrote posts.json, categories.json, tags.json");
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::post::DEFAULT_THUMBNAIL;
    use tempfile::TempDir;

    fn post(slug: &str, tags: &[&str]) -> Post {
        Post {
            id: slug.into(),
            slug: slug.into(),
            title: slug.to_uppercase(),
            date: "2024-01-01".into(),
            author: "Anonymous".into(),
            category: "General".into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            summary: String::new(),
            thumbnail_url: DEFAULT_THUMBNAIL.into(),
            likes: 0,
            comment_count: 0,
            visits: 0,
            content: None,
        }
    }

    #[test]
    fn test_tags_index_groups_posts() {
        let posts = vec![post("a", &["rust", "web"]), post("b", &["rust"])];
        let index = tags_index(&posts);

        assert_eq!(index.len(), 2);
        assert_eq!(index["rust"].len(), 2);
        assert_eq!(index["web"].len(), 1);
        assert_eq!(index["rust"][0].slug, "a");
        assert_eq!(index["rust"][1].slug, "b");
    }

    #[test]
    fn test_tags_index_preserves_case_and_drops_empty() {
        let posts = vec![post("a", &["Rust", "rust", ""])];
        let index = tags_index(&posts);

        assert!(index.contains_key("Rust"));
        assert!(index.contains_key("rust"));
        assert!(!index.contains_key(""));
    }

    #[test]
    fn test_write_data_files() {
        let dir = TempDir::new().unwrap();
        let posts = vec![post("a", &["rust"])];
        write_data_files(&posts, dir.path()).unwrap();

        let raw = std::fs::read_to_string(dir.path().join("posts.json")).unwrap();
        assert!(raw.contains("\"slug\": \"a\""));
        // List posts carry no body, so no content key is emitted
        assert!(!raw.contains("\"content\""));

        let raw = std::fs::read_to_string(dir.path().join("tags.json")).unwrap();
        assert!(raw.contains("\"rust\""));

        let raw = std::fs::read_to_string(dir.path().join("categories.json")).unwrap();
        assert!(raw.contains("General"));
    }
}
