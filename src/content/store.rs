//! The post repository: enumeration, lookup, and facet derivation.
//!
//! All public operations are total from the caller's perspective: any
//! underlying fault (missing content directory, unreadable file) is
//! caught, logged through the `log!` channel, and degraded to an empty
//! result. Pages render fallback UI from empty data; they never see an
//! error.

use crate::content::frontmatter::{Diagnostic, parse_post};
use crate::content::post::Post;
use crate::log;
use crate::utils::date::sort_key;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{fs, path::PathBuf};

/// Repository over a directory of `*.md` post sources.
///
/// The filename stem is the entry's identifier: `hello-world.md` is
/// looked up as slug `hello-world`, regardless of what its front matter
/// declares.
#[derive(Debug, Clone)]
pub struct PostStore {
    content_dir: PathBuf,
}

impl PostStore {
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }

    /// All posts, newest first, without bodies.
    ///
    /// Posts are parsed in parallel; front matter diagnostics are logged
    /// per file. Sorting is stable, so posts sharing a date keep their
    /// filename order.
    pub fn list_posts(&self) -> Vec<Post> {
        match self.try_list_posts() {
            Ok(posts) => posts,
            Err(err) => {
                log!("content"; "failed to read posts: {err:#}");
                Vec::new()
            }
        }
    }

    fn try_list_posts(&self) -> Result<Vec<Post>> {
        if !self.content_dir.exists() {
            log!("content"; "content directory not found: {}", self.content_dir.display());
            return Ok(Vec::new());
        }

        let files = self.markdown_files()?;

        let parsed: Vec<(Post, Vec<Diagnostic>)> = files
            .par_iter()
            .map(|path| {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let filename = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Ok(parse_post(&raw, &filename, false))
            })
            .collect::<Result<_>>()?;

        let mut posts = Vec::with_capacity(parsed.len());
        for (post, diags) in parsed {
            for diag in &diags {
                log!("content"; "{diag}");
            }
            posts.push(post);
        }

        posts.sort_by(|a, b| sort_key(&b.date).cmp(&sort_key(&a.date)));
        Ok(posts)
    }

    /// Look up a single post by slug, with its markdown body attached.
    ///
    /// A missing entry is a lookup miss (`None`), not an error; read
    /// failures are logged and also collapse to `None`.
    pub fn get_post_by_slug(&self, slug: &str) -> Option<Post> {
        // A path separator in a slug would escape the content directory
        if slug.contains(['/', '\\']) || slug == ".." {
            return None;
        }

        let filename = format!("{slug}.md");
        let path = self.content_dir.join(&filename);
        if !path.is_file() {
            return None;
        }

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) => {
                log!("content"; "failed to read {}: {err}", path.display());
                return None;
            }
        };

        let (post, diags) = parse_post(&raw, &filename, true);
        for diag in &diags {
            log!("content"; "{diag}");
        }
        Some(post)
    }

    /// Filename stems of all entries, for static page generation.
    pub fn list_slugs(&self) -> Vec<String> {
        match self.markdown_files() {
            Ok(files) => files
                .iter()
                .filter_map(|path| path.file_stem())
                .map(|stem| stem.to_string_lossy().into_owned())
                .collect(),
            Err(err) => {
                log!("content"; "failed to list slugs: {err:#}");
                Vec::new()
            }
        }
    }

    /// Unique post categories, sorted ascending.
    pub fn unique_categories(&self) -> Vec<String> {
        unique_categories_of(&self.list_posts())
    }

    /// Unique post tags, sorted ascending.
    pub fn unique_tags(&self) -> Vec<String> {
        unique_tags_of(&self.list_posts())
    }

    /// Markdown entries directly under the content dir, sorted by name
    /// for deterministic enumeration order.
    fn markdown_files(&self) -> Result<Vec<PathBuf>> {
        if !self.content_dir.exists() {
            return Ok(Vec::new());
        }

        let mut files: Vec<PathBuf> = fs::read_dir(&self.content_dir)
            .with_context(|| format!("failed to read {}", self.content_dir.display()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "md"))
            .collect();
        files.sort();
        Ok(files)
    }
}

// ============================================================================
// Facet Derivation
// ============================================================================

/// Project categories: dedup, drop empties, sort ascending.
pub fn unique_categories_of(posts: &[Post]) -> Vec<String> {
    let mut categories: Vec<String> = posts
        .iter()
        .map(|post| post.category.clone())
        .filter(|category| !category.is_empty())
        .collect();
    categories.sort();
    categories.dedup();
    categories
}

/// Flatten tags: dedup (case preserved), drop empties, sort ascending.
pub fn unique_tags_of(posts: &[Post]) -> Vec<String> {
    let mut tags: Vec<String> = posts
        .iter()
        .flat_map(|post| post.tags.iter().cloned())
        .filter(|tag| !tag.is_empty())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

// ============================================================================
// Tests
// ============================================================================
