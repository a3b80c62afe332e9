//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── PostStore::list_posts() ──► posts + facets
//!     │
//!     ├── render blog index + one page per post (rayon)
//!     │
//!     ├── write _data/*.json (client filtering path)
//!     │
//!     ├── copy assets
//!     │
//!     └── build_rss() (if enabled)
//! ```

use crate::{
    config::SiteConfig,
    content::store::{PostStore, unique_categories_of, unique_tags_of},
    data,
    filter::{filter_posts, query::FilterState},
    generator::rss::build_rss,
    log, render,
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{fs, path::Path};
use walkdir::WalkDir;

/// Build the entire site into the output directory.
///
/// If `config.build.clean` is true, clears the output directory first.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;
    prepare_output(output, config.build.clean)?;

    let store = PostStore::new(&config.build.content);
    let posts = store.list_posts();
    let categories = unique_categories_of(&posts);
    let tags = unique_tags_of(&posts);
    log!(
        "content";
        "loaded {} posts ({} categories, {} tags)",
        posts.len(),
        categories.len(),
        tags.len()
    );

    // Blog index: the static page is the unfiltered view; the dev server
    // re-renders it per request with the query's filters applied.
    let state = FilterState::default();
    let visible = filter_posts(&posts, None, &[]);
    let index_html = render::blog_index(config, &visible, &categories, &tags, &state, "");

    let blog_dir = output.join(config.build.blog_path.trim_start_matches('/'));
    fs::create_dir_all(&blog_dir)
        .with_context(|| format!("failed to create {}", blog_dir.display()))?;
    fs::write(blog_dir.join("index.html"), index_html)?;

    // One page per entry, in parallel
    let slugs = store.list_slugs();
    slugs.par_iter().try_for_each(|slug| -> Result<()> {
        let Some(post) = store.get_post_by_slug(slug) else {
            return Ok(());
        };
        let html = render::post_page(config, &post);
        let page_dir = blog_dir.join(slug);
        fs::create_dir_all(&page_dir)?;
        fs::write(page_dir.join("index.html"), html)?;
        Ok(())
    })?;
    log!("build"; "rendered {} post pages", slugs.len());

    data::write_data_files(&posts, &config.data_dir())?;
    copy_assets(config)?;
    build_rss(config, &posts)?;

    log_build_result(output)
}

/// Ensure the output directory exists, clearing it first when requested.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("failed to create output directory: {}", output.display()))?;
    Ok(())
}

/// Copy the assets directory into the output, preserving relative paths.
fn copy_assets(config: &SiteConfig) -> Result<()> {
    let assets = &config.build.assets;
    if !assets.is_dir() {
        return Ok(());
    }

    let files: Vec<_> = WalkDir::new(assets)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .collect();

    files.par_iter().try_for_each(|source| -> Result<()> {
        let relative = source
            .strip_prefix(assets)
            .with_context(|| format!("asset outside assets dir: {}", source.display()))?;
        let dest = config.build.output.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source, &dest)
            .with_context(|| format!("failed to copy {}", source.display()))?;
        Ok(())
    })?;

    log!("assets"; "copied {} files", files.len());
    Ok(())
}

/// Log build result based on output directory contents
fn log_build_result(output: &Path) -> Result<()> {
    let file_count = fs::read_dir(output)?.filter_map(Result::ok).count();

    if file_count == 0 {
        log!("warn"; "output is empty, check if content has .md files");
    } else {
        log!("build"; "done");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site_config(root: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.base.title = "Test".into();
        config.build.content = root.join("content/blog");
        config.build.output = root.join("public");
        config.build.assets = root.join("assets");
        config
    }

    fn write_post(root: &Path, name: &str, front: &str) {
        let dir = root.join("content/blog");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), format!("---\n{front}---\nBody.\n")).unwrap();
    }

    #[test]
    fn test_build_site_end_to_end() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write_post(
            root,
            "hello.md",
            "id: hello\nslug: hello\ntitle: Hello\ndate: 2024-01-15\nauthor: A\nsummary: s\ncategory: Frontend\ntags: [react]\n",
        );
        fs::create_dir_all(root.join("assets/images")).unwrap();
        fs::write(root.join("assets/images/x.svg"), "<svg/>").unwrap();

        let config = site_config(root);
        build_site(&config).unwrap();

        let output = root.join("public");
        assert!(output.join("blog/index.html").is_file());
        assert!(output.join("blog/hello/index.html").is_file());
        assert!(output.join("_data/posts.json").is_file());
        assert!(output.join("_data/tags.json").is_file());
        assert!(output.join("images/x.svg").is_file());

        let index = fs::read_to_string(output.join("blog/index.html")).unwrap();
        assert!(index.contains("Hello"));
        assert!(index.contains("category=Frontend"));
    }

    #[test]
    fn test_build_site_empty_content_is_ok() {
        let tmp = TempDir::new().unwrap();
        let config = site_config(tmp.path());

        build_site(&config).unwrap();
        assert!(tmp.path().join("public/blog/index.html").is_file());
    }

    #[test]
    fn test_clean_removes_stale_output() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("public")).unwrap();
        fs::write(root.join("public/stale.txt"), "old").unwrap();

        let mut config = site_config(root);
        config.build.clean = true;
        build_site(&config).unwrap();

        assert!(!root.join("public/stale.txt").exists());
    }
}
