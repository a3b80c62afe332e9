//! Site initialization module.
//!
//! Creates new site structure with default configuration and a few
//! sample posts to make the filters visible right away.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Default config filename
const CONFIG_FILE: &str = "folio.toml";

/// Default site directory structure
const SITE_DIRS: &[&str] = &["content/blog", "assets/images"];

/// Starter posts: three categories, with a tag shared across two posts
/// so the tag filter has something to intersect.
const SAMPLE_POSTS: &[(&str, &str)] = &[
    (
        "getting-hooks-right.md",
        r#"---
id: getting-hooks-right
slug: getting-hooks-right
title: Getting Hooks Right
date: 2024-03-01
author: Alice
category: Frontend
tags: [react, hooks]
summary: Rules of hooks, and what they protect you from.
---
React hooks look like plain function calls, but they lean on call order.
This post walks through the rules and the bugs they prevent.
"#,
    ),
    (
        "rendering-on-the-server.md",
        r#"---
id: rendering-on-the-server
slug: rendering-on-the-server
title: Rendering on the Server
date: 2024-02-01
author: Alice
category: Backend
tags: [react, node]
summary: Where server rendering earns its complexity.
---
Server rendering trades build-time simplicity for request-time work.
Here is how to decide whether that trade is worth it.
"#,
    ),
    (
        "layers-that-last.md",
        r#"---
id: layers-that-last
slug: layers-that-last
title: Layers That Last
date: 2024-01-01
author: Alice
category: Architecture
tags: [design]
summary: Drawing module boundaries that survive refactors.
---
Good layers are boring: each one has a single reason to change.
This post covers a few heuristics for finding them.
"#,
    ),
];

/// Create a new site with default structure
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // Safety check: if no name was provided (init in current dir),
    // the directory must be completely empty
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `folio init <SITE_NAME>` to create in a subdirectory."
        );
    }

    init_site_structure(root)?;
    init_default_config(root)?;
    init_sample_posts(root)?;

    log!("init"; "site created at {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file
fn init_default_config(root: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    fs::write(root.join(CONFIG_FILE), content)?;
    Ok(())
}

/// Create site directory structure
fn init_site_structure(root: &Path) -> Result<()> {
    for dir in SITE_DIRS {
        let path = root.join(dir);
        if path.exists() {
            bail!(
                "Path `{}` already exists. Try `folio init <SITE_NAME>` instead.",
                path.display()
            );
        }
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

/// Write the starter posts into the content directory
fn init_sample_posts(root: &Path) -> Result<()> {
    let content_dir = root.join("content/blog");
    for (filename, raw) in SAMPLE_POSTS {
        fs::write(content_dir.join(filename), raw)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostStore;
    use tempfile::TempDir;

    fn init_into(root: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.build.root = Some(root.to_path_buf());
        new_site(&config, true).unwrap();
        config
    }

    #[test]
    fn test_new_site_scaffolds_structure() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("site");
        init_into(&root);

        assert!(root.join("folio.toml").is_file());
        assert!(root.join("content/blog").is_dir());
        assert!(root.join("assets/images").is_dir());
    }

    #[test]
    fn test_new_site_config_is_loadable() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("site");
        init_into(&root);

        let config = SiteConfig::from_path(&root.join("folio.toml")).unwrap();
        assert_eq!(config.build.blog_path, "/blog");
    }

    #[test]
    fn test_sample_posts_parse_cleanly() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("site");
        init_into(&root);

        let store = PostStore::new(root.join("content/blog"));
        let posts = store.list_posts();
        assert_eq!(posts.len(), 3);

        // Newest first
        assert_eq!(posts[0].title, "Getting Hooks Right");
        // The starter dataset exercises the filters
        assert_eq!(store.unique_categories().len(), 3);
        assert!(store.unique_tags().contains(&"react".to_string()));
    }

    #[test]
    fn test_init_refuses_nonempty_current_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("existing.txt"), "x").unwrap();

        let mut config = SiteConfig::default();
        config.build.root = Some(tmp.path().to_path_buf());
        assert!(new_site(&config, false).is_err());
    }
}
