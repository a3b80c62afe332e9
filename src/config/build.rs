//! `[build]` section configuration.
//!
//! Contains content/output paths and rss feed settings.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in folio.toml - build paths and outputs.
///
/// # Example
/// ```toml
/// [build]
/// content = "content/blog"
/// output = "public"
/// assets = "assets"
///
/// [build.rss]
/// enable = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory. Set from CLI, not from folio.toml.
    #[serde(skip)]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Directory holding markdown post sources.
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Output directory for the generated site.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Directory of static assets copied into the output as-is.
    #[serde(default = "defaults::build::assets")]
    #[educe(Default = defaults::build::assets())]
    pub assets: PathBuf,

    /// Name of the JSON data directory inside the output
    /// (posts.json, categories.json, tags.json).
    #[serde(default = "defaults::build::data")]
    #[educe(Default = defaults::build::data())]
    pub data: PathBuf,

    /// URL path of the blog listing page.
    #[serde(default = "defaults::build::blog_path")]
    #[educe(Default = defaults::build::blog_path())]
    pub blog_path: String,

    /// Clear the output directory before building. Set from CLI.
    #[serde(skip)]
    #[educe(Default = false)]
    pub clean: bool,

    /// rss feed settings
    #[serde(default)]
    pub rss: RssConfig,
}

/// `[build.rss]` section - feed generation settings.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RssConfig {
    /// Generate `feed.xml` during builds. Requires `[base].url`.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub enable: bool,

    /// Feed file path relative to the output directory.
    #[serde(default = "defaults::build::rss::path")]
    #[educe(Default = defaults::build::rss::path())]
    pub path: PathBuf,
}
