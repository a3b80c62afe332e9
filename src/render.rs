//! HTML rendering for the blog listing and post pages.
//!
//! Deliberately mechanical: one shell template, post cards, and filter
//! chips. The chips get their hrefs from the filter state adapter, so
//! the static build, the dev server, and the client all produce the same
//! URLs for the same filter intent.

use crate::config::SiteConfig;
use crate::content::post::Post;
use crate::filter::query::{FilterChange, FilterState, apply_change, href};
use pulldown_cmark::{Options, Parser, html};

/// Stylesheet embedded into every page.
const STYLE: &str = "\
body{max-width:48rem;margin:0 auto;padding:1rem;font-family:system-ui,sans-serif;line-height:1.6;color:#222}\
a{color:#0a6}header p{color:#555}\
.chips{margin:.5rem 0}.chip{display:inline-block;margin:0 .4rem .4rem 0;padding:.1rem .6rem;\
border:1px solid #ccc;border-radius:1rem;text-decoration:none;color:#333}\
.chip.active{background:#0a6;border-color:#0a6;color:#fff}\
.card{border-top:1px solid #eee;padding:1rem 0}.card h2{margin:0 0 .25rem}\
.meta{font-size:.85rem;color:#666}.empty{color:#666;font-style:italic}";

// ============================================================================
// Markdown
// ============================================================================

/// Render markdown to HTML (tables and strikethrough enabled).
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Escape text for safe embedding in HTML.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

// ============================================================================
// Page Shell
// ============================================================================

fn page_shell(title: &str, language: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"{lang}\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <style>{STYLE}</style>\n\
         </head>\n\
         <body>\n{body}</body>\n\
         </html>\n",
        lang = escape(language),
        title = escape(title),
    )
}

// ============================================================================
// Blog Index
// ============================================================================

/// Render the blog listing: facet chips plus a card per visible post.
///
/// `posts` is the already-filtered subset; `query` is the current query
/// string the chip hrefs merge onto.
pub fn blog_index(
    config: &SiteConfig,
    posts: &[&Post],
    categories: &[String],
    tags: &[String],
    state: &FilterState,
    query: &str,
) -> String {
    let blog_path = &config.build.blog_path;
    let mut body = String::new();

    body.push_str(&format!(
        "<header><h1>{}</h1><p>{}</p></header>\n",
        escape(&config.base.title),
        escape(&config.base.description),
    ));

    // Category chips: "All" plus one per category, single-select
    body.push_str("<nav class=\"chips\" aria-label=\"categories\">\n");
    let all_active = state.category.is_none();
    body.push_str(&chip(
        "All",
        all_active,
        &href(blog_path, &apply_change(query, &FilterChange::category(None))),
    ));
    for category in categories {
        let active = state.category.as_deref() == Some(category.as_str());
        let target = apply_change(query, &FilterChange::category(Some(category.as_str())));
        body.push_str(&chip(category, active, &href(blog_path, &target)));
    }
    body.push_str("</nav>\n");

    // Tag chips: multi-select toggles
    body.push_str("<nav class=\"chips\" aria-label=\"tags\">\n");
    for tag in tags {
        let active = state.tags.iter().any(|t| t == tag);
        let target = apply_change(query, &FilterChange::tags(state.toggled_tag(tag)));
        body.push_str(&chip(tag, active, &href(blog_path, &target)));
    }
    body.push_str("</nav>\n");

    if state.has_active_filters() {
        body.push_str(&format!(
            "<p><a href=\"{}\">Clear filters</a></p>\n",
            escape(&href(blog_path, &apply_change(query, &FilterChange::clear_all()))),
        ));
    }

    if posts.is_empty() {
        body.push_str("<p class=\"empty\">No posts match the selected filters.</p>\n");
    } else {
        for post in posts {
            body.push_str(&post_card(blog_path, post));
        }
    }

    page_shell(&config.base.title, &config.base.language, &body)
}

fn chip(label: &str, active: bool, target: &str) -> String {
    let class = if active { "chip active" } else { "chip" };
    format!(
        "<a class=\"{class}\" href=\"{}\">{}</a>\n",
        escape(target),
        escape(label),
    )
}

fn post_card(blog_path: &str, post: &Post) -> String {
    let tags = post
        .tags
        .iter()
        .map(|tag| escape(tag))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "<article class=\"card\">\n\
         <h2><a href=\"{blog_path}/{slug}/\">{title}</a></h2>\n\
         <p class=\"meta\">{date} · {author} · {category}{tags}</p>\n\
         <p>{summary}</p>\n\
         <p class=\"meta\">{likes} likes · {comments} comments · {visits} visits</p>\n\
         </article>\n",
        slug = escape(&post.slug),
        title = escape(&post.title),
        date = escape(&post.date),
        author = escape(&post.author),
        category = escape(&post.category),
        tags = if tags.is_empty() {
            String::new()
        } else {
            format!(" · {tags}")
        },
        summary = escape(&post.summary),
        likes = post.likes,
        comments = post.comment_count,
        visits = post.visits,
    )
}

// ============================================================================
// Post Page
// ============================================================================

/// Render a single post page with its markdown body.
pub fn post_page(config: &SiteConfig, post: &Post) -> String {
    let content = post
        .content
        .as_deref()
        .map(markdown_to_html)
        .unwrap_or_default();

    let body = format!(
        "<p><a href=\"{blog_path}\">&larr; All posts</a></p>\n\
         <article>\n\
         <h1>{title}</h1>\n\
         <p class=\"meta\">{date} · {author} · {category}</p>\n\
         {content}\
         </article>\n",
        blog_path = &config.build.blog_path,
        title = escape(&post.title),
        date = escape(&post.date),
        author = escape(&post.author),
        category = escape(&post.category),
    );

    page_shell(&post.title, &config.base.language, &body)
}

// ============================================================================
// Tests
// ============================================================================
