//! Development server.
//!
//! A lightweight HTTP server over the build output, built on `tiny_http`:
//!
//! - The blog listing route is rendered **dynamically**: the request's
//!   query string is parsed into a filter state and the visible subset is
//!   recomputed per request, so `?category=X&tags=a,b` works without any
//!   client code. This is the server-rendered half of the filtering
//!   contract; the static `_data/*.json` files are the client half.
//! - Everything else is static file serving with `index.html` resolution
//!   and content-type guessing.
//! - Graceful shutdown on Ctrl+C.

use crate::{
    config::{SiteConfig, cfg},
    content::store::{PostStore, unique_categories_of, unique_tags_of},
    filter::{filter_posts, query::FilterState},
    log, render,
};
use anyhow::{Context, Result};
use std::{fs, net::SocketAddr, path::Path, sync::Arc};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

// ============================================================================
// Server Entry Point
// ============================================================================

/// Start the development server. Blocks until Ctrl+C.
pub fn serve_site(config: &SiteConfig) -> Result<()> {
    let interface: std::net::IpAddr = config.serve.interface.parse()?;
    let base_port = config.serve.port;

    let (server, addr) = try_bind_port(interface, base_port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    // Set up Ctrl+C handler for graceful shutdown
    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{addr}");

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &cfg()) {
            log!("serve"; "request error: {e:#}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(
    interface: std::net::IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(Server, SocketAddr)> {
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < max_retries => continue,
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Failed to bind after {} attempts (ports {}-{}): {}",
                    max_retries,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
    unreachable!()
}

// ============================================================================
// Request Handling
// ============================================================================

/// Handle a single HTTP request.
///
/// Resolution order:
/// 1. Blog listing route (also the site root) → dynamic filtered render
/// 2. Exact file match → serve file
/// 3. Directory with index.html → serve index.html
/// 4. Nothing found → 404
fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    let url = request.url().to_owned();
    let (raw_path, query) = url.split_once('?').unwrap_or((url.as_str(), ""));

    // Decode URL-encoded characters (e.g., %20 → space)
    let path = urlencoding::decode(raw_path)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_else(|_| raw_path.to_string());
    let request_path = path.trim_matches('/');

    let blog_root = config.build.blog_path.trim_matches('/');
    if request_path.is_empty() || request_path == blog_root {
        return serve_blog_index(request, config, query);
    }

    // A ".." segment would escape the output directory
    if request_path.split('/').any(|segment| segment == "..") {
        return serve_not_found(request);
    }

    let local_path = config.build.output.join(request_path);

    if local_path.is_file() {
        return serve_file(request, &local_path);
    }

    if local_path.is_dir() {
        let index_path = local_path.join("index.html");
        if index_path.is_file() {
            return serve_file(request, &index_path);
        }
    }

    serve_not_found(request)
}

/// Render the blog listing with the request's filters applied.
fn serve_blog_index(request: Request, config: &SiteConfig, query: &str) -> Result<()> {
    let state = FilterState::parse(query);

    let store = PostStore::new(&config.build.content);
    let posts = store.list_posts();
    let categories = unique_categories_of(&posts);
    let tags = unique_tags_of(&posts);

    let visible = filter_posts(&posts, state.category.as_deref(), &state.tags);
    let html = render::blog_index(config, &visible, &categories, &tags, &state, query);

    serve_html(request, html)
}

// ============================================================================
// Response Helpers
// ============================================================================

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let content_type = guess_content_type(path);

    let response = Response::from_data(content)
        .with_header(Header::from_bytes("Content-Type", content_type).unwrap());

    request.respond(response)?;
    Ok(())
}

/// Serve HTML content.
fn serve_html(request: Request, content: String) -> Result<()> {
    let response = Response::from_string(content)
        .with_header(Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap());
    request.respond(response)?;
    Ok(())
}

/// Serve 404 Not Found response.
fn serve_not_found(request: Request) -> Result<()> {
    let response = Response::from_string("404 Not Found")
        .with_status_code(StatusCode(404))
        .with_header(Header::from_bytes("Content-Type", "text/plain").unwrap());
    request.respond(response)?;
    Ok(())
}

// ============================================================================
// Content Type Detection
// ============================================================================

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        Some("md") => "text/markdown; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_content_type() {
        assert_eq!(
            guess_content_type(Path::new("index.html")),
            "text/html; charset=utf-8"
        );
        assert_eq!(
            guess_content_type(Path::new("_data/posts.json")),
            "application/json; charset=utf-8"
        );
        assert_eq!(guess_content_type(Path::new("feed.xml")), "application/xml; charset=utf-8");
        assert_eq!(
            guess_content_type(Path::new("mystery.bin")),
            "application/octet-stream"
        );
        assert_eq!(
            guess_content_type(Path::new("no_extension")),
            "application/octet-stream"
        );
    }
}
