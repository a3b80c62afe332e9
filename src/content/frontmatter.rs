//! Front matter parsing for markdown posts.
//!
//! A post file starts with an optional YAML block fenced by `---` lines,
//! followed by the markdown body:
//!
//! ```text
//! ---
//! title: Hello World
//! date: 2024-01-15
//! tags: [rust, blog]
//! ---
//! Body text...
//! ```
//!
//! Parsing never fails: every field is coerced independently, falling
//! back to a documented default, and problems are reported as
//! [`Diagnostic`] values instead of being printed or thrown. The caller
//! decides what to do with them (the repository logs each one).

use crate::content::post::{DEFAULT_THUMBNAIL, Post};
use crate::utils::date::DateTimeUtc;
use serde_yaml::{Mapping, Value};
use std::fmt;

/// Fields every post is expected to declare.
///
/// A missing (or empty) entry yields a [`Reason::Missing`] diagnostic
/// before defaulting proceeds; the post is still produced.
pub const REQUIRED_FIELDS: &[&str] = &["id", "slug", "title", "date", "author", "summary"];

// ============================================================================
// Diagnostics
// ============================================================================

/// A single front matter problem, tied to the file and field it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: String,
    pub field: String,
    pub reason: Reason,
}

/// Why a field was defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    /// Required field absent, null, or empty
    Missing,
    /// Field present but not coercible to the expected shape
    Invalid { expected: &'static str },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Reason::Missing => {
                write!(f, "missing required field `{}` in {}", self.field, self.file)
            }
            Reason::Invalid { expected } => write!(
                f,
                "invalid field `{}` in {}: expected {}",
                self.field, self.file, expected
            ),
        }
    }
}

fn missing(file: &str, field: &str) -> Diagnostic {
    Diagnostic {
        file: file.to_string(),
        field: field.to_string(),
        reason: Reason::Missing,
    }
}

fn invalid(file: &str, field: &str, expected: &'static str) -> Diagnostic {
    Diagnostic {
        file: file.to_string(),
        field: field.to_string(),
        reason: Reason::Invalid { expected },
    }
}

// ============================================================================
// Front Matter Splitting
// ============================================================================

/// Split a raw post file into its YAML front matter and markdown body.
///
/// The front matter block must start on the first line and be closed by a
/// `---` line of its own. An absent or unterminated block yields no front
/// matter and the whole input as body.
pub fn split_front_matter(raw: &str) -> (Option<&str>, &str) {
    let Some(rest) = raw.strip_prefix("---") else {
        return (None, raw);
    };
    let Some(rest) = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) else {
        return (None, raw);
    };

    // Empty block: the closing fence is the very next line
    if let Some(after) = rest.strip_prefix("---") {
        let after = after.strip_prefix('\r').unwrap_or(after);
        if after.is_empty() || after.starts_with('\n') {
            let body = after.strip_prefix('\n').unwrap_or(after);
            return (Some(""), body);
        }
    }

    // Find a closing delimiter at the start of a line
    let mut search = 0;
    while let Some(pos) = rest[search..].find("\n---") {
        let at = search + pos;
        let after = &rest[at + 4..];
        let after = after.strip_prefix('\r').unwrap_or(after);
        if after.is_empty() || after.starts_with('\n') {
            let yaml = &rest[..at];
            let body = after.strip_prefix('\n').unwrap_or(after);
            return (Some(yaml), body);
        }
        search = at + 1;
    }

    (None, raw)
}

// ============================================================================
// Post Parsing
// ============================================================================

/// Parse a raw post file into a [`Post`] plus the diagnostics collected
/// along the way.
///
/// `filename` is the source file name (`hello-world.md`); its stem is the
/// fallback for `id` and `slug`. The markdown body is attached as
/// `content` only when `attach_body` is set, so list views and detail
/// views stay structurally distinct.
pub fn parse_post(raw: &str, filename: &str, attach_body: bool) -> (Post, Vec<Diagnostic>) {
    let mut diags = Vec::new();
    let stem = filename.strip_suffix(".md").unwrap_or(filename);

    let (front, body) = split_front_matter(raw);
    let mapping = match front {
        None => Mapping::new(),
        Some(yaml) => match serde_yaml::from_str::<Value>(yaml) {
            Ok(Value::Mapping(mapping)) => mapping,
            Ok(Value::Null) => Mapping::new(),
            Ok(_) | Err(_) => {
                diags.push(invalid(filename, "front matter", "a YAML mapping"));
                Mapping::new()
            }
        },
    };

    for key in REQUIRED_FIELDS {
        if !has_value(&mapping, key) {
            diags.push(missing(filename, key));
        }
    }

    let string_or = |key: &str, fallback: &str, diags: &mut Vec<Diagnostic>| {
        string_field(&mapping, key, filename, diags).unwrap_or_else(|| fallback.to_string())
    };

    let id = string_or("id", stem, &mut diags);
    let slug = string_or("slug", stem, &mut diags);
    let title = string_or("title", "Untitled", &mut diags);
    let author = string_or("author", "Anonymous", &mut diags);
    let category = string_or("category", "General", &mut diags);
    let summary = string_or("summary", "", &mut diags);
    let thumbnail_url = string_or("thumbnailUrl", DEFAULT_THUMBNAIL, &mut diags);

    let date = match string_field(&mapping, "date", filename, &mut diags) {
        Some(date) if DateTimeUtc::parse(&date).is_some() => date,
        Some(_) => {
            diags.push(invalid(filename, "date", "an ISO 8601 calendar date"));
            DateTimeUtc::today().to_ymd()
        }
        None => DateTimeUtc::today().to_ymd(),
    };

    let post = Post {
        id,
        slug,
        title,
        date,
        author,
        category,
        tags: tags_field(&mapping, filename, &mut diags),
        summary,
        thumbnail_url,
        likes: count_field(&mapping, "likes", filename, &mut diags),
        comment_count: count_field(&mapping, "commentCount", filename, &mut diags),
        visits: count_field(&mapping, "visits", filename, &mut diags),
        content: attach_body.then(|| body.to_string()),
    };

    (post, diags)
}

// ============================================================================
// Field Coercion
// ============================================================================

/// Look up a front matter field by string key.
fn field<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
    map.iter()
        .find_map(|(k, v)| (k.as_str() == Some(key)).then_some(v))
}

/// Whether a field carries a usable value.
///
/// Mirrors the required-field check: absent, null, and empty-string
/// entries all count as missing; any other value is "present" even if it
/// later fails coercion.
fn has_value(map: &Mapping, key: &str) -> bool {
    match field(map, key) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Coerce a field to a non-empty string.
///
/// Absent, null, and empty values yield `None` (caller applies the
/// default); a present non-string value yields `None` plus a diagnostic.
fn string_field(
    map: &Mapping,
    key: &str,
    file: &str,
    diags: &mut Vec<Diagnostic>,
) -> Option<String> {
    match field(map, key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::String(_) | Value::Null => None,
        _ => {
            diags.push(invalid(file, key, "a string"));
            None
        }
    }
}

/// Coerce a counter field to a non-negative integer, defaulting to 0.
fn count_field(map: &Mapping, key: &str, file: &str, diags: &mut Vec<Diagnostic>) -> u64 {
    match field(map, key) {
        None | Some(Value::Null) => 0,
        Some(Value::Number(n)) => match n.as_u64() {
            Some(count) => count,
            None => {
                diags.push(invalid(file, key, "a non-negative integer"));
                0
            }
        },
        Some(_) => {
            diags.push(invalid(file, key, "a non-negative integer"));
            0
        }
    }
}

/// Coerce the tags field to a sequence of strings.
///
/// Anything other than a proper string sequence collapses to empty -
/// no partial coercion. Order, case, and duplicates are preserved;
/// deduplication belongs to facet derivation, not to the post itself.
fn tags_field(map: &Mapping, file: &str, diags: &mut Vec<Diagnostic>) -> Vec<String> {
    match field(map, "tags") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Sequence(seq)) => {
            let tags: Option<Vec<String>> = seq
                .iter()
                .map(|v| v.as_str().map(str::to_owned))
                .collect();
            tags.unwrap_or_else(|| {
                diags.push(invalid(file, "tags", "a sequence of strings"));
                Vec::new()
            })
        }
        Some(_) => {
            diags.push(invalid(file, "tags", "a sequence of strings"));
            Vec::new()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
