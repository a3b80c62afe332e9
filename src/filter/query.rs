//! Filter state <-> query string synchronization.
//!
//! The query string is the single source of truth for filter intent:
//! state is parsed fresh from it on every read, and every update is
//! expressed as a whole new query string, never as an in-place mutation.
//!
//! Two query parameters are recognized:
//!
//! | key        | shape                      | semantics            |
//! |------------|----------------------------|----------------------|
//! | `category` | single value               | exact match          |
//! | `tags`     | comma-joined list          | OR match             |
//!
//! Unrelated parameters pass through updates untouched, so filter links
//! compose with whatever else lives in the URL.
//!
//! Navigation itself is an injected capability ([`Navigator`]); the pure
//! parse/format core has no opinion about where query strings come from.

use urlencoding::{decode, encode};

// ============================================================================
// Filter State
// ============================================================================

/// Active filter selection, derived from a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// `None` means no category filter.
    pub category: Option<String>,
    /// Empty means no tag filter. Order is selection order.
    pub tags: Vec<String>,
}

impl FilterState {
    /// Parse filter state from a query string (without leading `?`).
    ///
    /// The `tags` value is comma-split with empty segments discarded, so
    /// `tags=,react,` yields exactly `["react"]`.
    pub fn parse(query: &str) -> Self {
        let pairs = parse_pairs(query);
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        let category = get("category")
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        let tags = get("tags")
            .map(|value| {
                value
                    .split(',')
                    .filter(|segment| !segment.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self { category, tags }
    }

    /// True iff a category is set or any tag is selected.
    pub fn has_active_filters(&self) -> bool {
        self.category.is_some() || !self.tags.is_empty()
    }

    /// Tag list with `tag` toggled: removed if present (exact match),
    /// appended otherwise. Untouched tags keep their order.
    pub fn toggled_tag(&self, tag: &str) -> Vec<String> {
        if self.tags.iter().any(|t| t == tag) {
            self.tags.iter().filter(|t| *t != tag).cloned().collect()
        } else {
            let mut tags = self.tags.clone();
            tags.push(tag.to_string());
            tags
        }
    }
}

// ============================================================================
// Query Updates
// ============================================================================

/// A partial update to the filter state.
///
/// The outer `Option` distinguishes "leave untouched" (`None`) from an
/// explicit new value; `Some(None)` / `Some(vec![])` clear the key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterChange {
    pub category: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

impl FilterChange {
    pub fn category(category: Option<&str>) -> Self {
        Self {
            category: Some(category.map(str::to_string)),
            tags: None,
        }
    }

    pub fn tags(tags: Vec<String>) -> Self {
        Self {
            category: None,
            tags: Some(tags),
        }
    }

    /// Clears both filters.
    pub fn clear_all() -> Self {
        Self {
            category: Some(None),
            tags: Some(Vec::new()),
        }
    }
}

/// Merge a filter change onto an existing query string.
///
/// Unrelated parameters are preserved in place; a cleared key is removed
/// entirely, and a set key keeps the position of its first occurrence.
pub fn apply_change(query: &str, change: &FilterChange) -> String {
    let mut pairs = parse_pairs(query);

    if let Some(category) = &change.category {
        let value = category.as_deref().filter(|c| !c.is_empty());
        set_or_remove(&mut pairs, "category", value);
    }

    if let Some(tags) = &change.tags {
        let joined = tags.join(",");
        let value = (!tags.is_empty()).then_some(joined.as_str());
        set_or_remove(&mut pairs, "tags", value);
    }

    encode_pairs(&pairs)
}

/// Build a navigable path: the path alone when the query is empty,
/// `path?query` otherwise.
pub fn href(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

fn set_or_remove(pairs: &mut Vec<(String, String)>, key: &str, value: Option<&str>) {
    match value {
        Some(value) => {
            if let Some(first) = pairs.iter_mut().find(|(k, _)| k == key) {
                first.1 = value.to_string();
                // Drop duplicates beyond the first occurrence
                let mut seen = false;
                pairs.retain(|(k, _)| {
                    if k == key {
                        let keep = !seen;
                        seen = true;
                        keep
                    } else {
                        true
                    }
                });
            } else {
                pairs.push((key.to_string(), value.to_string()));
            }
        }
        None => pairs.retain(|(k, _)| k != key),
    }
}

// ============================================================================
// Query String Codec
// ============================================================================

/// Decode `a=1&b=two` into ordered pairs. `+` is treated as a space and
/// percent-escapes are decoded; undecodable segments are kept raw.
fn parse_pairs(query: &str) -> Vec<(String, String)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let plus_as_space = raw.replace('+', " ");
    decode(&plus_as_space)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(plus_as_space)
}

fn encode_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

// ============================================================================
// Navigation
// ============================================================================

/// The navigation capability the adapter is decoupled from.
///
/// Production code backs this with whatever owns the address bar (the
/// dev server's request URL, a browser shim); tests use a recording
/// mock.
pub trait Navigator {
    /// Current query string, without leading `?`.
    fn current_query(&self) -> String;
    /// Navigate to a new path (path plus optional query).
    fn navigate(&mut self, href: &str);
}

/// Drives a [`Navigator`] from filter operations.
///
/// Every operation reads the current query, computes one merged query
/// string, and issues exactly one navigation.
pub struct FilterNav<'a, N: Navigator> {
    path: String,
    nav: &'a mut N,
}

impl<'a, N: Navigator> FilterNav<'a, N> {
    pub fn new(path: impl Into<String>, nav: &'a mut N) -> Self {
        Self {
            path: path.into(),
            nav,
        }
    }

    /// Current filter state, parsed fresh from the navigator.
    pub fn filters(&self) -> FilterState {
        FilterState::parse(&self.nav.current_query())
    }

    pub fn set_category(&mut self, category: Option<&str>) {
        self.push(FilterChange::category(category));
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        let tags = self.filters().toggled_tag(tag);
        self.push(FilterChange::tags(tags));
    }

    pub fn clear_tags(&mut self) {
        self.push(FilterChange::tags(Vec::new()));
    }

    pub fn clear_all_filters(&mut self) {
        self.push(FilterChange::clear_all());
    }

    pub fn has_active_filters(&self) -> bool {
        self.filters().has_active_filters()
    }

    fn push(&mut self, change: FilterChange) {
        let query = apply_change(&self.nav.current_query(), &change);
        let href = href(&self.path, &query);
        self.nav.navigate(&href);
    }
}

// ============================================================================
// Tests
// ============================================================================
