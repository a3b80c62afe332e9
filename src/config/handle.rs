//! Global config handle.
//!
//! Uses `arc-swap` for lock-free reads from any thread, including rayon
//! workers during builds and the request loop in the dev server.
//!
//! # Usage
//!
//! ```ignore
//! use crate::config::cfg;
//!
//! let c = cfg();
//! build_site(&c)?;  // Arc auto-derefs to &SiteConfig
//! ```

use super::SiteConfig;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

/// Global config storage.
///
/// Initialized with the default config, then replaced with the loaded
/// config in main before any command runs.
pub static CONFIG: LazyLock<ArcSwap<SiteConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(SiteConfig::default()));

/// Get current config as `Arc<SiteConfig>`.
///
/// Thread-safe and wait-free. The Arc auto-derefs to `&SiteConfig`:
///
/// ```ignore
/// let c = cfg();
/// some_function(&c);  // Works directly, no extra & needed
/// ```
#[inline]
pub fn cfg() -> Arc<SiteConfig> {
    CONFIG.load_full()
}

/// Initialize global config (called once at startup).
#[inline]
pub fn init_config(config: SiteConfig) {
    CONFIG.store(Arc::new(config));
}
