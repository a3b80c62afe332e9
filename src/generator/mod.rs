//! Output generators that run after the page build.

pub mod rss;
