//! Post content handling: front matter parsing and the post repository.

pub mod frontmatter;
pub mod post;
pub mod store;

pub use frontmatter::{Diagnostic, Reason};
pub use post::Post;
pub use store::PostStore;
