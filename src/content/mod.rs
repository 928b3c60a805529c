//! Content module - reads, filters and renders posts

mod filter;
mod frontmatter;
mod markdown;
mod post;
pub mod store;

pub use filter::{filter_posts, matches_query};
pub use frontmatter::{FrontMatter, FrontMatterError};
pub use markdown::MarkdownRenderer;
pub use post::{sort_by_date_desc, Post};
pub use store::{ContentStore, StoreError};
