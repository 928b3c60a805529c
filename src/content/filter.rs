//! Free-text filtering of the post listing

use super::Post;

/// Posts whose title, excerpt or category contains `query`, ignoring case.
///
/// An empty query keeps every post. Order is that of `posts`; there is no
/// ranking. Missing fields never match.
pub fn filter_posts<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    if query.is_empty() {
        return posts.iter().collect();
    }

    let needle = query.to_lowercase();
    posts
        .iter()
        .filter(|post| contains_lowered(post, &needle))
        .collect()
}

/// Whether a single post matches `query` under the same rule as [`filter_posts`]
pub fn matches_query(post: &Post, query: &str) -> bool {
    query.is_empty() || contains_lowered(post, &query.to_lowercase())
}

fn contains_lowered(post: &Post, needle: &str) -> bool {
    [&post.title, &post.excerpt, &post.category]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}
