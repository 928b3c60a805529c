//! Post model

use serde::{Deserialize, Serialize};

use super::FrontMatter;

/// A blog post read from the content store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// File name without the content extension
    pub slug: String,

    pub title: Option<String>,

    /// Publication date as written in the front-matter; compared as text
    pub date: Option<String>,

    pub author: Option<String>,

    pub excerpt: Option<String>,

    /// Cover image URI
    pub image: Option<String>,

    pub category: Option<String>,

    /// Display label such as "5 min read"
    pub read_time: Option<String>,

    /// Raw MDX body, unrendered
    pub content: String,
}

impl Post {
    /// Merge parsed metadata and body into a post
    pub fn from_parts(slug: String, fm: FrontMatter, content: String) -> Self {
        Self {
            slug,
            title: fm.title,
            date: fm.date,
            author: fm.author,
            excerpt: fm.excerpt,
            image: fm.image,
            category: fm.category,
            read_time: fm.read_time,
            content,
        }
    }

    /// Title for display, falling back to the slug
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.slug)
    }
}

/// Order posts newest first by comparing `date` as plain text.
///
/// Only correct when every date shares a lexicographically ordered format
/// such as ISO 8601. Undated posts go last. The sort is stable, so equal
/// dates keep the order they were read in.
pub fn sort_by_date_desc(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}
