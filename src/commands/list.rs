//! List site content

use anyhow::Result;
use std::collections::BTreeMap;

use crate::content::{filter_posts, Post};
use crate::Site;

/// List posts (optionally filtered by `query`) or category counts
pub fn run(site: &Site, content_type: &str, query: Option<&str>) -> Result<()> {
    let posts = site.store().list_all()?;

    match content_type {
        "post" | "posts" => {
            let shown = filter_posts(&posts, query.unwrap_or_default());
            println!("Posts ({}):", shown.len());
            for post in shown {
                println!("  {}", post_line(post));
            }
        }
        "category" | "categories" => {
            let categories = category_counts(&posts);
            println!("Categories ({}):", categories.len());
            for (category, count) in categories {
                println!("  {} ({})", category, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category",
                content_type
            );
        }
    }

    Ok(())
}

fn post_line(post: &Post) -> String {
    format!(
        "{} - {} [{}]",
        post.date.as_deref().unwrap_or("----------"),
        post.display_title(),
        post.slug
    )
}

/// Categories with their post counts, most used first
fn category_counts(posts: &[Post]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for category in posts.iter().filter_map(|p| p.category.as_deref()) {
        *counts.entry(category).or_insert(0) += 1;
    }

    let mut counts: Vec<_> = counts
        .into_iter()
        .map(|(category, count)| (category.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
