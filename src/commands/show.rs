//! Show a single post

use anyhow::Result;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::post_url;
use crate::Site;

/// Print the metadata of the post stored under `slug`
pub fn run(site: &Site, slug: &str) -> Result<()> {
    match site.store().get_by_slug(slug)? {
        Some(post) => print!("{}", describe(&site.config, &post)),
        None => println!("Post not found: {}", slug),
    }

    Ok(())
}

fn describe(config: &SiteConfig, post: &Post) -> String {
    let fields = [
        ("Title", Some(post.display_title())),
        ("Slug", Some(post.slug.as_str())),
        ("Date", post.date.as_deref()),
        ("Author", post.author.as_deref()),
        ("Category", post.category.as_deref()),
        ("Read time", post.read_time.as_deref()),
        ("Image", post.image.as_deref()),
        ("Excerpt", post.excerpt.as_deref()),
    ];

    let mut out = String::new();
    for (label, value) in fields {
        if let Some(value) = value {
            out.push_str(&format!("{:<10} {}\n", format!("{}:", label), value));
        }
    }
    out.push_str(&format!("{:<10} {}\n", "URL:", post_url(config, &post.slug)));
    out.push_str(&format!(
        "{:<10} {}\n",
        "Words:",
        post.content.split_whitespace().count()
    ));
    out
}
