//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::CONFIG_FILE;

const CONFIG_TEMPLATE: &str = r#"# Site
title: ModernBlog
tagline: Share Your Story With The World
description: Discover stories, thinking, and expertise from writers on any topic.
author: ModernBlog Team

# URL
url: http://example.com
root: /

# Directory
content_dir: content/posts
content_extension: mdx
public_dir: public

# Home page
## Slugs of the featured articles; the newest posts are used when empty
featured: []
featured_count: 3

# Forms
categories:
  - Technology
  - Design
  - Development
  - Lifestyle
submit_delay_ms: 2000

# Code highlighting
highlight:
  theme: base16-ocean.dark
  line_number: false
"#;

const SAMPLE_POST: &str = r#"Welcome to your new blog! Every file in the content directory becomes a post.
The block at the top of this file holds its metadata.

<GlassCard className="p-6">

Wrap any paragraph in a **GlassCard** to make it stand out.

</GlassCard>

## Writing

Posts are Markdown, with tables, footnotes and highlighted code:

```rust
fn main() {
    println!("Hello, world!");
}
```

## Publishing

Run `modernblog serve` to preview the site, or `modernblog generate` to export it.
"#;

/// Initialize a new blog in the given directory.
///
/// An existing configuration or sample post is left untouched.
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config = SiteConfig::default();
    let content_dir = target_dir.join(&config.content_dir);
    fs::create_dir_all(&content_dir)?;

    write_new(&target_dir.join(CONFIG_FILE), CONFIG_TEMPLATE)?;

    let today = chrono::Local::now().format("%Y-%m-%d");
    let sample_post = format!(
        "---\ntitle: Welcome to {}\ndate: \"{}\"\nauthor: {}\nexcerpt: A quick tour of writing posts.\ncategory: Lifestyle\nreadTime: 1 min read\n---\n{}",
        config.title, today, config.author, SAMPLE_POST
    );
    write_new(
        &content_dir.join(format!("welcome.{}", config.content_extension)),
        &sample_post,
    )?;

    Ok(())
}

fn write_new(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        tracing::warn!("{:?} already exists, skipping", path);
        return Ok(());
    }
    fs::write(path, contents)?;
    tracing::debug!("Created {:?}", path);
    Ok(())
}
