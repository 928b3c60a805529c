//! Generator module - exports the site as static HTML files

use anyhow::{Context as _, Result};
use std::fs;
use std::path::Path;

use crate::content::Post;
use crate::templates::{ContactPage, CreatePage, Pages, STYLESHEET};
use crate::Site;

/// Static site generator using the embedded templates
pub struct Generator {
    site: Site,
    pages: Pages,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        let pages = Pages::new(&site.config)?.for_static_export();

        Ok(Self {
            site: site.clone(),
            pages,
        })
    }

    /// Generate the entire site from `posts` (newest first)
    pub fn generate(&self, posts: &[Post]) -> Result<()> {
        fs::create_dir_all(&self.site.public_dir)?;

        self.write("index.html", &self.pages.home(posts)?)?;
        self.write("blog/index.html", &self.pages.blog(posts, "")?)?;

        for post in posts {
            let html = self.pages.post(post)?;
            self.write(&format!("blog/{}/index.html", post.slug), &html)?;
            tracing::debug!("Generated post: {}", post.slug);
        }

        self.write(
            "contact/index.html",
            &self.pages.contact(&ContactPage::default())?,
        )?;
        self.write(
            "create/index.html",
            &self.pages.create(&CreatePage::default())?,
        )?;
        self.write("404.html", &self.pages.page_not_found()?)?;
        self.write("assets/style.css", STYLESHEET)?;

        tracing::info!(
            "Generated {} posts into {:?}",
            posts.len(),
            self.site.public_dir
        );
        Ok(())
    }

    fn write(&self, relative: &str, contents: &str) -> Result<()> {
        let output_path = self.site.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            create_dir(parent)?;
        }
        fs::write(&output_path, contents)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        Ok(())
    }
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).with_context(|| format!("Failed to create dir {:?}", path))
}
