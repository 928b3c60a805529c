//! Built-in site templates using Tera template engine
//!
//! All templates and the stylesheet are embedded directly in the binary.

mod pages;

pub use pages::{featured_posts, ContactPage, CreatePage, Pages};

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{post_url, url_for};

/// Site stylesheet served at `assets/style.css`
pub const STYLESHEET: &str = include_str!("site/style.css");

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("blog.html", include_str!("site/blog.html")),
            ("post.html", include_str!("site/post.html")),
            ("message.html", include_str!("site/message.html")),
            ("contact.html", include_str!("site/contact.html")),
            ("create.html", include_str!("site/create.html")),
            // Partials
            (
                "partials/navbar.html",
                include_str!("site/partials/navbar.html"),
            ),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
            (
                "partials/post_card.html",
                include_str!("site/partials/post_card.html"),
            ),
            (
                "partials/simulate.html",
                include_str!("site/partials/simulate.html"),
            ),
        ])?;

        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.set_escape_fn(escape_html);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// HTML escaping that leaves `/` alone so URLs stay readable
fn escape_html(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#x27;"),
            _ => output.push(c),
        }
    }
    output
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "…".to_string(),
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!(
            "{}{}",
            truncated.trim_end(),
            omission
        )))
    }
}

// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub author: String,
    pub year: String,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            tagline: config.tagline.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            year: chrono::Local::now().format("%Y").to_string(),
        }
    }
}

/// Site-relative URLs used by the navigation and forms
#[derive(Debug, Clone, Serialize)]
pub struct Links {
    pub home: String,
    pub blog: String,
    pub contact: String,
    pub create: String,
    pub style: String,
}

impl Links {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            home: url_for(config, "/"),
            blog: url_for(config, "blog/"),
            contact: url_for(config, "contact/"),
            create: url_for(config, "create/"),
            style: url_for(config, "assets/style.css"),
        }
    }
}

/// A post prepared for display.
///
/// Absent metadata becomes an empty string here so templates never see a
/// missing value; the title falls back to the slug.
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub slug: String,
    pub url: String,
    pub title: String,
    pub date: String,
    pub author: String,
    pub excerpt: String,
    pub image: String,
    pub category: String,
    pub read_time: String,
    /// Whether the card matches the current search query
    pub visible: bool,
}

impl PostCard {
    pub fn new(config: &SiteConfig, post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            url: post_url(config, &post.slug),
            title: post.display_title().to_string(),
            date: post.date.clone().unwrap_or_default(),
            author: post.author.clone().unwrap_or_default(),
            excerpt: post.excerpt.clone().unwrap_or_default(),
            image: post.image.clone().unwrap_or_default(),
            category: post.category.clone().unwrap_or_default(),
            read_time: post.read_time.clone().unwrap_or_default(),
            visible: true,
        }
    }
}
