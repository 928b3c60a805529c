//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub author: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub content_extension: String,
    pub public_dir: String,

    // Home page
    /// Slugs shown on the landing page, in this order
    pub featured: Vec<String>,
    /// Number of newest posts shown when `featured` is empty
    pub featured_count: usize,

    // Forms
    /// Options offered by the create form
    pub categories: Vec<String>,
    /// Artificial delay before a simulated submission is acknowledged
    pub submit_delay_ms: u64,

    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "ModernBlog".to_string(),
            tagline: "Share Your Story With The World".to_string(),
            description: "Discover stories, thinking, and expertise from writers on any topic."
                .to_string(),
            author: "ModernBlog Team".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            content_dir: "content/posts".to_string(),
            content_extension: "mdx".to_string(),
            public_dir: "public".to_string(),

            featured: Vec::new(),
            featured_count: 3,

            categories: vec![
                "Technology".to_string(),
                "Design".to_string(),
                "Development".to_string(),
                "Lifestyle".to_string(),
            ],
            submit_delay_ms: 2000,

            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}
