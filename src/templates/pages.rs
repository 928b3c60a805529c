//! Page rendering shared by the server and the static generator

use anyhow::Result;
use tera::Context;

use super::{Links, PostCard, SiteData, TemplateRenderer};
use crate::config::SiteConfig;
use crate::content::{filter_posts, matches_query, MarkdownRenderer, Post};
use crate::forms::{ContactErrors, ContactForm, CreatePostErrors, CreatePostForm};
use crate::helpers::{full_url_for, post_path};

/// State of the contact page
#[derive(Debug, Clone, Default)]
pub struct ContactPage {
    pub form: ContactForm,
    pub errors: ContactErrors,
    pub success: bool,
}

/// State of the create-post page
#[derive(Debug, Clone, Default)]
pub struct CreatePage {
    pub form: CreatePostForm,
    pub errors: CreatePostErrors,
    /// Preview of an accepted (simulated) submission
    pub draft: Option<Post>,
}

/// Renders every page of the site to HTML
pub struct Pages {
    config: SiteConfig,
    templates: TemplateRenderer,
    markdown: MarkdownRenderer,
    /// Forms submit in the browser instead of posting to the server
    static_export: bool,
}

impl Pages {
    pub fn new(config: &SiteConfig) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            templates: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::with_options(
                &config.highlight.theme,
                config.highlight.line_number,
            ),
            static_export: false,
        })
    }

    /// Render forms for a site without a server behind it
    pub fn for_static_export(mut self) -> Self {
        self.static_export = true;
        self
    }

    fn base_context(&self, page_title: &str, current: &str) -> Context {
        let mut context = Context::new();
        context.insert("site", &SiteData::from_config(&self.config));
        context.insert("links", &Links::from_config(&self.config));
        context.insert("page_title", page_title);
        context.insert("current", current);
        context.insert("static_export", &self.static_export);
        context.insert("submit_delay_ms", &self.config.submit_delay_ms);
        context
    }

    /// Landing page with the featured articles
    pub fn home(&self, posts: &[Post]) -> Result<String> {
        let featured: Vec<PostCard> = featured_posts(&self.config, posts)
            .into_iter()
            .map(|p| PostCard::new(&self.config, p))
            .collect();

        let mut context = self.base_context(&self.config.title, "home");
        context.insert("featured", &featured);
        self.templates.render("home.html", &context)
    }

    /// Blog index; cards not matching `query` are rendered hidden so the
    /// in-page search can reveal them again
    pub fn blog(&self, posts: &[Post], query: &str) -> Result<String> {
        let cards: Vec<PostCard> = posts
            .iter()
            .map(|p| PostCard {
                visible: matches_query(p, query),
                ..PostCard::new(&self.config, p)
            })
            .collect();
        let visible_count = filter_posts(posts, query).len();

        let mut context =
            self.base_context(&format!("Blog | {}", self.config.title), "blog");
        context.insert("cards", &cards);
        context.insert("query", query);
        context.insert("visible_count", &visible_count);
        self.templates.render("blog.html", &context)
    }

    /// A single post with its rendered body
    pub fn post(&self, post: &Post) -> Result<String> {
        let card = PostCard::new(&self.config, post);
        let content_html = self.markdown.render(&post.content);

        let mut context =
            self.base_context(&format!("{} | {}", card.title, self.config.title), "blog");
        context.insert(
            "canonical_url",
            &full_url_for(&self.config, &post_path(&post.slug)),
        );
        context.insert("post", &card);
        context.insert("content_html", &content_html);
        self.templates.render("post.html", &context)
    }

    /// Shown when a post slug does not exist
    pub fn post_not_found(&self) -> Result<String> {
        self.message(
            "Post Not Found",
            "The story you are looking for does not exist or has been moved.",
        )
    }

    /// Shown for any other unknown path
    pub fn page_not_found(&self) -> Result<String> {
        self.message("Page Not Found", "There is nothing at this address.")
    }

    /// Shown when content could not be read
    pub fn error(&self) -> Result<String> {
        self.message(
            "Something went wrong",
            "The content for this page could not be loaded.",
        )
    }

    fn message(&self, heading: &str, message: &str) -> Result<String> {
        let mut context = self.base_context(heading, "");
        context.insert("heading", heading);
        context.insert("message", message);
        self.templates.render("message.html", &context)
    }

    pub fn contact(&self, page: &ContactPage) -> Result<String> {
        let mut context = self.base_context(&format!("Contact | {}", self.config.title), "contact");
        context.insert("form", &page.form);
        context.insert("errors", &page.errors);
        context.insert("success", &page.success);
        self.templates.render("contact.html", &context)
    }

    pub fn create(&self, page: &CreatePage) -> Result<String> {
        let mut context = self.base_context(&format!("Create | {}", self.config.title), "create");
        context.insert("form", &page.form);
        context.insert("errors", &page.errors);
        context.insert("categories", &self.config.categories);
        if let Some(draft) = &page.draft {
            context.insert("draft", &PostCard::new(&self.config, draft));
            context.insert("draft_html", &self.markdown.render_untrusted(&draft.content));
        }
        self.templates.render("create.html", &context)
    }
}

/// Posts shown on the landing page.
///
/// Configured slugs come first, in configured order, skipping unknown ones.
/// Without configuration the newest `featured_count` posts are used.
pub fn featured_posts<'a>(config: &SiteConfig, posts: &'a [Post]) -> Vec<&'a Post> {
    if config.featured.is_empty() {
        return posts.iter().take(config.featured_count).collect();
    }

    config
        .featured
        .iter()
        .filter_map(|slug| posts.iter().find(|p| &p.slug == slug))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;

    fn post(slug: &str, title: &str, category: &str) -> Post {
        let fm = FrontMatter {
            title: Some(title.to_string()),
            date: Some("2024-01-01".to_string()),
            category: Some(category.to_string()),
            excerpt: Some(format!("About {}", title)),
            ..Default::default()
        };
        Post::from_parts(slug.to_string(), fm, format!("# {}\n\nBody text.", title))
    }

    fn sample() -> Vec<Post> {
        vec![
            post("one", "First Story", "Design"),
            post("two", "Second Story", "Development"),
            post("three", "Third Story", "Design"),
            post("four", "Fourth Story", "Lifestyle"),
        ]
    }

    fn pages() -> Pages {
        Pages::new(&SiteConfig::default()).unwrap()
    }

    #[test]
    fn test_featured_defaults_to_newest() {
        let config = SiteConfig::default();
        let posts = sample();
        let slugs: Vec<_> = featured_posts(&config, &posts)
            .iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_featured_follows_configuration() {
        let config = SiteConfig {
            featured: vec!["four".to_string(), "missing".to_string(), "two".to_string()],
            ..SiteConfig::default()
        };
        let posts = sample();
        let slugs: Vec<_> = featured_posts(&config, &posts)
            .iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["four", "two"]);
    }

    #[test]
    fn test_home_lists_featured_posts() {
        let html = pages().home(&sample()).unwrap();
        assert!(html.contains("First Story"));
        assert!(html.contains("Third Story"));
        assert!(!html.contains("Fourth Story"));
    }

    #[test]
    fn test_blog_hides_non_matching_cards() {
        let html = pages().blog(&sample(), "design").unwrap();
        assert!(html.contains("data-slug=\"one\""));
        assert!(html.contains("data-slug=\"two\" hidden"));
        assert!(!html.contains("data-slug=\"one\" hidden"));
        assert!(html.contains("value=\"design\""));
    }

    #[test]
    fn test_blog_shows_no_results_state() {
        let html = pages().blog(&sample(), "xyz").unwrap();
        assert!(html.contains("No results found"));
        assert!(!html.contains("id=\"no-results\" hidden"));

        let html = pages().blog(&sample(), "").unwrap();
        assert!(html.contains("id=\"no-results\" hidden"));
    }

    #[test]
    fn test_post_page() {
        let html = pages().post(&sample()[0]).unwrap();
        assert!(html.contains("<title>First Story | ModernBlog</title>"));
        assert!(html.contains("<h1>First Story</h1>"));
        assert!(html.contains("Design"));
    }

    #[test]
    fn test_metadata_is_escaped() {
        let mut p = post("xss", "<script>alert(1)</script>", "Tech");
        p.content = String::new();
        let html = pages().post(&p).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_not_found_page() {
        let html = pages().post_not_found().unwrap();
        assert!(html.contains("Post Not Found"));
    }

    #[test]
    fn test_contact_page_states() {
        let pages = pages();

        let page = ContactPage {
            form: ContactForm {
                name: "J".to_string(),
                ..Default::default()
            },
            errors: ContactForm::default().validate().unwrap_err(),
            success: false,
        };
        let html = pages.contact(&page).unwrap();
        assert!(html.contains("Name must be at least 2 characters."));
        assert!(html.contains("value=\"J\""));

        let page = ContactPage {
            success: true,
            ..Default::default()
        };
        let html = pages.contact(&page).unwrap();
        assert!(html.contains("Message Sent!"));
    }

    #[test]
    fn test_create_page_lists_categories_and_preview() {
        let pages = pages();

        let html = pages.create(&CreatePage::default()).unwrap();
        for category in ["Technology", "Design", "Development", "Lifestyle"] {
            assert!(html.contains(category));
        }

        let form = CreatePostForm {
            title: "Preview Title".to_string(),
            category: "Design".to_string(),
            content: "Some **bold** content for the preview.".to_string(),
            image: String::new(),
        };
        let page = CreatePage {
            draft: Some(form.to_draft("Jane")),
            form,
            ..Default::default()
        };
        let html = pages.create(&page).unwrap();
        assert!(html.contains("Blog post submitted! (Simulation)"));
        assert!(html.contains("/blog/preview-title/"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_create_preview_escapes_raw_html() {
        let form = CreatePostForm {
            title: "Sneaky".to_string(),
            category: "Design".to_string(),
            content: "<script>alert(document.cookie)</script> padding padding".to_string(),
            image: String::new(),
        };
        let page = CreatePage {
            draft: Some(form.to_draft("Jane")),
            form,
            ..Default::default()
        };
        let html = pages().create(&page).unwrap();
        assert!(!html.contains("<script>alert(document.cookie)</script>"));
        assert!(html.contains("&lt;script&gt;alert(document.cookie)&lt;/script&gt;"));
    }

    #[test]
    fn test_static_export_forms_simulate_in_browser() {
        let pages = Pages::new(&SiteConfig::default())
            .unwrap()
            .for_static_export();
        let html = pages.contact(&ContactPage::default()).unwrap();
        assert!(html.contains("data-simulate"));
    }
}
