//! Content store - reads posts from a directory of MDX files

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::post::sort_by_date_desc;
use super::{FrontMatter, FrontMatterError, Post};

/// Extension of content files when none is configured
pub const DEFAULT_EXTENSION: &str = "mdx";

/// Errors surfaced by the content store.
///
/// A missing directory or file is not an error; see [`ContentStore::list_all`]
/// and [`ContentStore::get_by_slug`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed front-matter in {}: {source}", .path.display())]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
}

impl StoreError {
    fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Read-only view over a directory of content files.
///
/// Nothing is cached: every call goes back to the file system.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
    extension: String,
}

impl ContentStore {
    /// Create a store rooted at `root`, reading `.mdx` files
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Use a different content file extension (with or without the dot)
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Content directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `slug`
    pub fn path_for(&self, slug: &str) -> PathBuf {
        self.root.join(format!("{}.{}", slug, self.extension))
    }

    /// Load every post, newest first.
    ///
    /// Returns an empty list when the directory does not exist. Only regular
    /// files carrying the content extension are read; anything else in the
    /// directory is skipped.
    pub fn list_all(&self) -> Result<Vec<Post>, StoreError> {
        match fs::metadata(&self.root) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(StoreError::io(
                    &self.root,
                    io::Error::other("content root is not a directory"),
                ))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("Content directory {:?} does not exist", self.root);
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::io(&self.root, e)),
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(self.root.as_path()).to_path_buf();
                StoreError::io(path, e.into())
            })?;
            let path = entry.path();

            let slug = match self.slug_for(path) {
                Some(slug) if entry.file_type().is_file() => slug,
                _ => {
                    tracing::debug!("Skipping non-content entry {:?}", path);
                    continue;
                }
            };

            posts.push(self.read_post(path, slug)?);
        }

        sort_by_date_desc(&mut posts);

        tracing::debug!("Loaded {} posts from {:?}", posts.len(), self.root);
        Ok(posts)
    }

    /// Load the post stored under `slug`, or `None` when there is no such file
    pub fn get_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError> {
        if !is_safe_slug(slug) {
            tracing::debug!("Rejecting slug {:?}", slug);
            return Ok(None);
        }

        let path = self.path_for(slug);
        match fs::read_to_string(&path) {
            Ok(source) => parse_post(&path, slug.to_string(), &source).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn read_post(&self, path: &Path, slug: String) -> Result<Post, StoreError> {
        let source = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        parse_post(path, slug, &source)
    }

    /// Derive the slug of a directory entry, if it is a content file
    fn slug_for(&self, path: &Path) -> Option<String> {
        let name = path.file_name()?.to_str()?;
        if name.starts_with('.') {
            return None;
        }
        let stem = name.strip_suffix(&self.extension)?.strip_suffix('.')?;
        if !is_safe_slug(stem) {
            return None;
        }
        Some(stem.to_string())
    }
}

fn parse_post(path: &Path, slug: String, source: &str) -> Result<Post, StoreError> {
    let (fm, body) = FrontMatter::parse(source).map_err(|source| StoreError::FrontMatter {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Post::from_parts(slug, fm, body.to_string()))
}

/// A slug must name a file directly inside the content root
fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn post_file(title: &str, date: &str, category: &str) -> String {
        format!(
            "---\ntitle: {}\ndate: \"{}\"\ncategory: {}\n---\nBody of {}\n",
            title, date, category, title
        )
    }

    #[test]
    fn test_missing_directory_lists_nothing() {
        let tmp = TempDir::new().unwrap();
        let store = ContentStore::new(tmp.path().join("does-not-exist"));

        assert!(store.list_all().unwrap().is_empty());
        assert_eq!(store.get_by_slug("anything").unwrap(), None);
    }

    #[test]
    fn test_list_all_orders_by_date_desc() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.mdx", &post_file("A", "2023-01-01", "Tech"));
        write(tmp.path(), "b.mdx", &post_file("B", "2023-06-15", "Tech"));
        write(tmp.path(), "c.mdx", &post_file("C", "2022-12-31", "Tech"));

        let posts = ContentStore::new(tmp.path()).list_all().unwrap();
        let dates: Vec<_> = posts.iter().map(|p| p.date.as_deref().unwrap()).collect();
        assert_eq!(dates, vec!["2023-06-15", "2023-01-01", "2022-12-31"]);
    }

    #[test]
    fn test_equal_dates_keep_file_name_order() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "zeta.mdx", &post_file("Zeta", "2024-01-01", "X"));
        write(tmp.path(), "alpha.mdx", &post_file("Alpha", "2024-01-01", "X"));

        let posts = ContentStore::new(tmp.path()).list_all().unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_non_content_entries_are_skipped() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "post.mdx", &post_file("Post", "2024-01-01", "X"));
        write(tmp.path(), "notes.txt", "not a post");
        write(tmp.path(), "README", "no extension");
        write(tmp.path(), ".hidden.mdx", "---\nunterminated");
        fs::create_dir(tmp.path().join("drafts.mdx")).unwrap();

        let posts = ContentStore::new(tmp.path()).list_all().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "post");
    }

    #[test]
    fn test_custom_extension() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "one.md", &post_file("One", "2024-01-01", "X"));
        write(tmp.path(), "two.mdx", &post_file("Two", "2024-01-01", "X"));

        let store = ContentStore::new(tmp.path()).with_extension(".md");
        let posts = store.list_all().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "one");
        assert_eq!(store.path_for("one"), tmp.path().join("one.md"));
    }

    #[test]
    fn test_get_by_slug_round_trip() {
        let tmp = TempDir::new().unwrap();
        let body = "# Heading\n\nSome *MDX* with <GlassCard>inside</GlassCard>\n\n---\n\ntrailing";
        let source = format!(
            "---\ntitle: Hello\ndate: \"2023-06-15\"\nauthor: Jane Doe\nexcerpt: Short\nimage: https://example.com/a.png\ncategory: Tech\nreadTime: 5 min read\n---\n{}",
            body
        );
        write(tmp.path(), "hello-world.mdx", &source);

        let post = ContentStore::new(tmp.path())
            .get_by_slug("hello-world")
            .unwrap()
            .unwrap();

        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.title.as_deref(), Some("Hello"));
        assert_eq!(post.date.as_deref(), Some("2023-06-15"));
        assert_eq!(post.author.as_deref(), Some("Jane Doe"));
        assert_eq!(post.excerpt.as_deref(), Some("Short"));
        assert_eq!(post.image.as_deref(), Some("https://example.com/a.png"));
        assert_eq!(post.category.as_deref(), Some("Tech"));
        assert_eq!(post.read_time.as_deref(), Some("5 min read"));
        assert_eq!(post.content, body);
    }

    #[test]
    fn test_list_and_lookup_agree() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "first.mdx", &post_file("First", "2024-03-01", "A"));
        write(tmp.path(), "second.mdx", &post_file("Second", "2024-04-01", "B"));

        let store = ContentStore::new(tmp.path());
        for post in store.list_all().unwrap() {
            assert_eq!(store.get_by_slug(&post.slug).unwrap(), Some(post));
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_listing_skips_slugs_lookup_rejects() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "good.mdx", &post_file("Good", "2024-01-01", "X"));
        write(tmp.path(), "a\\b.mdx", &post_file("Backslash", "2024-02-01", "X"));
        write(tmp.path(), "what?now.mdx", &post_file("Question", "2024-03-01", "X"));

        let store = ContentStore::new(tmp.path());
        let posts = store.list_all().unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["what?now", "good"]);
        for post in posts {
            assert_eq!(store.get_by_slug(&post.slug).unwrap(), Some(post));
        }
        assert_eq!(store.get_by_slug("a\\b").unwrap(), None);
    }

    #[test]
    fn test_missing_fields_stay_absent() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "bare.mdx", "Just a body");

        let post = ContentStore::new(tmp.path())
            .get_by_slug("bare")
            .unwrap()
            .unwrap();
        assert_eq!(post.title, None);
        assert_eq!(post.date, None);
        assert_eq!(post.category, None);
        assert_eq!(post.content, "Just a body");
    }

    #[test]
    fn test_unknown_slug_is_absent() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "real.mdx", &post_file("Real", "2024-01-01", "X"));

        let store = ContentStore::new(tmp.path());
        assert_eq!(store.get_by_slug("missing").unwrap(), None);
        assert_eq!(store.get_by_slug("real.mdx").unwrap(), None);
    }

    #[test]
    fn test_unsafe_slugs_are_absent() {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("posts");
        fs::create_dir(&content).unwrap();
        write(tmp.path(), "secret.mdx", &post_file("Secret", "2024-01-01", "X"));

        let store = ContentStore::new(&content);
        assert_eq!(store.get_by_slug("../secret").unwrap(), None);
        assert_eq!(store.get_by_slug("").unwrap(), None);
        assert_eq!(store.get_by_slug(".hidden").unwrap(), None);
    }

    #[test]
    fn test_malformed_frontmatter_is_reported() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "broken.mdx", "---\ntitle: Broken\nno closing marker\n");

        let store = ContentStore::new(tmp.path());

        let err = store.get_by_slug("broken").unwrap_err();
        assert!(matches!(
            err,
            StoreError::FrontMatter {
                source: FrontMatterError::Unterminated,
                ..
            }
        ));
        assert!(store.list_all().is_err());
    }

    #[test]
    fn test_root_that_is_a_file_is_an_io_error() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("posts");
        fs::write(&file, "not a directory").unwrap();

        let result = ContentStore::new(&file).list_all();
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }
}
