//! Content loader - discovers sources and builds the post index

use chrono::NaiveDate;
use indexmap::IndexSet;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::frontmatter::{self, SourceFormat};
use super::hashtag::{KeywordExtractor, DEFAULT_MAX_HASHTAGS};
use super::post::{Post, RenderSource, FALLBACK_DATE};
use super::slug::derive_slug;
use crate::error::{IndexError, Result};

/// Loads posts from a content root
pub struct ContentLoader<'a> {
    root: PathBuf,
    extractor: &'a KeywordExtractor,
    max_hashtags: usize,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new<P: AsRef<Path>>(root: P, extractor: &'a KeywordExtractor) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extractor,
            max_hashtags: DEFAULT_MAX_HASHTAGS,
        }
    }

    pub fn with_max_hashtags(mut self, max_hashtags: usize) -> Self {
        self.max_hashtags = max_hashtags;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List every recognized source under the root, sorted by path
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(IndexError::ContentRootMissing(self.root.clone()));
        }

        let sources = WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| !e.file_name().to_string_lossy().starts_with('.'))
            .map(|e| e.into_path())
            .filter(|p| SourceFormat::from_path(p).is_some())
            .collect();

        Ok(sources)
    }

    /// Load all posts, in discovery order
    ///
    /// A source that cannot be read is skipped with a warning.
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let mut posts = Vec::new();

        for path in self.discover()? {
            match self.load_post(&path) {
                Ok(post) => posts.push(post),
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", path, e);
                }
            }
        }

        Ok(posts)
    }

    /// Load a single post from a file
    pub fn load_post(&self, path: &Path) -> Result<Post> {
        let format = SourceFormat::from_path(path).unwrap_or(SourceFormat::Markdown);
        let content = fs::read_to_string(path).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed = frontmatter::parse(&content, format);
        let fm = &parsed.front_matter;

        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let slug = derive_slug(relative);
        tracing::debug!("Parsed {:?} as '{}' ({} fields)", relative, slug, fm.len());

        let auto_hashtags = self.extractor.extract(&parsed.body, self.max_hashtags);

        let declared_tags = fm.list("tags").unwrap_or_default();
        let tags: IndexSet<String> = declared_tags
            .iter()
            .chain(auto_hashtags.iter())
            .filter(|t| !t.is_empty())
            .cloned()
            .collect();

        let topics: IndexSet<String> = fm
            .list("topics")
            .unwrap_or_default()
            .iter()
            .filter(|t| !t.is_empty())
            .cloned()
            .collect();

        let date = match fm.text("date") {
            Some(raw) => normalize_date(&raw).unwrap_or_else(|| {
                tracing::warn!("Invalid date {:?} in {:?}, using {}", raw, path, FALLBACK_DATE);
                FALLBACK_DATE.to_string()
            }),
            None => FALLBACK_DATE.to_string(),
        };

        Ok(Post {
            title: fm
                .text("title")
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| slug.clone()),
            excerpt: fm.text("excerpt").unwrap_or_default(),
            date,
            tags: tags.into_iter().collect(),
            topics: topics.into_iter().collect(),
            auto_hashtags,
            cover: fm.text("cover").filter(|c| !c.is_empty()),
            render: RenderSource {
                path: path.to_path_buf(),
                source: relative.to_string_lossy().to_string(),
                format,
                raw: parsed.raw_body,
            },
            body: parsed.body,
            slug,
        })
    }
}

/// Two sources that derive the same slug
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugCollision {
    pub slug: String,
    /// Source that comes first in the collection and wins lookups
    pub first: PathBuf,
    pub second: PathBuf,
}

impl From<SlugCollision> for IndexError {
    fn from(c: SlugCollision) -> Self {
        IndexError::SlugCollision {
            slug: c.slug,
            first: c.first,
            second: c.second,
        }
    }
}

/// The built post collection, newest first
#[derive(Debug, Clone, Default)]
pub struct ContentIndex {
    posts: Vec<Post>,
    collisions: Vec<SlugCollision>,
}

impl ContentIndex {
    /// Build the index for in-process use
    ///
    /// Never fails: a missing root or an empty directory gives an empty index.
    pub fn build(loader: &ContentLoader<'_>) -> Self {
        match Self::try_build(loader, false) {
            Ok(index) => index,
            Err(e) => {
                tracing::warn!("{}; continuing with an empty index", e);
                Self::default()
            }
        }
    }

    /// Build the index, reporting discovery failures
    ///
    /// With `strict_slugs`, the first slug collision is returned as an error.
    pub fn try_build(loader: &ContentLoader<'_>, strict_slugs: bool) -> Result<Self> {
        let index = Self::from_posts(loader.load_posts()?);

        if strict_slugs {
            if let Some(collision) = index.collisions.first() {
                return Err(collision.clone().into());
            }
        }

        tracing::info!("Indexed {} posts from {:?}", index.len(), loader.root());
        Ok(index)
    }

    /// Order posts by date, newest first, and record slug collisions
    pub fn from_posts(mut posts: Vec<Post>) -> Self {
        // stable: equal dates keep discovery order
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        let collisions = find_collisions(&posts);
        Self { posts, collisions }
    }

    /// A fresh copy of every post
    pub fn all_posts(&self) -> Vec<Post> {
        self.posts.clone()
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// First post with the given slug
    pub fn post_by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    pub fn collisions(&self) -> &[SlugCollision] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

fn find_collisions(posts: &[Post]) -> Vec<SlugCollision> {
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    let mut collisions = Vec::new();

    for post in posts {
        let path = post.render.path.as_path();
        if let Some(first) = seen.get(post.slug.as_str()) {
            tracing::warn!(
                "Slug '{}' of {:?} is already used by {:?}",
                post.slug,
                path,
                first
            );
            collisions.push(SlugCollision {
                slug: post.slug.clone(),
                first: first.to_path_buf(),
                second: path.to_path_buf(),
            });
        } else {
            seen.insert(&post.slug, path);
        }
    }

    collisions
}

/// Normalize a front-matter date to `YYYY-MM-DD`
///
/// Timestamps such as `2024-03-05T10:00:00Z` keep their calendar day.
fn normalize_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn fixture() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "react-hooks.md",
            "---\ntitle: React Hooks\ndate: 2025-03-01\ntags: [\"react\", \"hooks\"]\ntopics: [\"Frontend\"]\nexcerpt: \"Hooks erklärt\"\n---\n\nHooks machen React einfacher. Hooks sind Funktionen.\n",
        );
        write(
            dir.path(),
            "2025/vite setup.mdx",
            "---\ntitle: Vite Setup\ndate: 2025-04-10\n---\n\nVite startet schnell.\n",
        );
        write(
            dir.path(),
            "deploy.jsx",
            "/*\n---\ntitle: \"Deployment\"\ndate: \"2025-05-28\"\ntopics: ['Deployment']\ncover: \"/images/cover.svg\"\n---\n*/\n\nexport default function Deploy() {\n  return <p>Vercel Vercel Preview</p>;\n}\n",
        );
        write(dir.path(), "notes.txt", "not content");
        write(dir.path(), "untitled.md", "Nur Text ohne Header.\n");
        dir
    }

    #[test]
    fn test_build_index() {
        let dir = fixture();
        let extractor = KeywordExtractor::default();
        let loader = ContentLoader::new(dir.path(), &extractor);
        let index = ContentIndex::build(&loader);

        let slugs: Vec<_> = index.posts().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(
            slugs,
            vec!["deploy", "2025-vite-setup", "react-hooks", "untitled"]
        );

        let hooks = index.post_by_slug("react-hooks").unwrap();
        assert_eq!(hooks.title, "React Hooks");
        assert_eq!(hooks.excerpt, "Hooks erklärt");
        assert_eq!(hooks.topics, vec!["Frontend"]);
        assert_eq!(hooks.tags[..2], ["react".to_string(), "hooks".to_string()]);
        assert_eq!(hooks.auto_hashtags[0], "hooks");
        assert_eq!(hooks.tags.iter().filter(|t| *t == "hooks").count(), 1);

        let deploy = index.post_by_slug("deploy").unwrap();
        assert_eq!(deploy.date, "2025-05-28");
        assert_eq!(deploy.cover.as_deref(), Some("/images/cover.svg"));
        assert_eq!(deploy.render.format, SourceFormat::Component);
        assert_eq!(deploy.auto_hashtags[0], "vercel");

        let untitled = index.post_by_slug("untitled").unwrap();
        assert_eq!(untitled.title, "untitled");
        assert_eq!(untitled.excerpt, "");
        assert_eq!(untitled.date, FALLBACK_DATE);
        assert!(untitled.topics.is_empty());

        assert!(index.post_by_slug("notes").is_none());
        assert!(index.collisions().is_empty());
    }

    #[test]
    fn test_all_posts_is_a_copy() {
        let dir = fixture();
        let extractor = KeywordExtractor::default();
        let index = ContentIndex::build(&ContentLoader::new(dir.path(), &extractor));

        let mut first = index.all_posts();
        first[0].title = "changed".to_string();
        first.clear();

        let second = index.all_posts();
        assert_eq!(second.len(), 4);
        assert_eq!(second[0].title, "Deployment");
    }

    #[test]
    fn test_empty_and_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = KeywordExtractor::default();

        let index = ContentIndex::build(&ContentLoader::new(dir.path(), &extractor));
        assert!(index.is_empty());

        let missing = ContentLoader::new(dir.path().join("nope"), &extractor);
        assert!(ContentIndex::build(&missing).is_empty());
        assert!(matches!(
            ContentIndex::try_build(&missing, false),
            Err(IndexError::ContentRootMissing(_))
        ));
    }

    #[test]
    fn test_slug_collisions() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "My Post.md", "---\ntitle: Upper\n---\n\nEins\n");
        write(dir.path(), "my-post.md", "---\ntitle: Lower\n---\n\nZwei\n");
        let extractor = KeywordExtractor::default();
        let loader = ContentLoader::new(dir.path(), &extractor);

        let index = ContentIndex::build(&loader);
        assert_eq!(index.len(), 2);
        assert_eq!(index.collisions().len(), 1);
        assert_eq!(index.collisions()[0].slug, "my-post");
        assert_eq!(index.post_by_slug("my-post").unwrap().title, "Upper");

        assert!(matches!(
            ContentIndex::try_build(&loader, true),
            Err(IndexError::SlugCollision { .. })
        ));
    }

    #[test]
    fn test_dates_sort_stable_and_normalize() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.md", "---\ndate: 2024-01-01\n---\n\nA\n");
        write(dir.path(), "b.md", "---\ndate: 2024-01-01\n---\n\nB\n");
        write(dir.path(), "c.md", "---\ndate: 2024-13-45\n---\n\nC\n");
        write(dir.path(), "d.md", "---\ndate: 2024-06-30\n---\n\nD\n");
        let extractor = KeywordExtractor::default();
        let index = ContentIndex::build(&ContentLoader::new(dir.path(), &extractor));

        let order: Vec<_> = index
            .posts()
            .iter()
            .map(|p| (p.slug.as_str(), p.date.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("d", "2024-06-30"),
                ("a", "2024-01-01"),
                ("b", "2024-01-01"),
                ("c", FALLBACK_DATE),
            ]
        );
    }

    #[test]
    fn test_timestamp_dates_keep_their_day() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "old.md", "---\ndate: 2023-12-24\n---\n\nOld\n");
        write(dir.path(), "stamped.md", "---\ndate: 2024-03-05T10:00:00Z\n---\n\nNew\n");
        write(dir.path(), "spaced.md", "---\ndate: 2024-02-01 08:30\n---\n\nMid\n");
        let extractor = KeywordExtractor::default();
        let index = ContentIndex::build(&ContentLoader::new(dir.path(), &extractor));

        let order: Vec<_> = index
            .posts()
            .iter()
            .map(|p| (p.slug.as_str(), p.date.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("stamped", "2024-03-05"),
                ("spaced", "2024-02-01"),
                ("old", "2023-12-24"),
            ]
        );
        assert_eq!(normalize_date("2024-3-5"), None);
    }

    #[test]
    fn test_blank_title_falls_back_to_slug() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "no-title.md", "---\ntitle:\ndate: 2024-01-01\n---\n\nText\n");
        write(dir.path(), "quoted.md", "---\ntitle: \"  \"\n---\n\nText\n");
        let extractor = KeywordExtractor::default();
        let index = ContentIndex::build(&ContentLoader::new(dir.path(), &extractor));

        assert_eq!(index.post_by_slug("no-title").unwrap().title, "no-title");
        assert_eq!(index.post_by_slug("quoted").unwrap().title, "quoted");
    }

    #[test]
    fn test_malformed_header_does_not_abort() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "broken.md", "---\ntags: [\"a\", b\ntitle: Broken\n");
        write(dir.path(), "bad-array.md", "---\ntags: [oops]\n---\n\nText\n");
        let extractor = KeywordExtractor::default();
        let index = ContentIndex::build(&ContentLoader::new(dir.path(), &extractor));

        assert_eq!(index.len(), 2);
        let broken = index.post_by_slug("broken").unwrap();
        assert_eq!(broken.title, "broken");
        let bad = index.post_by_slug("bad-array").unwrap();
        assert!(bad.tags.iter().all(|t| t != "oops"));
    }
}
