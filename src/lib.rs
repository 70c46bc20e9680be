//! blog-index: content indexer and fuzzy search for a markdown blog
//!
//! This crate scans a content directory of markdown and component sources,
//! parses their front-matter, derives slugs and auto-hashtags, and serves the
//! resulting post collection to an in-process search engine and to a batch
//! generator that writes `sitemap.xml` and `rss.xml`.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod search;

pub use error::IndexError;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use content::{ContentIndex, ContentLoader, KeywordExtractor, Stopwords};
use search::{SearchEngine, SearchOptions};

/// The main blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content root
    pub content_dir: PathBuf,
    /// Output directory for generated feeds
    pub public_dir: PathBuf,
    extractor: KeywordExtractor,
}

impl Blog {
    /// Open a blog rooted at `base_dir`, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();
        config.validate()?;

        Self::with_config(base_dir, config)
    }

    /// Open a blog with an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();

        let stopwords = match &config.hashtags.stopwords {
            Some(path) => {
                let path = base_dir.join(path);
                Stopwords::from_file(&path)
                    .with_context(|| format!("Failed to load stopwords from {:?}", path))?
            }
            None => Stopwords::german(),
        };
        let extractor = KeywordExtractor::new(Arc::new(stopwords))
            .with_min_token_length(config.hashtags.min_token_length);

        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            public_dir,
            extractor,
        })
    }

    pub fn extractor(&self) -> &KeywordExtractor {
        &self.extractor
    }

    /// A loader over the configured content root
    pub fn loader(&self) -> ContentLoader<'_> {
        ContentLoader::new(&self.content_dir, &self.extractor)
            .with_max_hashtags(self.config.hashtags.max)
    }

    /// Build the index for in-process use; never fails
    pub fn load_index(&self) -> ContentIndex {
        ContentIndex::build(&self.loader())
    }

    /// Build the index for batch use; discovery failures are errors
    pub fn try_load_index(&self) -> Result<ContentIndex> {
        let index = ContentIndex::try_build(&self.loader(), self.config.strict_slugs)
            .with_context(|| format!("Failed to index {:?}", self.content_dir))?;
        Ok(index)
    }

    /// A search engine over a snapshot of the index
    pub fn search_engine(&self, index: &ContentIndex) -> SearchEngine {
        SearchEngine::new(index.all_posts(), SearchOptions::from(&self.config.search))
    }
}
