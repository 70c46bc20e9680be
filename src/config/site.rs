//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configured site URL
pub const SITE_URL_ENV: &str = "SITE_URL";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub url: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    /// Routes listed in the sitemap ahead of the posts
    pub static_routes: Vec<String>,

    /// Abort the build when two sources derive the same slug
    pub strict_slugs: bool,

    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub hashtags: HashtagConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "React Lern-Blog".to_string(),
            description: "Kommentiertes Lernprojekt für React & Vite".to_string(),
            url: "https://example.com".to_string(),

            content_dir: "content/blog".to_string(),
            public_dir: "dist".to_string(),

            static_routes: vec![
                "/".to_string(),
                "/blog".to_string(),
                "/tags".to_string(),
                "/search".to_string(),
            ],

            strict_slugs: false,

            search: SearchConfig::default(),
            hashtags: HashtagConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides taken from the process environment
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(SITE_URL_ENV) {
            if !url.trim().is_empty() {
                tracing::debug!("Using site url from {}: {}", SITE_URL_ENV, url);
                self.url = url;
            }
        }
    }

    /// Reject values the indexer cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.search.threshold) {
            return Err(crate::IndexError::InvalidConfig(format!(
                "search.threshold must be within 0..=1, got {}",
                self.search.threshold
            ))
            .into());
        }
        if self.hashtags.max == 0 {
            return Err(crate::IndexError::InvalidConfig(
                "hashtags.max must be at least 1".to_string(),
            )
            .into());
        }
        Ok(())
    }

    /// Site URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// Fuzzy search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Match looseness, 0 = exact, 1 = anything
    pub threshold: f64,
    pub ignore_location: bool,
    /// Characters kept on each side of a snippet match
    pub snippet_context: usize,
    /// Snippet length when the query does not occur in the body
    pub snippet_fallback: usize,
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: 0.35,
            ignore_location: true,
            snippet_context: 60,
            snippet_fallback: 160,
            debounce_ms: 250,
        }
    }
}

/// Auto-hashtag configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HashtagConfig {
    pub max: usize,
    pub min_token_length: usize,
    /// Newline-separated stopword list; the built-in German list when unset
    pub stopwords: Option<PathBuf>,
}

impl Default for HashtagConfig {
    fn default() -> Self {
        Self {
            max: 5,
            min_token_length: 3,
            stopwords: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "content/blog");
        assert_eq!(config.search.threshold, 0.35);
        assert_eq!(config.hashtags.max, 5);
        assert_eq!(config.static_routes.len(), 4);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
url: https://blog.example.org/
search:
  threshold: 0.2
hashtags:
  max: 3
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.base_url(), "https://blog.example.org");
        assert_eq!(config.search.threshold, 0.2);
        assert_eq!(config.search.debounce_ms, 250);
        assert_eq!(config.hashtags.max, 3);
        assert_eq!(config.hashtags.min_token_length, 3);
    }

    #[test]
    fn test_load_rejects_bad_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "search:\n  threshold: 2.5\n").unwrap();
        let err = SiteConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("threshold"));
    }
}
