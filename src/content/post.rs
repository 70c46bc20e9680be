//! Post model

use serde::Serialize;
use std::path::PathBuf;

use super::SourceFormat;

/// Date used when a source declares none (or an invalid one)
pub const FALLBACK_DATE: &str = "1970-01-01";

/// An indexed blog post
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// URL-friendly name derived from the source path
    pub slug: String,

    pub title: String,

    pub excerpt: String,

    /// `YYYY-MM-DD`
    pub date: String,

    /// Declared tags followed by auto-hashtags, without duplicates
    pub tags: Vec<String>,

    /// Declared topics only
    pub topics: Vec<String>,

    /// Auto-extracted keywords, most frequent first
    pub auto_hashtags: Vec<String>,

    /// Cover image reference
    pub cover: Option<String>,

    /// Plain text used for search and snippets, never for display
    pub body: String,

    /// What the render layer needs to display the original content
    pub render: RenderSource,
}

impl Post {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn has_topic(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t == topic)
    }

    /// Route of the post page
    pub fn route(&self) -> String {
        format!("/blog/{}", self.slug)
    }
}

/// Handle to the unstripped source, carried through for the render layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSource {
    /// Full source file path
    pub path: PathBuf,

    /// Source file path relative to the content root
    pub source: String,

    pub format: SourceFormat,

    /// Body as written, header removed
    #[serde(skip)]
    pub raw: String,
}
