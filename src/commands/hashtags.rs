//! Auto-hashtags for a single file

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::content::{frontmatter, SourceFormat};
use crate::Blog;

/// Print the auto-hashtags extracted from one content file
pub fn run(blog: &Blog, file: &Path) -> Result<()> {
    for tag in extract(blog, file)? {
        println!("#{}", tag);
    }
    Ok(())
}

pub fn extract(blog: &Blog, file: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(file).with_context(|| format!("Failed to read {:?}", file))?;
    let format = SourceFormat::from_path(file).unwrap_or(SourceFormat::Markdown);
    let parsed = frontmatter::parse(&raw, format);
    Ok(blog
        .extractor()
        .extract(&parsed.body, blog.config.hashtags.max))
}
