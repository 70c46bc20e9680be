//! Create a new post

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::content::slug::slugify;
use crate::Blog;

/// Scaffold a markdown post under the content root
pub fn create_post(blog: &Blog, title: &str, topics: &[String]) -> Result<PathBuf> {
    let slug = slugify(title.trim());
    if slug.trim_matches('-').is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    fs::create_dir_all(&blog.content_dir)
        .with_context(|| format!("Failed to create {:?}", blog.content_dir))?;

    let file_path = blog.content_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let now = chrono::Local::now();
    let content = format!(
        "---\ntitle: {}\ndate: {}\nexcerpt: \ntags: []\ntopics: {}\n---\n\n",
        title.trim(),
        now.format("%Y-%m-%d"),
        serde_json::to_string(topics)?
    );

    fs::write(&file_path, content).with_context(|| format!("Failed to write {:?}", file_path))?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
