//! Remove generated feeds

use anyhow::{Context, Result};
use std::fs;

use crate::generator::{FEED_FILE, SITEMAP_FILE};
use crate::Blog;

/// Delete the sitemap and the feed, and the public directory once empty
pub fn run(blog: &Blog) -> Result<()> {
    for name in [SITEMAP_FILE, FEED_FILE] {
        let path = blog.public_dir.join(name);
        if path.exists() {
            fs::remove_file(&path).with_context(|| format!("Failed to delete {:?}", path))?;
            tracing::info!("Deleted: {:?}", path);
        }
    }

    if blog.public_dir.is_dir() && fs::read_dir(&blog.public_dir)?.next().is_none() {
        fs::remove_dir(&blog.public_dir)?;
        tracing::info!("Deleted: {:?}", blog.public_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_clean_keeps_foreign_files() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::with_config(dir.path(), SiteConfig::default()).unwrap();
        fs::create_dir_all(&blog.public_dir).unwrap();
        fs::write(blog.public_dir.join(SITEMAP_FILE), "x").unwrap();
        fs::write(blog.public_dir.join(FEED_FILE), "x").unwrap();
        fs::write(blog.public_dir.join("index.html"), "x").unwrap();

        run(&blog).unwrap();
        assert!(!blog.public_dir.join(SITEMAP_FILE).exists());
        assert!(!blog.public_dir.join(FEED_FILE).exists());
        assert!(blog.public_dir.join("index.html").exists());

        fs::remove_file(blog.public_dir.join("index.html")).unwrap();
        run(&blog).unwrap();
        assert!(!blog.public_dir.exists());
    }
}
