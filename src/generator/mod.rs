//! Generator module - writes the sitemap and the RSS feed

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::content::{ContentIndex, Post};
use crate::Blog;

pub const SITEMAP_FILE: &str = "sitemap.xml";
pub const FEED_FILE: &str = "rss.xml";

/// Writes feed documents from a built content index
pub struct FeedGenerator {
    config: SiteConfig,
    public_dir: PathBuf,
}

impl FeedGenerator {
    pub fn new(blog: &Blog) -> Self {
        Self {
            config: blog.config.clone(),
            public_dir: blog.public_dir.clone(),
        }
    }

    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    /// Write `sitemap.xml` and `rss.xml` into the public directory
    pub fn generate(&self, index: &ContentIndex) -> Result<()> {
        fs::create_dir_all(&self.public_dir)
            .with_context(|| format!("Failed to create {:?}", self.public_dir))?;

        let now = Utc::now();
        self.write(SITEMAP_FILE, &self.sitemap(index.posts(), now))?;
        self.write(FEED_FILE, &self.rss(index.posts()))?;

        tracing::info!(
            "Wrote {} and {} for {} posts",
            SITEMAP_FILE,
            FEED_FILE,
            index.len()
        );
        Ok(())
    }

    fn write(&self, name: &str, contents: &str) -> Result<()> {
        let path = self.public_dir.join(name);
        fs::write(&path, contents).with_context(|| format!("Failed to write {:?}", path))?;
        tracing::debug!("Generated {:?}", path);
        Ok(())
    }

    /// Sitemap with the static routes first, then one entry per post
    pub fn sitemap(&self, posts: &[Post], now: DateTime<Utc>) -> String {
        let base = self.config.base_url();
        let generated = iso_timestamp(now);

        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');

        for route in &self.config.static_routes {
            push_url(&mut xml, &format!("{}{}", base, route), &generated);
        }
        for post in posts {
            push_url(
                &mut xml,
                &format!("{}{}", base, post.route()),
                &iso_timestamp(post_datetime(post)),
            );
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// RSS 2.0 channel with one item per post, in index order
    pub fn rss(&self, posts: &[Post]) -> String {
        let base = self.config.base_url();

        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<rss version="2.0">"#);
        xml.push('\n');
        xml.push_str("<channel>\n");
        xml.push_str(&format!("  <title>{}</title>\n", escape_xml(&self.config.title)));
        xml.push_str(&format!("  <link>{}</link>\n", escape_xml(base)));
        xml.push_str(&format!(
            "  <description>{}</description>\n",
            escape_xml(&self.config.description)
        ));

        for post in posts {
            let link = escape_xml(&format!("{}{}", base, post.route()));
            xml.push_str("  <item>\n");
            xml.push_str(&format!("    <title>{}</title>\n", cdata(&post.title)));
            xml.push_str(&format!("    <link>{}</link>\n", link));
            xml.push_str(&format!("    <guid>{}</guid>\n", link));
            xml.push_str(&format!(
                "    <description>{}</description>\n",
                cdata(&post.excerpt)
            ));
            xml.push_str(&format!(
                "    <pubDate>{}</pubDate>\n",
                post_datetime(post).format("%a, %d %b %Y %H:%M:%S GMT")
            ));
            xml.push_str("  </item>\n");
        }

        xml.push_str("</channel>\n");
        xml.push_str("</rss>\n");
        xml
    }
}

fn push_url(xml: &mut String, loc: &str, lastmod: &str) {
    xml.push_str("  <url>\n");
    xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(loc)));
    xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
    xml.push_str("  </url>\n");
}

/// Midnight UTC of the post date
fn post_datetime(post: &Post) -> DateTime<Utc> {
    // the default date is the epoch, same as an undated post
    let date = NaiveDate::parse_from_str(&post.date, "%Y-%m-%d").unwrap_or_default();
    date.and_time(NaiveTime::MIN).and_utc()
}

/// `2025-01-31T00:00:00.000Z`
fn iso_timestamp(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Wrap text in a CDATA section, splitting any embedded terminator
fn cdata(s: &str) -> String {
    format!("<![CDATA[{}]]>", s.replace("]]>", "]]]]><![CDATA[>"))
}
