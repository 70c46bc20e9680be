//! List indexed content

use anyhow::Result;
use serde_json::json;

use crate::content::ContentIndex;
use crate::search::FacetIndex;
use crate::Blog;

/// List posts, tags or topics
pub fn run(blog: &Blog, content_type: &str, as_json: bool) -> Result<()> {
    let index = blog.load_index();
    print!("{}", render(&index, content_type, as_json)?);
    Ok(())
}

fn render(index: &ContentIndex, content_type: &str, as_json: bool) -> Result<String> {
    let mut out = String::new();

    match content_type {
        "post" | "posts" => {
            if as_json {
                out.push_str(&serde_json::to_string_pretty(index.posts())?);
                out.push('\n');
            } else {
                out.push_str(&format!("Posts ({}):\n", index.len()));
                for post in index.posts() {
                    out.push_str(&format!(
                        "  {} - {} [{}]\n",
                        post.date, post.title, post.slug
                    ));
                }
            }
        }
        "tag" | "tags" | "topic" | "topics" => {
            let facets = FacetIndex::build(index.posts());
            let (label, counts) = if content_type.starts_with("tag") {
                ("Tags", facets.tag_counts())
            } else {
                ("Topics", facets.topic_counts())
            };

            if as_json {
                let entries: Vec<_> = counts
                    .iter()
                    .map(|(name, count)| json!({ "name": name, "count": count }))
                    .collect();
                out.push_str(&serde_json::to_string_pretty(&entries)?);
                out.push('\n');
            } else {
                out.push_str(&format!("{} ({}):\n", label, counts.len()));
                for (name, count) in counts {
                    out.push_str(&format!("  {} ({})\n", name, count));
                }
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: posts, tags, topics",
                content_type
            );
        }
    }

    Ok(out)
}
