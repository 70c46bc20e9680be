//! Show a single post

use anyhow::Result;

use crate::content::Post;
use crate::Blog;

/// Print the metadata of the post with the given slug
pub fn run(blog: &Blog, slug: &str, as_json: bool) -> Result<()> {
    let index = blog.load_index();
    let Some(post) = index.post_by_slug(slug) else {
        anyhow::bail!("No post with slug '{}'", slug);
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(post)?);
    } else {
        print!("{}", describe(post));
    }
    Ok(())
}

fn describe(post: &Post) -> String {
    let mut out = format!("{}\n", post.title);
    out.push_str(&format!("  slug:     {}\n", post.slug));
    out.push_str(&format!("  route:    {}\n", post.route()));
    out.push_str(&format!("  date:     {}\n", post.date));
    out.push_str(&format!("  source:   {}\n", post.render.source));
    if !post.excerpt.is_empty() {
        out.push_str(&format!("  excerpt:  {}\n", post.excerpt));
    }
    if !post.tags.is_empty() {
        out.push_str(&format!("  tags:     {}\n", post.tags.join(", ")));
    }
    if !post.topics.is_empty() {
        out.push_str(&format!("  topics:   {}\n", post.topics.join(", ")));
    }
    if !post.auto_hashtags.is_empty() {
        let hashtags: Vec<_> = post.auto_hashtags.iter().map(|h| format!("#{}", h)).collect();
        out.push_str(&format!("  hashtags: {}\n", hashtags.join(" ")));
    }
    if let Some(cover) = &post.cover {
        out.push_str(&format!("  cover:    {}\n", cover));
    }
    out
}
