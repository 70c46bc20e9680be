//! Search the index from the command line

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::SearchConfig;
use crate::search::{snippet_with, FacetFilter, QueryDebouncer, SearchHit};
use crate::Blog;

/// Run one query and print the ranked results
pub fn run(blog: &Blog, query: &str, filter: &FacetFilter, limit: Option<usize>) -> Result<()> {
    let index = blog.load_index();
    let engine = blog.search_engine(&index);
    let hits = engine.search_filtered(query, filter);
    print!("{}", render_hits(&hits, query, limit, &blog.config.search));
    Ok(())
}

/// Read queries from stdin, one per line, and search once input settles
pub async fn interactive(blog: &Blog, filter: FacetFilter, limit: Option<usize>) -> Result<()> {
    let index = blog.load_index();
    let engine = Arc::new(blog.search_engine(&index));
    let settings = blog.config.search.clone();
    let settle = Duration::from_millis(settings.debounce_ms);

    println!("Searching {} posts. Type a query per line, Ctrl+D to quit.", index.len());

    let (debouncer, handle) = QueryDebouncer::spawn(settle, move |query| {
        let hits = engine.search_filtered(&query, &filter);
        print!("{}", render_hits(&hits, &query, limit, &settings));
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if !debouncer.push(line) {
            break;
        }
    }

    drop(debouncer);
    handle.await?;
    Ok(())
}

/// Format hits with their relevance and a body snippet
pub fn render_hits(
    hits: &[SearchHit<'_>],
    query: &str,
    limit: Option<usize>,
    settings: &SearchConfig,
) -> String {
    let query = query.trim();
    let shown = limit.unwrap_or(hits.len()).min(hits.len());

    let mut out = if query.is_empty() {
        format!("{} posts\n", hits.len())
    } else {
        format!("{} results for {:?}\n", hits.len(), query)
    };

    for hit in &hits[..shown] {
        out.push_str(&format!(
            "  {:.3}  {} [{}]\n",
            hit.relevance(),
            hit.post.title,
            hit.post.slug
        ));
        let snippet = snippet_with(
            &hit.post.body,
            query,
            settings.snippet_context,
            settings.snippet_fallback,
        );
        if !snippet.is_empty() {
            out.push_str(&format!("         {}\n", snippet));
        }
    }

    if shown < hits.len() {
        out.push_str(&format!("  ... {} more\n", hits.len() - shown));
    }
    out
}
