//! Fuzzy full-text search over the post index
//!
//! The engine scores every post against a free-text query across the
//! `title`, `excerpt`, `body`, `tags` and `topics` fields. Lower scores are
//! better. Facet filters are applied to the ranked results afterwards and do
//! not influence scoring.

pub mod debounce;
pub mod facets;
pub mod fuzzy;
pub mod snippet;

use serde::Serialize;

pub use debounce::QueryDebouncer;
pub use facets::{FacetFilter, FacetIndex, FacetKind};
pub use fuzzy::{FuzzyMatcher, Pattern};
pub use snippet::{snippet, snippet_with};

use crate::config::SearchConfig;
use crate::content::Post;

/// Score reported for every post when the query is empty
pub const NEUTRAL_SCORE: f64 = 1.0;

/// Search tuning
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    /// Match looseness, 0 = exact
    pub threshold: f64,
    /// Treat a match anywhere in a field the same as one at its start
    pub ignore_location: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.35,
            ignore_location: true,
        }
    }
}

impl From<&SearchConfig> for SearchOptions {
    fn from(config: &SearchConfig) -> Self {
        Self {
            threshold: config.threshold,
            ignore_location: config.ignore_location,
        }
    }
}

/// A ranked search result
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    pub post: &'a Post,
    /// 0 is a perfect match
    pub score: f64,
}

impl SearchHit<'_> {
    /// Score flipped for display, higher is better
    pub fn relevance(&self) -> f64 {
        1.0 - self.score
    }
}

/// One searchable value of a post, lowercased, with its length norm
#[derive(Debug, Clone)]
struct Field {
    text: String,
    norm: f64,
}

impl Field {
    fn new(value: &str) -> Option<Self> {
        if value.trim().is_empty() {
            return None;
        }
        Some(Self {
            text: value.to_lowercase(),
            norm: field_norm(value),
        })
    }
}

/// Search index over an immutable post collection
#[derive(Debug, Clone)]
pub struct SearchEngine {
    posts: Vec<Post>,
    fields: Vec<Vec<Field>>,
    matcher: FuzzyMatcher,
}

impl SearchEngine {
    /// Index the posts; their order is the order of unranked results
    pub fn new(posts: Vec<Post>, options: SearchOptions) -> Self {
        let fields = posts.iter().map(searchable_fields).collect();
        let matcher = FuzzyMatcher::new(options.threshold).with_location(options.ignore_location);
        Self {
            posts,
            fields,
            matcher,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Rank posts against the query
    ///
    /// An empty query returns every post in collection order with
    /// [`NEUTRAL_SCORE`]. Otherwise only matching posts are returned, best
    /// first, ties in collection order.
    pub fn search(&self, query: &str) -> Vec<SearchHit<'_>> {
        let query = query.trim();
        if query.is_empty() {
            return self
                .posts
                .iter()
                .map(|post| SearchHit {
                    post,
                    score: NEUTRAL_SCORE,
                })
                .collect();
        }

        let Some(pattern) = self.matcher.pattern(query) else {
            return Vec::new();
        };
        let mut hits: Vec<SearchHit<'_>> = self
            .posts
            .iter()
            .zip(&self.fields)
            .filter_map(|(post, fields)| {
                self.score_fields(&pattern, fields)
                    .map(|score| SearchHit { post, score })
            })
            .collect();

        hits.sort_by(|a, b| a.score.total_cmp(&b.score));
        tracing::debug!("Query {:?} matched {} posts", query, hits.len());
        hits
    }

    /// Rank posts, then keep those passing the facet filter
    pub fn search_filtered(&self, query: &str, filter: &FacetFilter) -> Vec<SearchHit<'_>> {
        let mut hits = self.search(query);
        if filter.is_active() {
            hits.retain(|hit| filter.matches(hit.post));
        }
        hits
    }

    /// Product of `score ^ norm` over every matching field
    fn score_fields(&self, pattern: &Pattern, fields: &[Field]) -> Option<f64> {
        let mut total = 1.0;
        let mut matched = false;

        for field in fields {
            if let Some(score) = self.matcher.score(pattern, &field.text) {
                matched = true;
                let score = if score == 0.0 { f64::EPSILON } else { score };
                total *= score.powf(field.norm);
            }
        }

        matched.then_some(total)
    }
}

/// Field-length norm: `1 / sqrt(token_count)`, rounded to three decimals
///
/// Matches inside long fields count for less than matches in short ones.
pub fn field_norm(text: &str) -> f64 {
    let tokens = text.split(' ').filter(|t| !t.is_empty()).count().max(1);
    ((1.0 / (tokens as f64).sqrt()) * 1000.0).round() / 1000.0
}

fn searchable_fields(post: &Post) -> Vec<Field> {
    [post.title.as_str(), post.excerpt.as_str(), post.body.as_str()]
        .into_iter()
        .chain(post.tags.iter().map(String::as_str))
        .chain(post.topics.iter().map(String::as_str))
        .filter_map(Field::new)
        .collect()
}
