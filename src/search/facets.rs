//! Tag and topic facets

use indexmap::IndexMap;
use serde::Serialize;

use crate::content::Post;

/// Kind of facet a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetKind {
    Tag,
    Topic,
}

/// Active tag and topic selections
///
/// A post passes when it carries every active tag and every active topic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetFilter {
    tags: Vec<String>,
    topics: Vec<String>,
}

impl FacetFilter {
    pub fn new<T, P>(tags: T, topics: P) -> Self
    where
        T: IntoIterator<Item = String>,
        P: IntoIterator<Item = String>,
    {
        let mut filter = Self::default();
        for tag in tags {
            filter.select(FacetKind::Tag, tag);
        }
        for topic in topics {
            filter.select(FacetKind::Topic, topic);
        }
        filter
    }

    /// Add a value unless it is empty or already active
    fn select(&mut self, kind: FacetKind, value: String) {
        let values = self.values_mut(kind);
        if !value.is_empty() && !values.contains(&value) {
            values.push(value);
        }
    }

    /// Activate the value, or deactivate it when already active
    pub fn toggle(&mut self, kind: FacetKind, value: &str) {
        let values = self.values_mut(kind);
        if let Some(pos) = values.iter().position(|v| v == value) {
            values.remove(pos);
        } else if !value.is_empty() {
            values.push(value.to_string());
        }
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        self.toggle(FacetKind::Tag, tag);
    }

    pub fn toggle_topic(&mut self, topic: &str) {
        self.toggle(FacetKind::Topic, topic);
    }

    pub fn clear(&mut self) {
        self.tags.clear();
        self.topics.clear();
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn is_active(&self) -> bool {
        !self.tags.is_empty() || !self.topics.is_empty()
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.tags.iter().all(|t| post.has_tag(t)) && self.topics.iter().all(|t| post.has_topic(t))
    }

    /// Keep the posts that pass, in their original order
    pub fn apply<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        posts.iter().filter(|p| self.matches(p)).collect()
    }

    fn values_mut(&mut self, kind: FacetKind) -> &mut Vec<String> {
        match kind {
            FacetKind::Tag => &mut self.tags,
            FacetKind::Topic => &mut self.topics,
        }
    }
}

/// Usage counts for every tag and topic
#[derive(Debug, Clone, Default, Serialize)]
pub struct FacetIndex {
    tags: Vec<(String, usize)>,
    topics: Vec<(String, usize)>,
}

impl FacetIndex {
    pub fn build(posts: &[Post]) -> Self {
        let mut tags: IndexMap<String, usize> = IndexMap::new();
        let mut topics: IndexMap<String, usize> = IndexMap::new();

        for post in posts {
            for tag in &post.tags {
                *tags.entry(tag.clone()).or_insert(0) += 1;
            }
            for topic in &post.topics {
                *topics.entry(topic.clone()).or_insert(0) += 1;
            }
        }

        Self {
            tags: by_count(tags),
            topics: by_count(topics),
        }
    }

    /// Tags with their post counts, most used first
    pub fn tag_counts(&self) -> &[(String, usize)] {
        &self.tags
    }

    /// Topics with their post counts, most used first
    pub fn topic_counts(&self) -> &[(String, usize)] {
        &self.topics
    }

    /// Tag names in alphabetical order
    pub fn sorted_tags(&self) -> Vec<&str> {
        sorted_names(&self.tags)
    }

    /// Topic names in alphabetical order
    pub fn sorted_topics(&self) -> Vec<&str> {
        sorted_names(&self.topics)
    }
}

fn by_count(counts: IndexMap<String, usize>) -> Vec<(String, usize)> {
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn sorted_names(counts: &[(String, usize)]) -> Vec<&str> {
    let mut names: Vec<&str> = counts.iter().map(|(name, _)| name.as_str()).collect();
    names.sort_unstable();
    names
}
