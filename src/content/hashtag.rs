//! Auto-hashtag extraction
//!
//! Turns free text into a ranked list of keyword-like tokens. Tokens are
//! lowercased and folded to their base letters (ä → a, ß → ss), filtered
//! against a stopword set and ranked by frequency, earlier tokens first on
//! ties.

use indexmap::IndexMap;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::{IndexError, Result};

const GERMAN_STOPWORDS: &str = include_str!("stopwords.de.txt");

/// Default number of hashtags kept per post
pub const DEFAULT_MAX_HASHTAGS: usize = 5;

/// Shortest token that can become a hashtag
pub const DEFAULT_MIN_TOKEN_LENGTH: usize = 3;

/// Characters a text is split on, besides whitespace
const DELIMITERS: &[char] = &[
    ',', '.', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}', '"', '«', '»', '„', '”', '“',
    '›', '‹',
];

/// Immutable stopword set, stored in normalized form
#[derive(Debug, Clone, Default)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// The built-in German list
    pub fn german() -> Self {
        Self::from_list(GERMAN_STOPWORDS)
    }

    /// Build from a newline-separated list
    pub fn from_list(list: &str) -> Self {
        Self::from_words(list.lines())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| normalize_token(w.as_ref().trim()))
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Load a newline-separated list from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let list = fs::read_to_string(path).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let stopwords = Self::from_list(&list);
        tracing::debug!("Loaded {} stopwords from {:?}", stopwords.len(), path);
        Ok(stopwords)
    }

    /// Check a token that has already been normalized
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Extracts ranked keywords from text
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    stopwords: Arc<Stopwords>,
    min_token_length: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(Arc::new(Stopwords::german()))
    }
}

impl KeywordExtractor {
    pub fn new(stopwords: Arc<Stopwords>) -> Self {
        Self {
            stopwords,
            min_token_length: DEFAULT_MIN_TOKEN_LENGTH,
        }
    }

    pub fn with_min_token_length(mut self, min_token_length: usize) -> Self {
        self.min_token_length = min_token_length;
        self
    }

    pub fn stopwords(&self) -> &Stopwords {
        &self.stopwords
    }

    /// Return up to `max` keywords, most frequent first
    pub fn extract(&self, text: &str, max: usize) -> Vec<String> {
        if text.is_empty() || max == 0 {
            return Vec::new();
        }

        let mut frequency: IndexMap<String, usize> = IndexMap::new();
        for token in tokenize(text) {
            if self.is_meaningful(&token) {
                *frequency.entry(token).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = frequency.into_iter().collect();
        // stable: ties keep first-occurrence order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().take(max).map(|(token, _)| token).collect()
    }

    fn is_meaningful(&self, token: &str) -> bool {
        if token.chars().count() < self.min_token_length {
            return false;
        }
        if self.stopwords.contains(token) {
            return false;
        }
        !token.chars().all(|c| c.is_ascii_digit())
    }
}

/// Split on whitespace and punctuation, drop markdown markers, normalize
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| c.is_whitespace() || DELIMITERS.contains(&c))
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            let cleaned: String = raw.chars().filter(|c| !matches!(c, '#' | '*' | '`')).collect();
            normalize_token(&cleaned)
        })
}

/// Lowercase, drop diacritics, fold ß to ss
pub fn normalize_token(value: &str) -> String {
    value
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .replace('ß', "ss")
}
