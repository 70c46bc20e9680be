//! Approximate substring matching
//!
//! Thin wrapper over the bitap matcher of `fuse-rust`. A score is the error
//! ratio of the best alignment (0 = exact), plus `offset / distance` when
//! location matters. A text equal to the pattern scores 0, any other accepted
//! match at least [`MIN_SCORE`].

use fuse_rust::Fuse;

/// Smallest score a non-identical match can get
pub const MIN_SCORE: f64 = 0.001;

/// Characters after which a location penalty reaches 1.0
const LOCATION_DISTANCE: i32 = 100;

/// Longest pattern the bitap matcher handles, in bytes
pub const MAX_PATTERN_LENGTH: usize = 32;

/// A lowercased query, ready for matching
pub struct Pattern {
    text: String,
    inner: fuse_rust::Pattern,
}

/// Threshold-bounded fuzzy matcher
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    threshold: f64,
    ignore_location: bool,
}

impl FuzzyMatcher {
    /// Create a matcher that accepts scores up to `threshold`
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            ignore_location: true,
        }
    }

    /// Penalize matches by their distance from the start of the text
    pub fn with_location(mut self, ignore_location: bool) -> Self {
        self.ignore_location = ignore_location;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Compile a query; `None` when it is blank
    ///
    /// Queries longer than [`MAX_PATTERN_LENGTH`] bytes are cut at a char
    /// boundary.
    pub fn pattern(&self, query: &str) -> Option<Pattern> {
        let query = query.trim().to_lowercase();
        let text = truncate(&query, MAX_PATTERN_LENGTH).to_string();
        let inner = self.fuse().create_pattern(&text)?;
        Some(Pattern { text, inner })
    }

    /// Score `text` (already lowercased) against the pattern
    ///
    /// Returns `None` when the best alignment is worse than the threshold.
    pub fn score(&self, pattern: &Pattern, text: &str) -> Option<f64> {
        if text.is_empty() {
            return None;
        }
        if text == pattern.text {
            return Some(0.0);
        }
        self.fuse()
            .search(Some(&pattern.inner), text)
            .map(|result| result.score.max(MIN_SCORE))
            .filter(|score| *score <= self.threshold)
    }

    fn fuse(&self) -> Fuse {
        // a distance this large makes the offset term vanish
        let distance = if self.ignore_location {
            i32::MAX
        } else {
            LOCATION_DISTANCE
        };
        Fuse {
            threshold: self.threshold,
            distance,
            ..Fuse::default()
        }
    }
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(query: &str, text: &str) -> Option<f64> {
        let matcher = FuzzyMatcher::new(0.35);
        let pattern = matcher.pattern(query)?;
        matcher.score(&pattern, &text.to_lowercase())
    }

    #[test]
    fn test_exact_field() {
        assert_eq!(score("Rust", "rust"), Some(0.0));
    }

    #[test]
    fn test_substring_anywhere() {
        assert_eq!(score("brown", "the quick brown fox"), Some(MIN_SCORE));
        let far = format!("{}brown", "x ".repeat(500));
        assert_eq!(score("brown", &far), Some(MIN_SCORE));
    }

    #[test]
    fn test_typo_within_threshold() {
        let s = score("reakt", "learning react today").unwrap();
        assert!((s - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_too_many_errors() {
        assert_eq!(score("react", "vue and svelte"), None);
        assert_eq!(score("kubernetes", "docker"), None);
    }

    #[test]
    fn test_location_penalty() {
        let matcher = FuzzyMatcher::new(0.35).with_location(false);
        let pattern = matcher.pattern("fox").unwrap();
        assert_eq!(matcher.score(&pattern, "fox hunt"), Some(MIN_SCORE));
        let near = matcher.score(&pattern, "the quick brown fox").unwrap();
        assert!(near > MIN_SCORE && near <= 0.35);
        let far = format!("{}fox", "-".repeat(60));
        assert_eq!(matcher.score(&pattern, &far), None);
    }

    #[test]
    fn test_blank_and_empty_inputs() {
        let matcher = FuzzyMatcher::new(0.35);
        assert!(matcher.pattern("   ").is_none());
        let pattern = matcher.pattern("text").unwrap();
        assert_eq!(matcher.score(&pattern, ""), None);
    }

    #[test]
    fn test_long_query_is_truncated() {
        let query = "ä".repeat(40);
        assert_eq!(truncate(&query, MAX_PATTERN_LENGTH).len(), 32);
        assert_eq!(truncate("odd ä", 5), "odd ");
        assert!(FuzzyMatcher::new(0.35).pattern(&query).is_some());
    }
}
