//! Result snippets around the query

/// Marker prepended when a snippet does not start at the beginning of the body
pub const ELLIPSIS: char = '…';

/// Characters kept on each side of the match
pub const DEFAULT_CONTEXT: usize = 60;

/// Snippet length when the query does not occur in the body
pub const DEFAULT_FALLBACK: usize = 160;

/// Build a snippet with the default window sizes
pub fn snippet(body: &str, query: &str) -> String {
    snippet_with(body, query, DEFAULT_CONTEXT, DEFAULT_FALLBACK)
}

/// Cut a window around the first case-insensitive occurrence of `query`
///
/// Without an occurrence the first `fallback` characters are used. Offsets
/// are counted in characters.
pub fn snippet_with(body: &str, query: &str, context: usize, fallback: usize) -> String {
    if body.is_empty() {
        return String::new();
    }

    let body_chars: Vec<char> = body.chars().collect();
    let query_chars: Vec<char> = query.chars().collect();

    let (start, end) = match find_case_insensitive(&body_chars, &query_chars) {
        Some(index) => (
            index.saturating_sub(context),
            (index + query_chars.len() + context).min(body_chars.len()),
        ),
        None => (0, fallback.min(body_chars.len())),
    };

    let window: String = body_chars[start..end].iter().collect();
    let window = window.trim();
    if start > 0 {
        format!("{}{}", ELLIPSIS, window)
    } else {
        window.to_string()
    }
}

fn find_case_insensitive(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&start| {
        haystack[start..start + needle.len()]
            .iter()
            .zip(needle)
            .all(|(a, b)| chars_eq_ignore_case(*a, *b))
    })
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
