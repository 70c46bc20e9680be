//! Markup stripping for the search index
//!
//! Produces the plain-text form of a post body. This is a heuristic, not a
//! markdown parser: it only has to be good enough for tokenizing and
//! snippeting. Display always goes through the unstripped source.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CODE_SPAN: Regex = Regex::new(r"`{1,3}[\s\S]*?`{1,3}").unwrap();
    static ref TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref MARKERS: Regex = Regex::new(r"[#>*_~`]").unwrap();
    static ref LINK: Regex = Regex::new(r"\[(.*?)\]\(.*?\)").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Strip code, tags and markdown markers, keep link text, collapse whitespace
pub fn strip_formatting(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let text = CODE_SPAN.replace_all(value, " ");
    let text = TAG.replace_all(&text, " ");
    let text = MARKERS.replace_all(&text, " ");
    let text = LINK.replace_all(&text, "$1");
    let text = WHITESPACE.replace_all(&text, " ");

    text.trim().to_string()
}
