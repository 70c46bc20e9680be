//! Slug derivation from content paths

use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Component, Path};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref UNSAFE: Regex = Regex::new(r"[^a-zA-Z0-9-]").unwrap();
    static ref HYPHENS: Regex = Regex::new(r"-+").unwrap();
}

/// Derive a URL slug from a path relative to the content root
///
/// The extension is dropped, whitespace and every character outside
/// `[a-zA-Z0-9-]` become hyphens (directory separators included), runs of
/// hyphens collapse, and the result is lowercased. Different paths can
/// produce the same slug (`My Post.md` and `my-post.md`).
pub fn derive_slug(relative: &Path) -> String {
    let without_ext = relative.with_extension("");
    let joined = without_ext
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");

    slugify(&joined)
}

/// Apply the slug rules to an arbitrary string
pub fn slugify(value: &str) -> String {
    let value = WHITESPACE.replace_all(value, "-");
    let value = UNSAFE.replace_all(&value, "-");
    let value = HYPHENS.replace_all(&value, "-");
    value.to_lowercase()
}
