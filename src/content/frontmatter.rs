//! Front-matter parsing

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::path::Path;

use super::markup::strip_formatting;

lazy_static! {
    /// `---` header, then the body
    static ref MARKDOWN_HEADER: Regex =
        Regex::new(r"^---\s*[\r\n]+([\s\S]*?)\r?\n---\s*[\r\n]+([\s\S]*)$").unwrap();
    /// Leading `/* ... */` comment that carries a `---` header
    static ref COMMENT_HEADER: Regex =
        Regex::new(r"^/\*\*?[\s\S]*?---\s*[\r\n]+([\s\S]*?)\r?\n---[\s\S]*?\*/\s*").unwrap();
    static ref ISO_DATE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

/// How a content source embeds its header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Markdown / MDX: the file starts with a `---` block
    Markdown,
    /// JSX component: the header lives in a leading block comment
    Component,
}

impl SourceFormat {
    /// Pick the format for a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "md" | "mdx" | "markdown" => Some(SourceFormat::Markdown),
            "jsx" => Some(SourceFormat::Component),
            _ => None,
        }
    }

    /// Pick the format for a file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// A single front-matter value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FrontMatterValue {
    String(String),
    Number(f64),
    Bool(bool),
    /// Unquoted `YYYY-MM-DD`, kept as text
    Date(String),
    Array(Vec<String>),
}

impl FrontMatterValue {
    /// Parse the raw text to the right of `key:`
    ///
    /// Numbers follow Rust's `f64` grammar (`42`, `-1.5`, `1e3`); hex literals
    /// and other JS-only forms stay strings.
    fn parse(raw: &str) -> Self {
        if raw.starts_with('[') && raw.ends_with(']') {
            return FrontMatterValue::Array(parse_array(raw));
        }

        match raw {
            "true" => return FrontMatterValue::Bool(true),
            "false" => return FrontMatterValue::Bool(false),
            _ => {}
        }

        if ISO_DATE.is_match(raw) {
            return FrontMatterValue::Date(raw.to_string());
        }

        if !raw.is_empty() {
            if let Ok(n) = raw.parse::<f64>() {
                if n.is_finite() {
                    return FrontMatterValue::Number(n);
                }
            }
        }

        FrontMatterValue::String(strip_quotes(raw).to_string())
    }

    /// Scalar value as display text; `None` for arrays
    pub fn as_text(&self) -> Option<String> {
        match self {
            FrontMatterValue::String(s) | FrontMatterValue::Date(s) => Some(s.clone()),
            FrontMatterValue::Number(n) => Some(format_number(*n)),
            FrontMatterValue::Bool(b) => Some(b.to_string()),
            FrontMatterValue::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            FrontMatterValue::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// Parsed front-matter block, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FrontMatter {
    fields: IndexMap<String, FrontMatterValue>,
}

impl FrontMatter {
    /// Parse the lines between the delimiters
    ///
    /// Blank lines, `#` comments and lines without a colon are skipped. A
    /// repeated key keeps its last value.
    pub fn parse_block(source: &str) -> Self {
        let mut fields = IndexMap::new();

        for raw_line in source.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            fields.insert(key.to_string(), FrontMatterValue::parse(value.trim()));
        }

        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&FrontMatterValue> {
        self.fields.get(key)
    }

    /// Scalar value as text
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(FrontMatterValue::as_text)
    }

    /// Array value; `None` when absent or not an array
    pub fn list(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(FrontMatterValue::as_array)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FrontMatterValue)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Result of splitting a content source
#[derive(Debug, Clone)]
pub struct ParsedSource {
    pub front_matter: FrontMatter,
    /// Plain text for indexing
    pub body: String,
    /// Body exactly as written, header removed
    pub raw_body: String,
}

/// Split a content source into front-matter and body
///
/// Never fails: a missing or unterminated header yields empty front-matter
/// and the whole text as body.
pub fn parse(raw: &str, format: SourceFormat) -> ParsedSource {
    let split = match format {
        SourceFormat::Markdown => MARKDOWN_HEADER.captures(raw).map(|caps| {
            let block = caps.get(1).map_or("", |m| m.as_str());
            let body = caps.get(2).map_or("", |m| m.as_str());
            (block, body)
        }),
        SourceFormat::Component => COMMENT_HEADER.captures(raw).map(|caps| {
            let block = caps.get(1).map_or("", |m| m.as_str());
            let end = caps.get(0).map_or(0, |m| m.end());
            (block, &raw[end..])
        }),
    };

    match split {
        Some((block, body)) => ParsedSource {
            front_matter: FrontMatter::parse_block(block),
            body: strip_formatting(body),
            raw_body: body.to_string(),
        },
        None => {
            if looks_like_header(raw, format) {
                tracing::warn!("Unterminated front-matter header, indexing the whole source");
            }
            ParsedSource {
                front_matter: FrontMatter::default(),
                body: strip_formatting(raw),
                raw_body: raw.to_string(),
            }
        }
    }
}

fn looks_like_header(raw: &str, format: SourceFormat) -> bool {
    match format {
        SourceFormat::Markdown => raw.starts_with("---"),
        SourceFormat::Component => raw.starts_with("/*") && raw.contains("---"),
    }
}

/// JSON-style array literal; single quotes are accepted
fn parse_array(raw: &str) -> Vec<String> {
    let normalized = raw.replace('\'', "\"");
    match serde_json::from_str::<Vec<serde_json::Value>>(&normalized) {
        Ok(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s.trim().to_string()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                serde_json::Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Err(e) => {
            tracing::warn!("Malformed array literal {:?}: {}", raw, e);
            Vec::new()
        }
    }
}

/// Remove one layer of matching surrounding quotes
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_markdown_frontmatter() {
        let content = r#"---
title: "Hello World"
date: 2024-01-15
tags: ["rust", 'search']
draft: false
order: 3
---

# Heading

This is the **content**.
"#;

        let parsed = parse(content, SourceFormat::Markdown);
        let fm = &parsed.front_matter;
        assert_eq!(fm.text("title"), Some("Hello World".to_string()));
        assert_eq!(
            fm.get("date"),
            Some(&FrontMatterValue::Date("2024-01-15".to_string()))
        );
        assert_eq!(
            fm.list("tags"),
            Some(&["rust".to_string(), "search".to_string()][..])
        );
        assert_eq!(fm.get("draft"), Some(&FrontMatterValue::Bool(false)));
        assert_eq!(fm.get("order"), Some(&FrontMatterValue::Number(3.0)));
        assert_eq!(parsed.body, "Heading This is the content .");
        assert!(parsed.raw_body.contains("**content**"));
    }

    #[test]
    fn test_parse_component_frontmatter() {
        let content = r#"/*
---
title: "Deployment auf Vercel"
date: "2025-05-28"
topics: ["Deployment"]
cover: "/images/cover-vercel.svg"
---
*/

import React from 'react';

export default function Post() {
  return <p>Vercel ist schnell.</p>;
}
"#;

        let parsed = parse(content, SourceFormat::Component);
        let fm = &parsed.front_matter;
        assert_eq!(fm.text("title"), Some("Deployment auf Vercel".to_string()));
        assert_eq!(
            fm.get("date"),
            Some(&FrontMatterValue::String("2025-05-28".to_string()))
        );
        assert_eq!(fm.list("topics"), Some(&["Deployment".to_string()][..]));
        assert_eq!(fm.text("cover"), Some("/images/cover-vercel.svg".to_string()));
        assert!(parsed.raw_body.starts_with("import React"));
        assert!(parsed.body.contains("Vercel ist schnell."));
        assert!(!parsed.body.contains("<p>"));
    }

    #[test]
    fn test_missing_header() {
        let parsed = parse("Just some *text*.", SourceFormat::Markdown);
        assert!(parsed.front_matter.is_empty());
        assert_eq!(parsed.body, "Just some text .");

        let source = "export default function Empty() { return null; }";
        let parsed = parse(source, SourceFormat::Component);
        assert!(parsed.front_matter.is_empty());
        assert_eq!(parsed.body, source);
    }

    #[test]
    fn test_unterminated_header() {
        let content = "---\ntitle: Lost\n\nBody without closing delimiter\n";
        let parsed = parse(content, SourceFormat::Markdown);
        assert!(parsed.front_matter.is_empty());
        assert!(parsed.body.contains("Body without closing delimiter"));
    }

    #[test]
    fn test_malformed_array_is_empty() {
        let fm = FrontMatter::parse_block("tags: [\"a\", b]\ntopics: [1, true, \"\", \"x\"]");
        assert_eq!(fm.get("tags"), Some(&FrontMatterValue::Array(Vec::new())));
        assert_eq!(
            fm.list("topics"),
            Some(&["1".to_string(), "true".to_string(), "x".to_string()][..])
        );
    }

    #[test]
    fn test_block_skips_comments_and_keeps_colons() {
        let fm = FrontMatter::parse_block(
            "# a comment\n\nurl: https://example.com/x\nnot a pair\n: orphan\nempty:",
        );
        assert_eq!(fm.len(), 2);
        assert_eq!(fm.text("url"), Some("https://example.com/x".to_string()));
        assert_eq!(fm.text("empty"), Some(String::new()));
    }

    #[test]
    fn test_value_shapes() {
        assert_eq!(
            FrontMatterValue::parse("'single'"),
            FrontMatterValue::String("single".to_string())
        );
        assert_eq!(
            FrontMatterValue::parse("\"mixed'"),
            FrontMatterValue::String("\"mixed'".to_string())
        );
        assert_eq!(FrontMatterValue::parse("1.5"), FrontMatterValue::Number(1.5));
        assert_eq!(
            FrontMatterValue::parse("NaN"),
            FrontMatterValue::String("NaN".to_string())
        );
        assert_eq!(FrontMatterValue::Number(42.0).as_text(), Some("42".to_string()));
    }

    #[test]
    fn test_number_grammar() {
        assert_eq!(FrontMatterValue::parse("-2"), FrontMatterValue::Number(-2.0));
        assert_eq!(FrontMatterValue::parse("1e3"), FrontMatterValue::Number(1000.0));
        assert_eq!(
            FrontMatterValue::parse("0x1F"),
            FrontMatterValue::String("0x1F".to_string())
        );
    }

    #[test]
    fn test_source_format_from_path() {
        assert_eq!(
            SourceFormat::from_path(Path::new("a/b.mdx")),
            Some(SourceFormat::Markdown)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("post.jsx")),
            Some(SourceFormat::Component)
        );
        assert_eq!(SourceFormat::from_path(Path::new("cover.svg")), None);
    }
}
