//! Error types for index construction

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while discovering or indexing content
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Content root not found: {0:?}")]
    ContentRootMissing(PathBuf),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Slug '{slug}' is derived from both {first:?} and {second:?}")]
    SlugCollision {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, IndexError>;
