//! Content module - front-matter, keyword extraction and the post index

pub mod frontmatter;
pub mod hashtag;
pub mod loader;
mod markup;
mod post;
pub mod slug;

pub use frontmatter::{FrontMatter, FrontMatterValue, ParsedSource, SourceFormat};
pub use hashtag::{KeywordExtractor, Stopwords};
pub use loader::{ContentIndex, ContentLoader, SlugCollision};
pub use markup::strip_formatting;
pub use post::{Post, RenderSource, FALLBACK_DATE};
