//! Content module - loads posts from Markdown files with front-matter

pub mod derive;
mod error;
mod frontmatter;
mod markdown;
mod post;
pub mod repository;
pub mod store;

pub use error::ContentError;
pub use frontmatter::{FrontMatter, PostMeta};
pub use markdown::MarkdownRenderer;
pub use post::Post;
pub use repository::{LoadOutcome, PostRepository, RepositoryOptions, SkipReason};
pub use store::{ContentStore, FsStore, MemoryStore};
