//! Helper functions for page rendering
//!
//! Date formatting, excerpts, escaping and URL generation shared by the
//! page templates and the generator.

mod date;
mod text;
mod url;

pub use date::*;
pub use text::*;
pub use url::*;
