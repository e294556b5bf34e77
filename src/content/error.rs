//! Errors raised while reading and parsing post files

use thiserror::Error;

/// Content loading errors
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("File does not start with a front-matter block")]
    MissingFrontMatter,

    #[error("Front-matter block has no closing delimiter")]
    UnterminatedFrontMatter,

    #[error("Invalid front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Missing required front-matter field: {0}")]
    MissingField(&'static str),
}
