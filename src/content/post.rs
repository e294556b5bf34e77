//! Post model

use serde::{Deserialize, Serialize};

use super::PostMeta;

/// A blog post loaded from `<slug>.md`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// File name without the `.md` extension
    pub slug: String,

    pub title: String,

    /// Publication date as written, `YYYY-MM-DD`
    pub date: String,

    pub description: String,

    /// Markdown body with the front-matter stripped
    pub content: String,

    /// Public URL of the main image, if one exists on disk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    pub published: bool,

    /// Estimated minutes to read, at least 1
    pub reading_time: u32,
}

impl Post {
    /// Assemble a post from validated metadata and derived fields
    pub fn from_parts(
        slug: &str,
        meta: PostMeta,
        content: &str,
        image: Option<String>,
        reading_time: u32,
    ) -> Self {
        Self {
            slug: slug.to_string(),
            title: meta.title,
            date: meta.date,
            description: meta.description,
            content: content.to_string(),
            image,
            tags: meta.tags,
            published: meta.published,
            reading_time,
        }
    }

    /// Tags as a slice, empty when the post has none
    pub fn tag_list(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }
}
