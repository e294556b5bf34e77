//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::content::{ContentStore, Post, PostRepository};
use crate::Folio;

/// What `list` prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Posts,
    Tags,
    Featured,
}

impl std::str::FromStr for ListKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "post" | "posts" => Ok(ListKind::Posts),
            "tag" | "tags" => Ok(ListKind::Tags),
            "featured" => Ok(ListKind::Featured),
            _ => anyhow::bail!("Unknown type: {}. Available: posts, tags, featured", s),
        }
    }
}

/// List site content by type
pub fn run(folio: &Folio, kind: ListKind) -> Result<()> {
    let repository = folio.repository();
    for line in render(&repository, &folio.config.featured_posts, kind)? {
        println!("{}", line);
    }
    Ok(())
}

/// Build the listing as lines of text
pub fn render<S: ContentStore>(
    repository: &PostRepository<S>,
    featured: &[String],
    kind: ListKind,
) -> Result<Vec<String>> {
    let mut lines = Vec::new();

    match kind {
        ListKind::Posts => {
            let posts = repository.list_posts()?;
            lines.push(format!("Posts ({}):", posts.len()));
            lines.extend(posts.iter().map(post_line));
        }
        ListKind::Tags => {
            let tags = tag_counts(&repository.list_posts()?);
            lines.push(format!("Tags ({}):", tags.len()));
            lines.extend(tags.iter().map(|(tag, count)| format!("  {} ({})", tag, count)));
        }
        ListKind::Featured => {
            let posts = repository.get_posts_by_slug(featured)?;
            lines.push(format!("Featured ({} of {}):", posts.len(), featured.len()));
            lines.extend(posts.iter().map(post_line));
        }
    }

    Ok(lines)
}

fn post_line(post: &Post) -> String {
    format!(
        "  {} - {} [{}] ({} min)",
        post.date, post.title, post.slug, post.reading_time
    )
}

/// Tag usage counts, most used first, ties by name
fn tag_counts(posts: &[Post]) -> Vec<(String, usize)> {
    let mut tags: HashMap<String, usize> = HashMap::new();
    for post in posts {
        for tag in post.tag_list() {
            *tags.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    let mut tags: Vec<_> = tags.into_iter().collect();
    tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    tags
}
