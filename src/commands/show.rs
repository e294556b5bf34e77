//! Show a single post

use anyhow::Result;

use crate::content::Post;
use crate::helpers::{format_date, post_url, DateStyle};
use crate::Folio;

/// Print the metadata of one post, failing if it is not published
pub fn run(folio: &Folio, slug: &str) -> Result<()> {
    match folio.repository().get_post(slug) {
        Some(post) => {
            println!("{}", describe(&post));
            Ok(())
        }
        None => anyhow::bail!("{}: {}", folio.config.messages.post_not_found, slug),
    }
}

/// Human-readable summary of a post
pub fn describe(post: &Post) -> String {
    let mut out = format!(
        "{}\n  url:          {}\n  date:         {}\n  reading time: {} min\n  description:  {}",
        post.title,
        post_url(&post.slug),
        format_date(&post.date, DateStyle::Full),
        post.reading_time,
        post.description
    );
    if !post.tag_list().is_empty() {
        out.push_str(&format!("\n  tags:         {}", post.tag_list().join(", ")));
    }
    if let Some(image) = &post.image {
        out.push_str(&format!("\n  image:        {}", image));
    }
    out
}
