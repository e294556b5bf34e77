//! Generator module - writes the static site into the public directory

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::content::{ContentStore, Post, PostRepository};
use crate::helpers::post_url;
use crate::templates::PageRenderer;
use crate::Folio;

/// Static site generator
pub struct Generator {
    folio: Folio,
    renderer: PageRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Self {
        Self {
            folio: folio.clone(),
            renderer: PageRenderer::new(&folio.config),
        }
    }

    /// Generate the entire site from `repository`, returning the number of posts written
    pub fn generate<S: ContentStore>(&self, repository: &PostRepository<S>) -> Result<usize> {
        let public_dir = &self.folio.public_dir;
        fs::create_dir_all(public_dir)?;

        let posts = repository.list_posts()?;
        tracing::info!("Loaded {} posts", posts.len());

        // Post pages and images from an earlier build may belong to posts
        // that are now unpublished or deleted.
        remove_stale_dir(&public_dir.join("blog"))?;
        let image_prefix = self.folio.config.image_url_prefix.trim_matches('/');
        if !image_prefix.is_empty() {
            remove_stale_dir(&public_dir.join(image_prefix))?;
        }

        let featured = self.featured_posts(repository, &posts)?;
        write_page(&public_dir.join("index.html"), &self.renderer.render_home(&featured))?;

        write_page(
            &public_dir.join("blog").join("index.html"),
            &self.renderer.render_blog_index(&posts),
        )?;

        for post in &posts {
            let html = self
                .renderer
                .render_post(post)
                .with_context(|| format!("Failed to render post {}", post.slug))?;
            write_page(
                &public_dir.join("blog").join(&post.slug).join("index.html"),
                &html,
            )?;
        }

        write_page(&public_dir.join("404.html"), &self.renderer.render_not_found())?;

        self.generate_post_index(&posts)?;
        self.copy_images()?;
        self.copy_static_assets()?;

        Ok(posts.len())
    }

    /// Posts for the home page: the configured slugs, or the newest posts
    fn featured_posts<S: ContentStore>(
        &self,
        repository: &PostRepository<S>,
        posts: &[Post],
    ) -> Result<Vec<Post>> {
        let limit = self.folio.config.limits.featured_posts;
        let slugs = &self.folio.config.featured_posts;

        let mut featured = if slugs.is_empty() {
            posts.to_vec()
        } else {
            let found = repository.get_posts_by_slug(slugs.as_slice())?;
            if found.len() < slugs.len() {
                tracing::warn!(
                    "{} of {} featured posts are missing or unpublished",
                    slugs.len() - found.len(),
                    slugs.len()
                );
            }
            found
        };
        featured.truncate(limit);

        Ok(featured)
    }

    /// Write `posts.json`, a machine-readable index of the published posts
    fn generate_post_index(&self, posts: &[Post]) -> Result<()> {
        let index: Vec<serde_json::Value> = posts
            .iter()
            .map(|p| {
                serde_json::json!({
                    "slug": p.slug,
                    "title": p.title,
                    "date": p.date,
                    "description": p.description,
                    "tags": p.tag_list(),
                    "readingTime": p.reading_time,
                    "image": p.image,
                    "url": post_url(&p.slug),
                })
            })
            .collect();

        let output_path = self.folio.public_dir.join("posts.json");
        let json = serde_json::to_string_pretty(&index)?;
        fs::write(&output_path, json)?;
        tracing::info!("Generated posts.json");

        Ok(())
    }

    /// Copy the post image directories under the image URL prefix
    fn copy_images(&self) -> Result<()> {
        let prefix = self.folio.config.image_url_prefix.trim_matches('/');
        let dest = self.folio.public_dir.join(prefix);
        let copied = copy_dir(&self.folio.images_dir, &dest)?;
        if copied > 0 {
            tracing::info!("Copied {} images", copied);
        }
        Ok(())
    }

    /// Copy static assets (css, favicon, ...) to the public directory
    fn copy_static_assets(&self) -> Result<()> {
        let copied = copy_dir(&self.folio.static_dir, &self.folio.public_dir)?;
        if copied > 0 {
            tracing::info!("Copied {} static files", copied);
        }
        Ok(())
    }
}

fn remove_stale_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir).with_context(|| format!("Failed to remove {:?}", dir))?;
        tracing::debug!("Removed previous output {:?}", dir);
    }
    Ok(())
}

fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html).with_context(|| format!("Failed to write {:?}", path))?;
    tracing::debug!("Generated {:?}", path);
    Ok(())
}

/// Recursively copy regular files from `src` into `dest`, returning the count.
/// A missing `src` copies nothing.
fn copy_dir(src: &Path, dest: &Path) -> Result<usize> {
    if !src.is_dir() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(src)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(src)?;
        let target = dest.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &target).with_context(|| format!("Failed to copy {:?}", path))?;
        copied += 1;
    }

    Ok(copied)
}
