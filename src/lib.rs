//! folio: a static portfolio and blog generator
//!
//! Posts are Markdown files with YAML front-matter. The [`content`] module
//! loads them into [`content::Post`] values; the [`templates`] and
//! [`generator`] modules turn those into a static site.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{FsStore, PostRepository, RepositoryOptions};

/// Name of the site configuration file
pub const CONFIG_FILE: &str = "_config.yml";

/// The folio application: configuration plus resolved directories
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding `<slug>.md` post files
    pub content_dir: PathBuf,
    /// Directory holding one image directory per post
    pub images_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Extra assets copied verbatim into the output
    pub static_dir: PathBuf,
}

impl Folio {
    /// Create a new Folio instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let images_dir = base_dir.join(&config.images_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Self {
            config,
            base_dir,
            content_dir,
            images_dir,
            public_dir,
            static_dir,
        }
    }

    /// Post repository reading from the configured directories
    pub fn repository(&self) -> PostRepository<FsStore> {
        let options = RepositoryOptions {
            words_per_minute: self.config.reading.words_per_minute,
            image_url_prefix: self.config.image_url_prefix.clone(),
        };
        PostRepository::with_options(FsStore::new(&self.content_dir, &self.images_dir), options)
    }

    /// Generate the static site
    pub fn build(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
