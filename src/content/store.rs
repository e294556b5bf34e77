//! Storage port for post files and post images
//!
//! The repository reads everything through [`ContentStore`], so it can run
//! against the real content directory ([`FsStore`]) or an in-memory fixture
//! ([`MemoryStore`]).

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Read-only access to post sources and their images
pub trait ContentStore: Send + Sync {
    /// Names of the regular files in the content root, sorted by name.
    /// A missing root yields an empty list.
    fn list_content_files(&self) -> io::Result<Vec<String>>;

    /// Contents of one file in the content root, `None` if it does not exist
    fn read_content_file(&self, name: &str) -> io::Result<Option<String>>;

    /// Names of the candidate main-image files in the image directory of
    /// `slug`. A missing directory yields an empty list.
    fn list_image_candidates(&self, slug: &str) -> io::Result<Vec<String>>;
}

impl<T: ContentStore + ?Sized> ContentStore for &T {
    fn list_content_files(&self) -> io::Result<Vec<String>> {
        (**self).list_content_files()
    }

    fn read_content_file(&self, name: &str) -> io::Result<Option<String>> {
        (**self).read_content_file(name)
    }

    fn list_image_candidates(&self, slug: &str) -> io::Result<Vec<String>> {
        (**self).list_image_candidates(slug)
    }
}

/// Store backed by the local file system
#[derive(Debug, Clone)]
pub struct FsStore {
    content_dir: PathBuf,
    images_dir: PathBuf,
}

impl FsStore {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(content_dir: P, images_dir: Q) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
            images_dir: images_dir.as_ref().to_path_buf(),
        }
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }
}

impl ContentStore for FsStore {
    fn list_content_files(&self) -> io::Result<Vec<String>> {
        if !self.content_dir.exists() {
            tracing::debug!("Content directory {:?} does not exist", self.content_dir);
            return Ok(Vec::new());
        }
        if !self.content_dir.is_dir() {
            return Err(io::Error::other(format!(
                "content root {:?} is not a directory",
                self.content_dir
            )));
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.content_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() > 0 => {
                    tracing::warn!("Skipping unreadable entry {:?}: {}", e.path(), e);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            if !entry.file_type().is_file() {
                continue;
            }
            match entry.file_name().to_str() {
                Some(name) => names.push(name.to_string()),
                None => tracing::warn!("Ignoring non UTF-8 file name {:?}", entry.path()),
            }
        }

        Ok(names)
    }

    fn read_content_file(&self, name: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.content_dir.join(name)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn list_image_candidates(&self, slug: &str) -> io::Result<Vec<String>> {
        let slug_dir = self.images_dir.join(slug);
        if !slug_dir.is_dir() {
            return Ok(Vec::new());
        }

        let dir = slug_dir
            .to_str()
            .ok_or_else(|| io::Error::other(format!("non UTF-8 image path {:?}", slug_dir)))?;
        let pattern = format!(
            "{}/{}-main-image.*",
            glob::Pattern::escape(dir),
            glob::Pattern::escape(slug)
        );

        let paths = glob::glob(&pattern).map_err(|e| io::Error::other(e.to_string()))?;
        let mut names = Vec::new();
        for path in paths {
            match path {
                Ok(path) if path.is_file() => {
                    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                        names.push(name.to_string());
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("Failed to read image candidate: {}", e),
            }
        }
        names.sort();

        Ok(names)
    }
}

/// In-memory store, mainly for tests and fixtures
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: BTreeMap<String, String>,
    images: BTreeMap<String, Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the content root
    pub fn with_file(mut self, name: &str, content: &str) -> Self {
        self.files.insert(name.to_string(), content.to_string());
        self
    }

    /// Add a file to the image directory of `slug`
    pub fn with_image(mut self, slug: &str, file: &str) -> Self {
        self.images
            .entry(slug.to_string())
            .or_default()
            .push(file.to_string());
        self
    }
}

impl ContentStore for MemoryStore {
    fn list_content_files(&self) -> io::Result<Vec<String>> {
        Ok(self.files.keys().cloned().collect())
    }

    fn read_content_file(&self, name: &str) -> io::Result<Option<String>> {
        Ok(self.files.get(name).cloned())
    }

    fn list_image_candidates(&self, slug: &str) -> io::Result<Vec<String>> {
        Ok(self.images.get(slug).cloned().unwrap_or_default())
    }
}
