//! Post repository - the queryable view over the content store

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use super::derive::{image_url, reading_time, select_main_image, DEFAULT_WORDS_PER_MINUTE};
use super::{ContentError, ContentStore, FrontMatter, Post};

/// Extension of post source files
pub const MARKDOWN_EXTENSION: &str = ".md";

lazy_static! {
    /// Slugs are plain file stems: no path separators, no leading dot
    static ref SLUG_RE: Regex = Regex::new(r"^[^./\\\x00][^/\\\x00]*$").unwrap();
}

/// Check that `slug` names a file directly inside the content root
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_RE.is_match(slug)
}

/// Knobs for the derived fields
#[derive(Debug, Clone)]
pub struct RepositoryOptions {
    pub words_per_minute: u32,
    /// URL prefix under which the image directories are published
    pub image_url_prefix: String,
}

impl Default for RepositoryOptions {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            image_url_prefix: "/images/posts".to_string(),
        }
    }
}

/// Why a post file was left out of the results
#[derive(Debug)]
pub enum SkipReason {
    /// No `<slug>.md` in the content root
    NotFound,
    /// `published: false` in the front-matter
    Unpublished,
    /// The file could not be read or parsed
    Invalid(ContentError),
}

/// Result of loading a single post file
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Post),
    Skipped { file: String, reason: SkipReason },
}

impl LoadOutcome {
    /// The loaded post, if any
    pub fn into_post(self) -> Option<Post> {
        match self {
            LoadOutcome::Loaded(post) => Some(post),
            LoadOutcome::Skipped { .. } => None,
        }
    }

    /// Log a skipped file; invalid files are warnings, the rest is debug noise
    fn log_skip(&self) {
        if let LoadOutcome::Skipped { file, reason } = self {
            match reason {
                SkipReason::Invalid(e) => tracing::warn!("Skipping post {}: {}", file, e),
                SkipReason::Unpublished => tracing::debug!("Skipping unpublished post {}", file),
                SkipReason::NotFound => tracing::debug!("Post file {} not found", file),
            }
        }
    }
}

/// Loads posts from a [`ContentStore`] and answers the post queries.
///
/// Nothing is cached: every query reads the store again.
pub struct PostRepository<S> {
    store: S,
    options: RepositoryOptions,
}

impl<S: ContentStore> PostRepository<S> {
    /// Create a repository with default options
    pub fn new(store: S) -> Self {
        Self::with_options(store, RepositoryOptions::default())
    }

    pub fn with_options(store: S, options: RepositoryOptions) -> Self {
        Self { store, options }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All published posts, newest first.
    ///
    /// Posts sharing a date keep file name order. Only a failure to list the
    /// content root is an error; bad files are logged and left out.
    pub fn list_posts(&self) -> Result<Vec<Post>, ContentError> {
        let mut posts = self.load_published()?;
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }

    /// A single published post, `None` when it is missing, invalid or unpublished
    pub fn get_post(&self, slug: &str) -> Option<Post> {
        if !is_valid_slug(slug) {
            tracing::debug!("Rejecting malformed slug {:?}", slug);
            return None;
        }

        let outcome = self.load_slug(slug);
        outcome.log_skip();
        outcome.into_post()
    }

    /// Published posts for `slugs`, in the order given.
    ///
    /// Unknown slugs are dropped and repeated slugs repeat the post.
    pub fn get_posts_by_slug<T: AsRef<str>>(&self, slugs: &[T]) -> Result<Vec<Post>, ContentError> {
        let posts = self.load_published()?;
        let by_slug: HashMap<&str, &Post> = posts.iter().map(|p| (p.slug.as_str(), p)).collect();

        Ok(slugs
            .iter()
            .filter_map(|slug| by_slug.get(slug.as_ref()).map(|&post| post.clone()))
            .collect())
    }

    /// Load every Markdown file in the content root, one outcome per file
    pub fn load_all(&self) -> Result<Vec<LoadOutcome>, ContentError> {
        let files = self.store.list_content_files()?;

        Ok(files
            .iter()
            .filter_map(|file| {
                let slug = file.strip_suffix(MARKDOWN_EXTENSION)?;
                if !is_valid_slug(slug) {
                    tracing::debug!("Ignoring {}: not a post file name", file);
                    return None;
                }
                Some(self.load_slug(slug))
            })
            .collect())
    }

    /// Load the post stored as `<slug>.md`
    pub fn load_slug(&self, slug: &str) -> LoadOutcome {
        let file = format!("{}{}", slug, MARKDOWN_EXTENSION);
        let skipped = |reason| LoadOutcome::Skipped {
            file: file.clone(),
            reason,
        };

        let source = match self.store.read_content_file(&file) {
            Ok(Some(source)) => source,
            Ok(None) => return skipped(SkipReason::NotFound),
            Err(e) => return skipped(SkipReason::Invalid(e.into())),
        };

        let parsed = FrontMatter::parse(&source).and_then(|(fm, body)| Ok((fm.validate()?, body)));
        let (meta, body) = match parsed {
            Ok(parsed) => parsed,
            Err(e) => return skipped(SkipReason::Invalid(e)),
        };

        if !meta.published {
            return skipped(SkipReason::Unpublished);
        }

        let image = self.resolve_image(slug);
        let minutes = reading_time(body, self.options.words_per_minute);

        LoadOutcome::Loaded(Post::from_parts(slug, meta, body, image, minutes))
    }

    fn load_published(&self) -> Result<Vec<Post>, ContentError> {
        let outcomes = self.load_all()?;
        Ok(outcomes
            .into_iter()
            .filter_map(|outcome| {
                outcome.log_skip();
                outcome.into_post()
            })
            .collect())
    }

    fn resolve_image(&self, slug: &str) -> Option<String> {
        let candidates = match self.store.list_image_candidates(slug) {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!("Failed to list images for {}: {}", slug, e);
                return None;
            }
        };

        select_main_image(slug, &candidates)
            .map(|file| image_url(&self.options.image_url_prefix, slug, file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{FsStore, MemoryStore};
    use std::fs;
    use tempfile::TempDir;

    fn post_source(title: &str, date: &str, extra: &str, body: &str) -> String {
        format!(
            "---\ntitle: {}\ndate: {}\ndescription: About {}\n{}---\n{}",
            title, date, title, extra, body
        )
    }

    fn sample_store() -> MemoryStore {
        MemoryStore::new()
            .with_file("a.md", &post_source("A", "2024-01-10", "", "alpha body"))
            .with_file("b.md", &post_source("B", "2024-03-01", "tags: [rust]\n", "beta body"))
            .with_file("c.md", &post_source("C", "2023-12-25", "", "gamma"))
            .with_file(
                "hidden.md",
                &post_source("Hidden", "2025-01-01", "published: false\n", "secret"),
            )
            .with_file("broken.md", "no front-matter here")
            .with_file("untitled.md", "---\ndate: 2024-05-05\ndescription: x\n---\nbody")
            .with_file("readme.txt", "not a post")
    }

    fn slugs(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_list_posts_sorted_by_date_desc() {
        let repo = PostRepository::new(sample_store());
        let posts = repo.list_posts().unwrap();
        assert_eq!(slugs(&posts), vec!["b", "a", "c"]);
        for pair in posts.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
    }

    #[test]
    fn test_unpublished_hidden_everywhere() {
        let repo = PostRepository::new(sample_store());
        assert!(repo.list_posts().unwrap().iter().all(|p| p.slug != "hidden"));
        assert!(repo.get_post("hidden").is_none());
        assert!(repo.get_posts_by_slug(&["hidden"]).unwrap().is_empty());
    }

    #[test]
    fn test_published_defaults_to_true() {
        let repo = PostRepository::new(sample_store());
        let post = repo.get_post("a").unwrap();
        assert!(post.published);
        assert_eq!(post.title, "A");
        assert_eq!(post.date, "2024-01-10");
        assert_eq!(post.description, "About A");
        assert_eq!(post.content, "alpha body");
        assert_eq!(post.tags, None);
        assert_eq!(repo.get_post("b").unwrap().tags, Some(vec!["rust".to_string()]));
    }

    #[test]
    fn test_invalid_files_are_skipped() {
        let repo = PostRepository::new(sample_store());
        let posts = repo.list_posts().unwrap();
        assert!(!slugs(&posts).contains(&"broken"));
        assert!(!slugs(&posts).contains(&"untitled"));
        assert!(repo.get_post("broken").is_none());
        assert!(repo.get_post("untitled").is_none());

        let outcomes = repo.load_all().unwrap();
        assert_eq!(outcomes.len(), 6);
        assert!(outcomes.iter().any(|o| matches!(
            o,
            LoadOutcome::Skipped {
                file,
                reason: SkipReason::Invalid(ContentError::MissingField("title"))
            } if file == "untitled.md"
        )));
    }

    #[test]
    fn test_get_post_not_found() {
        let repo = PostRepository::new(sample_store());
        assert!(repo.get_post("does-not-exist").is_none());
        assert!(repo.get_post("").is_none());
        assert!(repo.get_post("../a").is_none());
        assert!(repo.get_post(".hidden").is_none());
    }

    #[test]
    fn test_get_posts_by_slug_preserves_input_order() {
        let repo = PostRepository::new(sample_store());
        let posts = repo.get_posts_by_slug(&["b", "a", "missing", "a"]).unwrap();
        assert_eq!(slugs(&posts), vec!["b", "a", "a"]);
        assert!(repo.get_posts_by_slug::<&str>(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_reading_time_derived() {
        let long_body = vec!["word"; 400].join(" ");
        let store = MemoryStore::new()
            .with_file("long.md", &post_source("Long", "2024-01-01", "", &long_body))
            .with_file("short.md", &post_source("Short", "2024-01-02", "", "just a few words"))
            .with_file("empty.md", &post_source("Empty", "2024-01-03", "", ""));
        let repo = PostRepository::new(store);
        assert_eq!(repo.get_post("long").unwrap().reading_time, 2);
        assert_eq!(repo.get_post("short").unwrap().reading_time, 1);
        assert_eq!(repo.get_post("empty").unwrap().reading_time, 1);
    }

    #[test]
    fn test_image_resolution() {
        let store = MemoryStore::new()
            .with_file("foo.md", &post_source("Foo", "2024-01-01", "image: /ignored.png\n", "x"))
            .with_file("bar.md", &post_source("Bar", "2024-01-02", "", "y"))
            .with_image("foo", "foo-main-image.png")
            .with_image("foo", "foo-main-image.webp");
        let repo = PostRepository::new(store);

        let foo = repo.get_post("foo").unwrap();
        assert_eq!(foo.image.as_deref(), Some("/images/posts/foo/foo-main-image.webp"));
        assert!(repo.get_post("bar").unwrap().image.is_none());
    }

    #[test]
    fn test_loose_tags_and_image_shapes_still_load() {
        let store = MemoryStore::new().with_file(
            "odd.md",
            &post_source(
                "Odd",
                "2024-01-01",
                "tags: [rust, {name: x}]\nimage:\n  src: /x.png\n",
                "body",
            ),
        );
        let repo = PostRepository::new(store);
        let post = repo.get_post("odd").unwrap();
        assert_eq!(post.tags, Some(vec!["rust".to_string()]));
        assert!(post.image.is_none());
    }

    #[test]
    fn test_custom_options() {
        let store = MemoryStore::new()
            .with_file("foo.md", &post_source("Foo", "2024-01-01", "", "one two three"))
            .with_image("foo", "foo-main-image.jpg");
        let repo = PostRepository::with_options(
            store,
            RepositoryOptions {
                words_per_minute: 1,
                image_url_prefix: "/media/".to_string(),
            },
        );
        let foo = repo.get_post("foo").unwrap();
        assert_eq!(foo.reading_time, 3);
        assert_eq!(foo.image.as_deref(), Some("/media/foo/foo-main-image.jpg"));
    }

    #[test]
    fn test_list_posts_is_idempotent() {
        let repo = PostRepository::new(sample_store());
        assert_eq!(repo.list_posts().unwrap(), repo.list_posts().unwrap());
    }

    #[test]
    fn test_same_date_keeps_file_name_order() {
        let store = MemoryStore::new()
            .with_file("z.md", &post_source("Z", "2024-01-01", "", "z"))
            .with_file("m.md", &post_source("M", "2024-01-01", "", "m"))
            .with_file("a.md", &post_source("A", "2024-01-01", "", "a"));
        let repo = PostRepository::new(store);
        assert_eq!(slugs(&repo.list_posts().unwrap()), vec!["a", "m", "z"]);
    }

    #[test]
    fn test_fs_store_end_to_end() {
        let tmp = TempDir::new().unwrap();
        let posts_dir = tmp.path().join("posts");
        let images_dir = tmp.path().join("images");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::create_dir_all(images_dir.join("foo")).unwrap();
        fs::write(
            posts_dir.join("foo.md"),
            post_source("Foo", "2024-02-02", "", "hello"),
        )
        .unwrap();
        fs::write(
            posts_dir.join("bar.md"),
            post_source("Bar", "2024-03-03", "published: false\n", "hidden"),
        )
        .unwrap();
        fs::write(images_dir.join("foo").join("foo-main-image.png"), b"png").unwrap();
        fs::write(images_dir.join("foo").join("foo-main-image.webp"), b"webp").unwrap();

        let repo = PostRepository::new(FsStore::new(&posts_dir, &images_dir));
        let posts = repo.list_posts().unwrap();
        assert_eq!(slugs(&posts), vec!["foo"]);
        assert_eq!(
            posts[0].image.as_deref(),
            Some("/images/posts/foo/foo-main-image.webp")
        );
        assert!(repo.get_post("bar").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_does_not_break_listing() {
        let tmp = TempDir::new().unwrap();
        let posts_dir = tmp.path().join("posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(
            posts_dir.join("good.md"),
            post_source("Good", "2024-02-02", "", "fine"),
        )
        .unwrap();
        std::os::unix::fs::symlink(posts_dir.join("gone.md"), posts_dir.join("dangling.md"))
            .unwrap();

        let repo = PostRepository::new(FsStore::new(&posts_dir, tmp.path().join("images")));
        assert_eq!(slugs(&repo.list_posts().unwrap()), vec!["good"]);
        assert_eq!(slugs(&repo.get_posts_by_slug(&["dangling", "good"]).unwrap()), vec!["good"]);
        assert!(repo.get_post("dangling").is_none());
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let posts_dir = tmp.path().join("posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(
            posts_dir.join("good.md"),
            post_source("Good", "2024-02-02", "", "fine"),
        )
        .unwrap();
        fs::write(posts_dir.join("bad.md"), [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let repo = PostRepository::new(FsStore::new(&posts_dir, tmp.path().join("images")));
        assert_eq!(slugs(&repo.list_posts().unwrap()), vec!["good"]);
        assert!(repo.get_post("bad").is_none());
        assert!(matches!(
            repo.load_slug("bad"),
            LoadOutcome::Skipped {
                reason: SkipReason::Invalid(ContentError::Storage(_)),
                ..
            }
        ));
    }

    #[test]
    fn test_slug_convention() {
        assert!(is_valid_slug("hello-world"));
        assert!(is_valid_slug("v1.2_notes"));
        assert!(is_valid_slug("café"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug(".hidden"));
        assert!(!is_valid_slug("../etc"));
        assert!(!is_valid_slug("a/b"));
        assert!(!is_valid_slug("a\\b"));
    }

    #[test]
    fn test_missing_root_is_empty_listing() {
        let tmp = TempDir::new().unwrap();
        let repo = PostRepository::new(FsStore::new(tmp.path().join("nope"), tmp.path()));
        assert!(repo.list_posts().unwrap().is_empty());
        assert!(repo.get_post("anything").is_none());
    }

    #[test]
    fn test_unreadable_root_propagates() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("posts");
        fs::write(&root, "file, not dir").unwrap();
        let repo = PostRepository::new(FsStore::new(&root, tmp.path()));
        assert!(matches!(repo.list_posts(), Err(ContentError::Storage(_))));
        assert!(repo.get_post("posts").is_none());
    }
}
