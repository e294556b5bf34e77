//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::content::derive::DEFAULT_WORDS_PER_MINUTE;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub name: String,
    pub url: String,
    pub root: String,
    pub description: String,
    pub og_image: String,
    pub language: String,
    pub hero_title: String,
    pub blog_title: String,

    // Directory
    pub content_dir: String,
    pub images_dir: String,
    pub image_url_prefix: String,
    pub public_dir: String,
    pub static_dir: String,

    // Navigation
    pub nav_links: Vec<NavLink>,
    pub social_links: SocialLinks,

    // Home page
    pub featured_posts: Vec<String>,
    pub about: AboutConfig,
    pub cta: CtaConfig,

    // Writing
    pub limits: ContentLimits,
    pub reading: ReadingConfig,
    pub highlight: HighlightConfig,
    pub messages: Messages,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Chandra Lindy".to_string(),
            url: "https://chandra-lindy.com".to_string(),
            root: "/".to_string(),
            description: "Chandra Lindy's personal website".to_string(),
            og_image: "/og-image.png".to_string(),
            language: "en".to_string(),
            hero_title: "Code, Commit, Conquer: My Learning Journey".to_string(),
            blog_title: "My Blog".to_string(),

            content_dir: "content/posts".to_string(),
            images_dir: "content/images/posts".to_string(),
            image_url_prefix: "/images/posts".to_string(),
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            nav_links: vec![NavLink::new("Home", "/"), NavLink::new("Blog", "/blog")],
            social_links: SocialLinks::default(),

            featured_posts: Vec::new(),
            about: AboutConfig::default(),
            cta: CtaConfig::default(),

            limits: ContentLimits::default(),
            reading: ReadingConfig::default(),
            highlight: HighlightConfig::default(),
            messages: Messages::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// A navigation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub name: String,
    pub href: String,
}

impl NavLink {
    pub fn new(name: &str, href: &str) -> Self {
        Self {
            name: name.to_string(),
            href: href.to_string(),
        }
    }
}

/// Social profile links shown in the footer and call-to-action
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub twitter: String,
    pub linkedin: String,
    pub github: String,
}

impl Default for SocialLinks {
    fn default() -> Self {
        Self {
            twitter: "https://x.com/ChandraLindy".to_string(),
            linkedin: "https://linkedin.com/in/chandra-lindy".to_string(),
            github: "https://github.com/chandra-lindy".to_string(),
        }
    }
}

impl SocialLinks {
    /// Non-empty links as (label, url) pairs, in footer order
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("LinkedIn", self.linkedin.as_str()),
            ("X", self.twitter.as_str()),
            ("GitHub", self.github.as_str()),
        ]
        .into_iter()
        .filter(|(_, url)| !url.is_empty())
        .collect()
    }
}

/// A titled text card on the home page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub content: String,
}

/// About section of the home page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutConfig {
    pub heading: String,
    pub intro: String,
    pub cards: Vec<Card>,
}

impl Default for AboutConfig {
    fn default() -> Self {
        Self {
            heading: "From Bedside to Bytecode".to_string(),
            intro: "With 15+ years in nursing, I traded scalpels for syntax and just wrapped up \
                    my BS in Computer Science. Now, I'm healing wounds on the weekends, and \
                    hacking my way into tech during the week; one deploy at a time."
                .to_string(),
            cards: vec![
                Card {
                    title: "Why This Blog?".to_string(),
                    content: "To chronicle the chaos and breakthroughs of my learning curve, \
                              because sharing stumbles turns wins sweeter."
                        .to_string(),
                },
                Card {
                    title: "The Big Picture".to_string(),
                    content: "Land a Cloud DevOps role while bootstrapping side projects that \
                              tackle real-world headaches."
                        .to_string(),
                },
                Card {
                    title: "How I Roll".to_string(),
                    content: "Hands-on all the way: build, break, iterate.".to_string(),
                },
            ],
        }
    }
}

/// Call-to-action section of the home page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CtaConfig {
    pub heading: String,
    pub text: String,
}

impl Default for CtaConfig {
    fn default() -> Self {
        Self {
            heading: "Let's Connect!".to_string(),
            text: "Whether you're a seasoned dev dropping wisdom, a fellow newbie with \
                   questions, or just saying hi, hit me up on X or LinkedIn."
                .to_string(),
        }
    }
}

/// Truncation and count limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentLimits {
    /// Characters of the description shown on post cards
    pub post_excerpt: usize,
    /// Posts shown in the featured section
    pub featured_posts: usize,
}

impl Default for ContentLimits {
    fn default() -> Self {
        Self {
            post_excerpt: 100,
            featured_posts: 4,
        }
    }
}

/// Reading time estimation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingConfig {
    pub words_per_minute: u32,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// User-facing messages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub post_not_found: String,
    pub no_posts: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            post_not_found: "Post not found".to_string(),
            no_posts: "No posts yet. Check back soon!".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.name, "Chandra Lindy");
        assert_eq!(config.limits.post_excerpt, 100);
        assert_eq!(config.limits.featured_posts, 4);
        assert_eq!(config.reading.words_per_minute, 200);
        assert_eq!(config.nav_links.len(), 2);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
name: Jane Doe
content_dir: posts
featured_posts:
  - hello-world
  - second-post
limits:
  featured_posts: 2
social_links:
  twitter: ""
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.name, "Jane Doe");
        assert_eq!(config.content_dir, "posts");
        assert_eq!(config.featured_posts, vec!["hello-world", "second-post"]);
        assert_eq!(config.limits.featured_posts, 2);
        assert_eq!(config.limits.post_excerpt, 100);
        assert_eq!(config.public_dir, "public");

        let labels: Vec<_> = config.social_links.entries().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["LinkedIn", "GitHub"]);
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("_config.yml");
        fs::write(&path, "name: From File\nreading:\n  words_per_minute: 250\n").unwrap();
        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.name, "From File");
        assert_eq!(config.reading.words_per_minute, 250);
    }
}
