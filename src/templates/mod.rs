//! Page templates
//!
//! Every page is a plain function of the site config and the posts handed
//! in by the generator. The shared chrome (head, navigation, footer) is
//! wrapped around each page body by [`PageRenderer::layout`].

mod theme;

use anyhow::Result;

pub use theme::{CardTheme, CardThemeClasses};

use crate::config::SiteConfig;
use crate::content::{MarkdownRenderer, Post};
use crate::helpers::{
    current_year, escape_html, excerpt, format_date, full_url_for, post_url, url_for, DateStyle,
};

/// Head metadata for one page
#[derive(Debug, Clone, Default)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    /// Site-relative image used for the social preview
    pub image: Option<String>,
}

/// Renders the site pages to HTML strings
pub struct PageRenderer {
    config: SiteConfig,
    markdown: MarkdownRenderer,
}

impl PageRenderer {
    /// Create a renderer for `config`
    pub fn new(config: &SiteConfig) -> Self {
        let markdown =
            MarkdownRenderer::with_options(&config.highlight.theme, config.highlight.line_number);
        Self {
            config: config.clone(),
            markdown,
        }
    }

    /// Home page: hero, featured posts, call-to-action and about sections
    pub fn render_home(&self, featured: &[Post]) -> String {
        let mut body = String::new();

        body.push_str(&format!(
            r#"<section class="hero"><h1>{}</h1><a class="button" href="{}">Explore My Blog</a></section>"#,
            escape_html(&self.config.hero_title),
            url_for(&self.config, "/blog")
        ));

        if !featured.is_empty() {
            body.push_str(r#"<section class="featured-posts"><h2>Featured Posts</h2><div class="post-grid">"#);
            for (i, post) in featured.iter().enumerate() {
                body.push_str(&self.post_card(post, CardTheme::Light, i == 0));
            }
            body.push_str("</div></section>");
        }

        body.push_str(&self.cta_section());
        body.push_str(&self.about_section());

        let meta = PageMeta {
            title: self.config.name.clone(),
            description: self.config.description.clone(),
            image: None,
        };
        self.layout(&meta, "/", &body)
    }

    /// Blog index listing every post, newest first
    pub fn render_blog_index(&self, posts: &[Post]) -> String {
        let mut body = format!(
            r#"<main class="blog-index"><h1>{}</h1>"#,
            escape_html(&self.config.blog_title)
        );

        if posts.is_empty() {
            body.push_str(&format!(
                r#"<p class="empty">{}</p>"#,
                escape_html(&self.config.messages.no_posts)
            ));
        } else {
            body.push_str(r#"<div class="post-list">"#);
            for post in posts {
                body.push_str(&format!(
                    r#"<article class="post-entry"><h2><a href="{}">{}</a></h2><p class="date"><time datetime="{}">{}</time></p><p>{}</p></article>"#,
                    url_for(&self.config, &post_url(&post.slug)),
                    escape_html(&post.title),
                    escape_html(&post.date),
                    escape_html(&format_date(&post.date, DateStyle::Full)),
                    escape_html(&post.description)
                ));
            }
            body.push_str("</div>");
        }
        body.push_str("</main>");

        let meta = PageMeta {
            title: format!("{} | {}", self.config.blog_title, self.config.name),
            description: self.config.description.clone(),
            image: None,
        };
        self.layout(&meta, "/blog", &body)
    }

    /// A single post page
    pub fn render_post(&self, post: &Post) -> Result<String> {
        let content = self.markdown.render(&post.content)?;

        let image = match &post.image {
            Some(src) => format!(
                r#"<img src="{}" alt="{}" width="600" height="400">"#,
                url_for(&self.config, src),
                escape_html(&post.title)
            ),
            None => r#"<div class="image-placeholder"><span>No image available</span></div>"#
                .to_string(),
        };

        let tags = if post.tag_list().is_empty() {
            String::new()
        } else {
            let items: String = post
                .tag_list()
                .iter()
                .map(|t| format!(r#"<li class="tag">{}</li>"#, escape_html(t)))
                .collect();
            format!(r#"<ul class="tags">{}</ul>"#, items)
        };

        let body = format!(
            r#"<article class="post"><header class="post-hero"><div class="post-image">{}</div><div class="post-heading"><h1>{}</h1><p class="description">{}</p><p class="meta"><time datetime="{}">{}</time><span class="reading-time"> • {} min read</span></p>{}</div></header><div class="post-content">{}</div></article>"#,
            image,
            escape_html(&post.title),
            escape_html(&post.description),
            escape_html(&post.date),
            escape_html(&format_date(&post.date, DateStyle::Full)),
            post.reading_time,
            tags,
            content
        );

        let meta = PageMeta {
            title: format!("{} | {}", post.title, self.config.name),
            description: post.description.clone(),
            image: post.image.clone(),
        };
        Ok(self.layout(&meta, &post_url(&post.slug), &body))
    }

    /// The 404 page
    pub fn render_not_found(&self) -> String {
        let body = format!(
            r#"<main class="not-found"><div class="code">404</div><h1>Page Not Found</h1><p>The page you're looking for doesn't exist or has been moved.</p><a class="button" href="{}">Go Home</a><br><a href="{}">Browse Blog Posts →</a></main>"#,
            url_for(&self.config, "/"),
            url_for(&self.config, "/blog")
        );

        let meta = PageMeta {
            title: format!("{} | {}", self.config.messages.post_not_found, self.config.name),
            description: self.config.description.clone(),
            image: None,
        };
        self.layout(&meta, "", &body)
    }

    /// A post card for grids; the first card of a page gets an eager image
    pub fn post_card(&self, post: &Post, theme: CardTheme, priority: bool) -> String {
        let classes = theme.classes();
        let image = post
            .image
            .as_ref()
            .map(|src| {
                format!(
                    r#"<div class="card-image"><img src="{}" alt="{}" loading="{}"></div>"#,
                    url_for(&self.config, src),
                    escape_html(&post.title),
                    if priority { "eager" } else { "lazy" }
                )
            })
            .unwrap_or_default();

        format!(
            r#"<a class="post-card" href="{}"><div class="{} {}">{}<h3 class="{}">{}</h3><p class="{}">{}</p><p class="{}">{}</p></div></a>"#,
            url_for(&self.config, &post_url(&post.slug)),
            classes.container,
            classes.hover,
            image,
            classes.title,
            escape_html(&post.title),
            classes.excerpt,
            escape_html(&excerpt(&post.description, self.config.limits.post_excerpt)),
            classes.date,
            escape_html(&format_date(&post.date, DateStyle::Full))
        )
    }

    /// Wrap a page body in the document shell, navigation and footer
    pub fn layout(&self, meta: &PageMeta, current_path: &str, body: &str) -> String {
        let og_image = meta.image.as_deref().unwrap_or(&self.config.og_image);

        format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{description}">
<meta property="og:title" content="{title}">
<meta property="og:description" content="{description}">
<meta property="og:image" content="{og_image}">
<link rel="stylesheet" href="{css}">
</head>
<body>
{nav}
{body}
{footer}
</body>
</html>
"#,
            lang = escape_html(&self.config.language),
            title = escape_html(&meta.title),
            description = escape_html(&meta.description),
            og_image = escape_html(&full_url_for(&self.config, og_image)),
            css = url_for(&self.config, "/css/style.css"),
            nav = self.navigation(current_path),
            body = body,
            footer = self.footer()
        )
    }

    /// Site navigation; the link for `current_path` is marked active
    pub fn navigation(&self, current_path: &str) -> String {
        let links: String = self
            .config
            .nav_links
            .iter()
            .map(|link| {
                let active = link.href == current_path;
                format!(
                    r#"<a class="nav-link{}" href="{}"{}>{}</a>"#,
                    if active { " active" } else { "" },
                    url_for(&self.config, &link.href),
                    if active { r#" aria-current="page""# } else { "" },
                    escape_html(&link.name)
                )
            })
            .collect();

        format!(
            r#"<nav class="site-nav"><a class="brand" href="{}">{}</a><div class="nav-links">{}</div></nav>"#,
            url_for(&self.config, "/"),
            escape_html(&self.config.name),
            links
        )
    }

    /// Site footer with copyright and social links
    pub fn footer(&self) -> String {
        let links: String = self
            .config
            .social_links
            .entries()
            .into_iter()
            .map(|(label, href)| {
                format!(
                    r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
                    escape_html(href),
                    label
                )
            })
            .collect();

        format!(
            r#"<footer class="site-footer"><div>© {} {}</div><div class="social-links">{}</div></footer>"#,
            current_year(),
            escape_html(&self.config.name),
            links
        )
    }

    fn cta_section(&self) -> String {
        let social = &self.config.social_links;
        let mut buttons = String::new();
        if !social.twitter.is_empty() {
            buttons.push_str(&format!(
                r#"<a class="button follow" href="{}" target="_blank" rel="noopener noreferrer">Follow</a>"#,
                escape_html(&social.twitter)
            ));
        }
        if !social.linkedin.is_empty() {
            buttons.push_str(&format!(
                r#"<a class="button connect" href="{}" target="_blank" rel="noopener noreferrer">Connect</a>"#,
                escape_html(&social.linkedin)
            ));
        }

        format!(
            r#"<section class="cta"><h2>{}</h2><p>{}</p><div class="cta-buttons">{}</div></section>"#,
            escape_html(&self.config.cta.heading),
            escape_html(&self.config.cta.text),
            buttons
        )
    }

    fn about_section(&self) -> String {
        let about = &self.config.about;
        let cards: String = about
            .cards
            .iter()
            .map(|card| {
                format!(
                    r#"<div class="card"><h3>{}</h3><p>{}</p></div>"#,
                    escape_html(&card.title),
                    escape_html(&card.content)
                )
            })
            .collect();

        format!(
            r#"<section class="about"><h2>{}</h2><p>{}</p><div class="cards">{}</div></section>"#,
            escape_html(&about.heading),
            escape_html(&about.intro),
            cards
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post(slug: &str, image: Option<&str>) -> Post {
        Post {
            slug: slug.to_string(),
            title: format!("Title <{}>", slug),
            date: "2024-01-15".to_string(),
            description: "d".repeat(150),
            content: "# Heading\n\nSome *text*.".to_string(),
            image: image.map(|s| s.to_string()),
            tags: Some(vec!["rust".to_string()]),
            published: true,
            reading_time: 3,
        }
    }

    #[test]
    fn test_render_post_page() {
        let renderer = PageRenderer::new(&SiteConfig::default());
        let html = renderer
            .render_post(&sample_post("hello", Some("/images/posts/hello/hello-main-image.webp")))
            .unwrap();
        assert!(html.contains("<h1>Title &lt;hello&gt;</h1>"));
        assert!(html.contains("January 15, 2024"));
        assert!(html.contains("3 min read"));
        assert!(html.contains(r#"<li class="tag">rust</li>"#));
        assert!(html.contains("<em>text</em>"));
        assert!(html.contains(r#"src="/images/posts/hello/hello-main-image.webp""#));
        assert!(html.contains(
            r#"content="https://chandra-lindy.com/images/posts/hello/hello-main-image.webp""#
        ));
    }

    #[test]
    fn test_render_post_without_image() {
        let renderer = PageRenderer::new(&SiteConfig::default());
        let html = renderer.render_post(&sample_post("plain", None)).unwrap();
        assert!(html.contains("No image available"));
        assert!(html.contains("https://chandra-lindy.com/og-image.png"));
    }

    #[test]
    fn test_blog_index() {
        let renderer = PageRenderer::new(&SiteConfig::default());
        let html = renderer.render_blog_index(&[sample_post("a", None), sample_post("b", None)]);
        assert!(html.contains(r#"href="/blog/a""#));
        assert!(html.contains(r#"href="/blog/b""#));
        assert!(html.contains(r#"<a class="nav-link active" href="/blog" aria-current="page">Blog</a>"#));

        let empty = renderer.render_blog_index(&[]);
        assert!(empty.contains("No posts yet"));
    }

    #[test]
    fn test_home_page() {
        let renderer = PageRenderer::new(&SiteConfig::default());
        let html = renderer.render_home(&[sample_post("a", Some("/images/posts/a/a-main-image.png"))]);
        assert!(html.contains("Featured Posts"));
        assert!(html.contains("Explore My Blog"));
        assert!(html.contains(r#"loading="eager""#));
        assert!(html.contains("Let&#39;s Connect!"));
        assert!(html.contains("From Bedside to Bytecode"));

        let without = renderer.render_home(&[]);
        assert!(!without.contains("Featured Posts"));
    }

    #[test]
    fn test_post_card_truncates_description() {
        let renderer = PageRenderer::new(&SiteConfig::default());
        let card = renderer.post_card(&sample_post("a", None), CardTheme::Dark, false);
        assert!(card.contains(&format!("{}...", "d".repeat(100))));
        assert!(card.contains("bg-gray-800"));
        assert!(!card.contains("<img"));
    }

    #[test]
    fn test_not_found_page() {
        let renderer = PageRenderer::new(&SiteConfig::default());
        let html = renderer.render_not_found();
        assert!(html.contains("Page Not Found"));
        assert!(html.contains("Browse Blog Posts"));
        assert!(!html.contains("active"));
    }

    #[test]
    fn test_footer_links() {
        let renderer = PageRenderer::new(&SiteConfig::default());
        let footer = renderer.footer();
        assert!(footer.contains("Chandra Lindy"));
        assert!(footer.contains("https://github.com/chandra-lindy"));
    }
}
