//! Front-matter parsing

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

use super::ContentError;

const DELIMITER: &str = "---";

/// Accepts either a single scalar or a list of scalars.
///
/// Numbers and booleans are kept as their text. Nested lists and mappings
/// are dropped with a warning instead of rejecting the whole post.
fn string_or_vec<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::Sequence(items)) => Some(items.iter().filter_map(scalar_tag).collect()),
        Some(value) => Some(scalar_tag(&value).into_iter().collect()),
    };
    Ok(tags)
}

fn scalar_tag(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => None,
        other => {
            tracing::warn!("Ignoring non-scalar tag {:?}", other);
            None
        }
    }
}

/// Raw front-matter exactly as written by the author.
///
/// Every field is optional here; [`FrontMatter::validate`] applies the
/// required-field checks and defaults in one place.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Option<Vec<String>>,
    pub published: Option<bool>,
    /// Accepted for compatibility with older posts. The post image is always
    /// resolved from the image directory instead, so any shape is accepted.
    pub image: Option<Value>,
}

/// Validated post metadata with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostMeta {
    pub title: String,
    pub date: String,
    pub description: String,
    pub tags: Option<Vec<String>>,
    pub published: bool,
}

impl FrontMatter {
    /// Split a post file into its front-matter and Markdown body.
    ///
    /// The file must open with a `---` line and the block ends at the next
    /// line consisting of `---`.
    pub fn parse(content: &str) -> Result<(Self, &str), ContentError> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        let rest = content
            .strip_prefix(DELIMITER)
            .ok_or(ContentError::MissingFrontMatter)?;
        let (opening_tail, rest) = rest
            .split_once('\n')
            .ok_or(ContentError::UnterminatedFrontMatter)?;
        if !opening_tail.trim().is_empty() {
            return Err(ContentError::MissingFrontMatter);
        }

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == DELIMITER {
                let yaml = &rest[..offset];
                let body = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);

                if yaml.trim().is_empty() {
                    return Ok((FrontMatter::default(), body));
                }
                let fm = serde_yaml::from_str::<FrontMatter>(yaml)?;
                return Ok((fm, body));
            }
            offset += line.len();
        }

        Err(ContentError::UnterminatedFrontMatter)
    }

    /// Check required fields and apply defaults
    pub fn validate(self) -> Result<PostMeta, ContentError> {
        Ok(PostMeta {
            title: required(self.title, "title")?,
            date: required(self.date, "date")?,
            description: required(self.description, "description")?,
            tags: self.tags,
            published: self.published.unwrap_or(true),
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ContentError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ContentError::MissingField(field)),
    }
}
