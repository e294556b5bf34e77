//! Derived post fields: reading time and main image

use std::path::Path;

use crate::helpers::encode_path_segment;

/// Reading speed used when none is configured
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Estimate minutes to read `body`, never less than one minute.
///
/// Words are whitespace-separated runs. A speed of zero falls back to
/// [`DEFAULT_WORDS_PER_MINUTE`].
pub fn reading_time(body: &str, words_per_minute: u32) -> u32 {
    let words_per_minute = if words_per_minute == 0 {
        DEFAULT_WORDS_PER_MINUTE
    } else {
        words_per_minute
    };
    let words = body.split_whitespace().count() as u64;
    let minutes = words.div_ceil(u64::from(words_per_minute));
    u32::try_from(minutes).unwrap_or(u32::MAX).max(1)
}

/// Pick the main image for `slug` among the files of its image directory.
///
/// Only `<slug>-main-image.<ext>` files qualify. A `.webp` file wins,
/// otherwise the lexically first name.
pub fn select_main_image<'a>(slug: &str, candidates: &'a [String]) -> Option<&'a str> {
    let prefix = format!("{}-main-image.", slug);
    let mut matching: Vec<&'a str> = candidates
        .iter()
        .map(String::as_str)
        .filter(|name| name.len() > prefix.len() && name.starts_with(&prefix))
        .collect();
    matching.sort_unstable();

    matching
        .iter()
        .copied()
        .find(|name| is_webp(name))
        .or_else(|| matching.first().copied())
}

/// Public URL of an image file stored under the directory of `slug`
pub fn image_url(prefix: &str, slug: &str, file: &str) -> String {
    format!(
        "{}/{}/{}",
        prefix.trim_end_matches('/'),
        encode_path_segment(slug),
        encode_path_segment(file)
    )
}

fn is_webp(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("webp"))
        .unwrap_or(false)
}
