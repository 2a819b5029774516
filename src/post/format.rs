//! Platform-aware post-processing of generated text.

use super::platform::PlatformSpec;

/// How many default hashtags may be appended to a post.
pub const MAX_APPENDED_HASHTAGS: usize = 3;

/// Appended when truncation is required; one char reserved out of the limit.
const ELLIPSIS: char = '…';

/// Format generated text for a platform.
///
/// Appends default hashtags (when requested, absent, and they fit) and
/// truncates to `max_length` at a whitespace boundary as a last resort.
/// Lengths are counted in chars. Never fails; the worst case for a
/// pathological limit is an empty string.
pub fn format_post(generated: &str, platform: &PlatformSpec, include_hashtags: bool) -> String {
    let mut content = generated.trim().to_string();

    if include_hashtags && !contains_hashtag(&content) {
        if let Some(with_tags) =
            append_hashtags(&content, &platform.default_hashtags, platform.max_length)
        {
            content = with_tags;
        }
    }

    if char_count(&content) > platform.max_length {
        content = truncate_at_boundary(&content, platform.max_length);
    }

    content
}

/// Whether the text already carries any `#`-prefixed token.
fn contains_hashtag(text: &str) -> bool {
    text.split_whitespace()
        .any(|token| token.starts_with('#') && token.chars().nth(1).is_some_and(char::is_alphanumeric))
}

/// Append up to [`MAX_APPENDED_HASHTAGS`] tags after a blank line.
///
/// Returns `None` when there are no tags or the result would overflow
/// `max_length` — hashtags are omitted rather than truncating content to
/// fit them.
fn append_hashtags(content: &str, tags: &[String], max_length: usize) -> Option<String> {
    let normalized: Vec<String> = tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .take(MAX_APPENDED_HASHTAGS)
        .map(|t| {
            if t.starts_with('#') {
                t.to_string()
            } else {
                format!("#{t}")
            }
        })
        .collect();

    if normalized.is_empty() {
        return None;
    }

    let candidate = format!("{content}\n\n{}", normalized.join(" "));
    (char_count(&candidate) <= max_length).then_some(candidate)
}

/// Truncate to `max_length` chars at the nearest preceding whitespace
/// boundary, reserving one char for the ellipsis.
///
/// Never splits inside a char or a hashtag token. When no whitespace
/// boundary exists, a plain token is hard-cut at a char boundary; a lone
/// hashtag token is dropped entirely.
fn truncate_at_boundary(text: &str, max_length: usize) -> String {
    let budget = max_length.saturating_sub(1);
    if budget == 0 {
        return String::new();
    }

    // A whitespace cut may sit at the budget boundary itself, so search one
    // char past the keepable prefix.
    let search_limit = byte_index_at_char(text, budget + 1);
    let searched = &text[..search_limit];

    let kept = match searched.rfind(char::is_whitespace) {
        Some(ws) => searched[..ws].trim_end(),
        None if searched.starts_with('#') => "",
        None => &text[..byte_index_at_char(text, budget)],
    };

    if kept.is_empty() {
        return String::new();
    }

    let mut out = kept.to_string();
    out.push(ELLIPSIS);
    out
}

fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of the boundary after `chars` chars (or the end of text).
fn byte_index_at_char(text: &str, chars: usize) -> usize {
    text.char_indices().nth(chars).map_or(text.len(), |(i, _)| i)
}
