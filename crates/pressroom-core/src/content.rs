//! Content derivation rules: excerpts and video providers.

use url::Url;

use crate::error::{PressroomError, PressroomResult};
use crate::models::block::Block;

/// Maximum excerpt length in characters, excluding the ellipsis.
pub const EXCERPT_MAX_CHARS: usize = 160;

/// Hosts accepted for video blocks.
const VIDEO_PROVIDERS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "youtu.be",
    "vimeo.com",
    "player.vimeo.com",
    "dailymotion.com",
    "www.dailymotion.com",
];

/// Strip HTML tags from a fragment, returning the visible text.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Derive an excerpt from the first text block: tags stripped, trimmed,
/// and truncated to [`EXCERPT_MAX_CHARS`] characters plus an ellipsis.
///
/// A post without a text block gets an empty excerpt.
pub fn derive_excerpt(blocks: &[Block]) -> String {
    let Some(html) = blocks.iter().find_map(Block::as_text) else {
        return String::new();
    };

    let text = strip_tags(html);
    let text = text.trim();

    let mut chars = text.chars();
    let truncated: String = chars.by_ref().take(EXCERPT_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{truncated}...")
    } else {
        truncated
    }
}

/// Check whether a video URL points at a known provider.
pub fn is_known_video_provider(raw: &str) -> bool {
    let Ok(url) = Url::parse(raw) else {
        return false;
    };
    match url.host_str() {
        Some(host) => VIDEO_PROVIDERS.iter().any(|p| host.eq_ignore_ascii_case(p)),
        None => false,
    }
}

/// Validate a single block for persistence.
pub fn validate_block(block: &Block) -> PressroomResult<()> {
    match block {
        Block::Text { html } if html.trim().is_empty() => Err(PressroomError::Validation {
            message: "text block is empty".into(),
        }),
        Block::Image { url, .. } if url.trim().is_empty() => Err(PressroomError::Validation {
            message: "image block has no URL".into(),
        }),
        Block::Video { url } if !is_known_video_provider(url) => Err(PressroomError::Validation {
            message: format!("unsupported video provider: {url}"),
        }),
        _ => Ok(()),
    }
}
