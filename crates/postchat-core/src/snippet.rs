//! Plain-text rendering of stored post bodies.
//!
//! Post bodies are HTML produced by the editor. Before they are embedded
//! in a prompt they are reduced to plain text by [`strip_html`] and bounded
//! by [`truncate`].

use regex::Regex;
use std::sync::LazyLock;

/// Appended to a body that was cut by [`truncate`].
pub const TRUNCATION_MARKER: char = '…';

static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap());
static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap());
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Entity replacements, applied in this order.
const ENTITIES: [(&str, &str); 6] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
];

/// A post reduced to what the prompt needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedSnippet {
    pub title: String,
    pub date: Option<String>,
    /// Stripped and truncated body.
    pub body: String,
}

/// Strip markup from an HTML fragment.
///
/// Removes `<style>` and `<script>` blocks with their contents, replaces
/// every remaining tag with a space, decodes the common entities, collapses
/// whitespace runs to one space, and trims.
pub fn strip_html(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let text = STYLE_BLOCK.replace_all(html, "");
    let text = SCRIPT_BLOCK.replace_all(&text, "");
    let mut text = TAG.replace_all(&text, " ").into_owned();
    for (entity, replacement) in ENTITIES {
        if text.contains(entity) {
            text = text.replace(entity, replacement);
        }
    }

    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Keep at most `max_chars` characters, appending [`TRUNCATION_MARKER`]
/// when anything was cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            let mut out = String::with_capacity(byte_idx + TRUNCATION_MARKER.len_utf8());
            out.push_str(&text[..byte_idx]);
            out.push(TRUNCATION_MARKER);
            out
        }
        None => text.to_string(),
    }
}
