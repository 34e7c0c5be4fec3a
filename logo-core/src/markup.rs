//! Extraction of SVG markup from free-form model output.
//!
//! Text models often wrap markup in fenced code blocks or surround it with
//! prose. Fences are removed first, then the first `<svg>…</svg>` span is
//! taken, matching lazily across newlines and ignoring case.

use std::sync::LazyLock;

use regex::Regex;

/// Opening fence with an optional language tag and trailing newline.
static OPENING_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)```[a-z]*\n?").expect("fence pattern is valid")
});

/// First complete SVG element, non-greedy.
static SVG_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<svg.*?</svg>").expect("svg pattern is valid")
});

const FENCE: &str = "```";

/// Remove every fenced code-block delimiter from `text`.
///
/// ```
/// use logo_core::markup::strip_code_fences;
///
/// assert_eq!(strip_code_fences("```xml\n<svg></svg>\n```"), "<svg></svg>\n");
/// ```
#[must_use]
pub fn strip_code_fences(text: &str) -> String {
    OPENING_FENCE.replace_all(text, "").replace(FENCE, "")
}

/// Find the first `<svg …>…</svg>` span in already-cleaned text.
#[must_use]
pub fn find_svg_span(text: &str) -> Option<&str> {
    SVG_SPAN.find(text).map(|m| m.as_str())
}

/// Strip fences from raw model output and return the first SVG span.
///
/// Returns `None` when the output contains no complete SVG element.
#[must_use]
pub fn extract_svg(raw: &str) -> Option<String> {
    let cleaned = strip_code_fences(raw);
    let span = find_svg_span(&cleaned).map(str::to_string);
    if span.is_none() {
        tracing::debug!(len = raw.len(), "no <svg> span in model output");
    }
    span
}
