use std::sync::LazyLock;

use regex::Regex;

use crate::block::Span;

// Bold runs never cross a line or paragraph separator
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^\r\n\x{2028}\x{2029}]*?)\*\*").unwrap());

/// Split a line into plain and bold spans.
///
/// Every `**...**` pair becomes a `Span::Bold`, left to right and without
/// overlap. Stray or unterminated markers stay in the surrounding text.
pub fn resolve_bold(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in BOLD_RE.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            spans.push(Span::Text(text[last..whole.start()].to_string()));
        }
        spans.push(Span::Bold(inner.as_str().to_string()));
        last = whole.end();
    }

    if last < text.len() {
        spans.push(Span::Text(text[last..].to_string()));
    }

    spans
}
