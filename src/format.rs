//! Link detection for rendered assistant text

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches an HTTP/HTTPS URL: scheme followed greedily by non-whitespace.
static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());

/// A contiguous run of text classified for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text
    Plain(String),
    /// An HTTP/HTTPS URL to render as a link
    Link(String),
}

impl Segment {
    /// The text content of this segment
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(s) | Self::Link(s) => s,
        }
    }
}

/// Split `text` into plain and link segments, in input order
///
/// A link runs from `http://` or `https://` up to the next whitespace
/// character or end of input. Empty gaps between adjacent links are
/// normalized away, so no segment is ever empty.
pub fn format_links(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for m in URL_RE.find_iter(text) {
        if m.start() > cursor {
            segments.push(Segment::Plain(text[cursor..m.start()].to_string()));
        }
        segments.push(Segment::Link(m.as_str().to_string()));
        cursor = m.end();
    }

    if cursor < text.len() {
        segments.push(Segment::Plain(text[cursor..].to_string()));
    }

    segments
}
