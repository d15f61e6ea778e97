//! Solution formatting
//!
//! Text between `**` delimiters is emphasized; everything else, including
//! whitespace and line breaks, is kept literally.

pub const EMPHASIS_DELIMITER: &str = "**";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Emphasis(&'a str),
}

/// Splits on `**`. Odd pieces are emphasized, so an unmatched trailing
/// delimiter emphasizes the rest of the text.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    text.split(EMPHASIS_DELIMITER)
        .enumerate()
        .filter(|(_, piece)| !piece.is_empty())
        .map(|(i, piece)| {
            if i % 2 == 1 {
                Segment::Emphasis(piece)
            } else {
                Segment::Plain(piece)
            }
        })
        .collect()
}

/// Terminal rendering with ANSI bold.
pub fn to_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for segment in segments(text) {
        match segment {
            Segment::Plain(s) => out.push_str(s),
            Segment::Emphasis(s) => out.push_str(&format!("\x1b[1m{}\x1b[0m", s)),
        }
    }
    out
}

/// Delimiters removed, no styling.
pub fn to_plain(text: &str) -> String {
    segments(text)
        .into_iter()
        .map(|segment| match segment {
            Segment::Plain(s) | Segment::Emphasis(s) => s,
        })
        .collect()
}

/// HTML fragment; whitespace is preserved by `pre-wrap`.
pub fn to_html(text: &str) -> String {
    let mut out = String::from("<div class=\"solution\" style=\"white-space: pre-wrap\">");
    for segment in segments(text) {
        match segment {
            Segment::Plain(s) => out.push_str(&escape_html(s)),
            Segment::Emphasis(s) => {
                out.push_str(&format!("<strong>{}</strong>", escape_html(s)))
            }
        }
    }
    out.push_str("</div>");
    out
}

fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
