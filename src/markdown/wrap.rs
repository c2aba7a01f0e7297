//! Width-aware word wrapping.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::{Span, SpanStyle};

/// Display width of `text` in terminal columns.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Wrap plain text to `width` columns, breaking on whitespace.
///
/// Words wider than `width` are split by character.
pub fn wrap_plain(text: &str, width: usize) -> Vec<String> {
    let spans = [Span::new(text, SpanStyle::default())];
    wrap_spans(&spans, width)
        .into_iter()
        .map(|line| line.iter().map(|s| s.text.as_str()).collect())
        .collect()
}

/// Wrap styled spans into lines no wider than `width` columns.
pub fn wrap_spans(spans: &[Span], width: usize) -> Vec<Vec<Span>> {
    let width = width.max(1);
    let mut tokens = Vec::new();
    for span in spans {
        tokens.extend(split_tokens(span));
    }

    let mut lines = Vec::new();
    let mut current: Vec<Span> = Vec::new();
    let mut current_width = 0usize;

    for token in tokens {
        let is_ws = token.text.chars().all(char::is_whitespace);
        let token_width = display_width(&token.text);

        if current_width + token_width > width && !current.is_empty() {
            trim_trailing_ws(&mut current);
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if is_ws {
            if current.is_empty() {
                continue;
            }
            current_width += token_width;
            current.push(token);
            continue;
        }
        if token_width > width {
            for piece in split_long(&token, width) {
                let piece_width = display_width(&piece.text);
                if current_width + piece_width > width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current_width += piece_width;
                current.push(piece);
            }
            continue;
        }
        current_width += token_width;
        current.push(token);
    }

    trim_trailing_ws(&mut current);
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn trim_trailing_ws(line: &mut Vec<Span>) {
    while line
        .last()
        .is_some_and(|s| s.text.chars().all(char::is_whitespace))
    {
        line.pop();
    }
}

fn split_tokens(span: &Span) -> Vec<Span> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut ws_state: Option<bool> = None;

    for ch in span.text.chars() {
        let is_ws = ch.is_whitespace();
        if ws_state.is_some_and(|state| state != is_ws) {
            out.push(Span::new(std::mem::take(&mut buf), span.style));
        }
        // Collapse runs of whitespace (including newlines) to one space.
        if is_ws {
            if ws_state != Some(true) {
                buf.push(' ');
            }
        } else {
            buf.push(ch);
        }
        ws_state = Some(is_ws);
    }
    if !buf.is_empty() {
        out.push(Span::new(buf, span.style));
    }
    out
}

fn split_long(token: &Span, width: usize) -> Vec<Span> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut buf_width = 0;
    for ch in token.text.chars() {
        let w = ch.width().unwrap_or(0);
        if buf_width + w > width && !buf.is_empty() {
            out.push(Span::new(std::mem::take(&mut buf), token.style));
            buf_width = 0;
        }
        buf.push(ch);
        buf_width += w;
    }
    if !buf.is_empty() {
        out.push(Span::new(buf, token.style));
    }
    out
}
