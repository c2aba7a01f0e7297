//! Markdown narrative rendering.
//!
//! Deck narratives are parsed with comrak and flattened into styled,
//! wrapped lines that the UI maps onto terminal styles.

mod wrap;

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{Arena, Options, parse_document};

pub use wrap::{display_width, wrap_plain, wrap_spans};

/// Inline style flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub emphasis: bool,
    pub strong: bool,
    pub code: bool,
    pub strikethrough: bool,
    pub link: bool,
}

/// A run of text with one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    pub fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Block-level kind of a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading(u8),
    Paragraph,
    ListItem,
    Quote,
    Code,
    Rule,
    Blank,
}

/// One wrapped output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MdLine {
    pub kind: LineKind,
    pub spans: Vec<Span>,
}

impl MdLine {
    fn blank() -> Self {
        Self {
            kind: LineKind::Blank,
            spans: Vec::new(),
        }
    }

    /// Concatenated text of all spans.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Render `source` into lines at most `width` columns wide.
pub fn render(source: &str, width: u16) -> Vec<MdLine> {
    let arena = Arena::new();
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    let root = parse_document(&arena, source, &options);
    let mut lines = Vec::new();
    let width = usize::from(width.max(1));
    for child in root.children() {
        render_block(child, width, &mut lines);
    }
    while lines.last().is_some_and(|l: &MdLine| l.kind == LineKind::Blank) {
        lines.pop();
    }
    lines
}

fn render_block<'a>(node: &'a AstNode<'a>, width: usize, lines: &mut Vec<MdLine>) {
    match &node.data.borrow().value {
        NodeValue::Heading(heading) => {
            push_wrapped(
                lines,
                LineKind::Heading(heading.level),
                &collect_spans(node),
                width,
                "",
                "",
            );
            lines.push(MdLine::blank());
        }
        NodeValue::Paragraph => {
            push_wrapped(lines, LineKind::Paragraph, &collect_spans(node), width, "", "");
            lines.push(MdLine::blank());
        }
        NodeValue::List(list) => {
            let mut number = list.start;
            for item in node.children() {
                let marker = match list.list_type {
                    ListType::Bullet => "• ".to_string(),
                    ListType::Ordered => format!("{number}. "),
                };
                number += 1;
                let indent = " ".repeat(display_width(&marker));
                let spans = item
                    .children()
                    .flat_map(|child| {
                        let mut spans = collect_spans(child);
                        spans.push(Span::new(" ", SpanStyle::default()));
                        spans
                    })
                    .collect::<Vec<_>>();
                push_wrapped(lines, LineKind::ListItem, &spans, width, &marker, &indent);
            }
            lines.push(MdLine::blank());
        }
        NodeValue::BlockQuote => {
            let spans = node
                .children()
                .flat_map(collect_spans)
                .collect::<Vec<_>>();
            push_wrapped(lines, LineKind::Quote, &spans, width, "│ ", "│ ");
            lines.push(MdLine::blank());
        }
        NodeValue::CodeBlock(code) => {
            let style = SpanStyle {
                code: true,
                ..SpanStyle::default()
            };
            for raw in code.literal.lines() {
                lines.push(MdLine {
                    kind: LineKind::Code,
                    spans: vec![Span::new(format!("  {raw}"), style)],
                });
            }
            lines.push(MdLine::blank());
        }
        NodeValue::ThematicBreak => {
            lines.push(MdLine {
                kind: LineKind::Rule,
                spans: vec![Span::new("─".repeat(width), SpanStyle::default())],
            });
            lines.push(MdLine::blank());
        }
        _ => {
            for child in node.children() {
                render_block(child, width, lines);
            }
        }
    }
}

fn push_wrapped(
    lines: &mut Vec<MdLine>,
    kind: LineKind,
    spans: &[Span],
    width: usize,
    prefix_first: &str,
    prefix_next: &str,
) {
    let inner = width.saturating_sub(display_width(prefix_first)).max(1);
    for (i, mut wrapped) in wrap_spans(spans, inner).into_iter().enumerate() {
        let prefix = if i == 0 { prefix_first } else { prefix_next };
        if !prefix.is_empty() {
            wrapped.insert(0, Span::new(prefix, SpanStyle::default()));
        }
        lines.push(MdLine {
            kind,
            spans: wrapped,
        });
    }
}

fn collect_spans<'a>(node: &'a AstNode<'a>) -> Vec<Span> {
    let mut spans = Vec::new();
    for child in node.children() {
        collect_inline(child, SpanStyle::default(), &mut spans);
    }
    spans
}

fn collect_inline<'a>(node: &'a AstNode<'a>, style: SpanStyle, spans: &mut Vec<Span>) {
    let mut next = style;
    match &node.data.borrow().value {
        NodeValue::List(_) => return,
        NodeValue::Text(text) => {
            spans.push(Span::new(text.clone(), style));
            return;
        }
        NodeValue::Code(code) => {
            let code_style = SpanStyle {
                code: true,
                ..SpanStyle::default()
            };
            spans.push(Span::new(code.literal.clone(), code_style));
            return;
        }
        NodeValue::SoftBreak | NodeValue::LineBreak => {
            spans.push(Span::new(" ", style));
            return;
        }
        NodeValue::Emph => next.emphasis = true,
        NodeValue::Strong => next.strong = true,
        NodeValue::Strikethrough => next.strikethrough = true,
        NodeValue::Link(_) => next.link = true,
        _ => {}
    }
    for child in node.children() {
        collect_inline(child, next, spans);
    }
}
