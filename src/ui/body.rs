//! Page body layout.
//!
//! The whole deck is laid out as one column of styled rows: hero,
//! narrative, the feature strip, tables, charts and analysis. The layout
//! is rebuilt per frame because the strip moves while a transition runs;
//! its row count only changes on resize, reload or section toggles.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

use crate::app::Model;
use crate::chart::{self, Bar};
use crate::content::{
    AnalysisSection, BenchmarkTable, Cell, FeatureItem, GroupedBarChart, Hero,
};
use crate::markdown::{self, display_width, wrap_plain};
use crate::table::Highlights;

use super::style::Theme;

/// Card width in columns, borders included.
pub const CARD_WIDTH: u16 = 32;
/// Blank columns between neighbouring cards.
pub const CARD_GAP: u16 = 2;
/// Distance between card origins; the carousel's item width.
pub const CARD_PITCH: u64 = (CARD_WIDTH + CARD_GAP) as u64;
/// Description rows inside a card.
const CARD_TEXT_ROWS: usize = 4;
/// Rows taken by the card strip.
pub const STRIP_HEIGHT: usize = 4 + CARD_TEXT_ROWS;

const CHART_ROWS: u16 = 8;
const BAR_WIDTH: usize = 4;
const BAR_GAP: usize = 1;
const GROUP_GAP: usize = 3;

/// A laid-out page.
#[derive(Debug, Default)]
pub struct BodyLayout {
    pub lines: Vec<Line<'static>>,
    /// Row of the first strip line.
    pub strip_row: usize,
    /// Header row of each analysis section.
    pub section_rows: Vec<usize>,
}

/// Lay out the page for a content area `width` columns wide.
pub fn layout(model: &Model, width: u16) -> BodyLayout {
    let width = usize::from(width.max(1));
    let theme = &model.theme;
    let mut out = BodyLayout::default();

    push_hero(&mut out.lines, &model.deck.hero, theme, width);

    if !model.deck.narrative.trim().is_empty() {
        let md_width = u16::try_from(width).unwrap_or(u16::MAX);
        for md_line in markdown::render(&model.deck.narrative, md_width) {
            let base = theme.for_line_kind(md_line.kind);
            let spans = md_line
                .spans
                .into_iter()
                .map(|s| Span::styled(s.text, theme.for_span(base, s.style)))
                .collect::<Vec<_>>();
            out.lines.push(Line::from(spans));
        }
        out.lines.push(Line::default());
    }

    out.lines.push(Line::from(vec![
        Span::styled("Key Features", theme.heading),
        Span::styled("   h/l or ←/→ to browse", theme.dim),
    ]));
    out.lines.push(Line::default());
    out.strip_row = out.lines.len();
    push_strip(&mut out.lines, model, width);
    out.lines.push(Line::default());

    for table in &model.deck.tables {
        push_table(&mut out.lines, table, theme, width);
    }
    for chart in &model.deck.charts {
        push_chart(&mut out.lines, chart, theme, width);
    }

    if !model.deck.analysis.is_empty() {
        out.lines.push(Line::from(vec![
            Span::styled("Analysis", theme.heading),
            Span::styled("   Tab to select, Enter to expand", theme.dim),
        ]));
        out.lines.push(Line::default());
        for (i, section) in model.deck.analysis.iter().enumerate() {
            out.section_rows.push(out.lines.len());
            let expanded = model.expanded.get(i).copied().unwrap_or(false);
            let focused = model.focused_section == Some(i);
            push_section(&mut out.lines, section, expanded, focused, theme, width);
        }
    }

    while out.lines.last().is_some_and(|l| l.width() == 0) {
        out.lines.pop();
    }
    out
}

fn push_hero(lines: &mut Vec<Line<'static>>, hero: &Hero, theme: &Theme, width: usize) {
    for row in wrap_plain(&hero.title, width) {
        lines.push(Line::styled(row, theme.title));
    }
    if !hero.subtitle.is_empty() {
        for row in wrap_plain(&hero.subtitle, width) {
            lines.push(Line::styled(row, theme.dim));
        }
    }
    if !hero.badges.is_empty() {
        lines.push(Line::default());
        let mut spans = Vec::new();
        let mut used = 0;
        for badge in &hero.badges {
            let text = format!(" {} {} ", badge.label, badge.value);
            let w = display_width(&text) + 1;
            if used > 0 && used + w > width {
                lines.push(Line::from(std::mem::take(&mut spans)));
                used = 0;
            }
            spans.push(Span::styled(text, theme.badge));
            spans.push(Span::raw(" "));
            used += w;
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::default());
}

/// A run of text with one style inside a card row.
type Segment = (String, Style);

fn card_rows(item: &FeatureItem, focused: bool, theme: &Theme) -> Vec<Vec<Segment>> {
    let inner = usize::from(CARD_WIDTH) - 4;
    let border = if focused {
        theme.accent()
    } else {
        theme.card_border
    };
    let title_style = if focused {
        theme.title
    } else {
        theme.heading
    };
    let framed = |content: Vec<Segment>| {
        let mut row = vec![("│ ".to_string(), border)];
        row.extend(content);
        row.push((" │".to_string(), border));
        row
    };

    let mut rows = Vec::with_capacity(STRIP_HEIGHT);
    let rule = "─".repeat(usize::from(CARD_WIDTH) - 2);
    rows.push(vec![(format!("╭{rule}╮"), border)]);

    let glyph = item.category.glyph();
    let title_room = inner.saturating_sub(display_width(glyph) + 1);
    rows.push(framed(vec![
        (format!("{glyph} "), theme.accent()),
        (
            pad_to_width(&truncate_to_width(&item.title, title_room), title_room),
            title_style,
        ),
    ]));
    rows.push(framed(vec![(
        pad_to_width(item.category.label(), inner),
        theme.dim,
    )]));

    let mut text = wrap_plain(&item.description, inner);
    if text.len() > CARD_TEXT_ROWS {
        text.truncate(CARD_TEXT_ROWS);
        if let Some(last) = text.last_mut() {
            *last = truncate_to_width(&format!("{last} …"), inner);
        }
    }
    text.resize(CARD_TEXT_ROWS, String::new());
    for row in text {
        rows.push(framed(vec![(pad_to_width(&row, inner), theme.text)]));
    }
    rows.push(vec![(format!("╰{rule}╯"), border)]);
    rows
}

fn push_strip(lines: &mut Vec<Line<'static>>, model: &Model, width: usize) {
    let carousel = &model.carousel;
    let theme = &model.theme;
    let item_width = carousel.config().item_width;
    let target = carousel.pending_offset().unwrap_or(carousel.offset());
    let focus_slot = usize::try_from(target / item_width).unwrap_or(usize::MAX);
    let views = carousel.visible_slots(width as u64, model.now_ms);

    let cards = views
        .iter()
        .map(|view| card_rows(view.item, view.slot == focus_slot, theme))
        .collect::<Vec<_>>();
    let skip = views
        .first()
        .map_or(0, |v| usize::try_from(-v.x.min(0)).unwrap_or(0));
    let gap = " ".repeat(usize::from(CARD_GAP));

    for row in 0..STRIP_HEIGHT {
        let mut segments: Vec<Segment> = Vec::new();
        for card in &cards {
            segments.extend(card[row].iter().cloned());
            segments.push((gap.clone(), Style::default()));
        }
        lines.push(Line::from(clip_segments(&segments, skip, width)));
    }

    let position = carousel
        .sequence()
        .source_index(focus_slot)
        .unwrap_or_else(|| carousel.position());
    let mut dots = Vec::new();
    for i in 0..carousel.len() {
        if i > 0 {
            dots.push(Span::raw(" "));
        }
        if i == position {
            dots.push(Span::styled("●", theme.accent()));
        } else {
            dots.push(Span::styled("○", theme.dim));
        }
    }
    dots.push(Span::styled(
        format!("   {}/{}", position + 1, carousel.len()),
        theme.dim,
    ));
    lines.push(Line::from(dots));
}

fn push_table(
    lines: &mut Vec<Line<'static>>,
    table: &BenchmarkTable,
    theme: &Theme,
    width: usize,
) {
    let highlights = Highlights::for_table(table);
    lines.push(Line::styled(table.title.clone(), theme.subheading));
    if let Some(subtitle) = &table.subtitle {
        for row in wrap_plain(subtitle, width) {
            lines.push(Line::styled(row, theme.dim));
        }
    }

    let label_header = table.columns.first().cloned().unwrap_or_default();
    let value_columns = highlights.value_columns();
    let cell_text =
        |cell: Option<&Cell>| cell.map_or_else(|| "—".to_string(), ToString::to_string);

    let label_width = table
        .rows
        .iter()
        .map(|r| display_width(&r.model))
        .chain(std::iter::once(display_width(&label_header)))
        .max()
        .unwrap_or(0);
    let widths = value_columns
        .iter()
        .map(|column| {
            table
                .rows
                .iter()
                .map(|r| display_width(&cell_text(r.values.get(column))))
                .chain(std::iter::once(display_width(column)))
                .max()
                .unwrap_or(0)
        })
        .collect::<Vec<_>>();

    let mut header = vec![
        Span::raw("  "),
        Span::styled(pad_to_width(&label_header, label_width), theme.table_header),
    ];
    for (column, w) in value_columns.iter().zip(&widths) {
        header.push(Span::raw("  "));
        header.push(Span::styled(pad_left_to_width(column, *w), theme.table_header));
    }
    lines.push(Line::from(header));
    let total = 2 + label_width + widths.iter().map(|w| w + 2).sum::<usize>();
    lines.push(Line::styled("─".repeat(total.min(width)), theme.table_border));

    for row in &table.rows {
        let (marker, label_style) = if row.highlighted {
            ("▶ ", theme.accent().add_modifier(Modifier::BOLD))
        } else {
            ("  ", theme.text)
        };
        let mut spans = vec![
            Span::styled(marker, theme.accent()),
            Span::styled(pad_to_width(&row.model, label_width), label_style),
        ];
        for (column, w) in value_columns.iter().zip(&widths) {
            let cell = row.values.get(column);
            let style = if cell.is_some_and(|c| highlights.is_best(&row.model, column, c)) {
                theme.best_value()
            } else {
                theme.text
            };
            spans.push(Span::raw("  "));
            spans.push(Span::styled(pad_left_to_width(&cell_text(cell), *w), style));
        }
        lines.push(Line::from(spans));
    }
    if let Some(note) = &table.note {
        for row in wrap_plain(note, width) {
            lines.push(Line::styled(row, theme.dim.add_modifier(Modifier::ITALIC)));
        }
    }
    lines.push(Line::default());
}

fn push_chart(
    lines: &mut Vec<Line<'static>>,
    chart: &GroupedBarChart,
    theme: &Theme,
    width: usize,
) {
    lines.push(Line::styled(chart.title.clone(), theme.subheading));
    if let Some(subtitle) = &chart.subtitle {
        for row in wrap_plain(subtitle, width) {
            lines.push(Line::styled(row, theme.dim));
        }
    }

    let mut legend = Vec::new();
    for (i, model) in chart.models.iter().enumerate() {
        let highlighted = chart.highlight.as_deref() == Some(model.as_str());
        let swatch = Style::default().fg(theme.series_color(i, highlighted));
        legend.push(Span::styled("■ ", swatch));
        let style = if highlighted {
            theme.accent().add_modifier(Modifier::BOLD)
        } else {
            theme.text
        };
        legend.push(Span::styled(model.clone(), style));
        legend.push(Span::raw("  "));
    }
    lines.push(Line::from(legend));
    lines.push(Line::styled(chart.y_axis_label.clone(), theme.dim));

    let groups = chart
        .groups
        .iter()
        .map(|group| (group, chart::layout_group(chart, group, CHART_ROWS)))
        .collect::<Vec<_>>();
    let group_width =
        |bars: &[Bar]| (bars.len() * (BAR_WIDTH + BAR_GAP)).saturating_sub(BAR_GAP);
    let series_index =
        |bar: &Bar| chart.models.iter().position(|m| *m == bar.model).unwrap_or(0);

    for level in (1..=CHART_ROWS).rev() {
        let mut spans = vec![Span::raw("  ")];
        for (g, (_, bars)) in groups.iter().enumerate() {
            if g > 0 {
                spans.push(Span::raw(" ".repeat(GROUP_GAP)));
            }
            for (b, bar) in bars.iter().enumerate() {
                if b > 0 {
                    spans.push(Span::raw(" ".repeat(BAR_GAP)));
                }
                if bar.rows >= level {
                    let color = theme.series_color(series_index(bar), bar.highlighted);
                    spans.push(Span::styled("█".repeat(BAR_WIDTH), Style::default().fg(color)));
                } else {
                    spans.push(Span::raw(" ".repeat(BAR_WIDTH)));
                }
            }
        }
        lines.push(Line::from(spans));
    }

    let mut baseline = vec![Span::raw("  ")];
    let mut labels = vec![Span::raw("  ")];
    let mut names = vec![Span::raw("  ")];
    for (g, (group, bars)) in groups.iter().enumerate() {
        if g > 0 {
            for row in [&mut baseline, &mut labels, &mut names] {
                row.push(Span::raw(" ".repeat(GROUP_GAP)));
            }
        }
        let gw = group_width(bars);
        baseline.push(Span::styled("─".repeat(gw), theme.table_border));
        for (b, bar) in bars.iter().enumerate() {
            if b > 0 {
                labels.push(Span::raw(" ".repeat(BAR_GAP)));
            }
            let style = if bar.missing {
                theme.dim
            } else if bar.highlighted {
                theme.accent().add_modifier(Modifier::BOLD)
            } else {
                theme.text
            };
            labels.push(Span::styled(pad_to_width(&bar.label, BAR_WIDTH), style));
        }
        let name = group
            .task_count
            .as_ref()
            .map_or_else(|| group.label.clone(), |n| format!("{} ({n})", group.label));
        names.push(Span::styled(
            pad_to_width(&truncate_to_width(&name, gw), gw),
            theme.heading,
        ));
    }
    lines.push(Line::from(baseline));
    lines.push(Line::from(labels));
    lines.push(Line::from(names));

    if let Some(note) = &chart.note {
        for row in wrap_plain(note, width) {
            lines.push(Line::styled(row, theme.dim.add_modifier(Modifier::ITALIC)));
        }
    }
    lines.push(Line::default());
}

fn push_section(
    lines: &mut Vec<Line<'static>>,
    section: &AnalysisSection,
    expanded: bool,
    focused: bool,
    theme: &Theme,
    width: usize,
) {
    let marker = if expanded { "▾ " } else { "▸ " };
    let mut title_style = theme.subheading;
    if focused {
        title_style = title_style.add_modifier(Modifier::REVERSED);
    }
    lines.push(Line::from(vec![
        Span::styled(marker, theme.accent()),
        Span::styled(section.title.clone(), title_style),
    ]));
    if !expanded {
        return;
    }

    let inner = width.saturating_sub(2).max(1);
    for entry in &section.content {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(entry.heading.clone(), theme.heading),
        ]));
        for row in wrap_plain(&entry.text, inner) {
            lines.push(Line::from(vec![Span::raw("  "), Span::styled(row, theme.text)]));
        }
    }
    if !section.implications.is_empty() {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled("Implications", theme.dim.add_modifier(Modifier::BOLD)),
        ]));
        let bullet_room = width.saturating_sub(4).max(1);
        for implication in &section.implications {
            for (i, row) in wrap_plain(implication, bullet_room).into_iter().enumerate() {
                let prefix = if i == 0 { "  • " } else { "    " };
                lines.push(Line::from(vec![
                    Span::styled(prefix, theme.accent()),
                    Span::styled(row, theme.text),
                ]));
            }
        }
    }
    lines.push(Line::default());
}

fn pad_to_width(text: &str, width: usize) -> String {
    let w = display_width(text);
    if w >= width {
        text.to_string()
    } else {
        format!("{text}{}", " ".repeat(width - w))
    }
}

fn pad_left_to_width(text: &str, width: usize) -> String {
    let w = display_width(text);
    if w >= width {
        text.to_string()
    } else {
        format!("{}{text}", " ".repeat(width - w))
    }
}

/// Cut `text` to `width` columns, ending in `…` when shortened.
fn truncate_to_width(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Columns `skip..skip + take` of a styled row. A wide character cut by
/// either edge becomes a space.
fn clip_segments(segments: &[Segment], skip: usize, take: usize) -> Vec<Span<'static>> {
    let end = skip + take;
    let mut col = 0;
    let mut spans = Vec::new();
    for (text, style) in segments {
        let mut buf = String::new();
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0);
            let start = col;
            col += w;
            if col <= skip || start >= end {
                continue;
            }
            if start < skip || col > end {
                buf.push_str(&" ".repeat(col.min(end) - start.max(skip)));
            } else {
                buf.push(ch);
            }
        }
        if !buf.is_empty() {
            spans.push(Span::styled(buf, *style));
        }
        if col >= end {
            break;
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(spans: &[Span<'_>]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_truncate_to_width_adds_ellipsis() {
        assert_eq!(truncate_to_width("Reproducibility", 8), "Reprodu…");
        assert_eq!(truncate_to_width("short", 8), "short");
    }

    #[test]
    fn test_padding_uses_display_width() {
        assert_eq!(pad_to_width("✋", 4), "✋  ");
        assert_eq!(pad_left_to_width("7", 3), "  7");
    }

    #[test]
    fn test_clip_segments_window() {
        let segments = vec![
            ("abc".to_string(), Style::default()),
            ("defg".to_string(), Style::default().add_modifier(Modifier::BOLD)),
        ];
        let clipped = clip_segments(&segments, 2, 3);
        assert_eq!(text(&clipped), "cde");
        assert_eq!(clipped.len(), 2);
        assert!(clipped[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_clip_segments_replaces_cut_wide_chars() {
        let segments = vec![("a✋b".to_string(), Style::default())];
        assert_eq!(text(&clip_segments(&segments, 2, 2)), " b");
        assert_eq!(text(&clip_segments(&segments, 0, 2)), "a ");
    }

    #[test]
    fn test_card_rows_have_card_width() {
        let deck = crate::content::Deck::builtin();
        let theme = Theme::dark();
        for item in &deck.features {
            let rows = card_rows(item, false, &theme);
            assert_eq!(rows.len(), STRIP_HEIGHT);
            for row in rows {
                let w: usize = row.iter().map(|(t, _)| display_width(t)).sum();
                assert_eq!(w, usize::from(CARD_WIDTH), "{}", item.title);
            }
        }
    }
}
