//! Colours and text styles.
//!
//! One [`Theme`] per background brightness. The brand accent is a true
//! colour orange that falls back to its nearest xterm-256 index on
//! terminals without 24-bit colour.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeMode;
use crate::markdown::{LineKind, SpanStyle};

/// Brand accent, `#FF6D29`.
pub const ACCENT_RGB: (u8, u8, u8) = (0xFF, 0x6D, 0x29);

/// Resolved styles for the whole UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub light: bool,
    pub accent: Color,
    pub text: Style,
    pub dim: Style,
    pub title: Style,
    pub heading: Style,
    pub subheading: Style,
    pub code: Style,
    pub quote: Style,
    pub link: Style,
    pub card_border: Style,
    pub badge: Style,
    pub table_header: Style,
    pub table_border: Style,
    /// Fills for non-highlighted chart series, cycled by legend order.
    pub series: [Color; 4],
    pub status_bg: Color,
    pub status_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        let light = match mode {
            ThemeMode::Light => true,
            ThemeMode::Dark => false,
            ThemeMode::Auto => background_is_light(std::env::var("COLORFGBG").ok().as_deref()),
        };
        if light { Self::light() } else { Self::dark() }
    }

    pub fn dark() -> Self {
        let accent = accent_color(supports_truecolor());
        Self {
            light: false,
            accent,
            text: Style::default(),
            dim: Style::default().fg(Color::Indexed(245)),
            title: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            heading: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            subheading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            code: Style::default().fg(Color::Indexed(245)),
            quote: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::ITALIC),
            link: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::UNDERLINED),
            card_border: Style::default().fg(Color::Indexed(240)),
            badge: Style::default().fg(Color::Black).bg(Color::Indexed(250)),
            table_header: Style::default()
                .fg(Color::Indexed(250))
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Indexed(240)),
            series: [
                Color::Indexed(245),
                Color::Indexed(67),
                Color::Indexed(108),
                Color::Indexed(139),
            ],
            status_bg: Color::Indexed(236),
            status_fg: Color::Indexed(252),
        }
    }

    pub fn light() -> Self {
        let accent = accent_color(supports_truecolor());
        Self {
            light: true,
            accent,
            text: Style::default(),
            dim: Style::default().fg(Color::Indexed(242)),
            title: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            heading: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            subheading: Style::default()
                .fg(Color::Indexed(25))
                .add_modifier(Modifier::BOLD),
            code: Style::default().fg(Color::Indexed(240)),
            quote: Style::default()
                .fg(Color::Indexed(25))
                .add_modifier(Modifier::ITALIC),
            link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            card_border: Style::default().fg(Color::Indexed(248)),
            badge: Style::default().fg(Color::White).bg(Color::Indexed(240)),
            table_header: Style::default()
                .fg(Color::Indexed(238))
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Indexed(248)),
            series: [
                Color::Indexed(244),
                Color::Indexed(25),
                Color::Indexed(29),
                Color::Indexed(96),
            ],
            status_bg: Color::Indexed(252),
            status_fg: Color::Indexed(235),
        }
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Best value in a benchmark table.
    pub fn best_value(&self) -> Style {
        self.accent().add_modifier(Modifier::BOLD)
    }

    /// Base style for a rendered markdown line.
    pub fn for_line_kind(&self, kind: LineKind) -> Style {
        match kind {
            LineKind::Heading(1) => self.heading.add_modifier(Modifier::UNDERLINED),
            LineKind::Heading(_) => self.subheading,
            LineKind::Code => self.code,
            LineKind::Quote => self.quote,
            LineKind::Rule => self.table_border,
            LineKind::Paragraph | LineKind::ListItem | LineKind::Blank => self.text,
        }
    }

    /// Merge inline markdown flags onto `base`.
    pub fn for_span(&self, base: Style, inline: SpanStyle) -> Style {
        let mut style = base;
        if inline.emphasis {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if inline.strong {
            style = style.add_modifier(Modifier::BOLD);
        }
        if inline.strikethrough {
            style = style.add_modifier(Modifier::CROSSED_OUT);
        }
        if inline.link {
            style = style.patch(self.link);
        }
        if inline.code {
            style = style.fg(self.accent);
        }
        style
    }

    /// Bar colour for the series at `index` in the legend.
    pub fn series_color(&self, index: usize, highlighted: bool) -> Color {
        if highlighted {
            self.accent
        } else {
            self.series[index % self.series.len()]
        }
    }
}

fn accent_color(truecolor: bool) -> Color {
    let (r, g, b) = ACCENT_RGB;
    if truecolor {
        Color::Rgb(r, g, b)
    } else {
        Color::Indexed(rgb_to_xterm_256(r, g, b))
    }
}

fn supports_truecolor() -> bool {
    supports_truecolor_from_env(
        std::env::var("COLORTERM").ok().as_deref(),
        std::env::var("TERM").ok().as_deref(),
    )
}

fn supports_truecolor_from_env(colorterm: Option<&str>, term: Option<&str>) -> bool {
    let has = |value: Option<&str>, needles: &[&str]| {
        value.is_some_and(|v| {
            let lower = v.to_ascii_lowercase();
            needles.iter().any(|n| lower.contains(n))
        })
    };
    has(colorterm, &["truecolor", "24bit"]) || has(term, &["direct", "truecolor"])
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); palette indices 7
/// and 15 are light backgrounds.
fn background_is_light(colorfgbg: Option<&str>) -> bool {
    colorfgbg
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .is_some_and(|bg| bg == 7 || bg == 15)
}

fn rgb_to_xterm_256(r: u8, g: u8, b: u8) -> u8 {
    #[allow(clippy::cast_possible_truncation)]
    let to_cube = |v: u8| ((u16::from(v) * 5) / 255) as u8;
    16 + (36 * to_cube(r)) + (6 * to_cube(g)) + to_cube(b)
}
