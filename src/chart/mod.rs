//! Grouped bar chart layout.
//!
//! Scores are on a 0..1 scale. Each group becomes one row of bars whose
//! heights are measured in terminal rows; missing scores become `N/A`
//! placeholders.

use crate::content::{BarGroup, GroupedBarChart};

/// Upper end of the score scale.
pub const MAX_VALUE: f64 = 1.0;

/// One bar ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub model: String,
    /// Filled rows, `0..=max_rows`. Zero for `N/A`.
    pub rows: u16,
    /// Value label (`"0.72"` or `"N/A"`).
    pub label: String,
    pub highlighted: bool,
    pub missing: bool,
}

/// Height of a bar for `value` in a plot `max_rows` tall.
pub fn bar_rows(value: f64, max_rows: u16) -> u16 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let ratio = (value / MAX_VALUE).min(1.0);
    // Bounded by max_rows, which fits in u16.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let rows = (ratio * f64::from(max_rows)).round() as u16;
    rows.min(max_rows)
}

/// Lay out the bars of one group.
pub fn layout_group(
    chart: &GroupedBarChart,
    group: &BarGroup,
    max_rows: u16,
) -> Vec<Bar> {
    group
        .values
        .iter()
        .map(|bar| {
            let highlighted = chart.highlight.as_deref() == Some(bar.model.as_str());
            match bar.value {
                Some(value) => Bar {
                    model: bar.model.clone(),
                    rows: bar_rows(value, max_rows),
                    label: format!("{value:.2}"),
                    highlighted,
                    missing: false,
                },
                None => Bar {
                    model: bar.model.clone(),
                    rows: 0,
                    label: "N/A".to_string(),
                    highlighted,
                    missing: true,
                },
            }
        })
        .collect()
}
