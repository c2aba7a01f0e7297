//! Best-value highlighting for benchmark tables.
//!
//! A table whose first column is `Metric` lists one metric per row, so the
//! best value is picked per row. Any other table lists one model per row
//! and the best value is picked per column.

use std::collections::HashMap;

use crate::content::{BenchmarkTable, Cell};

/// Label-column headers that are never scored.
const LABEL_COLUMNS: &[&str] = &["Model", "Metric"];

/// Which axis a table is scored along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// Rows are metrics: best per row.
    Metric,
    /// Rows are models: best per column.
    Model,
}

/// Precomputed best cells of one [`BenchmarkTable`].
#[derive(Debug, Clone)]
pub struct Highlights {
    kind: TableKind,
    value_columns: Vec<String>,
    /// Winning cell text keyed by row label or column name.
    best: HashMap<String, String>,
}

impl Highlights {
    pub fn for_table(table: &BenchmarkTable) -> Self {
        let kind = if table.columns.first().is_some_and(|c| c == "Metric") {
            TableKind::Metric
        } else {
            TableKind::Model
        };
        let value_columns: Vec<String> = table
            .columns
            .iter()
            .filter(|c| !LABEL_COLUMNS.contains(&c.as_str()))
            .cloned()
            .collect();

        let mut best = HashMap::new();
        match kind {
            TableKind::Metric => {
                for row in &table.rows {
                    let cells = value_columns.iter().filter_map(|c| row.values.get(c));
                    if let Some(winner) = best_cell(cells) {
                        best.insert(row.model.clone(), winner);
                    }
                }
            }
            TableKind::Model => {
                for column in &value_columns {
                    let cells = table.rows.iter().filter_map(|r| r.values.get(column));
                    if let Some(winner) = best_cell(cells) {
                        best.insert(column.clone(), winner);
                    }
                }
            }
        }
        tracing::trace!(title = %table.title, ?kind, winners = best.len(), "table highlights");

        Self {
            kind,
            value_columns,
            best,
        }
    }

    pub const fn kind(&self) -> TableKind {
        self.kind
    }

    /// Columns that hold scores, in header order.
    pub fn value_columns(&self) -> &[String] {
        &self.value_columns
    }

    /// Whether the cell at (`row`, `column`) holds the best value.
    ///
    /// Cells compare by text, so every cell equal to the winner is marked.
    pub fn is_best(&self, row: &str, column: &str, cell: &Cell) -> bool {
        let key = match self.kind {
            TableKind::Metric => row,
            TableKind::Model => column,
        };
        self.best
            .get(key)
            .is_some_and(|winner| *winner == cell.to_string())
    }
}

/// Numeric score of a cell: `%` and `±` are stripped and only the first
/// whitespace-separated token counts. Non-numeric cells score `None`.
pub fn cell_score(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(n) => Some(*n).filter(|n| n.is_finite()),
        Cell::Text(text) => {
            let cleaned = text.replace(['%', '±'], "");
            let token = cleaned.split_whitespace().next()?;
            token.parse::<f64>().ok().filter(|n| n.is_finite())
        }
    }
}

/// Text of the highest-scoring cell; the first one wins ties.
fn best_cell<'a>(cells: impl Iterator<Item = &'a Cell>) -> Option<String> {
    let mut best: Option<(f64, &Cell)> = None;
    for cell in cells {
        let Some(score) = cell_score(cell) else {
            continue;
        };
        if best.is_none_or(|(top, _)| score > top) {
            best = Some((score, cell));
        }
    }
    best.map(|(_, cell)| cell.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{BenchmarkRow, Deck};

    fn table(columns: &[&str], rows: &[(&str, &[&str])]) -> BenchmarkTable {
        BenchmarkTable {
            title: "t".to_string(),
            subtitle: None,
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            rows: rows
                .iter()
                .map(|(label, values)| BenchmarkRow {
                    model: (*label).to_string(),
                    highlighted: false,
                    values: columns[1..]
                        .iter()
                        .zip(values.iter())
                        .map(|(c, v)| ((*c).to_string(), Cell::from(*v)))
                        .collect(),
                })
                .collect(),
            note: None,
        }
    }

    #[test]
    fn test_cell_score_strips_percent_and_plus_minus() {
        assert_eq!(cell_score(&Cell::from("98.2%")), Some(98.2));
        assert_eq!(cell_score(&Cell::from("3.1 ± 0.2")), Some(3.1));
        assert_eq!(cell_score(&Cell::from("±4")), Some(4.0));
        assert_eq!(cell_score(&Cell::from("N/A")), None);
        assert_eq!(cell_score(&Cell::from("")), None);
        assert_eq!(cell_score(&Cell::Number(0.5)), Some(0.5));
    }

    #[test]
    fn test_model_table_picks_best_per_column() {
        let deck = Deck::builtin();
        let highlights = Highlights::for_table(&deck.tables[0]);
        assert_eq!(highlights.kind(), TableKind::Model);
        assert_eq!(
            highlights.value_columns(),
            ["Spatial", "Object", "Goal", "Long", "Overall"]
        );
        assert!(highlights.is_best("EO-1", "Long", &Cell::from("94.8%")));
        assert!(!highlights.is_best("OpenVLA-OFT", "Long", &Cell::from("94.5%")));
    }

    #[test]
    fn test_metric_table_picks_best_per_row() {
        let t = table(
            &["Metric", "A", "B"],
            &[("speed", &["10", "12"]), ("accuracy", &["91%", "88%"])],
        );
        let highlights = Highlights::for_table(&t);
        assert_eq!(highlights.kind(), TableKind::Metric);
        assert!(highlights.is_best("speed", "B", &Cell::from("12")));
        assert!(highlights.is_best("accuracy", "A", &Cell::from("91%")));
        assert!(!highlights.is_best("accuracy", "B", &Cell::from("88%")));
    }

    #[test]
    fn test_ties_keep_first_but_mark_equal_text() {
        let t = table(&["Model", "Score"], &[("a", &["50%"]), ("b", &["50%"])]);
        let highlights = Highlights::for_table(&t);
        assert!(highlights.is_best("a", "Score", &Cell::from("50%")));
        assert!(highlights.is_best("b", "Score", &Cell::from("50%")));
    }

    #[test]
    fn test_unparsable_cells_never_win() {
        let t = table(&["Model", "Score"], &[("a", &["n/a"]), ("b", &["-"])]);
        let highlights = Highlights::for_table(&t);
        assert!(!highlights.is_best("a", "Score", &Cell::from("n/a")));
        assert!(!highlights.is_best("b", "Score", &Cell::from("-")));
    }

    #[test]
    fn test_missing_cells_are_skipped() {
        let mut t = table(&["Model", "X"], &[("a", &["1"]), ("b", &["2"])]);
        t.rows[1].values.clear();
        let highlights = Highlights::for_table(&t);
        assert!(highlights.is_best("a", "X", &Cell::from("1")));
    }
}
