//! Deck content model.
//!
//! A [`Deck`] holds everything one portfolio page shows: the hero block,
//! a markdown narrative, the feature list driving the carousel, benchmark
//! tables, bar charts and the expandable analysis sections.
//!
//! The built-in deck is a compile-time constant (see [`Deck::builtin`]).
//! Authors can present their own deck by writing the same shape as JSON
//! and passing it on the command line.

mod builtin;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a deck.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read deck {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse deck {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("deck has no features to show")]
    NoFeatures,
    #[error("table '{table}' row '{row}' uses undeclared column '{column}'")]
    UnknownColumn {
        table: String,
        row: String,
        column: String,
    },
    #[error("chart '{chart}' group '{group}' uses undeclared model '{model}'")]
    UnknownModel {
        chart: String,
        group: String,
        model: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub badges: Vec<Badge>,
}

/// Icon family for a feature card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureCategory {
    Architecture,
    Training,
    Action,
    Chunk,
    Bimanual,
    Compute,
}

impl FeatureCategory {
    /// Short glyph drawn in the card header.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Architecture => "▦",
            Self::Training => "◆",
            Self::Action => "⚡",
            Self::Chunk => "▚",
            Self::Bimanual => "✋",
            Self::Compute => "▣",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Architecture => "architecture",
            Self::Training => "training",
            Self::Action => "action",
            Self::Chunk => "chunk",
            Self::Bimanual => "bimanual",
            Self::Compute => "compute",
        }
    }
}

/// One carousel card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: FeatureCategory,
}

/// A table cell: either literal text (`"98.2%"`, `"3.1 ± 0.2"`) or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRow {
    pub model: String,
    #[serde(default)]
    pub highlighted: bool,
    pub values: HashMap<String, Cell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkTable {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Header row; the first entry is the label column (`Model` or `Metric`).
    pub columns: Vec<String>,
    pub rows: Vec<BenchmarkRow>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarValue {
    pub model: String,
    /// Score on a 0..1 scale; `None` is drawn as N/A.
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarGroup {
    pub label: String,
    #[serde(default)]
    pub task_count: Option<String>,
    pub values: Vec<BarValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedBarChart {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub y_axis_label: String,
    /// Legend order.
    pub models: Vec<String>,
    pub groups: Vec<BarGroup>,
    /// Model drawn in the accent colour.
    #[serde(default)]
    pub highlight: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisEntry {
    pub heading: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSection {
    pub id: String,
    pub title: String,
    pub content: Vec<AnalysisEntry>,
    #[serde(default)]
    pub implications: Vec<String>,
}

/// A complete portfolio page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub hero: Hero,
    /// Markdown shown above the carousel.
    #[serde(default)]
    pub narrative: String,
    pub features: Vec<FeatureItem>,
    #[serde(default)]
    pub tables: Vec<BenchmarkTable>,
    #[serde(default)]
    pub charts: Vec<GroupedBarChart>,
    #[serde(default)]
    pub analysis: Vec<AnalysisSection>,
}

impl Deck {
    /// The deck compiled into the binary.
    pub fn builtin() -> Self {
        builtin::deck()
    }

    /// Load and validate a deck from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read, is not valid deck
    /// JSON, or fails [`Deck::validate`].
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let deck = Self::from_json(&raw).map_err(|err| match err {
            ContentError::Parse { source, .. } => ContentError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        tracing::info!(
            path = %path.display(),
            features = deck.features.len(),
            tables = deck.tables.len(),
            "deck loaded"
        );
        Ok(deck)
    }

    /// Parse and validate a deck from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Parse`] for malformed JSON and any
    /// validation error from [`Deck::validate`].
    pub fn from_json(raw: &str) -> Result<Self, ContentError> {
        let deck: Self = serde_json::from_str(raw).map_err(|source| ContentError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        deck.validate()?;
        Ok(deck)
    }

    /// Check the invariants the renderers rely on.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.features.is_empty() {
            return Err(ContentError::NoFeatures);
        }
        for table in &self.tables {
            for row in &table.rows {
                if let Some(column) = row.values.keys().find(|c| !table.columns.contains(c)) {
                    return Err(ContentError::UnknownColumn {
                        table: table.title.clone(),
                        row: row.model.clone(),
                        column: column.clone(),
                    });
                }
            }
        }
        for chart in &self.charts {
            for group in &chart.groups {
                if let Some(value) = group.values.iter().find(|v| !chart.models.contains(&v.model))
                {
                    return Err(ContentError::UnknownModel {
                        chart: chart.title.clone(),
                        group: group.label.clone(),
                        model: value.model.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
