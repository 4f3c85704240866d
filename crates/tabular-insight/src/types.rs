//! Core data model: values, records, datasets and analysis results.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::utils::parse_number;

// ============================================================================
// Values & Datasets
// ============================================================================

/// A single scalar cell.
///
/// Deserializes from plain JSON scalars: `null` becomes [`Value::Missing`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Missing,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// True for absent values and empty strings.
    ///
    /// Whitespace-only text is a present value.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Canonical string form used for every string comparison and tally.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Value::Missing => Cow::Borrowed(""),
            Value::Bool(true) => Cow::Borrowed("true"),
            Value::Bool(false) => Cow::Borrowed("false"),
            Value::Number(n) => Cow::Owned(format_number(*n)),
            Value::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }

    /// Numeric reading of the value, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            Value::Text(s) => parse_number(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Missing, Into::into)
    }
}

/// Integral values print without a fractional part; zero never prints a sign.
fn format_number(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        (if n > 0.0 { "Infinity" } else { "-Infinity" }).to_string()
    } else {
        n.to_string()
    }
}

/// One row: column name to value. Keys absent from the map are missing.
pub type Record = HashMap<String, Value>;

/// Build a [`Record`] from `(column, value)` pairs.
pub fn record<K, V, I>(pairs: I) -> Record
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// An ordered sequence of records plus the authoritative header list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    headers: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    /// Create a dataset. Headers are assumed unique.
    pub fn new(headers: Vec<String>, records: Vec<Record>) -> Self {
        Self { headers, records }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// Value at `row` for `column`; absent keys read as [`Value::Missing`].
    pub fn value(&self, row: usize, column: &str) -> &Value {
        self.records
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&MISSING)
    }

    /// All values of a column in row order, missing ones included.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.records
            .iter()
            .map(move |r| r.get(column).unwrap_or(&MISSING))
    }

    /// Non-missing values of a column in row order.
    pub fn present_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.column_values(column).filter(|v| !v.is_missing())
    }

    /// Consume the dataset into its parts.
    pub fn into_parts(self) -> (Vec<String>, Vec<Record>) {
        (self.headers, self.records)
    }
}

static MISSING: Value = Value::Missing;

// ============================================================================
// Column Types & Statistics
// ============================================================================

/// Inferred type of a column, fixed for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Number,
    Boolean,
    Date,
    Text,
}

impl ColumnType {
    pub const ALL: [ColumnType; 4] = [
        ColumnType::Number,
        ColumnType::Boolean,
        ColumnType::Date,
        ColumnType::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Number => "number",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::Text => "text",
        }
    }

    /// Text and boolean columns act as chart categories.
    pub fn is_category(&self) -> bool {
        matches!(self, ColumnType::Text | ColumnType::Boolean)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive statistics of a numeric column.
///
/// `mean`, `median` and `std_dev` are rounded to 2 decimals; `min`, `max`
/// and `range` keep full precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    /// Population standard deviation (divisor N).
    pub std_dev: f64,
}

/// Frequency statistics of a boolean, date or text column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalStats {
    pub count: usize,
    pub unique_values: usize,
    pub most_frequent: String,
    pub most_frequent_count: usize,
    /// Share of non-missing values, in percent, rounded to 2 decimals.
    pub most_frequent_percentage: f64,
}

/// Per-column statistics; the variant follows the column type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnStats {
    Numeric(NumericStats),
    Categorical(CategoricalStats),
}

impl ColumnStats {
    pub fn count(&self) -> usize {
        match self {
            ColumnStats::Numeric(s) => s.count,
            ColumnStats::Categorical(s) => s.count,
        }
    }

    pub fn as_numeric(&self) -> Option<&NumericStats> {
        match self {
            ColumnStats::Numeric(s) => Some(s),
            ColumnStats::Categorical(_) => None,
        }
    }

    pub fn as_categorical(&self) -> Option<&CategoricalStats> {
        match self {
            ColumnStats::Categorical(s) => Some(s),
            ColumnStats::Numeric(_) => None,
        }
    }
}

// ============================================================================
// Correlations & Recommendations
// ============================================================================

/// Pearson correlation between two numeric columns, rounded to 3 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    pub column1: String,
    pub column2: String,
    pub correlation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Scatter,
    Radar,
    Area,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Scatter => "scatter",
            ChartKind::Radar => "radar",
            ChartKind::Area => "area",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis binding of a recommended chart. `y == None` means count aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartColumns {
    pub x: String,
    pub y: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRecommendation {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub title: String,
    pub description: String,
    pub columns: ChartColumns,
    /// Lower is more important.
    pub priority: u8,
}

// ============================================================================
// Analysis Result
// ============================================================================

/// Complete profile of a dataset, produced fresh by every analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub rows: usize,
    pub columns: usize,
    /// Column display order.
    pub headers: Vec<String>,
    pub column_types: BTreeMap<String, ColumnType>,
    /// Always holds all four types; absent ones count zero.
    pub type_counts: BTreeMap<ColumnType, usize>,
    /// Columns without usable values have no entry.
    pub stats: BTreeMap<String, ColumnStats>,
    /// Sorted by descending absolute correlation.
    pub correlations: Vec<CorrelationPair>,
    pub recommendations: Vec<ChartRecommendation>,
    pub insights: Vec<String>,
}

impl AnalysisResult {
    pub fn column_type(&self, column: &str) -> Option<ColumnType> {
        self.column_types.get(column).copied()
    }

    /// Headers of the given type, in display order.
    pub fn columns_of_type(&self, column_type: ColumnType) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|h| self.column_type(h) == Some(column_type))
            .map(String::as_str)
            .collect()
    }

    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns_of_type(ColumnType::Number)
    }

    pub fn numeric_stats(&self, column: &str) -> Option<&NumericStats> {
        self.stats.get(column).and_then(ColumnStats::as_numeric)
    }

    pub fn categorical_stats(&self, column: &str) -> Option<&CategoricalStats> {
        self.stats.get(column).and_then(ColumnStats::as_categorical)
    }

    pub fn strongest_correlation(&self) -> Option<&CorrelationPair> {
        self.correlations.first()
    }
}

// Hosts may run analysis on a worker thread and hand results back
static_assertions::assert_impl_all!(Dataset: Send, Sync);
static_assertions::assert_impl_all!(AnalysisResult: Send, Sync);
