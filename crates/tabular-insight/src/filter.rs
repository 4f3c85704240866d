//! Row filtering with AND-combined conditions.
//!
//! Evaluation is total: missing columns, unparsable numbers and malformed
//! bounds all fall through to string comparison, never to an error. Only
//! parsing a textual filter expression can fail.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::InsightError;
use crate::types::{Dataset, Record, Value};
use crate::utils::parse_number;

/// Comparison applied by a [`FilterCondition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    Eq,
    Neq,
    Contains,
    Gt,
    Gte,
    Lt,
    Lte,
    Range,
    /// Any unrecognized operator. Always matches.
    #[serde(other)]
    Other,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Neq => "neq",
            FilterOperator::Contains => "contains",
            FilterOperator::Gt => "gt",
            FilterOperator::Gte => "gte",
            FilterOperator::Lt => "lt",
            FilterOperator::Lte => "lte",
            FilterOperator::Range => "range",
            FilterOperator::Other => "other",
        }
    }

    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" | "==" => Some(FilterOperator::Eq),
            "!=" => Some(FilterOperator::Neq),
            "~" => Some(FilterOperator::Contains),
            ">" => Some(FilterOperator::Gt),
            ">=" => Some(FilterOperator::Gte),
            "<" => Some(FilterOperator::Lt),
            "<=" => Some(FilterOperator::Lte),
            _ => None,
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses operator names case-insensitively; unknown names become [`FilterOperator::Other`].
impl FromStr for FilterOperator {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "eq" => FilterOperator::Eq,
            "neq" => FilterOperator::Neq,
            "contains" => FilterOperator::Contains,
            "gt" => FilterOperator::Gt,
            "gte" => FilterOperator::Gte,
            "lt" => FilterOperator::Lt,
            "lte" => FilterOperator::Lte,
            "range" => FilterOperator::Range,
            _ => FilterOperator::Other,
        })
    }
}

/// One predicate over a single column.
///
/// `value2` is only read by [`FilterOperator::Range`], as the upper bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    pub column: String,
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value2: Option<String>,
}

impl FilterCondition {
    pub fn new(
        column: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            operator,
            value: value.into(),
            value2: None,
        }
    }

    /// Inclusive range condition.
    pub fn range(column: impl Into<String>, low: impl Into<String>, high: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            operator: FilterOperator::Range,
            value: low.into(),
            value2: Some(high.into()),
        }
    }
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.operator {
            FilterOperator::Range => {
                return write!(
                    f,
                    "{} in {}..{}",
                    self.column,
                    self.value,
                    self.value2.as_deref().unwrap_or_default()
                );
            }
            FilterOperator::Eq => "=",
            FilterOperator::Neq => "!=",
            FilterOperator::Contains => "~",
            FilterOperator::Gt => ">",
            FilterOperator::Gte => ">=",
            FilterOperator::Lt => "<",
            FilterOperator::Lte => "<=",
            FilterOperator::Other => "?",
        };
        write!(f, "{} {} {}", self.column, symbol, self.value)
    }
}

// Filter expression grammars - compiled once at startup
static RANGE_EXPR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<column>[^=!~<>]+?)\s+(?i:in)\s+(?P<low>.*?)\.\.(?P<high>.*?)\s*$")
        .expect("Invalid regex: range expression")
});
static COMPARE_EXPR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<column>[^=!~<>]+?)\s*(?P<op>==|!=|>=|<=|=|~|>|<)\s*(?P<value>.*?)\s*$")
        .expect("Invalid regex: comparison expression")
});

/// Strip one pair of surrounding double quotes, if present.
fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(s)
}

/// Parses `column OP value` (`OP` one of `= != ~ > >= < <=`) or
/// `column in low..high`. Values may be wrapped in double quotes.
impl FromStr for FilterCondition {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| InsightError::InvalidFilter {
            expression: s.to_string(),
            reason: reason.to_string(),
        };

        if let Some(caps) = RANGE_EXPR.captures(s) {
            let column = unquote(caps["column"].trim());
            if column.is_empty() {
                return Err(invalid("missing column name"));
            }
            return Ok(FilterCondition::range(
                column,
                unquote(caps["low"].trim()),
                unquote(caps["high"].trim()),
            ));
        }

        let caps = COMPARE_EXPR
            .captures(s)
            .ok_or_else(|| invalid("expected `column OP value` or `column in low..high`"))?;
        let column = unquote(caps["column"].trim());
        if column.is_empty() {
            return Err(invalid("missing column name"));
        }
        let operator = FilterOperator::from_symbol(&caps["op"])
            .ok_or_else(|| invalid("unknown operator"))?;

        Ok(FilterCondition::new(column, operator, unquote(&caps["value"])))
    }
}

/// Row filter over a [`Dataset`].
pub struct RowFilter;

impl RowFilter {
    /// Evaluate one condition against one record.
    pub fn matches(record: &Record, condition: &FilterCondition) -> bool {
        let missing = Value::Missing;
        let cell = record.get(&condition.column).unwrap_or(&missing);
        let row_text = cell.to_text().to_lowercase();
        let wanted = condition.value.to_lowercase();

        let row_number = cell.as_number();
        let wanted_number = parse_number(&condition.value);
        let numeric = row_number.zip(wanted_number);

        let compare = |accept: fn(Ordering) -> bool| match numeric {
            Some((row, target)) => row.partial_cmp(&target).is_some_and(accept),
            None => accept(row_text.as_str().cmp(wanted.as_str())),
        };

        match condition.operator {
            FilterOperator::Eq => row_text == wanted,
            FilterOperator::Neq => row_text != wanted,
            FilterOperator::Contains => row_text.contains(&wanted),
            FilterOperator::Gt => compare(Ordering::is_gt),
            FilterOperator::Gte => compare(Ordering::is_ge),
            FilterOperator::Lt => compare(Ordering::is_lt),
            FilterOperator::Lte => compare(Ordering::is_le),
            FilterOperator::Range => {
                let upper = condition.value2.as_deref().unwrap_or_default();
                match (numeric, parse_number(upper)) {
                    (Some((row, low)), Some(high)) => row >= low && row <= high,
                    _ => {
                        let upper = upper.to_lowercase();
                        row_text >= wanted && row_text <= upper
                    }
                }
            }
            FilterOperator::Other => true,
        }
    }

    /// Records satisfying every condition, in source order.
    pub fn filter<'a>(dataset: &'a Dataset, conditions: &[FilterCondition]) -> Vec<&'a Record> {
        dataset
            .records()
            .iter()
            .filter(|record| conditions.iter().all(|c| Self::matches(record, c)))
            .collect()
    }

    /// Check that every condition names a column of `dataset`.
    ///
    /// Evaluation does not need this (an unknown column reads as missing);
    /// front ends call it to catch typos in user-entered expressions.
    pub fn validate(dataset: &Dataset, conditions: &[FilterCondition]) -> Result<(), InsightError> {
        match conditions.iter().find(|c| !dataset.has_column(&c.column)) {
            Some(condition) => Err(InsightError::ColumnNotFound(condition.column.clone())),
            None => Ok(()),
        }
    }

    /// A new dataset with the same headers and only the matching records.
    pub fn apply(dataset: &Dataset, conditions: &[FilterCondition]) -> Dataset {
        if conditions.is_empty() {
            return dataset.clone();
        }
        let records = Self::filter(dataset, conditions)
            .into_iter()
            .cloned()
            .collect();
        Dataset::new(dataset.headers().to_vec(), records)
    }
}
