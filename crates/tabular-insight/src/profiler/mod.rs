//! Data profiling module for dataset analysis.
//!
//! This module provides functionality for profiling datasets, including:
//! - Type inference for columns
//! - Per-column descriptive statistics
//! - Pairwise correlation of numeric columns
//! - Chart recommendations and textual insights

mod correlation;
mod insights;
mod recommendations;
mod statistics;
mod type_inference;

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::error::{InsightError, Result};
use crate::types::{AnalysisResult, ColumnType, Dataset};

pub use correlation::pearson;

use recommendations::ColumnGroups;

/// Data profiler for analyzing dataset structure and characteristics.
///
/// Holds only configuration, so one profiler can analyze any number of
/// datasets and every run is independent of the previous ones.
#[derive(Debug, Clone, Default)]
pub struct DataProfiler {
    config: AnalysisConfig,
}

impl DataProfiler {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Infer the type of one column using the configured sample size.
    pub fn infer_type(&self, dataset: &Dataset, column: &str) -> ColumnType {
        type_inference::infer_column_type_with(dataset, column, self.config.type_sample_size)
    }

    /// Profile a dataset.
    ///
    /// Malformed individual values are skipped, never reported. Fails only
    /// when the dataset has no rows or no headers.
    pub fn analyze(&self, dataset: &Dataset) -> Result<AnalysisResult> {
        if dataset.is_empty() {
            return Err(InsightError::EmptyDataset);
        }
        if dataset.headers().is_empty() {
            return Err(InsightError::NoHeaders);
        }

        let headers = dataset.headers();

        // Step 1: types
        let mut column_types = BTreeMap::new();
        let mut type_counts: BTreeMap<ColumnType, usize> =
            ColumnType::ALL.iter().map(|t| (*t, 0)).collect();
        let mut ordered_types = Vec::with_capacity(headers.len());
        for header in headers {
            let column_type = self.infer_type(dataset, header);
            debug!(column = %header, %column_type, "Inferred column type");
            column_types.insert(header.clone(), column_type);
            *type_counts.entry(column_type).or_insert(0) += 1;
            ordered_types.push((header.as_str(), column_type));
        }

        // Step 2: stats
        let mut stats = BTreeMap::new();
        for &(header, column_type) in &ordered_types {
            match statistics::column_stats(dataset, header, column_type) {
                Some(entry) => {
                    stats.insert(header.to_string(), entry);
                }
                None => debug!(column = header, "No usable values, stats omitted"),
            }
        }

        let groups = ColumnGroups {
            numeric: columns_where(&ordered_types, |t| t == ColumnType::Number),
            category: columns_where(&ordered_types, |t| t.is_category()),
            date: columns_where(&ordered_types, |t| t == ColumnType::Date),
        };

        // Step 3: correlations
        let correlations = correlation::correlate_columns(
            dataset,
            &groups.numeric,
            self.config.min_paired_observations,
        );
        debug!(pairs = correlations.len(), "Computed correlations");

        // Step 4: charts
        let recommendations = recommendations::recommend_charts(&groups, &stats, &self.config);

        // Step 5: insights
        let first_numeric = groups.numeric.first().and_then(|column| {
            stats
                .get(*column)
                .and_then(|s| s.as_numeric())
                .map(|s| (*column, s))
        });
        let insights =
            insights::generate_insights(dataset.len(), &correlations, first_numeric, &self.config);

        info!(
            rows = dataset.len(),
            columns = headers.len(),
            recommendations = recommendations.len(),
            insights = insights.len(),
            "Analysis complete"
        );

        Ok(AnalysisResult {
            rows: dataset.len(),
            columns: headers.len(),
            headers: headers.to_vec(),
            column_types,
            type_counts,
            stats,
            correlations,
            recommendations,
            insights,
        })
    }
}

fn columns_where<'a>(
    ordered_types: &[(&'a str, ColumnType)],
    predicate: impl Fn(ColumnType) -> bool,
) -> Vec<&'a str> {
    ordered_types
        .iter()
        .filter(|(_, t)| predicate(*t))
        .map(|(name, _)| *name)
        .collect()
}

/// Profile a dataset with the default configuration.
pub fn analyze(dataset: &Dataset) -> Result<AnalysisResult> {
    DataProfiler::default().analyze(dataset)
}

/// Infer a column type with the default sample size.
pub fn infer_column_type(dataset: &Dataset, column: &str) -> ColumnType {
    DataProfiler::default().infer_type(dataset, column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChartKind, Value, record};

    fn sales() -> Dataset {
        let rows = [
            ("2024-01-05", "North", 120.0, 80.0),
            ("2024-01-12", "South", 90.0, 70.0),
            ("2024-02-03", "North", 150.0, 95.0),
            ("2024-02-17", "East", 60.0, 50.0),
            ("2024-03-09", "South", 110.0, 75.0),
        ];
        Dataset::new(
            vec![
                "Date".to_string(),
                "Region".to_string(),
                "Sales".to_string(),
                "Cost".to_string(),
            ],
            rows.iter()
                .map(|(d, r, s, c)| {
                    record([
                        ("Date", Value::from(*d)),
                        ("Region", Value::from(*r)),
                        ("Sales", Value::from(*s)),
                        ("Cost", Value::from(*c)),
                    ])
                })
                .collect(),
        )
    }

    #[test]
    fn test_analyze_sales() {
        let result = analyze(&sales()).unwrap();

        assert_eq!(result.rows, 5);
        assert_eq!(result.columns, 4);
        assert_eq!(result.column_type("Date"), Some(ColumnType::Date));
        assert_eq!(result.column_type("Region"), Some(ColumnType::Text));
        assert_eq!(result.column_type("Sales"), Some(ColumnType::Number));
        assert_eq!(result.type_counts[&ColumnType::Number], 2);
        assert_eq!(result.type_counts[&ColumnType::Boolean], 0);
        assert_eq!(result.type_counts.values().sum::<usize>(), result.columns);

        assert_eq!(result.numeric_stats("Sales").unwrap().mean, 106.0);
        assert_eq!(result.categorical_stats("Region").unwrap().unique_values, 3);

        assert_eq!(result.correlations.len(), 1);
        let kinds: Vec<ChartKind> = result.recommendations.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![ChartKind::Scatter, ChartKind::Bar, ChartKind::Line, ChartKind::Pie]
        );
        assert!(result.insights[0].starts_with("Small dataset"));
    }

    #[test]
    fn test_analyze_empty_dataset() {
        let ds = Dataset::new(vec!["a".to_string()], vec![]);
        let err = analyze(&ds).unwrap_err();
        assert!(matches!(err, InsightError::EmptyDataset));
    }

    #[test]
    fn test_analyze_no_headers() {
        let ds = Dataset::new(vec![], vec![record([("a", 1i64)])]);
        let err = analyze(&ds).unwrap_err();
        assert!(matches!(err, InsightError::NoHeaders));
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let ds = sales();
        assert_eq!(analyze(&ds).unwrap(), analyze(&ds).unwrap());
    }

    #[test]
    fn test_profiler_uses_config() {
        let config = AnalysisConfig::builder().small_dataset_rows(2).build().unwrap();
        let result = DataProfiler::new(config).analyze(&sales()).unwrap();
        assert!(result.insights.iter().all(|i| !i.starts_with("Small dataset")));
    }

    #[test]
    fn test_all_missing_column_has_no_stats() {
        let ds = Dataset::new(
            vec!["a".to_string(), "b".to_string()],
            vec![record([("a", 1i64)]), record([("a", 2i64)])],
        );
        let result = analyze(&ds).unwrap();
        assert_eq!(result.column_type("b"), Some(ColumnType::Boolean));
        assert!(!result.stats.contains_key("b"));
    }
}
