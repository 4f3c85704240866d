use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Locale;
use crate::error::Result;
use crate::messages::{self, ReportLabels};
use crate::types::{
    AnalysisResult, ChartRecommendation, ColumnStats, ColumnType, CorrelationPair, Value,
};

// ============================================================================
// Report Types
// ============================================================================

/// A printable analysis report.
///
/// Use this for both JSON output (`--json`) and file writing (`--emit-report`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Where the data came from (file path or a label)
    pub source: String,
    /// Language of the rendered headings
    pub locale: Locale,
    pub overview: ReportOverview,
    /// One entry per column, in header order
    pub columns: Vec<ColumnReport>,
    pub correlations: Vec<CorrelationPair>,
    pub recommendations: Vec<ChartRecommendation>,
    pub insights: Vec<String>,
}

/// Dataset shape summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportOverview {
    pub rows: usize,
    pub columns: usize,
    pub numeric_columns: usize,
    pub type_counts: BTreeMap<ColumnType, usize>,
}

/// Type and statistics of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnReport {
    pub name: String,
    pub column_type: ColumnType,
    /// `None` when the column had no usable values
    pub stats: Option<ColumnStats>,
}

// ============================================================================
// Report Generator
// ============================================================================

/// Builds reports and writes them to an output directory.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    output_dir: PathBuf,
    locale: Locale,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./outputs"),
            locale: Locale::default(),
        }
    }
}

impl ReportGenerator {
    pub fn new(output_dir: PathBuf, locale: Locale) -> Self {
        Self { output_dir, locale }
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    /// Assemble a report from a finished analysis.
    pub fn build_report(&self, source: &str, analysis: &AnalysisResult) -> AnalysisReport {
        let columns = analysis
            .headers
            .iter()
            .filter_map(|name| {
                let column_type = analysis.column_type(name)?;
                Some(ColumnReport {
                    name: name.clone(),
                    column_type,
                    stats: analysis.stats.get(name).cloned(),
                })
            })
            .collect();

        AnalysisReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            source: source.to_string(),
            locale: self.locale,
            overview: ReportOverview {
                rows: analysis.rows,
                columns: analysis.columns,
                numeric_columns: analysis.numeric_columns().len(),
                type_counts: analysis.type_counts.clone(),
            },
            columns,
            correlations: analysis.correlations.clone(),
            recommendations: analysis.recommendations.clone(),
            insights: analysis.insights.clone(),
        }
    }

    /// Render a report as Markdown, with headings in the report's locale.
    pub fn render_markdown(report: &AnalysisReport) -> String {
        let labels = messages::report_labels(report.locale);
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!("# {}", labels.title));
        lines.push(String::new());
        lines.push(format!("{}: {}  ", labels.generated_at, report.generated_at));
        lines.push(format!("{}: {}", labels.source, report.source));
        lines.push(String::new());

        // Overview
        let overview = &report.overview;
        lines.push(format!("## {}", labels.overview));
        lines.push(String::new());
        lines.push(format!(
            "| {} | {} | {} |",
            labels.rows, labels.columns, labels.numeric_columns
        ));
        lines.push("|---|---|---|".to_string());
        lines.push(format!(
            "| {} | {} | {} |",
            overview.rows, overview.columns, overview.numeric_columns
        ));
        lines.push(String::new());
        let type_counts: Vec<String> = overview
            .type_counts
            .iter()
            .map(|(t, n)| format!("{t} {n}"))
            .collect();
        lines.push(format!("{}: {}", labels.column_types, type_counts.join(", ")));
        lines.push(String::new());

        // Statistics
        lines.push(format!("## {}", labels.statistics));
        for column in &report.columns {
            lines.push(String::new());
            lines.push(format!("### {} ({})", column.name, column.column_type));
            lines.push(String::new());
            lines.extend(stats_lines(column.stats.as_ref(), &labels));
        }
        lines.push(String::new());

        // Correlations
        lines.push(format!("## {}", labels.correlations));
        lines.push(String::new());
        if report.correlations.is_empty() {
            lines.push("-".to_string());
        }
        for pair in &report.correlations {
            lines.push(format!(
                "- {} / {}: {}",
                pair.column1,
                pair.column2,
                num(pair.correlation)
            ));
        }
        lines.push(String::new());

        // Recommendations
        lines.push(format!("## {}", labels.recommendations));
        lines.push(String::new());
        if report.recommendations.is_empty() {
            lines.push("-".to_string());
        }
        for rec in &report.recommendations {
            let axes = match &rec.columns.y {
                Some(y) => format!("{} × {}", rec.columns.x, y),
                None => rec.columns.x.clone(),
            };
            lines.push(format!(
                "{}. **{}** ({}): {}",
                rec.priority, rec.title, axes, rec.description
            ));
        }
        lines.push(String::new());

        // Insights
        lines.push(format!("## {}", labels.insights));
        lines.push(String::new());
        for insight in &report.insights {
            lines.push(format!("- {insight}"));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// Write the report as pretty JSON to `<name>_report.json`.
    pub fn write_report_to_file(&self, report: &AnalysisReport, report_base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self.output_dir.join(format!("{}_report.json", report_base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }

    /// Write the report as Markdown to `<name>_report.md`.
    pub fn write_markdown(&self, report: &AnalysisReport, report_base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self.output_dir.join(format!("{}_report.md", report_base_name));
        fs::write(&report_path, Self::render_markdown(report))?;

        info!("Markdown report saved: {}", report_path.display());

        Ok(report_path)
    }
}

fn num(n: f64) -> String {
    Value::Number(n).to_string()
}

fn stats_lines(stats: Option<&ColumnStats>, labels: &ReportLabels) -> Vec<String> {
    match stats {
        Some(ColumnStats::Numeric(s)) => vec![
            format!("- {}: {}", labels.mean, num(s.mean)),
            format!("- {}: {}", labels.median, num(s.median)),
            format!("- {}: {} / {}", labels.min_max, num(s.min), num(s.max)),
            format!("- {}: {}", labels.std_dev, num(s.std_dev)),
        ],
        Some(ColumnStats::Categorical(s)) => vec![
            format!("- {}: {}", labels.unique, s.unique_values),
            format!("- {}: {}", labels.most_frequent, s.most_frequent),
            format!(
                "- {}: {} ({}%)",
                labels.frequency,
                s.most_frequent_count,
                num(s.most_frequent_percentage)
            ),
        ],
        None => vec![format!("_{}_", labels.no_statistics)],
    }
}
