//! Tabular Insight Library
//!
//! Statistical profiling, chart recommendation and row filtering for
//! in-memory tabular data.
//!
//! # Overview
//!
//! - **Type Inference**: classifies each column as number, boolean, date or text
//!   from a sample of its non-missing values
//! - **Statistical Profiling**: descriptive statistics, pairwise Pearson
//!   correlation, chart recommendations and natural-language insights
//! - **Row Filtering**: AND-combined conditions with numeric-aware comparison
//! - **Sessions**: loaded data, active filters and the last analysis for
//!   interactive hosts
//! - **Reporting**: JSON and Markdown reports, English or Traditional Chinese
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tabular_insight::{analyze, decoder, FilterCondition, FilterOperator, RowFilter};
//!
//! let dataset = decoder::read_dataset("sales.csv")?;
//!
//! let result = analyze(&dataset)?;
//! for insight in &result.insights {
//!     println!("{insight}");
//! }
//!
//! // Keep only the northern region, then look again
//! let north = RowFilter::apply(
//!     &dataset,
//!     &[FilterCondition::new("Region", FilterOperator::Eq, "north")],
//! );
//! let north_result = analyze(&north)?;
//! ```
//!
//! # Configuration
//!
//! Use [`AnalysisConfig`] to change thresholds or the output language:
//!
//! ```rust,ignore
//! use tabular_insight::{AnalysisConfig, DataProfiler, Locale};
//!
//! let config = AnalysisConfig::builder()
//!     .type_sample_size(50)
//!     .strong_correlation(0.8)
//!     .locale(Locale::TraditionalChinese)
//!     .build()?;
//!
//! let result = DataProfiler::new(config).analyze(&dataset)?;
//! ```

pub mod config;
pub mod decoder;
pub mod demo;
pub mod error;
pub mod filter;
mod messages;
pub mod profiler;
pub mod reporting;
pub mod session;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError, Locale};
pub use error::{InsightError, Result as InsightResult, ResultExt};
pub use filter::{FilterCondition, FilterOperator, RowFilter};
pub use profiler::{DataProfiler, analyze, infer_column_type, pearson};
pub use reporting::{AnalysisReport, ReportGenerator};
pub use session::{ActiveFilter, AnalysisSession, FilterId};
pub use types::{
    AnalysisResult, CategoricalStats, ChartColumns, ChartKind, ChartRecommendation, ColumnStats,
    ColumnType, CorrelationPair, Dataset, NumericStats, Record, Value, record,
};
pub use utils::{is_boolean_literal, is_date_string, parse_date, parse_number, round_to};
