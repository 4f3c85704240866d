//! Report generation module.
//!
//! Turns an [`AnalysisResult`](crate::AnalysisResult) into an
//! [`AnalysisReport`] suitable for:
//! - JSON output to stdout (`--json` CLI flag)
//! - JSON or Markdown files (`--emit-report` CLI flag)
//! - Programmatic access in library mode
//!
//! # Example
//!
//! ```rust,ignore
//! use tabular_insight::reporting::ReportGenerator;
//! use tabular_insight::Locale;
//!
//! let generator = ReportGenerator::new(PathBuf::from("output"), Locale::English);
//! let report = generator.build_report("data/sales.csv", &analysis);
//!
//! // Print as Markdown
//! println!("{}", ReportGenerator::render_markdown(&report));
//!
//! // Or write to file
//! generator.write_report_to_file(&report, "sales")?;
//! ```

mod generator;

pub use generator::{AnalysisReport, ColumnReport, ReportGenerator, ReportOverview};
