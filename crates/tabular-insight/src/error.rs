//! Custom error types for the analysis engine.
//!
//! Malformed individual values are filtered out during analysis and never
//! surface here. What remains are structurally invalid inputs, configuration
//! problems and I/O at the decoding/reporting edges.
//!
//! Errors are serializable so a UI host can tell "no data" apart from a
//! successful but sparse profile without parsing message text.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

use crate::config::ConfigValidationError;

/// The main error type for the analysis engine.
#[derive(Error, Debug)]
pub enum InsightError {
    /// The dataset has no rows.
    #[error("Dataset contains no rows")]
    EmptyDataset,

    /// The header list is empty.
    #[error("Dataset has no columns")]
    NoHeaders,

    /// A session was asked to analyze before any data was loaded.
    #[error("No data loaded")]
    NoDataLoaded,

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigValidationError),

    /// A filter expression could not be parsed.
    #[error("Invalid filter expression '{expression}': {reason}")]
    InvalidFilter { expression: String, reason: String },

    /// Input file format is not supported by the decoder.
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<InsightError>,
    },
}

impl InsightError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        InsightError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyDataset => "EMPTY_DATASET",
            Self::NoHeaders => "NO_HEADERS",
            Self::NoDataLoaded => "NO_DATA_LOADED",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::InvalidFilter { .. } => "INVALID_FILTER",
            Self::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error means there was simply nothing to analyze.
    ///
    /// Hosts typically show an empty-state view for these rather than a
    /// failure message.
    pub fn is_no_data(&self) -> bool {
        match self {
            Self::EmptyDataset | Self::NoHeaders | Self::NoDataLoaded => true,
            Self::WithContext { source, .. } => source.is_no_data(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for InsightError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("InsightError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, InsightError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| InsightError::Polars(e).with_context(context))
    }
}
