//! Configuration types for the analysis engine.
//!
//! Every threshold the profiler uses lives here.

use serde::{Deserialize, Serialize};

/// Language used for chart titles, descriptions and insight sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Locale {
    /// English
    #[default]
    #[serde(rename = "en")]
    English,
    /// Traditional Chinese (Taiwan)
    #[serde(rename = "zh-tw")]
    TraditionalChinese,
}

/// Configuration for [`crate::DataProfiler`].
///
/// Use [`AnalysisConfig::builder()`] to create a validated configuration
/// with a fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use tabular_insight::config::{AnalysisConfig, Locale};
///
/// let config = AnalysisConfig::builder()
///     .strong_correlation(0.8)
///     .locale(Locale::TraditionalChinese)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of non-missing values examined when inferring a column type.
    /// Default: 20
    pub type_sample_size: usize,

    /// Minimum number of paired observations required to report a correlation.
    /// Default: 2
    pub min_paired_observations: usize,

    /// A bar chart prefers a category column with fewer distinct values than this.
    /// Default: 20
    pub bar_category_limit: usize,

    /// A pie chart prefers a category column with fewer distinct values than this.
    /// Default: 10
    pub pie_category_limit: usize,

    /// Row count above which the large-dataset insight is emitted.
    /// Default: 1000
    pub large_dataset_rows: usize,

    /// Row count below which the small-dataset insight is emitted.
    /// Default: 10
    pub small_dataset_rows: usize,

    /// Absolute correlation above which the strong-correlation insight is emitted.
    /// Default: 0.7
    pub strong_correlation: f64,

    /// Coefficient of variation above which the high-variance insight is emitted.
    /// Default: 1.0
    pub high_variation: f64,

    /// Language of generated text.
    /// Default: English
    pub locale: Locale,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            type_sample_size: 20,
            min_paired_observations: 2,
            bar_category_limit: 20,
            pie_category_limit: 10,
            large_dataset_rows: 1000,
            small_dataset_rows: 10,
            strong_correlation: 0.7,
            high_variation: 1.0,
            locale: Locale::default(),
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.type_sample_size == 0 {
            return Err(ConfigValidationError::ZeroSampleSize);
        }

        if self.min_paired_observations < 2 {
            return Err(ConfigValidationError::TooFewPairs(
                self.min_paired_observations,
            ));
        }

        if !(0.0..=1.0).contains(&self.strong_correlation) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "strong_correlation".to_string(),
                value: self.strong_correlation,
            });
        }

        if !self.high_variation.is_finite() || self.high_variation <= 0.0 {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "high_variation".to_string(),
                value: self.high_variation,
            });
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value}")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Type sample size must be at least 1")]
    ZeroSampleSize,

    #[error("Invalid minimum paired observations: {0} (must be at least 2)")]
    TooFewPairs(usize),
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    type_sample_size: Option<usize>,
    min_paired_observations: Option<usize>,
    bar_category_limit: Option<usize>,
    pie_category_limit: Option<usize>,
    large_dataset_rows: Option<usize>,
    small_dataset_rows: Option<usize>,
    strong_correlation: Option<f64>,
    high_variation: Option<f64>,
    locale: Option<Locale>,
}

impl AnalysisConfigBuilder {
    /// Set how many non-missing values type inference examines.
    pub fn type_sample_size(mut self, size: usize) -> Self {
        self.type_sample_size = Some(size);
        self
    }

    /// Set the minimum number of paired observations for a correlation.
    pub fn min_paired_observations(mut self, n: usize) -> Self {
        self.min_paired_observations = Some(n);
        self
    }

    /// Set the distinct-value limit for the bar chart category column.
    pub fn bar_category_limit(mut self, limit: usize) -> Self {
        self.bar_category_limit = Some(limit);
        self
    }

    /// Set the distinct-value limit for the pie chart category column.
    pub fn pie_category_limit(mut self, limit: usize) -> Self {
        self.pie_category_limit = Some(limit);
        self
    }

    /// Set the row count above which a dataset is called large.
    pub fn large_dataset_rows(mut self, rows: usize) -> Self {
        self.large_dataset_rows = Some(rows);
        self
    }

    /// Set the row count below which a dataset is called small.
    pub fn small_dataset_rows(mut self, rows: usize) -> Self {
        self.small_dataset_rows = Some(rows);
        self
    }

    /// Set the absolute correlation that counts as strong.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0.0 and 1.0
    pub fn strong_correlation(mut self, threshold: f64) -> Self {
        self.strong_correlation = Some(threshold);
        self
    }

    /// Set the coefficient of variation that counts as high variance.
    pub fn high_variation(mut self, threshold: f64) -> Self {
        self.high_variation = Some(threshold);
        self
    }

    /// Set the language of generated text.
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let defaults = AnalysisConfig::default();
        let config = AnalysisConfig {
            type_sample_size: self.type_sample_size.unwrap_or(defaults.type_sample_size),
            min_paired_observations: self
                .min_paired_observations
                .unwrap_or(defaults.min_paired_observations),
            bar_category_limit: self.bar_category_limit.unwrap_or(defaults.bar_category_limit),
            pie_category_limit: self.pie_category_limit.unwrap_or(defaults.pie_category_limit),
            large_dataset_rows: self.large_dataset_rows.unwrap_or(defaults.large_dataset_rows),
            small_dataset_rows: self.small_dataset_rows.unwrap_or(defaults.small_dataset_rows),
            strong_correlation: self.strong_correlation.unwrap_or(defaults.strong_correlation),
            high_variation: self.high_variation.unwrap_or(defaults.high_variation),
            locale: self.locale.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.type_sample_size, 20);
        assert_eq!(config.min_paired_observations, 2);
        assert_eq!(config.bar_category_limit, 20);
        assert_eq!(config.pie_category_limit, 10);
        assert_eq!(config.large_dataset_rows, 1000);
        assert_eq!(config.small_dataset_rows, 10);
        assert_eq!(config.strong_correlation, 0.7);
        assert_eq!(config.high_variation, 1.0);
        assert_eq!(config.locale, Locale::English);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let config = AnalysisConfig::builder().build().unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = AnalysisConfig::builder()
            .type_sample_size(50)
            .strong_correlation(0.9)
            .locale(Locale::TraditionalChinese)
            .build()
            .unwrap();

        assert_eq!(config.type_sample_size, 50);
        assert_eq!(config.strong_correlation, 0.9);
        assert_eq!(config.locale, Locale::TraditionalChinese);
    }

    #[test]
    fn test_validation_zero_sample_size() {
        let result = AnalysisConfig::builder().type_sample_size(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::ZeroSampleSize
        ));
    }

    #[test]
    fn test_validation_invalid_correlation_threshold() {
        let result = AnalysisConfig::builder().strong_correlation(1.5).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidThreshold { .. }
        ));
    }

    #[test]
    fn test_validation_too_few_pairs() {
        let result = AnalysisConfig::builder().min_paired_observations(1).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::TooFewPairs(1)
        ));
    }

    #[test]
    fn test_config_from_partial_json() {
        // Missing fields fall back to defaults
        let json = r#"{ "strong_correlation": 0.5, "locale": "zh-tw" }"#;
        let config: AnalysisConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.strong_correlation, 0.5);
        assert_eq!(config.locale, Locale::TraditionalChinese);
        assert_eq!(config.type_sample_size, 20);
    }
}
