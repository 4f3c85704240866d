//! Natural-language insight rules.

use crate::config::AnalysisConfig;
use crate::messages;
use crate::types::{CorrelationPair, NumericStats};

/// Evaluate the insight rules in order, appending one sentence per rule that fires.
///
/// `first_numeric` holds the stats of the first numeric column, if any.
/// When no rule fires, a single generic sentence is returned.
pub(crate) fn generate_insights(
    rows: usize,
    correlations: &[CorrelationPair],
    first_numeric: Option<(&str, &NumericStats)>,
    config: &AnalysisConfig,
) -> Vec<String> {
    let locale = config.locale;
    let mut insights = Vec::new();

    if rows > config.large_dataset_rows {
        insights.push(messages::large_dataset(locale, rows));
    }

    if rows < config.small_dataset_rows {
        insights.push(messages::small_dataset(locale, rows));
    }

    if let Some(top) = correlations.first()
        && top.correlation.abs() > config.strong_correlation
    {
        insights.push(messages::strong_correlation(
            locale,
            &top.column1,
            &top.column2,
            top.correlation,
        ));
    }

    if let Some((column, stats)) = first_numeric
        && stats.mean != 0.0
        && stats.std_dev != 0.0
        && stats.std_dev / stats.mean > config.high_variation
    {
        insights.push(messages::high_variance(locale, column, config.high_variation));
    }

    if insights.is_empty() {
        insights.push(messages::loaded_successfully(locale));
    }

    insights
}
