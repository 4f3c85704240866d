//! Statistical analysis functions for column profiling.

use std::collections::HashMap;

use tracing::warn;

use crate::types::{CategoricalStats, ColumnStats, ColumnType, Dataset, NumericStats, Value};
use crate::utils::round_to;

/// Compute the stats entry for one column, or `None` when it has no usable values.
pub(crate) fn column_stats(
    dataset: &Dataset,
    column: &str,
    column_type: ColumnType,
) -> Option<ColumnStats> {
    match column_type {
        ColumnType::Number => {
            let present = dataset.present_values(column).count();
            let numbers: Vec<f64> = dataset
                .present_values(column)
                .filter_map(Value::as_number)
                .collect();
            if numbers.len() < present {
                warn!(
                    column,
                    dropped = present - numbers.len(),
                    "Ignoring unparsable values in numeric column"
                );
            }
            numeric_stats(numbers).map(ColumnStats::Numeric)
        }
        ColumnType::Boolean | ColumnType::Date | ColumnType::Text => {
            categorical_stats(dataset.present_values(column)).map(ColumnStats::Categorical)
        }
    }
}

/// Descriptive statistics over a set of numbers.
///
/// The standard deviation is the population one (divisor N).
pub(crate) fn numeric_stats(mut numbers: Vec<f64>) -> Option<NumericStats> {
    if numbers.is_empty() {
        return None;
    }

    numbers.sort_by(f64::total_cmp);

    let count = numbers.len();
    let n = count as f64;
    let mean = mean_of(&numbers);
    let min = numbers[0];
    let max = numbers[count - 1];
    let mid = count / 2;
    let median = if count % 2 == 1 {
        numbers[mid]
    } else {
        numbers[mid - 1] / 2.0 + numbers[mid] / 2.0
    };
    let std_dev = population_std_dev(&numbers, mean, n);

    Some(NumericStats {
        count,
        mean: round_to(mean, 2),
        median: round_to(median, 2),
        min,
        max,
        range: max - min,
        std_dev: round_to(std_dev, 2),
    })
}

fn mean_of(numbers: &[f64]) -> f64 {
    let n = numbers.len() as f64;
    let sum = numbers.iter().sum::<f64>();
    if sum.is_finite() {
        sum / n
    } else {
        // Near f64::MAX the plain sum overflows
        numbers.iter().map(|v| v / n).sum()
    }
}

fn population_std_dev(numbers: &[f64], mean: f64, n: f64) -> f64 {
    let variance = numbers.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    if variance.is_finite() {
        return variance.sqrt();
    }

    // Squared deviations overflowed; scale by the largest deviation first
    let scale = numbers
        .iter()
        .map(|v| (v - mean).abs())
        .fold(0.0, f64::max);
    let scaled = numbers
        .iter()
        .map(|v| ((v - mean) / scale).powi(2))
        .sum::<f64>()
        / n;
    scale * scaled.sqrt()
}

/// Frequency statistics keyed on each value's string form.
///
/// Ties for the most frequent value go to the value that occurred first.
pub(crate) fn categorical_stats<'a>(
    values: impl Iterator<Item = &'a Value>,
) -> Option<CategoricalStats> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut total = 0usize;

    for value in values {
        total += 1;
        let key = value.to_text().into_owned();
        match counts.get_mut(&key) {
            Some(count) => *count += 1,
            None => {
                counts.insert(key.clone(), 1);
                order.push(key);
            }
        }
    }

    if total == 0 {
        return None;
    }

    let mut most_frequent = "";
    let mut most_frequent_count = 0usize;
    for key in &order {
        let count = counts[key];
        if count > most_frequent_count {
            most_frequent_count = count;
            most_frequent = key;
        }
    }

    Some(CategoricalStats {
        count: total,
        unique_values: order.len(),
        most_frequent: most_frequent.to_string(),
        most_frequent_count,
        most_frequent_percentage: round_to(most_frequent_count as f64 / total as f64 * 100.0, 2),
    })
}
