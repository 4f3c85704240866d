//! Pairwise Pearson correlation between numeric columns.

use std::cmp::Ordering;

use tracing::debug;

use crate::types::{CorrelationPair, Dataset};
use crate::utils::round_to;

/// Pearson correlation coefficient of two equal-length series.
///
/// Returns `0.0` when either series is constant. The result is clamped to
/// `[-1, 1]` to absorb floating-point drift.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return 0.0;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let mut numerator = 0.0;
    let mut sum_sq_x = 0.0;
    let mut sum_sq_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        numerator += dx * dy;
        sum_sq_x += dx * dx;
        sum_sq_y += dy * dy;
    }

    if sum_sq_x == 0.0 || sum_sq_y == 0.0 {
        return 0.0;
    }

    let r = numerator / (sum_sq_x * sum_sq_y).sqrt();
    if r.is_finite() { r.clamp(-1.0, 1.0) } else { 0.0 }
}

/// Correlate every unordered pair of `columns` (i < j, in the given order).
///
/// Each pair only uses rows where both values are numeric. Pairs with fewer
/// than `min_pairs` observations are skipped. The result is sorted by
/// descending absolute coefficient; equal magnitudes keep generation order.
pub(crate) fn correlate_columns(
    dataset: &Dataset,
    columns: &[&str],
    min_pairs: usize,
) -> Vec<CorrelationPair> {
    let mut pairs = Vec::new();

    for (i, &first) in columns.iter().enumerate() {
        for &second in &columns[i + 1..] {
            let (xs, ys): (Vec<f64>, Vec<f64>) = dataset
                .column_values(first)
                .zip(dataset.column_values(second))
                .filter_map(|(a, b)| Some((a.as_number()?, b.as_number()?)))
                .unzip();

            if xs.len() < min_pairs {
                debug!(
                    first,
                    second,
                    observations = xs.len(),
                    "Skipping correlation with too few paired observations"
                );
                continue;
            }

            pairs.push(CorrelationPair {
                column1: first.to_string(),
                column2: second.to_string(),
                correlation: round_to(pearson(&xs, &ys), 3),
            });
        }
    }

    pairs.sort_by(|a, b| {
        b.correlation
            .abs()
            .partial_cmp(&a.correlation.abs())
            .unwrap_or(Ordering::Equal)
    });
    pairs
}
