//! Type inference logic for column analysis.

use crate::types::{ColumnType, Dataset};
use crate::utils::{is_boolean_literal, is_date_string, is_numeric_string};

/// Candidate types still consistent with every value seen so far.
#[derive(Debug, Clone, Copy)]
struct TypeCandidates {
    number: bool,
    date: bool,
    boolean: bool,
}

impl TypeCandidates {
    fn new() -> Self {
        Self {
            number: true,
            date: true,
            boolean: true,
        }
    }

    fn observe(&mut self, raw: &str) {
        let trimmed = raw.trim();
        if self.number && !is_numeric_string(trimmed) {
            self.number = false;
        }
        if self.date && !is_date_string(trimmed) {
            self.date = false;
        }
        if self.boolean && !is_boolean_literal(trimmed) {
            self.boolean = false;
        }
    }

    /// Boolean outranks number, which outranks date.
    fn resolve(self) -> ColumnType {
        if self.boolean {
            ColumnType::Boolean
        } else if self.number {
            ColumnType::Number
        } else if self.date {
            ColumnType::Date
        } else {
            ColumnType::Text
        }
    }
}

/// Infer a column type from its first `sample_size` non-missing values.
///
/// An empty sample leaves every candidate standing, so it resolves to
/// [`ColumnType::Boolean`]. A column that appears in no record behaves the
/// same way.
pub(crate) fn infer_column_type_with(
    dataset: &Dataset,
    column: &str,
    sample_size: usize,
) -> ColumnType {
    let mut candidates = TypeCandidates::new();

    for value in dataset.present_values(column).take(sample_size) {
        candidates.observe(&value.to_text());
        if !(candidates.number || candidates.date || candidates.boolean) {
            break;
        }
    }

    candidates.resolve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Value, record};

    fn single_column(values: Vec<Value>) -> Dataset {
        Dataset::new(
            vec!["col".to_string()],
            values.into_iter().map(|v| record([("col", v)])).collect(),
        )
    }

    fn infer(values: Vec<Value>) -> ColumnType {
        infer_column_type_with(&single_column(values), "col", 20)
    }

    // ==================== priority rules ====================

    #[test]
    fn test_infer_numbers() {
        let values = vec![1i64.into(), 2i64.into(), 3i64.into(), 4i64.into()];
        assert_eq!(infer(values), ColumnType::Number);
    }

    #[test]
    fn test_infer_numeric_strings() {
        let values = vec!["1.5".into(), " 2.5 ".into(), "-3".into()];
        assert_eq!(infer(values), ColumnType::Number);
    }

    #[test]
    fn test_infer_zero_one_is_boolean() {
        let values = vec!["0".into(), "1".into(), "1".into(), "0".into()];
        assert_eq!(infer(values), ColumnType::Boolean);
    }

    #[test]
    fn test_infer_numeric_zero_one_is_boolean() {
        let values = vec![Value::Number(0.0), Value::Number(1.0)];
        assert_eq!(infer(values), ColumnType::Boolean);
    }

    #[test]
    fn test_infer_yes_no_mixed_case() {
        let values = vec!["Yes".into(), "NO".into(), "true".into(), "False".into()];
        assert_eq!(infer(values), ColumnType::Boolean);
    }

    #[test]
    fn test_infer_native_bools() {
        let values = vec![true.into(), false.into()];
        assert_eq!(infer(values), ColumnType::Boolean);
    }

    #[test]
    fn test_infer_dates() {
        let values = vec!["2023-01-05".into(), "2023-02-11".into(), "2023-03-28".into()];
        assert_eq!(infer(values), ColumnType::Date);
    }

    #[test]
    fn test_infer_text() {
        let values = vec!["Taipei".into(), "Tainan".into()];
        assert_eq!(infer(values), ColumnType::Text);
    }

    #[test]
    fn test_infer_mixed_number_and_text_is_text() {
        let values = vec!["1".into(), "2".into(), "three".into()];
        assert_eq!(infer(values), ColumnType::Text);
    }

    // ==================== sampling ====================

    #[test]
    fn test_all_missing_infers_boolean() {
        let values = vec![Value::Missing, "".into(), Value::Missing];
        assert_eq!(infer(values), ColumnType::Boolean);
    }

    #[test]
    fn test_unknown_column_infers_boolean() {
        let ds = single_column(vec!["a".into()]);
        assert_eq!(
            infer_column_type_with(&ds, "nope", 20),
            ColumnType::Boolean
        );
    }

    #[test]
    fn test_missing_values_do_not_count_toward_sample() {
        // 25 missing values followed by text: the text is still sampled
        let mut values: Vec<Value> = (0..25).map(|_| Value::Missing).collect();
        values.push("apple".into());
        assert_eq!(infer(values), ColumnType::Text);
    }

    #[test]
    fn test_values_beyond_sample_are_ignored() {
        let mut values: Vec<Value> = (0..20).map(|i| Value::Number(i as f64 + 2.0)).collect();
        values.push("not a number".into());
        assert_eq!(infer(values), ColumnType::Number);
    }

    #[test]
    fn test_whitespace_only_value_is_sampled_as_text() {
        let values = vec!["   ".into(), "1".into()];
        assert_eq!(infer(values), ColumnType::Text);
    }

    #[test]
    fn test_custom_sample_size() {
        let values = vec!["5".into(), "6".into(), "x".into()];
        let ds = single_column(values);
        assert_eq!(infer_column_type_with(&ds, "col", 2), ColumnType::Number);
        assert_eq!(infer_column_type_with(&ds, "col", 3), ColumnType::Text);
    }
}
