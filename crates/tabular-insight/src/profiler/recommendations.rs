//! Chart recommendation rules.

use std::collections::BTreeMap;

use crate::config::AnalysisConfig;
use crate::messages;
use crate::types::{ChartColumns, ChartKind, ChartRecommendation, ColumnStats};

/// Column groups the rules work from, each in header order.
pub(crate) struct ColumnGroups<'a> {
    pub numeric: Vec<&'a str>,
    pub category: Vec<&'a str>,
    pub date: Vec<&'a str>,
}

/// Build the ordered recommendation list (priorities 1 to 4).
///
/// A chart whose precondition fails is left out entirely.
pub(crate) fn recommend_charts(
    groups: &ColumnGroups<'_>,
    stats: &BTreeMap<String, ColumnStats>,
    config: &AnalysisConfig,
) -> Vec<ChartRecommendation> {
    let locale = config.locale;
    let mut recommendations = Vec::new();

    if let [x, y, ..] = groups.numeric.as_slice() {
        recommendations.push(ChartRecommendation {
            kind: ChartKind::Scatter,
            title: messages::scatter_title(locale),
            description: messages::scatter_description(locale, x, y),
            columns: ChartColumns {
                x: x.to_string(),
                y: Some(y.to_string()),
            },
            priority: 1,
        });
    }

    if let Some(measure) = groups.numeric.first()
        && let Some(category) =
            preferred_category(&groups.category, stats, config.bar_category_limit)
    {
        recommendations.push(ChartRecommendation {
            kind: ChartKind::Bar,
            title: messages::bar_title(locale),
            description: messages::bar_description(locale, category, measure),
            columns: ChartColumns {
                x: category.to_string(),
                y: Some(measure.to_string()),
            },
            priority: 2,
        });
    }

    if let Some(date) = groups.date.first()
        && let Some(measure) = groups.numeric.first()
    {
        recommendations.push(ChartRecommendation {
            kind: ChartKind::Line,
            title: messages::line_title(locale),
            description: messages::line_description(locale, measure),
            columns: ChartColumns {
                x: date.to_string(),
                y: Some(measure.to_string()),
            },
            priority: 3,
        });
    }

    if let Some(category) = preferred_category(&groups.category, stats, config.pie_category_limit) {
        recommendations.push(ChartRecommendation {
            kind: ChartKind::Pie,
            title: messages::pie_title(locale),
            description: messages::pie_description(locale, category),
            columns: ChartColumns {
                x: category.to_string(),
                y: None,
            },
            priority: 4,
        });
    }

    recommendations
}

/// First category column with fewer than `limit` distinct values, else the
/// first category column. Columns without stats never qualify.
fn preferred_category<'a>(
    categories: &[&'a str],
    stats: &BTreeMap<String, ColumnStats>,
    limit: usize,
) -> Option<&'a str> {
    categories
        .iter()
        .copied()
        .find(|column| {
            stats
                .get(*column)
                .and_then(ColumnStats::as_categorical)
                .is_some_and(|s| s.unique_values < limit)
        })
        .or_else(|| categories.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Locale;
    use crate::types::CategoricalStats;

    fn categorical(unique: usize) -> ColumnStats {
        ColumnStats::Categorical(CategoricalStats {
            count: 100,
            unique_values: unique,
            most_frequent: "v".to_string(),
            most_frequent_count: 10,
            most_frequent_percentage: 10.0,
        })
    }

    fn stats(entries: &[(&str, usize)]) -> BTreeMap<String, ColumnStats> {
        entries
            .iter()
            .map(|(name, unique)| (name.to_string(), categorical(*unique)))
            .collect()
    }

    fn kinds(recs: &[ChartRecommendation]) -> Vec<ChartKind> {
        recs.iter().map(|r| r.kind).collect()
    }

    #[test]
    fn test_all_four_charts() {
        let groups = ColumnGroups {
            numeric: vec!["Sales", "Cost"],
            category: vec!["Region"],
            date: vec!["Date"],
        };
        let recs = recommend_charts(&groups, &stats(&[("Region", 4)]), &AnalysisConfig::default());

        assert_eq!(
            kinds(&recs),
            vec![ChartKind::Scatter, ChartKind::Bar, ChartKind::Line, ChartKind::Pie]
        );
        let priorities: Vec<u8> = recs.iter().map(|r| r.priority).collect();
        assert_eq!(priorities, vec![1, 2, 3, 4]);
        assert_eq!(recs[0].columns.x, "Sales");
        assert_eq!(recs[0].columns.y.as_deref(), Some("Cost"));
        assert_eq!(recs[2].columns.x, "Date");
        assert_eq!(recs[3].columns.y, None);
    }

    #[test]
    fn test_only_categories_gives_pie() {
        let groups = ColumnGroups {
            numeric: vec![],
            category: vec!["Region"],
            date: vec!["Date"],
        };
        let recs = recommend_charts(&groups, &stats(&[("Region", 3)]), &AnalysisConfig::default());
        assert_eq!(kinds(&recs), vec![ChartKind::Pie]);
    }

    #[test]
    fn test_single_numeric_gives_nothing() {
        let groups = ColumnGroups {
            numeric: vec!["Sales"],
            category: vec![],
            date: vec![],
        };
        assert!(recommend_charts(&groups, &BTreeMap::new(), &AnalysisConfig::default()).is_empty());
    }

    #[test]
    fn test_category_preference_thresholds_are_independent() {
        let groups = ColumnGroups {
            numeric: vec!["Sales"],
            category: vec!["Store", "City", "Region"],
            date: vec![],
        };
        // Store: too many for both; City: fine for bar only; Region: fine for both
        let stats = stats(&[("Store", 50), ("City", 15), ("Region", 4)]);
        let recs = recommend_charts(&groups, &stats, &AnalysisConfig::default());

        assert_eq!(recs[0].kind, ChartKind::Bar);
        assert_eq!(recs[0].columns.x, "City");
        assert_eq!(recs[1].kind, ChartKind::Pie);
        assert_eq!(recs[1].columns.x, "Region");
    }

    #[test]
    fn test_category_falls_back_to_first() {
        let groups = ColumnGroups {
            numeric: vec!["Sales"],
            category: vec!["Id", "Name"],
            date: vec![],
        };
        let stats = stats(&[("Id", 500), ("Name", 480)]);
        let recs = recommend_charts(&groups, &stats, &AnalysisConfig::default());
        assert_eq!(recs[0].columns.x, "Id");
        assert_eq!(recs[1].columns.x, "Id");
    }

    #[test]
    fn test_missing_stats_do_not_qualify() {
        let groups = ColumnGroups {
            numeric: vec![],
            category: vec!["Empty", "Region"],
            date: vec![],
        };
        let recs = recommend_charts(&groups, &stats(&[("Region", 2)]), &AnalysisConfig::default());
        assert_eq!(recs[0].columns.x, "Region");
    }

    #[test]
    fn test_localized_titles() {
        let groups = ColumnGroups {
            numeric: vec!["a", "b"],
            category: vec![],
            date: vec![],
        };
        let config = AnalysisConfig::builder()
            .locale(Locale::TraditionalChinese)
            .build()
            .unwrap();
        let recs = recommend_charts(&groups, &BTreeMap::new(), &config);
        assert_eq!(recs[0].title, "相關性分析 (Scatter)");
        assert_eq!(recs[0].description, "探索 a 與 b 之間的關係");
    }
}
